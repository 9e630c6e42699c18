//! Directory REST API adapter

mod directory_client;
mod http_client;
mod models;

pub use directory_client::{
    mail_nickname, odata_literal, GraphDirectoryClient, GuestInvitationSettings, DEFAULT_ROOT_URI,
};
pub use http_client::{HttpClient, HttpClientTrait};

#[cfg(test)]
pub use http_client::mock;
