//! Credentials handed in by the host

mod access_token;

pub use access_token::AccessToken;
