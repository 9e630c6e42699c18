//! Infrastructure services

mod provisioning_service;
mod team_catalog_service;
mod upload_service;

pub use provisioning_service::WorkspaceProvisioner;
pub use team_catalog_service::TeamCatalog;
pub use upload_service::{UploadHandler, UNREADABLE_UPLOAD_MESSAGE};
