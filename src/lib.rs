//! Team Provisioner
//!
//! Bulk team provisioning driven by spreadsheet uploads:
//! - CSV and XLSX parsing into team requests
//! - Group, team, channel and membership creation against a directory API
//! - Guest invitations for members outside the organisation
//! - Listing and archiving existing teams

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use infrastructure::graph::{GraphDirectoryClient, HttpClient};
use infrastructure::services::{TeamCatalog, UploadHandler, WorkspaceProvisioner};
use infrastructure::spreadsheet::SpreadsheetParser;
use tracing::info;

/// Directory client used outside tests
pub type GraphDirectory = GraphDirectoryClient<HttpClient>;

/// Build the directory client from configuration
pub fn create_directory_client(config: &AppConfig) -> anyhow::Result<Arc<GraphDirectory>> {
    let http = HttpClient::with_timeout(Duration::from_secs(config.directory.timeout_secs))?;
    let client = GraphDirectoryClient::with_guest_settings(
        http,
        &config.directory.root_uri,
        config.provisioning.guest_settings(),
    )?;

    info!(root = %client.root(), "Directory client ready");
    Ok(Arc::new(client))
}

/// Build the upload handler with all of its collaborators
pub fn create_upload_handler(config: &AppConfig) -> anyhow::Result<UploadHandler<GraphDirectory>> {
    let directory = create_directory_client(config)?;
    let provisioner =
        WorkspaceProvisioner::new(directory).with_retry(config.provisioning.retry_policy());

    Ok(UploadHandler::new(SpreadsheetParser::new(), provisioner))
}

pub fn create_team_catalog(config: &AppConfig) -> anyhow::Result<TeamCatalog<GraphDirectory>> {
    Ok(TeamCatalog::new(create_directory_client(config)?))
}
