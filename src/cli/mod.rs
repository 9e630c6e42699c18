//! CLI module for Team Provisioner
//!
//! Provides subcommands for driving provisioning from a terminal:
//! - `create`: create the teams listed in a spreadsheet
//! - `update`: add channels and members to existing teams
//! - `parse`: check a spreadsheet without touching the directory
//! - `teams`: list or archive existing teams

pub mod provision;
pub mod teams;

use clap::{Args, Parser, Subcommand};
use ::config::ConfigError;
use tracing::warn;

use crate::config::AppConfig;
use crate::domain::AccessToken;
use crate::infrastructure::logging;

/// Team Provisioner - bulk team creation from spreadsheets
#[derive(Parser)]
#[command(name = "team-provisioner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create one team per spreadsheet row
    Create(provision::ProvisionArgs),

    /// Add channels and members to existing teams
    Update(provision::ProvisionArgs),

    /// Parse a spreadsheet and print the team requests
    Parse(provision::ParseArgs),

    /// Inspect or archive existing teams
    Teams(teams::TeamsArgs),
}

/// Bearer token for the directory API
#[derive(Args, Clone)]
pub struct TokenArgs {
    /// Access token issued for the signed-in user
    #[arg(long, env = "GRAPH_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl TokenArgs {
    pub fn access_token(&self, config: &AppConfig) -> anyhow::Result<AccessToken> {
        let raw = self.token.as_deref().unwrap_or_default();
        if raw.trim().is_empty() {
            let connection = if config.directory.connection_name.is_empty() {
                "directory".to_string()
            } else {
                format!("'{}'", config.directory.connection_name)
            };

            anyhow::bail!(
                "No access token. Sign in through the {} connection and pass --token or set GRAPH_ACCESS_TOKEN",
                connection
            );
        }

        Ok(AccessToken::new(raw)?)
    }
}

/// Load `.env`, configuration and logging
pub(crate) fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let (config, load_error) = config_or_default(AppConfig::load());
    logging::init_logging(&config.logging);

    // Logging only exists once the subscriber is installed
    if let Some(error) = load_error {
        warn!(error = %error, "Failed to load configuration, using defaults");
    }

    config
}

fn config_or_default(
    loaded: Result<AppConfig, ConfigError>,
) -> (AppConfig, Option<ConfigError>) {
    match loaded {
        Ok(config) => (config, None),
        Err(error) => (AppConfig::default(), Some(error)),
    }
}
