use serde::Deserialize;

use crate::domain::TeamCreationRetry;
use crate::infrastructure::graph::{GuestInvitationSettings, DEFAULT_ROOT_URI};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub directory: DirectoryConfig,
    pub provisioning: ProvisioningConfig,
    pub logging: LoggingConfig,
}

/// Remote directory connection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub root_uri: String,
    /// Identity provider connection the host signs users in with
    pub connection_name: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvisioningConfig {
    pub team_create_attempts: u32,
    pub team_create_backoff_ms: u64,
    pub guest_redirect_url: String,
    pub guest_invite_message: String,
    pub send_guest_invitation: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            root_uri: DEFAULT_ROOT_URI.to_string(),
            connection_name: String::new(),
            timeout_secs: 30,
        }
    }
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        let retry = TeamCreationRetry::default();
        let guests = GuestInvitationSettings::default();

        Self {
            team_create_attempts: retry.max_attempts,
            team_create_backoff_ms: retry.backoff_ms,
            guest_redirect_url: guests.redirect_url,
            guest_invite_message: guests.message,
            send_guest_invitation: guests.send_invitation_message,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl ProvisioningConfig {
    pub fn retry_policy(&self) -> TeamCreationRetry {
        TeamCreationRetry::new(self.team_create_attempts).with_backoff(self.team_create_backoff_ms)
    }

    pub fn guest_settings(&self) -> GuestInvitationSettings {
        GuestInvitationSettings {
            redirect_url: self.guest_redirect_url.clone(),
            message: self.guest_invite_message.clone(),
            send_invitation_message: self.send_guest_invitation,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.directory.root_uri, "https://graph.microsoft.com/v1.0/");
        assert_eq!(config.directory.timeout_secs, 30);
        assert_eq!(config.provisioning.retry_policy().attempts(), 4);
        assert_eq!(
            config.provisioning.retry_policy().backoff(),
            Duration::from_secs(9)
        );
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [provisioning]
                team_create_attempts = 2

                [logging]
                format = "json"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.provisioning.team_create_attempts, 2);
        assert_eq!(config.provisioning.team_create_backoff_ms, 9000);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_guest_settings() {
        let guests = ProvisioningConfig::default().guest_settings();

        assert_eq!(guests.redirect_url, "https://teams.microsoft.com");
        assert_eq!(guests.message, "Welcome to Teams");
        assert!(guests.send_invitation_message);
    }
}
