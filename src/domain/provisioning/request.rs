//! Team provisioning requests

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a team request
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamRequestError {
    #[error("Team name cannot be empty")]
    EmptyName,
}

/// Whether an upload creates new teams or extends existing ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisioningIntent {
    Create,
    Update,
}

impl std::fmt::Display for ProvisioningIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
        }
    }
}

/// One spreadsheet row: a team with the channels, members and guests to add.
///
/// For a create, the first member email is the owner of the new team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRequest {
    team_name: String,
    channel_names: Vec<String>,
    member_emails: Vec<String>,
    guest_emails: Vec<String>,
}

impl TeamRequest {
    pub fn new(team_name: impl Into<String>) -> Result<Self, TeamRequestError> {
        let team_name = team_name.into().trim().to_string();
        validate_team_name(&team_name)?;

        Ok(Self {
            team_name,
            channel_names: Vec::new(),
            member_emails: Vec::new(),
            guest_emails: Vec::new(),
        })
    }

    pub fn with_channels<I, S>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.channel_names = channels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.member_emails = members.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_guests<I, S>(mut self, guests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.guest_emails = guests.into_iter().map(Into::into).collect();
        self
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn channel_names(&self) -> &[String] {
        &self.channel_names
    }

    pub fn member_emails(&self) -> &[String] {
        &self.member_emails
    }

    pub fn guest_emails(&self) -> &[String] {
        &self.guest_emails
    }

    /// The owner of a new team: the first member email
    pub fn owner_email(&self) -> Option<&str> {
        self.member_emails.first().map(String::as_str)
    }

    /// Members to add on top of the owner when creating a team
    pub fn additional_members(&self) -> &[String] {
        self.member_emails.get(1..).unwrap_or(&[])
    }
}

/// Validate a team display name
pub fn validate_team_name(name: &str) -> Result<(), TeamRequestError> {
    if name.trim().is_empty() {
        return Err(TeamRequestError::EmptyName);
    }

    Ok(())
}
