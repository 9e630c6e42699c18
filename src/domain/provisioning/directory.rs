use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::handle::{GroupHandle, PrincipalId, TeamHandle};
use crate::domain::credentials::AccessToken;
use crate::domain::DomainError;

/// A team as listed by the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub id: String,
    pub display_name: String,
}

/// Remote directory operations used by provisioning.
///
/// Identifiers of created resources are returned raw; callers validate them.
/// A non-2xx answer is `DomainError::Remote`, a network failure is
/// `DomainError::Transport`. Implementations never retry on their own.
#[async_trait]
pub trait DirectoryClient: Send + Sync + Debug {
    /// Look up a principal by email. `Ok(None)` when nobody matches.
    async fn resolve_user_id(
        &self,
        token: &AccessToken,
        email: &str,
    ) -> Result<Option<String>, DomainError>;

    /// Invite an external guest and return the invited principal id
    async fn invite_guest(&self, token: &AccessToken, email: &str) -> Result<String, DomainError>;

    async fn create_group(
        &self,
        token: &AccessToken,
        display_name: &str,
        owner: &PrincipalId,
    ) -> Result<String, DomainError>;

    /// Turn a group into a team. May fail until the group has replicated.
    async fn create_team(
        &self,
        token: &AccessToken,
        group: &GroupHandle,
    ) -> Result<String, DomainError>;

    async fn create_channel(
        &self,
        token: &AccessToken,
        team: &TeamHandle,
        name: &str,
    ) -> Result<String, DomainError>;

    async fn add_member(
        &self,
        token: &AccessToken,
        team: &TeamHandle,
        principal: &PrincipalId,
    ) -> Result<(), DomainError>;

    /// First group whose display name equals `name`
    async fn find_group_by_name(
        &self,
        token: &AccessToken,
        name: &str,
    ) -> Result<Option<String>, DomainError>;

    async fn list_teams(&self, token: &AccessToken) -> Result<Vec<TeamSummary>, DomainError>;

    async fn is_team_archived(
        &self,
        token: &AccessToken,
        team: &TeamHandle,
    ) -> Result<bool, DomainError>;

    async fn archive_team(&self, token: &AccessToken, team: &TeamHandle)
        -> Result<(), DomainError>;
}
