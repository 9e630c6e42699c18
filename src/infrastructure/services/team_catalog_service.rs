//! Team listing and archiving

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::{AccessToken, DirectoryClient, DomainError, TeamHandle, TeamSummary};

/// Read and archive teams already present in the directory
#[derive(Debug)]
pub struct TeamCatalog<D: DirectoryClient> {
    directory: Arc<D>,
}

impl<D: DirectoryClient> TeamCatalog<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// All teams, or only those not archived.
    ///
    /// A team whose archive state cannot be read is kept in the active list.
    #[instrument(skip(self, token))]
    pub async fn list(
        &self,
        token: &AccessToken,
        active_only: bool,
    ) -> Result<Vec<TeamSummary>, DomainError> {
        let teams = self.directory.list_teams(token).await?;

        if !active_only {
            return Ok(teams);
        }

        let mut active = Vec::with_capacity(teams.len());
        for team in teams {
            if !self.is_archived(token, &team).await {
                active.push(team);
            }
        }

        Ok(active)
    }

    async fn is_archived(&self, token: &AccessToken, team: &TeamSummary) -> bool {
        let handle = match TeamHandle::parse(&team.id) {
            Ok(handle) => handle,
            Err(e) => {
                warn!(team = %team.display_name, error = %e, "Skipping archive check");
                return false;
            }
        };

        match self.directory.is_team_archived(token, &handle).await {
            Ok(archived) => archived,
            Err(e) => {
                warn!(team = %team.display_name, error = %e, "Archive check failed");
                false
            }
        }
    }

    /// Archive the team whose display name matches exactly
    #[instrument(skip(self, token))]
    pub async fn archive_by_name(
        &self,
        token: &AccessToken,
        name: &str,
    ) -> Result<TeamHandle, DomainError> {
        let raw = self
            .directory
            .find_group_by_name(token, name)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", name)))?;

        let team = TeamHandle::parse(&raw)?;
        self.directory.archive_team(token, &team).await?;

        info!(team = %name, team_id = %team, "Team archived");
        Ok(team)
    }
}
