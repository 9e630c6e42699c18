//! Workspace provisioning: groups, teams, channels and memberships

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::domain::{
    AccessToken, ChannelHandle, DirectoryClient, GroupHandle, HardFailure, PrincipalId,
    ProvisioningIntent, ProvisioningOutcome, StatusReporter, StepFailure, StepKind,
    TeamCreationRetry, TeamHandle, TeamRequest,
};

/// Provisions teams from parsed requests.
///
/// Requests run one after another. A request never aborts its siblings: every
/// failure ends up in that request's [`ProvisioningOutcome`].
#[derive(Debug)]
pub struct WorkspaceProvisioner<D: DirectoryClient> {
    directory: Arc<D>,
    retry: TeamCreationRetry,
}

impl<D: DirectoryClient> WorkspaceProvisioner<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self {
            directory,
            retry: TeamCreationRetry::default(),
        }
    }

    pub fn with_retry(mut self, retry: TeamCreationRetry) -> Self {
        self.retry = retry;
        self
    }

    pub async fn provision(
        &self,
        token: &AccessToken,
        requests: &[TeamRequest],
        intent: ProvisioningIntent,
        reporter: &dyn StatusReporter,
    ) -> Vec<ProvisioningOutcome> {
        match intent {
            ProvisioningIntent::Create => self.provision_new(token, requests, reporter).await,
            ProvisioningIntent::Update => self.provision_update(token, requests, reporter).await,
        }
    }

    /// Create a team per request: group, team, channels, members, guests
    #[instrument(skip(self, token, requests, reporter), fields(teams = requests.len()))]
    pub async fn provision_new(
        &self,
        token: &AccessToken,
        requests: &[TeamRequest],
        reporter: &dyn StatusReporter,
    ) -> Vec<ProvisioningOutcome> {
        let mut outcomes = Vec::with_capacity(requests.len());

        for request in requests {
            let outcome = match self.create_one(token, request, reporter).await {
                Ok(failures) => ProvisioningOutcome::from_failures(request.team_name(), failures),
                Err(failure) => ProvisioningOutcome::hard_failure(request.team_name(), failure),
            };

            self.finish(&outcome, reporter).await;
            outcomes.push(outcome);
        }

        outcomes
    }

    /// Add channels and members to existing teams, found by display name
    #[instrument(skip(self, token, requests, reporter), fields(teams = requests.len()))]
    pub async fn provision_update(
        &self,
        token: &AccessToken,
        requests: &[TeamRequest],
        reporter: &dyn StatusReporter,
    ) -> Vec<ProvisioningOutcome> {
        let mut outcomes = Vec::with_capacity(requests.len());

        for request in requests {
            let outcome = match self.find_team(token, request.team_name()).await {
                Ok(team) => {
                    let failures = self
                        .populate(token, &team, request, request.member_emails(), false, reporter)
                        .await;
                    ProvisioningOutcome::from_failures(request.team_name(), failures)
                }
                Err(failure) => ProvisioningOutcome::hard_failure(request.team_name(), failure),
            };

            self.finish(&outcome, reporter).await;
            outcomes.push(outcome);
        }

        outcomes
    }

    async fn create_one(
        &self,
        token: &AccessToken,
        request: &TeamRequest,
        reporter: &dyn StatusReporter,
    ) -> Result<Vec<StepFailure>, HardFailure> {
        let team_name = request.team_name();
        let owner_email = request.owner_email().ok_or(HardFailure::OwnerRequired)?;

        let owner = self.resolve_owner(token, owner_email).await?;

        let raw_group = self
            .directory
            .create_group(token, team_name, &owner)
            .await
            .map_err(|e| {
                warn!(team = %team_name, error = %e, "Group creation failed");
                HardFailure::GroupCreationFailed
            })?;

        let group = GroupHandle::parse(&raw_group).map_err(|e| {
            warn!(team = %team_name, error = %e, "Group creation returned an invalid id");
            HardFailure::GroupCreationFailed
        })?;

        info!(team = %team_name, group = %group, "Group created");
        reporter
            .report(&format!(
                "Created group for '{}'. Now creating the team, which may take some time.",
                team_name
            ))
            .await;

        let team = self.create_team_with_retry(token, &group, team_name).await?;

        info!(team = %team_name, team_id = %team, "Team created");
        reporter
            .report(&format!("'{}' team created successfully.", team_name))
            .await;

        Ok(self
            .populate(token, &team, request, request.additional_members(), true, reporter)
            .await)
    }

    async fn resolve_owner(
        &self,
        token: &AccessToken,
        email: &str,
    ) -> Result<PrincipalId, HardFailure> {
        let unresolved = || HardFailure::OwnerUnresolved {
            email: email.to_string(),
        };

        match self.directory.resolve_user_id(token, email).await {
            Ok(Some(raw)) => PrincipalId::parse(&raw).map_err(|e| {
                warn!(error = %e, "Owner id is not a valid identifier");
                unresolved()
            }),
            Ok(None) => {
                warn!(owner = %email, "Owner not found in directory");
                Err(unresolved())
            }
            Err(e) => {
                warn!(owner = %email, error = %e, "Owner lookup failed");
                Err(HardFailure::GroupCreationFailed)
            }
        }
    }

    /// Fixed wait between attempts; stops at the first valid team id.
    /// No other directory call is retried.
    async fn create_team_with_retry(
        &self,
        token: &AccessToken,
        group: &GroupHandle,
        team_name: &str,
    ) -> Result<TeamHandle, HardFailure> {
        let attempts = self.retry.attempts();

        for attempt in 1..=attempts {
            if attempt > 1 {
                tokio::time::sleep(self.retry.backoff()).await;
            }

            match self.directory.create_team(token, group).await {
                Ok(raw) => match TeamHandle::parse(&raw) {
                    Ok(team) => return Ok(team),
                    Err(e) => {
                        debug!(team = %team_name, attempt, error = %e, "Team not ready yet")
                    }
                },
                Err(e) => {
                    debug!(team = %team_name, attempt, error = %e, "Team creation attempt failed")
                }
            }
        }

        warn!(team = %team_name, attempts, "Team creation retries exhausted");
        Err(HardFailure::RetryExhausted { attempts })
    }

    async fn find_team(
        &self,
        token: &AccessToken,
        team_name: &str,
    ) -> Result<TeamHandle, HardFailure> {
        match self.directory.find_group_by_name(token, team_name).await {
            Ok(Some(raw)) => TeamHandle::parse(&raw).map_err(|e| {
                warn!(team = %team_name, error = %e, "Matching group has an invalid id");
                HardFailure::TeamNotFound
            }),
            Ok(None) => {
                warn!(team = %team_name, "No group matches team name");
                Err(HardFailure::TeamNotFound)
            }
            Err(e) => {
                warn!(team = %team_name, error = %e, "Team lookup failed");
                Err(HardFailure::TeamNotFound)
            }
        }
    }

    /// Channels, then members, then (create only) guests
    async fn populate(
        &self,
        token: &AccessToken,
        team: &TeamHandle,
        request: &TeamRequest,
        members: &[String],
        include_guests: bool,
        reporter: &dyn StatusReporter,
    ) -> Vec<StepFailure> {
        let team_name = request.team_name();
        let mut failures = Vec::new();

        for channel in request.channel_names() {
            if let Err(reason) = self.create_channel(token, team, channel).await {
                let failure = StepFailure::new(StepKind::Channel, channel, reason);
                record_failure(team_name, failure, &mut failures, reporter).await;
            }
        }

        for email in members {
            if let Err(reason) = self.add_member(token, team, email).await {
                let failure = StepFailure::new(StepKind::Member, email, reason);
                record_failure(team_name, failure, &mut failures, reporter).await;
            }
        }

        if include_guests {
            for email in request.guest_emails() {
                if let Err(reason) = self.add_guest(token, team, email).await {
                    let failure = StepFailure::new(StepKind::Guest, email, reason);
                    record_failure(team_name, failure, &mut failures, reporter).await;
                }
            }
        }

        failures
    }

    async fn create_channel(
        &self,
        token: &AccessToken,
        team: &TeamHandle,
        name: &str,
    ) -> Result<(), String> {
        let raw = self
            .directory
            .create_channel(token, team, name)
            .await
            .map_err(|e| e.to_string())?;

        let channel = ChannelHandle::parse(&raw).map_err(|e| e.to_string())?;
        debug!(channel = %name, channel_id = channel.as_str(), "Channel created");
        Ok(())
    }

    async fn add_member(
        &self,
        token: &AccessToken,
        team: &TeamHandle,
        email: &str,
    ) -> Result<(), String> {
        let raw = self
            .directory
            .resolve_user_id(token, email)
            .await
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("{} was not found in the directory", email))?;

        self.add_principal(token, team, &raw).await
    }

    /// Unknown guests get invited first; the invited principal is then added
    async fn add_guest(
        &self,
        token: &AccessToken,
        team: &TeamHandle,
        email: &str,
    ) -> Result<(), String> {
        let raw = match self
            .directory
            .resolve_user_id(token, email)
            .await
            .map_err(|e| e.to_string())?
        {
            Some(raw) => raw,
            None => {
                let invited = self
                    .directory
                    .invite_guest(token, email)
                    .await
                    .map_err(|e| e.to_string())?;
                info!(guest = %email, "Guest invited");
                invited
            }
        };

        self.add_principal(token, team, &raw).await
    }

    async fn add_principal(
        &self,
        token: &AccessToken,
        team: &TeamHandle,
        raw: &str,
    ) -> Result<(), String> {
        let principal = PrincipalId::parse(raw).map_err(|e| e.to_string())?;

        self.directory
            .add_member(token, team, &principal)
            .await
            .map_err(|e| e.to_string())
    }

    async fn finish(&self, outcome: &ProvisioningOutcome, reporter: &dyn StatusReporter) {
        info!(
            team = %outcome.team_name,
            outcome = outcome.outcome_label(),
            failures = outcome.failures().len(),
            "Provisioning finished"
        );
        reporter.report(&outcome.summary_line()).await;
    }
}

async fn record_failure(
    team_name: &str,
    failure: StepFailure,
    failures: &mut Vec<StepFailure>,
    reporter: &dyn StatusReporter,
) {
    warn!(
        team = %team_name,
        kind = ?failure.kind,
        target = %failure.target,
        reason = %failure.reason,
        "Step failed"
    );
    reporter.report(&failure.status_line(team_name)).await;
    failures.push(failure);
}
