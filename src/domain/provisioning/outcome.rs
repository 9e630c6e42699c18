//! Per-request provisioning results

use serde::Serialize;

/// Which sub-step of populating a team failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Channel,
    Member,
    Guest,
}

/// A failed channel, member or guest addition. Never stops sibling steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepFailure {
    pub kind: StepKind,
    /// Channel name or email address
    pub target: String,
    pub reason: String,
}

impl StepFailure {
    pub fn new(kind: StepKind, target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            reason: reason.into(),
        }
    }

    pub fn status_line(&self, team_name: &str) -> String {
        match self.kind {
            StepKind::Channel => format!(
                "Failed to create '{}' channel in '{}' team.",
                self.target, team_name
            ),
            StepKind::Member => format!(
                "Failed to add {} to {}. Check if user is already part of this team.",
                self.target, team_name
            ),
            StepKind::Guest => format!(
                "Failed to add guest {} to {}. Check if the invitation was accepted by the directory.",
                self.target, team_name
            ),
        }
    }
}

/// Failures that stop all further work on one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum HardFailure {
    /// Create requested without any member email
    OwnerRequired,
    /// The owner email does not resolve to a directory principal
    OwnerUnresolved { email: String },
    GroupCreationFailed,
    RetryExhausted { attempts: u32 },
    /// Update requested for a team name with no matching group
    TeamNotFound,
}

impl HardFailure {
    pub fn status_line(&self, team_name: &str) -> String {
        match self {
            Self::OwnerRequired => format!(
                "Failed to create group for '{}'. We should have at least one owner while creating a team. Guest users are not allowed to be owners.",
                team_name
            ),
            Self::OwnerUnresolved { email } => format!(
                "Failed to create group for '{}'. Owner {} was not found in the directory.",
                team_name, email
            ),
            Self::GroupCreationFailed => format!(
                "Failed to create group for '{}' due to internal error. Please try again later.",
                team_name
            ),
            Self::RetryExhausted { attempts } => format!(
                "Failed to create team '{}' after {} attempts due to internal error. Please try again later.",
                team_name, attempts
            ),
            Self::TeamNotFound => format!(
                "Unable to find '{}' team. Please check the team name and try again later.",
                team_name
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    PartialFailure { failures: Vec<StepFailure> },
    HardFailure { failure: HardFailure },
}

/// Aggregated result for one team request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisioningOutcome {
    pub team_name: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl ProvisioningOutcome {
    pub fn from_failures(team_name: impl Into<String>, failures: Vec<StepFailure>) -> Self {
        let status = if failures.is_empty() {
            OutcomeStatus::Success
        } else {
            OutcomeStatus::PartialFailure { failures }
        };

        Self {
            team_name: team_name.into(),
            status,
        }
    }

    pub fn hard_failure(team_name: impl Into<String>, failure: HardFailure) -> Self {
        Self {
            team_name: team_name.into(),
            status: OutcomeStatus::HardFailure { failure },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Success)
    }

    pub fn is_hard_failure(&self) -> bool {
        matches!(self.status, OutcomeStatus::HardFailure { .. })
    }

    pub fn failures(&self) -> &[StepFailure] {
        match &self.status {
            OutcomeStatus::PartialFailure { failures } => failures,
            _ => &[],
        }
    }

    pub fn hard_failure_reason(&self) -> Option<&HardFailure> {
        match &self.status {
            OutcomeStatus::HardFailure { failure } => Some(failure),
            _ => None,
        }
    }

    /// Final status line for the team
    pub fn summary_line(&self) -> String {
        match &self.status {
            OutcomeStatus::Success => format!(
                "Channels, Members Added successfully for '{}' team.",
                self.team_name
            ),
            OutcomeStatus::PartialFailure { failures } => format!(
                "Finished '{}' team with {} failed step(s).",
                self.team_name,
                failures.len()
            ),
            OutcomeStatus::HardFailure { failure } => failure.status_line(&self.team_name),
        }
    }

    pub fn outcome_label(&self) -> &'static str {
        match self.status {
            OutcomeStatus::Success => "success",
            OutcomeStatus::PartialFailure { .. } => "partial_failure",
            OutcomeStatus::HardFailure { .. } => "hard_failure",
        }
    }
}
