//! Team provisioning domain
//!
//! A spreadsheet upload becomes a list of [`TeamRequest`]s. Each request is
//! provisioned against a [`DirectoryClient`] and yields one
//! [`ProvisioningOutcome`]; progress is relayed through a [`StatusReporter`].

mod directory;
mod handle;
mod outcome;
mod request;
mod retry;
mod status;

pub use directory::{DirectoryClient, TeamSummary};
pub use handle::{ChannelHandle, GroupHandle, PrincipalId, TeamHandle};
pub use outcome::{HardFailure, OutcomeStatus, ProvisioningOutcome, StepFailure, StepKind};
pub use request::{validate_team_name, ProvisioningIntent, TeamRequest, TeamRequestError};
pub use retry::TeamCreationRetry;
pub use status::{CollectingReporter, StatusReporter};

#[cfg(test)]
pub use directory::mock;
#[cfg(test)]
pub use status::MockStatusReporter;
