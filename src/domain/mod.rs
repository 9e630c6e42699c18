//! Domain layer - Core business logic and entities

pub mod credentials;
pub mod error;
pub mod provisioning;
pub mod spreadsheet;

pub use credentials::AccessToken;
pub use error::DomainError;
pub use provisioning::{
    ChannelHandle, CollectingReporter, DirectoryClient, GroupHandle, HardFailure, OutcomeStatus,
    PrincipalId, ProvisioningIntent, ProvisioningOutcome, StatusReporter, StepFailure, StepKind,
    TeamCreationRetry, TeamHandle, TeamRequest, TeamSummary,
};
pub use spreadsheet::{ParseError, SheetReader, UploadedFile};
