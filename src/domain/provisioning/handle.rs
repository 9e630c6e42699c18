//! Identifiers of remote directory resources
//!
//! Identifiers come back from the directory API as plain strings. They are
//! validated here before any follow-up call uses them.

use uuid::Uuid;

use crate::domain::DomainError;

macro_rules! guid_handle {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Uuid);

        impl $name {
            /// Parse a raw identifier returned by the directory API
            pub fn parse(raw: &str) -> Result<Self, DomainError> {
                Uuid::parse_str(raw.trim())
                    .map(Self)
                    .map_err(|_| {
                        DomainError::invalid_id(format!(
                            "'{}' is not a valid {} identifier",
                            raw, $kind
                        ))
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }
    };
}

guid_handle!(
    /// Group backing a team
    GroupHandle,
    "group"
);

guid_handle!(
    /// Provisioned team; shares its identifier with the underlying group
    TeamHandle,
    "team"
);

guid_handle!(
    /// Directory principal (member, owner or invited guest)
    PrincipalId,
    "principal"
);

/// Channel identifier.
///
/// Channel ids are thread identifiers (`19:...@thread.tacv2`), not GUIDs, so
/// only presence is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelHandle(String);

impl ChannelHandle {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();

        if raw.is_empty() {
            return Err(DomainError::invalid_id("Channel identifier is empty"));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
