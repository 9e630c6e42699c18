use crate::domain::DomainError;

/// Bearer token handed in by the host for a single provisioning run.
///
/// The token is a capability owned by the caller: it is never stored
/// process-wide and its `Debug`/`Display` output is redacted so it cannot
/// leak through logs or error messages.
#[derive(Clone)]
pub struct AccessToken {
    secret: String,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Result<Self, DomainError> {
        let secret = secret.into().trim().to_string();

        if secret.is_empty() {
            return Err(DomainError::validation("Access token cannot be empty"));
        }

        Ok(Self { secret })
    }

    /// Raw secret, only for building the Authorization header
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.secret)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"[redacted]")
            .finish()
    }
}

impl std::fmt::Display for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[redacted]")
    }
}
