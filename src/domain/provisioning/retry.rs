use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bounded linear retry used while the team resource is not ready on top of
/// a freshly created group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCreationRetry {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Fixed wait between two attempts
    pub backoff_ms: u64,
}

impl Default for TeamCreationRetry {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            backoff_ms: 9000,
        }
    }
}

impl TeamCreationRetry {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    pub fn with_backoff(mut self, ms: u64) -> Self {
        self.backoff_ms = ms;
        self
    }

    /// At least one attempt is always made
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}
