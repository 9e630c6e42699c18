//! Status lines relayed back to the user

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Sink for human-readable progress messages.
///
/// The host decides where lines go (chat reply, terminal, log); the core only
/// produces them, one per meaningful event.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatusReporter: Send + Sync {
    async fn report(&self, line: &str);
}

/// Keeps every reported line in memory, in order
#[derive(Debug, Default)]
pub struct CollectingReporter {
    lines: Mutex<Vec<String>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.lines().iter().any(|line| line.contains(fragment))
    }
}

#[async_trait]
impl StatusReporter for CollectingReporter {
    async fn report(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}
