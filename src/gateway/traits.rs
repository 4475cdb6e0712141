//! Trait abstraction for the registration backend to enable mocking in tests

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Values sent to the registration backend, captured when a submission starts
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub channel: String,
    pub webhook: String,
    pub email: String,
    pub company: String,
}

// The webhook URL embeds a secret token, keep it out of logs.
impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("channel", &self.channel)
            .field("webhook", &"<redacted>")
            .field("email", &self.email)
            .field("company", &self.company)
            .finish()
    }
}

/// Result of a registration call as seen by the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    Failure(String),
}

impl From<Result<()>> for SubmissionOutcome {
    fn from(result: Result<()>) -> Self {
        match result {
            Ok(()) => SubmissionOutcome::Success,
            Err(err) => SubmissionOutcome::Failure(err.to_string()),
        }
    }
}

/// Boundary to the external notification-registration service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Register a channel for status notifications
    async fn register(&self, registration: &Registration) -> Result<()>;
}
