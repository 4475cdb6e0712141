//! Stand-in registration backend
//!
//! Waits for a fixed delay and then accepts the registration, or rejects it
//! with a configured reason. Used until a real transport is wired in.

use super::traits::{Registration, SubmissionGateway};
use crate::config::TuiConfig;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Default simulated round-trip time
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

/// Gateway that simulates a network round trip
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
    failure: Option<String>,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            failure: None,
        }
    }
}

#[allow(dead_code)]
impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failure: None,
        }
    }

    /// Build a gateway from user configuration
    pub fn from_config(config: &TuiConfig) -> Self {
        Self {
            delay: config.gateway_delay(),
            failure: config.gateway_failure.clone(),
        }
    }

    /// Make every registration fail with `reason`
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl SubmissionGateway for SimulatedGateway {
    async fn register(&self, registration: &Registration) -> Result<()> {
        tracing::debug!(
            channel = %registration.channel,
            company = %registration.company,
            delay_ms = self.delay.as_millis() as u64,
            "Simulating registration request"
        );
        tokio::time::sleep(self.delay).await;

        match &self.failure {
            Some(reason) => Err(anyhow!("{reason}")),
            None => Ok(()),
        }
    }
}
