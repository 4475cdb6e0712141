//! Configuration handling for the TUI

use crate::gateway::SimulatedGateway;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Overrides the simulated gateway delay, in milliseconds
const DELAY_ENV: &str = "STATUS_SUBSCRIBE_DELAY_MS";
/// When set, every registration fails with this reason
const FAIL_ENV: &str = "STATUS_SUBSCRIBE_FAIL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Simulated registration round trip
    pub gateway_delay_ms: Option<u64>,
    /// Force every registration to fail with this reason
    pub gateway_failure: Option<String>,
    /// Default tracing filter when RUST_LOG is unset
    pub log_filter: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "status-subscribe", "status-subscribe")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            _ => Self::default(),
        };

        config.apply_overrides(std::env::var(DELAY_ENV).ok(), std::env::var(FAIL_ENV).ok())?;
        Ok(config)
    }

    /// Apply raw override values, as read from the environment
    fn apply_overrides(&mut self, delay_ms: Option<String>, failure: Option<String>) -> Result<()> {
        if let Some(raw) = delay_ms {
            let ms = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{DELAY_ENV} must be a number of milliseconds, got {raw:?}"))?;
            self.gateway_delay_ms = Some(ms);
        }
        if let Some(reason) = failure.filter(|r| !r.is_empty()) {
            self.gateway_failure = Some(reason);
        }
        Ok(())
    }

    /// Simulated gateway delay, falling back to the built-in default
    pub fn gateway_delay(&self) -> Duration {
        self.gateway_delay_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| SimulatedGateway::default().delay())
    }

    /// Tracing filter used when RUST_LOG is unset
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or("status_subscribe=warn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.gateway_delay_ms.is_none());
        assert!(config.gateway_failure.is_none());
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_default_delay_is_simulated_round_trip() {
        let config = TuiConfig::default();
        assert_eq!(config.gateway_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_default_log_filter() {
        assert_eq!(TuiConfig::default().log_filter(), "status_subscribe=warn");
    }

    #[test]
    fn test_default_log_filter_keeps_info_off_the_screen() {
        // stderr shares the terminal with the alternate screen
        let filter = tracing_subscriber::EnvFilter::new(TuiConfig::default().log_filter());
        assert_eq!(
            filter.max_level_hint(),
            Some(tracing::level_filters::LevelFilter::WARN)
        );
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            gateway_delay_ms: Some(250),
            gateway_failure: Some("backend down".to_string()),
            log_filter: Some("status_subscribe=debug".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.gateway_delay_ms, Some(250));
        assert_eq!(parsed.gateway_failure, Some("backend down".to_string()));
        assert_eq!(parsed.log_filter(), "status_subscribe=debug");
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.gateway_delay_ms.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"gateway_delay_ms": 10, "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.gateway_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = TuiConfig {
            gateway_delay_ms: Some(10),
            ..Default::default()
        };
        config
            .apply_overrides(Some(" 20 ".to_string()), Some("nope".to_string()))
            .unwrap();
        assert_eq!(config.gateway_delay_ms, Some(20));
        assert_eq!(config.gateway_failure, Some("nope".to_string()));
    }

    #[test]
    fn test_empty_failure_override_is_ignored() {
        let mut config = TuiConfig::default();
        config.apply_overrides(None, Some(String::new())).unwrap();
        assert!(config.gateway_failure.is_none());
    }

    #[test]
    fn test_bad_delay_override_is_an_error() {
        let mut config = TuiConfig::default();
        let err = config
            .apply_overrides(Some("soon".to_string()), None)
            .unwrap_err();
        assert!(err.to_string().contains(DELAY_ENV));
    }

    #[test]
    fn test_config_path_returns_option() {
        // Just test that the function doesn't panic
        let _path = TuiConfig::config_path();
    }
}
