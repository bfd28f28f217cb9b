//! Operator configuration.

use crate::error::{OperatorError, OperatorResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Configuration for the tag sync controllers.
///
/// # Example
///
/// ```
/// use cwsync_operator::config::OperatorConfig;
///
/// let config = OperatorConfig::default();
/// assert_eq!(config.requeue_after_success_secs, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorConfig {
    /// Seconds to wait before re-checking a resource whose tags are in sync.
    #[serde(default = "default_requeue_after_success")]
    pub requeue_after_success_secs: u64,

    /// Seconds to wait before retrying a resource after a failed pass.
    #[serde(default = "default_requeue_after_error")]
    pub requeue_after_error_secs: u64,

    /// Seconds to wait for a resource that has no ARN yet.
    #[serde(default = "default_requeue_pending")]
    pub requeue_pending_secs: u64,

    /// Deadline applied to the remote calls of one pass, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_call_timeout_secs: Option<u64>,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            requeue_after_success_secs: default_requeue_after_success(),
            requeue_after_error_secs: default_requeue_after_error(),
            requeue_pending_secs: default_requeue_pending(),
            remote_call_timeout_secs: None,
        }
    }
}

impl OperatorConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from YAML.
    pub fn from_yaml(yaml: &str) -> OperatorResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Build a config from environment variables, falling back to defaults.
    ///
    /// # Environment Variables
    ///
    /// - `CWSYNC_REQUEUE_SECONDS`: requeue interval after a successful pass
    /// - `CWSYNC_ERROR_REQUEUE_SECONDS`: requeue interval after a failed pass
    /// - `CWSYNC_PENDING_REQUEUE_SECONDS`: requeue interval for resources without an ARN
    /// - `CWSYNC_REMOTE_TIMEOUT_SECONDS`: deadline for the remote calls of one pass
    pub fn from_env() -> OperatorResult<Self> {
        let defaults = Self::default();
        let config = Self {
            requeue_after_success_secs: env_secs("CWSYNC_REQUEUE_SECONDS")?
                .unwrap_or(defaults.requeue_after_success_secs),
            requeue_after_error_secs: env_secs("CWSYNC_ERROR_REQUEUE_SECONDS")?
                .unwrap_or(defaults.requeue_after_error_secs),
            requeue_pending_secs: env_secs("CWSYNC_PENDING_REQUEUE_SECONDS")?
                .unwrap_or(defaults.requeue_pending_secs),
            remote_call_timeout_secs: env_secs("CWSYNC_REMOTE_TIMEOUT_SECONDS")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the requeue interval after a successful pass.
    pub fn requeue_after_success(mut self, secs: u64) -> Self {
        self.requeue_after_success_secs = secs;
        self
    }

    /// Set the requeue interval after a failed pass.
    pub fn requeue_after_error(mut self, secs: u64) -> Self {
        self.requeue_after_error_secs = secs;
        self
    }

    /// Set the deadline for the remote calls of one pass.
    pub fn with_remote_call_timeout(mut self, secs: u64) -> Self {
        self.remote_call_timeout_secs = Some(secs);
        self
    }

    /// Reject values that would spin the controller.
    pub fn validate(&self) -> OperatorResult<()> {
        let intervals = [
            ("requeueAfterSuccessSecs", self.requeue_after_success_secs),
            ("requeueAfterErrorSecs", self.requeue_after_error_secs),
            ("requeuePendingSecs", self.requeue_pending_secs),
        ];
        for (field, secs) in intervals {
            if secs == 0 {
                return Err(OperatorError::InvalidConfig(format!(
                    "{field} must be greater than zero"
                )));
            }
        }
        if self.remote_call_timeout_secs == Some(0) {
            return Err(OperatorError::InvalidConfig(
                "remoteCallTimeoutSecs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Requeue interval after a successful pass.
    pub fn success_interval(&self) -> Duration {
        Duration::from_secs(self.requeue_after_success_secs)
    }

    /// Requeue interval after a failed pass.
    pub fn error_interval(&self) -> Duration {
        Duration::from_secs(self.requeue_after_error_secs)
    }

    /// Requeue interval for resources without an ARN.
    pub fn pending_interval(&self) -> Duration {
        Duration::from_secs(self.requeue_pending_secs)
    }

    /// Deadline for the remote calls of one pass.
    pub fn remote_call_timeout(&self) -> Option<Duration> {
        self.remote_call_timeout_secs.map(Duration::from_secs)
    }
}

fn env_secs(name: &str) -> OperatorResult<Option<u64>> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| OperatorError::InvalidConfig(format!("{name} must be a number of seconds"))),
        Err(_) => Ok(None),
    }
}

fn default_requeue_after_success() -> u64 {
    300
}

fn default_requeue_after_error() -> u64 {
    30
}

fn default_requeue_pending() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = OperatorConfig::default();
        assert_eq!(config.success_interval(), Duration::from_secs(300));
        assert_eq!(config.error_interval(), Duration::from_secs(30));
        assert_eq!(config.pending_interval(), Duration::from_secs(5));
        assert!(config.remote_call_timeout().is_none());
    }

    #[test]
    fn builder_pattern() {
        let config = OperatorConfig::new()
            .requeue_after_success(60)
            .requeue_after_error(10)
            .with_remote_call_timeout(20);

        assert_eq!(config.requeue_after_success_secs, 60);
        assert_eq!(config.requeue_after_error_secs, 10);
        assert_eq!(config.remote_call_timeout(), Some(Duration::from_secs(20)));
    }

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let config = OperatorConfig::from_yaml("requeueAfterSuccessSecs: 120\n")
            .expect("Failed to parse operator config");
        assert_eq!(config.requeue_after_success_secs, 120);
        assert_eq!(config.requeue_after_error_secs, 30);
    }

    #[test]
    fn zero_intervals_are_rejected() {
        for field in [
            "requeueAfterSuccessSecs",
            "requeueAfterErrorSecs",
            "requeuePendingSecs",
            "remoteCallTimeoutSecs",
        ] {
            let result = OperatorConfig::from_yaml(&format!("{field}: 0\n"));
            match result {
                Err(OperatorError::InvalidConfig(message)) => {
                    assert!(message.contains(field), "unexpected message: {message}")
                }
                other => panic!("{field}: 0 should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn builder_zero_success_interval_fails_validation() {
        let config = OperatorConfig::new().requeue_after_success(0);
        assert!(matches!(
            config.validate(),
            Err(OperatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn malformed_yaml_is_a_serialization_error() {
        let result = OperatorConfig::from_yaml("requeueAfterSuccessSecs: [soon]\n");
        assert!(matches!(result, Err(OperatorError::SerializationError(_))));
    }
}
