//! Recovery configuration.
//!
//! Selects which recovery schema [`RecoverySchema::for_config`] hands out.
//! Defaults use literal values only. Override via YAML or environment.
//!
//! [`RecoverySchema::for_config`]: crate::RecoverySchema::for_config

use serde::{Deserialize, Serialize};

/// Environment variable read by [`RecoveryConfig::from_env`].
pub const APPLY_REPAIRS_ENV: &str = "A7P_RECOVERY_APPLY_REPAIRS";

/// Options for a recovery pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecoveryConfig {
    /// Use the per-field string repairs instead of discarding damaged
    /// strings for their literal defaults.
    pub apply_repairs: bool,
}

impl RecoveryConfig {
    /// Parse YAML text such as `apply_repairs: true`. Empty text yields the
    /// default configuration.
    pub fn from_yaml_str(text: &str) -> Result<Self, RecoveryConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| RecoveryConfigError::InvalidYaml(e.to_string()))
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `A7P_RECOVERY_APPLY_REPAIRS` (default: `false`), one of
    ///   `1/0/true/false/yes/no`, case-insensitive
    pub fn from_env() -> Result<Self, RecoveryConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a caller-supplied lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RecoveryConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let apply_repairs = match lookup(APPLY_REPAIRS_ENV) {
            Some(raw) => parse_flag(APPLY_REPAIRS_ENV, &raw)?,
            None => false,
        };
        Ok(Self { apply_repairs })
    }
}

fn parse_flag(var: &str, raw: &str) -> Result<bool, RecoveryConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(RecoveryConfigError::InvalidFlag(
            var.to_string(),
            raw.to_string(),
        )),
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecoveryConfigError {
    #[error("invalid recovery config YAML: {0}")]
    InvalidYaml(String),
    #[error("invalid boolean for {0}: {1:?}")]
    InvalidFlag(String, String),
}
