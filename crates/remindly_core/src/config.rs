//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - Resolution never fails; unset or blank variables fall back to defaults.
//! - Values are passed through as-is; `init_logging` validates them.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "REMINDLY_LOG_LEVEL";
/// Environment variable overriding the log directory.
pub const LOG_DIR_ENV: &str = "REMINDLY_LOG_DIR";

const DEFAULT_LOG_DIR_NAME: &str = "remindly-logs";

/// Process-level settings for hosts embedding the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        }
    }
}

impl CoreConfig {
    /// Reads `REMINDLY_LOG_LEVEL` / `REMINDLY_LOG_DIR` on top of defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(level) = non_blank(lookup(LOG_LEVEL_ENV)) {
            config.log_level = level;
        }
        if let Some(dir) = non_blank(lookup(LOG_DIR_ENV)) {
            config.log_dir = PathBuf::from(dir);
        }
        config
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::path::PathBuf;

    #[test]
    fn lookup_overrides_defaults() {
        let config = CoreConfig::from_lookup(|key| match key {
            LOG_LEVEL_ENV => Some(" warn ".to_string()),
            LOG_DIR_ENV => Some("/var/log/remindly".to_string()),
            _ => None,
        });
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, PathBuf::from("/var/log/remindly"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = CoreConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config, CoreConfig::default());
    }
}
