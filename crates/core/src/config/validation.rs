//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `cache_ttl_secs` is 0 or exceeds 24 hours
    /// - `cache_sweep_secs` is 0
    /// - `max_markdown_bytes` is 0 or exceeds 50MB
    /// - `default_template` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid { field: "cache_ttl_secs".into(), reason: "must be greater than 0".into() });
        }
        if self.cache_ttl_secs > 24 * 60 * 60 {
            return Err(ConfigError::Invalid {
                field: "cache_ttl_secs".into(),
                reason: "must not exceed 24 hours (86400s)".into(),
            });
        }

        if self.cache_sweep_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_sweep_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.max_markdown_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "max_markdown_bytes".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.max_markdown_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_markdown_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.default_template.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "default_template".into(), reason: "must not be empty".into() });
        }

        if self.cache_sweep_secs > self.cache_ttl_secs {
            tracing::warn!(
                cache_ttl_secs = self.cache_ttl_secs,
                cache_sweep_secs = self.cache_sweep_secs,
                "cache_sweep_secs exceeds cache_ttl_secs; expired entries linger until read"
            );
        }

        Ok(())
    }
}
