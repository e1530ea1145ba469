//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (WXMD_*)
//! 2. TOML config file (if WXMD_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Terminal stage of the pipeline, fixed per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineMode {
    /// Style the fragment and wrap it in a single compact `<section>`.
    #[default]
    InlineStyle,
    /// Style the fragment and splice it into an HTML template.
    TemplateBound,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (WXMD_*)
/// 2. TOML config file (if WXMD_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Terminal stage: `inline_style` or `template_bound`.
    ///
    /// Set via WXMD_MODE environment variable.
    #[serde(default)]
    pub mode: PipelineMode,

    /// Reject documents that sanitize down to nothing.
    ///
    /// Set via WXMD_REJECT_UNSAFE environment variable.
    #[serde(default)]
    pub reject_unsafe: bool,

    /// Directory that template names are resolved against.
    ///
    /// Set via WXMD_TEMPLATE_DIR environment variable.
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,

    /// Template used when a request does not name one.
    ///
    /// Set via WXMD_DEFAULT_TEMPLATE environment variable.
    #[serde(default = "default_template")]
    pub default_template: String,

    /// Lifetime of a cached conversion in seconds.
    ///
    /// Set via WXMD_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Minimum seconds between expiry sweeps.
    ///
    /// Set via WXMD_CACHE_SWEEP_SECS environment variable.
    #[serde(default = "default_cache_sweep_secs")]
    pub cache_sweep_secs: u64,

    /// Largest accepted markdown document in bytes.
    ///
    /// Set via WXMD_MAX_MARKDOWN_BYTES environment variable.
    #[serde(default = "default_max_markdown_bytes")]
    pub max_markdown_bytes: usize,

    /// Smart quotes and dashes.
    ///
    /// Set via WXMD_TYPOGRAPHER environment variable.
    #[serde(default = "default_true")]
    pub typographer: bool,

    /// Turn bare URLs into links.
    ///
    /// Set via WXMD_LINKIFY environment variable.
    #[serde(default = "default_true")]
    pub linkify: bool,
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("./templates")
}

fn default_template() -> String {
    "wechat.html".into()
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_cache_sweep_secs() -> u64 {
    60
}

fn default_max_markdown_bytes() -> usize {
    5_000_000
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::InlineStyle,
            reject_unsafe: false,
            template_dir: default_template_dir(),
            default_template: default_template(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_sweep_secs: default_cache_sweep_secs(),
            max_markdown_bytes: default_max_markdown_bytes(),
            typographer: true,
            linkify: true,
        }
    }
}

impl AppConfig {
    /// Cache TTL as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Sweep interval as Duration.
    pub fn cache_sweep(&self) -> Duration {
        Duration::from_secs(self.cache_sweep_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `WXMD_`
    /// 2. TOML file from `WXMD_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("WXMD_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("WXMD_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.mode, PipelineMode::InlineStyle);
        assert!(!config.reject_unsafe);
        assert_eq!(config.template_dir, PathBuf::from("./templates"));
        assert_eq!(config.default_template, "wechat.html");
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.cache_sweep_secs, 60);
        assert_eq!(config.max_markdown_bytes, 5_000_000);
        assert!(config.typographer);
        assert!(config.linkify);
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.cache_sweep(), Duration::from_secs(60));
    }

    #[test]
    fn test_load_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WXMD_MODE", "template_bound");
            jail.set_env("WXMD_REJECT_UNSAFE", "true");
            jail.set_env("WXMD_CACHE_TTL_SECS", "120");

            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.mode, PipelineMode::TemplateBound);
            assert!(config.reject_unsafe);
            assert_eq!(config.cache_ttl_secs, 120);
            assert_eq!(config.default_template, "wechat.html");
            Ok(())
        });
    }

    #[test]
    fn test_load_from_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "wxmd.toml",
                r#"
                    mode = "template_bound"
                    template_dir = "shells"
                    default_template = "article.html"
                "#,
            )?;
            jail.set_env("WXMD_CONFIG_FILE", "wxmd.toml");
            jail.set_env("WXMD_DEFAULT_TEMPLATE", "override.html");

            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.mode, PipelineMode::TemplateBound);
            assert_eq!(config.template_dir, PathBuf::from("shells"));
            assert_eq!(config.default_template, "override.html");
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WXMD_CACHE_TTL_SECS", "0");
            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "cache_ttl_secs"));
            Ok(())
        });
    }
}
