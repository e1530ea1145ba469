//! Pipeline orchestration.
//!
//! [`Converter`] owns every stage and the shared cache. A conversion computes
//! the fingerprint first and returns a cached result when there is one;
//! otherwise it renders, sanitizes, styles (or binds a template) and stores
//! the result.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use wxmd_core::cache::{DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL, compute_fingerprint};
use wxmd_core::{AppConfig, CacheStats, ConversionCache, ConversionResult, ConvertOptions, Error, PipelineMode};

use crate::render::{ComrakRenderer, RenderOptions, Renderer};
use crate::sanitize::Sanitizer;
use crate::style::StyleEngine;
use crate::template::TemplateBinder;

/// Configuration for a [`Converter`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Terminal stage (default: inline style)
    pub mode: PipelineMode,

    /// Fail with `XssDetected` when sanitization removes everything (default: false)
    pub reject_unsafe: bool,

    pub render: RenderOptions,

    /// Directory template names are resolved against (default: "./templates")
    pub template_dir: PathBuf,

    /// Template used when the request names none (default: "wechat.html")
    pub default_template: String,

    /// Cache entry lifetime (default: 5 minutes)
    pub cache_ttl: Duration,

    /// Minimum time between expiry sweeps (default: 60s)
    pub cache_sweep: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::default(),
            reject_unsafe: false,
            render: RenderOptions::default(),
            template_dir: PathBuf::from("./templates"),
            default_template: "wechat.html".to_string(),
            cache_ttl: DEFAULT_TTL,
            cache_sweep: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl From<&AppConfig> for PipelineConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            mode: config.mode,
            reject_unsafe: config.reject_unsafe,
            render: RenderOptions { typographer: config.typographer, linkify: config.linkify },
            template_dir: config.template_dir.clone(),
            default_template: config.default_template.clone(),
            cache_ttl: config.cache_ttl(),
            cache_sweep: config.cache_sweep(),
        }
    }
}

/// Markdown to WeChat HTML converter.
pub struct Converter {
    renderer: Box<dyn Renderer>,
    sanitizer: Sanitizer,
    styles: StyleEngine,
    templates: TemplateBinder,
    cache: Arc<ConversionCache>,
    config: PipelineConfig,
}

impl Converter {
    /// Create a converter with its own cache.
    pub fn new(config: PipelineConfig) -> Self {
        let cache = Arc::new(ConversionCache::with_ttl(config.cache_ttl, config.cache_sweep));
        Self::with_cache(config, cache)
    }

    /// Create a converter that shares an existing cache.
    pub fn with_cache(config: PipelineConfig, cache: Arc<ConversionCache>) -> Self {
        Self {
            renderer: Box::new(ComrakRenderer::new(config.render)),
            sanitizer: Sanitizer::new(),
            styles: StyleEngine::new(),
            templates: TemplateBinder::new(config.template_dir.clone()),
            cache,
            config,
        }
    }

    /// Replace the markdown renderer.
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Convert markdown into styled HTML.
    ///
    /// Fails with `TemplateNotFound` when the template cannot be loaded in
    /// template-bound mode and with `XssDetected` when `reject_unsafe` is set
    /// and sanitization removed all content. Failures are never cached.
    pub fn convert(&self, markdown: &str, options: &ConvertOptions) -> Result<ConversionResult, Error> {
        let key = compute_fingerprint(markdown, options);

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("conversion cache hit for {}", key);
            return Ok(cached);
        }

        let start = Instant::now();
        let raw = self.renderer.render(markdown);
        let safe = self.sanitizer.sanitize(&raw);

        if self.config.reject_unsafe && safe.trim().is_empty() && !raw.trim().is_empty() {
            tracing::warn!("rejecting input: sanitization removed all {} bytes of rendered HTML", raw.len());
            return Err(Error::XssDetected);
        }

        let html = match self.config.mode {
            PipelineMode::InlineStyle => self.styles.apply_styles(&safe),
            PipelineMode::TemplateBound => {
                let name = options.template.as_deref().unwrap_or(&self.config.default_template);
                let fragment = self.styles.style_fragment(&safe);
                self.templates.apply(name, &fragment)?
            }
        };

        let result = ConversionResult::new(html);
        self.cache.put(key.clone(), result.clone());

        tracing::debug!(
            "converted {} bytes of markdown into {} bytes of html in {}ms ({})",
            markdown.len(),
            result.html.len(),
            start.elapsed().as_millis(),
            key
        );

        Ok(result)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached conversion, returning how many were removed.
    pub fn clear_cache(&self) -> usize {
        self.cache.clear()
    }
}
