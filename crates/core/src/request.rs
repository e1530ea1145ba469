//! Request and result types shared by the pipeline and its callers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-request conversion options.
///
/// Every field takes part in the cache fingerprint, so two requests that differ
/// only in `title` are cached separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConvertOptions {
    /// Article title.
    #[serde(default)]
    pub title: Option<String>,

    /// Article author.
    #[serde(default)]
    pub author: Option<String>,

    /// Template file name inside the configured template directory.
    #[serde(default)]
    pub template: Option<String>,
}

/// Final output of one conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConversionResult {
    /// Self-contained, inline-styled HTML.
    pub html: String,
}

impl ConversionResult {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}
