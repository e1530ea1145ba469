//! cache_clear tool implementation.
//!
//! Drops every cached conversion.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use wxmd_convert::Converter;
use wxmd_core::Error;

/// Output from the cache_clear tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheClearOutput {
    /// Number of entries removed.
    pub cleared: usize,
}

/// Implementation of the cache_clear tool.
pub async fn clear_impl(converter: &Converter) -> Result<CallToolResult, McpError> {
    let cleared = converter.clear_cache();
    tracing::info!("Cleared {} cached conversions", cleared);

    let output = CacheClearOutput { cleared };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::ConversionFailed(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxmd_convert::PipelineConfig;
    use wxmd_core::ConvertOptions;

    #[tokio::test]
    async fn test_clear_impl() {
        let converter = Converter::new(PipelineConfig::default());
        converter.convert("a", &ConvertOptions::default()).unwrap();
        converter.convert("b", &ConvertOptions::default()).unwrap();

        let result = clear_impl(&converter).await.unwrap();
        let content = serde_json::to_value(&result.content[0]).unwrap();
        let json: serde_json::Value = serde_json::from_str(content["text"].as_str().unwrap()).unwrap();

        assert_eq!(json["cleared"], 2);
        assert_eq!(converter.cache_stats().size, 0);
    }

    #[tokio::test]
    async fn test_clear_impl_empty() {
        let converter = Converter::new(PipelineConfig::default());
        let result = clear_impl(&converter).await.unwrap();
        assert!(!result.is_error.unwrap_or(false));
    }
}
