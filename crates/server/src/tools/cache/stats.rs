//! cache_stats tool implementation.
//!
//! Reports hit, miss, size and expiry counters of the conversion cache.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use wxmd_convert::Converter;
use wxmd_core::Error;

/// Implementation of the cache_stats tool.
pub async fn stats_impl(converter: &Converter) -> Result<CallToolResult, McpError> {
    let stats = converter.cache_stats();
    let json = serde_json::to_string_pretty(&stats)
        .map_err(|e| Error::ConversionFailed(format!("Failed to serialize cache stats: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxmd_convert::PipelineConfig;
    use wxmd_core::ConvertOptions;

    #[tokio::test]
    async fn test_stats_impl_counts() {
        let converter = Converter::new(PipelineConfig::default());
        converter.convert("# One", &ConvertOptions::default()).unwrap();
        converter.convert("# One", &ConvertOptions::default()).unwrap();

        let result = stats_impl(&converter).await.unwrap();
        let content = serde_json::to_value(&result.content[0]).unwrap();
        let json: serde_json::Value = serde_json::from_str(content["text"].as_str().unwrap()).unwrap();

        assert_eq!(json["hits"], 1);
        assert_eq!(json["misses"], 1);
        assert_eq!(json["size"], 1);
        assert_eq!(json["expired"], 0);
    }
}
