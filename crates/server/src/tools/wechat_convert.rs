//! wechat_convert tool implementation.
//!
//! Validates the request, runs the conversion pipeline on the blocking pool and
//! returns the HTML together with article metadata.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use wxmd_convert::Converter;
use wxmd_core::{ConvertOptions, Error};

/// Input parameters for the wechat_convert tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WechatConvertParams {
    /// Markdown source of the article.
    pub markdown: String,

    /// Article title, echoed in the metadata.
    #[serde(default)]
    pub title: Option<String>,

    /// Article author, echoed in the metadata.
    #[serde(default)]
    pub author: Option<String>,

    /// Template file name inside the template directory (template-bound mode only).
    #[serde(default)]
    pub template: Option<String>,
}

/// Output structure for the wechat_convert tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WechatConvertOutput {
    /// Inline-styled HTML ready to paste into the editor.
    pub html: String,
    pub meta: ArticleMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArticleMeta {
    pub title: String,
    pub author: String,
    /// Conversion time in Unix milliseconds.
    pub timestamp: i64,
}

/// Check the request before it reaches the pipeline.
pub fn validate(params: &WechatConvertParams, max_bytes: usize) -> Result<(), Error> {
    if params.markdown.trim().is_empty() {
        return Err(Error::InvalidInput("markdown cannot be empty".into()));
    }

    if params.markdown.len() > max_bytes {
        return Err(Error::InvalidInput(format!(
            "markdown is {} bytes, limit is {}",
            params.markdown.len(),
            max_bytes
        )));
    }

    Ok(())
}

/// Implementation of the wechat_convert tool.
pub async fn convert_impl(
    converter: Arc<Converter>, max_bytes: usize, params: WechatConvertParams,
) -> Result<CallToolResult, McpError> {
    validate(&params, max_bytes)?;

    let WechatConvertParams { markdown, title, author, template } = params;
    let options = ConvertOptions { title, author, template };

    let (result, options) = tokio::task::spawn_blocking(move || {
        let result = converter.convert(&markdown, &options);
        (result, options)
    })
    .await
    .map_err(|e| Error::ConversionFailed(format!("conversion task failed: {e}")))?;
    let result = result?;

    let output = WechatConvertOutput {
        html: result.html,
        meta: ArticleMeta {
            title: options.title.unwrap_or_default(),
            author: options.author.unwrap_or_default(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        },
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::ConversionFailed(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
