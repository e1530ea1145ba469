//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::WechatConvertParams;
use crate::tools::cache::{clear_impl, stats_impl};
use crate::tools::wechat_convert::convert_impl;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use wxmd_convert::Converter;

/// The main MCP server handler for wxmd.
#[derive(Clone)]
pub struct WxmdServer {
    tool_router: ToolRouter<Self>,
    converter: Arc<Converter>,
    max_markdown_bytes: usize,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl WxmdServer {
    /// Create a new server handler around a shared converter.
    pub fn new(converter: Arc<Converter>, max_markdown_bytes: usize) -> Self {
        Self { tool_router: Self::tool_router(), converter, max_markdown_bytes }
    }

    /// Convert Markdown into WeChat-ready HTML.
    ///
    /// Output is sanitized and carries inline styles only, so it can be pasted
    /// straight into the editor.
    #[tool(
        description = "Convert Markdown into sanitized, inline-styled HTML for the WeChat editor. Returns html and meta (title, author, timestamp)."
    )]
    async fn wechat_convert(&self, params: Parameters<WechatConvertParams>) -> Result<CallToolResult, McpError> {
        convert_impl(self.converter.clone(), self.max_markdown_bytes, params.0).await
    }

    #[tool(description = "Report conversion cache statistics: hits, misses, size and expired entries.")]
    async fn cache_stats(&self) -> Result<CallToolResult, McpError> {
        stats_impl(&self.converter).await
    }

    #[tool(description = "Remove every cached conversion. Returns the number of entries cleared.")]
    async fn cache_clear(&self) -> Result<CallToolResult, McpError> {
        clear_impl(&self.converter).await
    }
}

impl ServerHandler for WxmdServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "wxmd".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some("Converts Markdown articles into HTML that the WeChat editor accepts as-is.".into()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxmd_convert::PipelineConfig;

    fn server() -> WxmdServer {
        WxmdServer::new(Arc::new(Converter::new(PipelineConfig::default())), 5_000_000)
    }

    #[test]
    fn test_lists_all_tools() {
        let tools = server().tool_router.list_all();
        let names: Vec<String> = tools.iter().map(|t| t.name.to_string()).collect();
        assert!(names.contains(&"wechat_convert".to_string()));
        assert!(names.contains(&"cache_stats".to_string()));
        assert!(names.contains(&"cache_clear".to_string()));
    }

    #[test]
    fn test_server_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "wxmd");
    }
}
