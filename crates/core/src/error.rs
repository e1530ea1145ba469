//! Unified error types for wxmd.
//!
//! Every variant renders with a stable machine code prefix so outer layers can
//! map failures without string matching on prose.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error type for the conversion pipeline and its front ends.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty markdown).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The template file is missing, unreadable, or outside the template directory.
    #[error("TEMPLATE_NOT_FOUND: {0}")]
    TemplateNotFound(String),

    /// Sanitization consumed the whole document.
    #[error("XSS_DETECTED: input contains potentially unsafe content")]
    XssDetected,

    /// Unexpected internal failure.
    #[error("CONVERSION_ERROR: {0}")]
    ConversionFailed(String),
}

impl Error {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::TemplateNotFound(_) => "TEMPLATE_NOT_FOUND",
            Error::XssDetected => "XSS_DETECTED",
            Error::ConversionFailed(_) => "CONVERSION_ERROR",
        }
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::TemplateNotFound(msg) => (-32020, format!("Style template file not found: {msg}")),
            Error::XssDetected => (-32021, "Input contains potentially unsafe content".to_string()),
            Error::ConversionFailed(msg) => (-32000, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::TemplateNotFound("templates/wechat.html".to_string());
        assert!(err.to_string().starts_with("TEMPLATE_NOT_FOUND"));
        assert!(err.to_string().contains("templates/wechat.html"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::InvalidInput("x".into()).code(), "INVALID_INPUT");
        assert_eq!(Error::XssDetected.code(), "XSS_DETECTED");
        assert_eq!(Error::ConversionFailed("x".into()).code(), "CONVERSION_ERROR");
    }

    #[test]
    fn test_error_to_mcp_error() {
        let mcp_err: McpError = Error::XssDetected.into();
        assert_eq!(mcp_err.code.0, -32021);

        let mcp_err: McpError = Error::InvalidInput("markdown cannot be empty".into()).into();
        assert_eq!(mcp_err.code.0, -32602);
        assert_eq!(mcp_err.message, "markdown cannot be empty");
    }
}
