//! MCP tool implementations.
//!
//! This module contains all tools exposed by the wxmd server.

pub mod cache;
pub mod wechat_convert;

pub use wechat_convert::WechatConvertParams;
