//! Markdown to WeChat HTML conversion for wxmd.
//!
//! This crate provides the conversion pipeline shared by the server and CLI:
//! markdown rendering, HTML sanitization, inline style injection, template
//! binding and the cached [`Converter`] that ties them together.

pub mod pipeline;
pub mod render;
pub mod sanitize;
pub mod style;
pub mod template;

pub use pipeline::{Converter, PipelineConfig};
pub use render::{ComrakRenderer, RenderOptions, Renderer};
pub use sanitize::Sanitizer;
pub use style::StyleEngine;
pub use template::TemplateBinder;
