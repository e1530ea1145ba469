//! Core types and shared functionality for wxmd.
//!
//! This crate provides:
//! - In-memory conversion cache with TTL expiry
//! - Content fingerprints used as cache keys
//! - Unified error types
//! - Configuration structures
//! - Request and result types passed through the pipeline

pub mod cache;
pub mod config;
pub mod error;
pub mod request;

pub use cache::{CacheStats, ConversionCache, Fingerprint};
pub use config::{AppConfig, ConfigError, PipelineMode};
pub use error::Error;
pub use request::{ConversionResult, ConvertOptions};
