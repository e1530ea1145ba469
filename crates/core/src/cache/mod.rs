//! In-memory cache for finished conversions.
//!
//! Entries are keyed by a SHA-256 fingerprint of the markdown and options and
//! expire a fixed time after insertion. Expiry is enforced lazily on read and
//! by an opportunistic sweep on write.

pub mod fingerprint;
pub mod memory;

pub use fingerprint::{Fingerprint, compute_fingerprint};
pub use memory::{CacheStats, ConversionCache, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};
