//! Concurrent in-memory collections.
//!
//! Each data structure in this crate is safe for concurrent use by multiple
//! threads; callers share instances through `Arc` and never lock externally.
//!
//! # Modules
//!
//! - [`collections`]: [`RingDeque`](collections::RingDeque),
//!   [`KeyedQueue`](collections::KeyedQueue), and the map/set wrappers
//! - [`config`]: sizing policy for growable collections
//! - [`error`]: error type and classification shared by all collections

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod collections;
pub mod config;
pub mod error;

// Re-export commonly used types and traits for convenience
pub use collections::{
    ConcurrentMap, ConcurrentSet, KeyedQueue, MapStrInt, MapStrStr, RingDeque, SetOfInt, SetOfStr,
};
pub use config::{
    DequeConfig, DequeConfigBuilder, DEFAULT_CAPACITY, GOLDEN_RATIO, MAX_GROWTH_FACTOR,
};
pub use error::{CollectionError, CollectionResult, ErrorClassification, ErrorSeverity};
