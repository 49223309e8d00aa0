//! Error types shared by every collection in this crate.
//!
//! Collections distinguish two failure classes:
//!
//! 1. **Precondition violations**: reading or removing from an empty
//!    [`RingDeque`](crate::collections::RingDeque), or addressing a logical
//!    index outside `0..size()`. These are caller bugs. The plain methods
//!    halt with the error's message; the `try_*` family returns it as a
//!    [`CollectionError`] so long-running services can recover.
//!
//! 2. **Resource exhaustion**: a grow whose next capacity cannot be
//!    represented or allocated. The deque is left exactly as it was.
//!
//! 3. **Expected empty results**: dequeuing from an empty
//!    [`KeyedQueue`](crate::collections::KeyedQueue) is ordinary control flow
//!    and yields `None`, never an error.
//!
//! Configuration problems ([`DequeConfig`](crate::config::DequeConfig)
//! validation and TOML parsing) share the same enum so one result alias
//! covers the whole crate.
//!
//! ## ErrorClassification
//!
//! Every error implements [`ErrorClassification`] so callers can route it
//! through the same retry and alerting logic they use elsewhere:
//!
//! | Variant | Retryable | Severity |
//! |---------|-----------|----------|
//! | `EmptyCollection` | no | Error |
//! | `IndexOutOfRange` | no | Error |
//! | `CapacityOverflow` | no | Critical |
//! | `InvalidConfig` | no | Warning |
//! | `ConfigParse` | no | Warning |
//! | `ConfigSerialize` | no | Warning |
//!
//! ```rust
//! use cds_common::collections::RingDeque;
//! use cds_common::{CollectionError, ErrorClassification};
//!
//! let deque: RingDeque<u32> = RingDeque::new();
//! let err = deque.try_pop_low().unwrap_err();
//! assert!(matches!(err, CollectionError::EmptyCollection { .. }));
//! assert!(!err.is_retryable());
//! ```

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Result alias used across the crate.
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Errors raised by collection operations and configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// An operation that needs at least one element ran on an empty instance.
    #[error("{structure}::{operation}: collection is empty")]
    EmptyCollection {
        /// Type name of the collection, e.g. `RingDeque`.
        structure: &'static str,
        /// Method that was rejected.
        operation: &'static str,
    },

    /// A logical index fell outside `0..len`.
    #[error("{structure}::{operation}: index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Type name of the collection.
        structure: &'static str,
        /// Method that was rejected.
        operation: &'static str,
        /// Offending index.
        index: usize,
        /// Length at the time of the call.
        len: usize,
    },

    /// Growing past `capacity` slots is not representable or not allocatable.
    #[error("{structure}: cannot grow beyond capacity {capacity}")]
    CapacityOverflow {
        /// Type name of the collection.
        structure: &'static str,
        /// Capacity at the time of the failed grow.
        capacity: usize,
    },

    /// A configuration value failed validation.
    #[error("Invalid configuration for field '{field}': {message}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable reason.
        message: String,
    },

    /// A configuration document could not be parsed.
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    /// A configuration could not be rendered.
    #[error("Configuration serialization error: {0}")]
    ConfigSerialize(String),
}

impl CollectionError {
    /// Create an empty-collection error.
    #[must_use]
    pub const fn empty(structure: &'static str, operation: &'static str) -> Self {
        Self::EmptyCollection { structure, operation }
    }

    /// Create an index-out-of-range error.
    #[must_use]
    pub const fn index(
        structure: &'static str,
        operation: &'static str,
        index: usize,
        len: usize,
    ) -> Self {
        Self::IndexOutOfRange { structure, operation, index, len }
    }

    /// Create a capacity-overflow error.
    #[must_use]
    pub const fn capacity_overflow(structure: &'static str, capacity: usize) -> Self {
        Self::CapacityOverflow { structure, capacity }
    }

    /// Create a configuration validation error.
    pub fn invalid_config<M: Into<String>>(field: &'static str, message: M) -> Self {
        Self::InvalidConfig { field, message: message.into() }
    }

    /// Returns `true` for errors that signal caller misuse of a collection.
    #[must_use]
    pub const fn is_precondition_violation(&self) -> bool {
        matches!(self, Self::EmptyCollection { .. } | Self::IndexOutOfRange { .. })
    }

    /// Short, stable identifier for structured logging.
    #[must_use]
    pub const fn error_type_name(&self) -> &'static str {
        match self {
            Self::EmptyCollection { .. } => "empty_collection",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::CapacityOverflow { .. } => "capacity_overflow",
            Self::InvalidConfig { .. } => "invalid_config",
            Self::ConfigParse(_) => "config_parse",
            Self::ConfigSerialize(_) => "config_serialize",
        }
    }

    /// Convert the error to structured logging fields.
    ///
    /// ```rust
    /// use cds_common::CollectionError;
    ///
    /// let err = CollectionError::index("RingDeque", "get", 4, 2);
    /// let fields = err.as_tracing_fields();
    /// assert_eq!(fields[0], ("error_type", "index_out_of_range".to_string()));
    /// ```
    #[must_use]
    pub fn as_tracing_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("error_type", self.error_type_name().to_string())];

        match self {
            Self::EmptyCollection { structure, operation } => {
                fields.push(("structure", (*structure).to_string()));
                fields.push(("operation", (*operation).to_string()));
            }
            Self::IndexOutOfRange { structure, operation, index, len } => {
                fields.push(("structure", (*structure).to_string()));
                fields.push(("operation", (*operation).to_string()));
                fields.push(("index", index.to_string()));
                fields.push(("len", len.to_string()));
            }
            Self::CapacityOverflow { structure, capacity } => {
                fields.push(("structure", (*structure).to_string()));
                fields.push(("capacity", capacity.to_string()));
            }
            Self::InvalidConfig { field, message } => {
                fields.push(("field", (*field).to_string()));
                fields.push(("message", message.clone()));
            }
            Self::ConfigParse(message) | Self::ConfigSerialize(message) => {
                fields.push(("message", message.clone()));
            }
        }

        fields
    }
}

impl From<toml::de::Error> for CollectionError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

impl From<toml::ser::Error> for CollectionError {
    fn from(err: toml::ser::Error) -> Self {
        Self::ConfigSerialize(err.to_string())
    }
}

/// Standard interface for classifying errors by retryability and severity.
pub trait ErrorClassification {
    /// Check if this error is retryable.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level.
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention.
    fn is_critical(&self) -> bool;

    /// Get the suggested retry delay if applicable.
    fn retry_after(&self) -> Option<Duration>;
}

impl ErrorClassification for CollectionError {
    fn is_retryable(&self) -> bool {
        // Every variant is deterministic; repeating the call cannot succeed
        // unless the caller changes its input.
        false
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyCollection { .. } | Self::IndexOutOfRange { .. } => ErrorSeverity::Error,
            Self::CapacityOverflow { .. } => ErrorSeverity::Critical,
            Self::InvalidConfig { .. } | Self::ConfigParse(_) | Self::ConfigSerialize(_) => {
                ErrorSeverity::Warning
            }
        }
    }

    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Error severity levels for monitoring and alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
