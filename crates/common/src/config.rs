//! Configuration types and builder for growable collections
//!
//! [`DequeConfig`] controls the initial slot count and the growth factor of a
//! [`RingDeque`](crate::collections::RingDeque). Factors in
//! `(1, MAX_GROWTH_FACTOR]` keep growth amortized O(1); the golden ratio is
//! the default.

use serde::{Deserialize, Serialize};

use crate::error::{CollectionError, CollectionResult};

/// Slot count of a freshly constructed deque.
pub const DEFAULT_CAPACITY: usize = 16;

/// Default growth factor, φ.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Largest accepted growth factor.
pub const MAX_GROWTH_FACTOR: f64 = 4.0;

/// Sizing policy for a [`RingDeque`](crate::collections::RingDeque).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DequeConfig {
    /// Physical slots allocated up front. Zero defers allocation to the first
    /// push, which then allocates [`DEFAULT_CAPACITY`] slots.
    pub initial_capacity: usize,

    /// Multiplier applied to the capacity on each grow.
    pub growth_factor: f64,
}

impl Default for DequeConfig {
    fn default() -> Self {
        Self { initial_capacity: DEFAULT_CAPACITY, growth_factor: GOLDEN_RATIO }
    }
}

impl DequeConfig {
    /// Create a new configuration builder
    #[must_use]
    pub fn builder() -> DequeConfigBuilder {
        DequeConfigBuilder::default()
    }

    /// Preset with a custom initial capacity and the default growth factor.
    ///
    /// # Example
    /// ```
    /// use cds_common::config::DequeConfig;
    ///
    /// let config = DequeConfig::with_capacity(1024);
    /// assert_eq!(config.initial_capacity, 1024);
    /// ```
    #[must_use]
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self { initial_capacity, ..Self::default() }
    }

    /// Check that the configuration describes a growth policy that terminates.
    pub fn validate(&self) -> CollectionResult<()> {
        if !self.growth_factor.is_finite() {
            return Err(CollectionError::invalid_config("growth_factor", "must be finite"));
        }
        if self.growth_factor <= 1.0 {
            return Err(CollectionError::invalid_config(
                "growth_factor",
                format!("must be greater than 1, got {}", self.growth_factor),
            ));
        }
        if self.growth_factor > MAX_GROWTH_FACTOR {
            return Err(CollectionError::invalid_config(
                "growth_factor",
                format!("must be at most {MAX_GROWTH_FACTOR}, got {}", self.growth_factor),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Example
    /// ```
    /// use cds_common::config::DequeConfig;
    ///
    /// let config = DequeConfig::from_toml_str("growth_factor = 2.0").unwrap();
    /// assert_eq!(config.growth_factor, 2.0);
    /// assert_eq!(config.initial_capacity, 16);
    /// ```
    pub fn from_toml_str(source: &str) -> CollectionResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as a TOML document.
    pub fn to_toml_string(&self) -> CollectionResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Capacity that follows `capacity` under this policy, or `None` when it
    /// does not fit in a `usize`.
    ///
    /// The result is always strictly larger than `capacity`, and zero grows to
    /// [`DEFAULT_CAPACITY`].
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn next_capacity(&self, capacity: usize) -> Option<usize> {
        if capacity == 0 {
            return Some(DEFAULT_CAPACITY);
        }
        let scaled = (capacity as f64 * self.growth_factor).floor();
        // `usize::MAX as f64` rounds up to 2^64, so `>=` catches every value
        // the cast would saturate.
        if scaled.is_nan() || scaled >= usize::MAX as f64 {
            return None;
        }
        let minimum = capacity.checked_add(1)?;
        Some((scaled as usize).max(minimum))
    }
}

/// Builder for [`DequeConfig`] with fluent API
#[derive(Debug, Default)]
pub struct DequeConfigBuilder {
    config: DequeConfig,
}

impl DequeConfigBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial slot count
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Set the growth factor
    #[must_use]
    pub fn growth_factor(mut self, factor: f64) -> Self {
        self.config.growth_factor = factor;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> CollectionResult<DequeConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
