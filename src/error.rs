//! Errors reported while building a map.
//!
//! Map operations themselves never fail; a missing key is `None`, not an error.

use thiserror::Error;

/// Rejected [`MapConfig`](crate::MapConfig).
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A bucket array needs at least one slot.
    #[error("initial capacity must be non-zero")]
    ZeroCapacity,

    /// The growth threshold must be a finite, positive ratio.
    #[error("invalid load factor {0}: expected a finite value greater than 0")]
    InvalidLoadFactor(f64),
}
