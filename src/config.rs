//! Sizing and growth configuration.

use crate::error::ConfigError;
use crate::prime::next_prime;

/// Default number of buckets.
pub const DEFAULT_INITIAL_CAPACITY: usize = 19;

/// Default `len / capacity` ratio above which the table grows.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// How the target size of a grown bucket array is chosen.
///
/// Whatever the policy, the target keeps doubling until the entries fit
/// under the load factor, and the final capacity is the next prime at or
/// above the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrowthPolicy {
    /// Target `max(len, capacity) * 2`.
    #[default]
    DoubleLarger,
    /// Target `len * 2`.
    DoubleSize,
}

impl GrowthPolicy {
    /// Picks the capacity to grow to when `len` entries no longer fit in
    /// `capacity` buckets at `load_factor`.
    pub fn grow(self, len: usize, capacity: usize, load_factor: f64) -> usize {
        let base = match self {
            Self::DoubleLarger => len.max(capacity),
            Self::DoubleSize => len,
        };

        let mut target = double(base.max(1));
        let mut new_capacity = next_prime(target);
        while len as f64 / new_capacity as f64 > load_factor {
            target = double(target);
            new_capacity = next_prime(target);
        }
        new_capacity
    }
}

#[inline]
fn double(n: usize) -> usize {
    match n.checked_mul(2) {
        Some(n) => n,
        None => crate::capacity_overflow(),
    }
}

/// Construction parameters for a [`ChainMap`](crate::ChainMap).
///
/// # Examples
///
/// ```
/// use ordered_chain_map::{ChainMap, GrowthPolicy, MapConfig};
///
/// let config = MapConfig::new()
///     .initial_capacity(7)
///     .load_factor(0.5)
///     .growth(GrowthPolicy::DoubleSize);
///
/// let map: ChainMap<u32, u32> = ChainMap::with_config(config).unwrap();
/// assert_eq!(map.capacity(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    pub(crate) initial_capacity: usize,
    pub(crate) load_factor: f64,
    pub(crate) growth: GrowthPolicy,
}

impl MapConfig {
    #[inline]
    pub const fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            growth: GrowthPolicy::DoubleLarger,
        }
    }

    /// Bucket count for a new or cleared map. Rounded up to a prime.
    #[inline]
    pub const fn initial_capacity(mut self, n: usize) -> Self {
        self.initial_capacity = n;
        self
    }

    #[inline]
    pub fn load_factor(mut self, ratio: f64) -> Self {
        self.load_factor = ratio;
        self
    }

    #[inline]
    pub const fn growth(mut self, policy: GrowthPolicy) -> Self {
        self.growth = policy;
        self
    }

    #[inline]
    pub const fn get_initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    #[inline]
    pub fn get_load_factor(&self) -> f64 {
        self.load_factor
    }

    #[inline]
    pub const fn get_growth(&self) -> GrowthPolicy {
        self.growth
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity)
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(ConfigError::InvalidLoadFactor(self.load_factor))
        }
        Ok(())
    }

    /// The prime bucket count actually allocated for this config.
    #[inline]
    pub(crate) fn bucket_count(&self) -> usize {
        next_prime(self.initial_capacity)
    }
}

impl Default for MapConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
