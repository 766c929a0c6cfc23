//! 32-bit FNV-1a over a key's canonical string form.
//!
//! The canonical form of a key is whatever its [`Display`] impl writes. The
//! formatter output is streamed straight into the accumulator, so hashing a key
//! never allocates.

use core::fmt::{self, Display, Write};

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;

/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 16_777_619;

/// Streaming FNV-1a accumulator.
///
/// Implements [`fmt::Write`] so any `Display` value can be fed into it with
/// `write!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fnv1a32 {
    state: u32,
}

impl Fnv1a32 {
    /// Creates an accumulator seeded with the offset basis.
    #[inline]
    pub const fn new() -> Self {
        Self { state: FNV_OFFSET_BASIS }
    }

    /// Folds `bytes` into the accumulator.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u32::from(byte);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }

    /// Returns the current hash value.
    #[inline(always)]
    pub const fn finish(&self) -> u32 {
        self.state
    }
}

impl Default for Fnv1a32 {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Write for Fnv1a32 {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

/// Hashes raw bytes.
#[inline]
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    let mut hasher = Fnv1a32::new();
    hasher.write_bytes(bytes);
    hasher.finish()
}

/// Hashes the `Display` form of `key`.
#[cfg_attr(feature = "inline-more", inline)]
pub fn hash_key<Q>(key: &Q) -> u32
where
    Q: Display + ?Sized,
{
    let mut hasher = Fnv1a32::new();
    // the sink is infallible; an error here can only come from a broken
    // `Display` impl, which still leaves a deterministic partial hash
    let _ = write!(hasher, "{key}");
    hasher.finish()
}

/// Maps `key` to a bucket in `0..capacity`.
///
/// `capacity` must be non-zero.
#[cfg_attr(feature = "inline-more", inline)]
pub fn bucket_index<Q>(key: &Q, capacity: usize) -> usize
where
    Q: Display + ?Sized,
{
    debug_assert!(capacity > 0);
    (hash_key(key) as usize) % capacity
}
