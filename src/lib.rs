#![doc = include_str!("../README.md")]

#![no_std]

#![warn(
    anonymous_parameters,
    missing_copy_implementations,
    missing_debug_implementations,
    nonstandard_style,
    rust_2018_idioms,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_qualifications,
    variant_size_differences
)]

extern crate alloc;

mod chain;
mod config;
mod error;
mod map;
mod order;

pub mod hash;
pub mod prime;
pub mod set;

pub use config::{GrowthPolicy, MapConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use error::ConfigError;
pub use map::{ChainMap, IntoIter, Iter, Keys, Values};

pub use set::ChainSet;

/// Growth arithmetic left `usize`. There is no graceful degradation.
#[cold]
#[inline(never)]
pub(crate) fn capacity_overflow() -> ! {
    panic!("ordered-chain-map: capacity overflow")
}
