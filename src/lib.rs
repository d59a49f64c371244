//! First-occurrence unique values and inverse indices for flat tensor buffers.
//!
//! Re-exports [`uniq_core`]; see [`uniq_core::ops::unique`] for the entry point.

#![no_std]

pub use uniq_core::*;
