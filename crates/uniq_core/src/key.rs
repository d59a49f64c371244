//! Dedup keys
//!
//! A [`DedupKey`] is the value a unique pass hashes and compares. One call
//! only ever produces keys of a single variant, chosen by the element kind of
//! its input.
//!
//! Floating point keys follow "SameValueZero" equality: every NaN is the
//! same key regardless of sign or payload, and `-0.0` is the same key as
//! `+0.0`. All other floats compare by bit pattern, which for non-NaN,
//! non-zero values is the same as numeric equality.

use crate::{
    compat::*,
    error::{UniqError, UniqResult},
};

const CANONICAL_NAN_F32: u32 = 0x7fc0_0000;
#[cfg(feature = "f64")]
const CANONICAL_NAN_F64: u64 = 0x7ff8_0000_0000_0000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DedupKey<'a> {
    Bool(bool),
    Int32(i32),
    Float32(u32),
    #[cfg(feature = "f64")]
    Float64(u64),
    /// Decoded text borrowed from the input bytes.
    Text(&'a str),
}

impl<'a> DedupKey<'a> {
    /// Decodes a text element. `index` is the element position, reported on failure.
    pub fn from_text(index: usize, bytes: &'a [u8]) -> UniqResult<Self> {
        core::str::from_utf8(bytes)
            .map(Self::Text)
            .map_err(|e| UniqError::InvalidUtf8 {
                index,
                reason: e.to_string(),
            })
    }
}

impl From<bool> for DedupKey<'_> {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for DedupKey<'_> {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<f32> for DedupKey<'_> {
    #[inline]
    fn from(value: f32) -> Self {
        let bits = if value.is_nan() {
            CANONICAL_NAN_F32
        } else if value == 0.0 {
            0
        } else {
            value.to_bits()
        };
        Self::Float32(bits)
    }
}

#[cfg(feature = "f64")]
impl From<f64> for DedupKey<'_> {
    #[inline]
    fn from(value: f64) -> Self {
        let bits = if value.is_nan() {
            CANONICAL_NAN_F64
        } else if value == 0.0 {
            0
        } else {
            value.to_bits()
        };
        Self::Float64(bits)
    }
}
