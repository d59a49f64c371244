//! uniq core
//!
//! Deduplicates a flat, one-dimensional buffer in a single linear pass and
//! returns the distinct values in first-occurrence order together with the
//! inverse index of every input element.
//!
//! ```
//! use uniq_core::prelude::*;
//!
//! let input = CpuStorage::I32(vec![1, 2, 1, 3, 2]);
//! let out = unique(&input, &Shape::from([5])).unwrap();
//!
//! assert_eq!(out.values, CpuStorage::I32(vec![1, 2, 3]));
//! assert_eq!(out.indices, vec![0, 1, 0, 2, 1]);
//! ```

#![no_std]
#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub(crate) mod compat;
pub mod error;
pub mod indexer;
pub mod key;
pub mod ops;
pub mod prelude;
pub mod storage;
pub mod types;
