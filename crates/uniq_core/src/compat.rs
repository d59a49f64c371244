//! std/no-std compatibility layer
//!
//! Internal module for handling differences between std and no-std environments.

#![allow(unused_imports)]

// Basic types and formatting
#[cfg(not(feature = "std"))]
pub use alloc::{
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};

#[cfg(feature = "std")]
pub use std::{
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};

// Collections
//
// Without std the occurrence map falls back to an ordered map, so every key
// type must implement `Ord` as well as `Hash`.
#[cfg(not(feature = "std"))]
pub use alloc::collections::BTreeMap as HashMap;

#[cfg(feature = "std")]
pub use std::collections::HashMap;

// Core traits and functions
pub use core::fmt;
