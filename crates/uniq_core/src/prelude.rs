//! Prelude module for convenient imports
//!
//! Usage: `use uniq_core::prelude::*;`

pub use crate::error::{UniqError, UniqResult};
pub use crate::indexer::{call_unique, UniqueIndexer};
pub use crate::key::DedupKey;
pub use crate::ops::{unique, unique_from_bytes, Unique};
pub use crate::storage::{CpuStorage, CpuStorageRef};
pub use crate::types::{ElementKind, Shape};
