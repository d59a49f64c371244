//! Tensor-level unique
//!
//! Validates the shape metadata a caller carries alongside its flat buffer,
//! then hands the buffer to the [`UniqueIndexer`].

use crate::{
    compat::*,
    error::{UniqError, UniqResult},
    indexer::UniqueIndexer,
    storage::CpuStorage,
    types::{ElementKind, Shape},
};

/// Output of a unique pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unique {
    /// Distinct values in first-occurrence order, same kind as the input.
    pub values: CpuStorage,
    /// Position in `values` of every input element.
    pub indices: Vec<i32>,
}

impl Unique {
    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn kind(&self) -> ElementKind {
        self.values.kind()
    }

    pub fn values_shape(&self) -> Shape {
        Shape::vector(self.values.len())
    }

    pub fn indices_shape(&self) -> Shape {
        Shape::vector(self.indices.len())
    }

    /// The inverse indices as an `i32` buffer.
    pub fn indices_storage(&self) -> CpuStorage {
        CpuStorage::I32(self.indices.clone())
    }

    /// Rebuilds the input from the distinct values and the inverse indices.
    pub fn reconstruct(&self) -> UniqResult<CpuStorage> {
        self.values.gather(&self.indices)
    }
}

/// Deduplicates a rank-1 buffer described by `shape`.
///
/// Fails with [`UniqError::InvalidRank`] for any other rank, and with
/// [`UniqError::LengthMismatch`] if `shape` does not describe exactly the
/// elements in `storage`.
pub fn unique(storage: &CpuStorage, shape: &Shape) -> UniqResult<Unique> {
    validate_vector(shape, storage.len())?;

    let (values, indices) = UniqueIndexer::new(storage).run()?;
    Ok(Unique { values, indices })
}

/// Decodes a raw buffer of `kind` elements and deduplicates it.
pub fn unique_from_bytes(data: &[u8], kind: ElementKind, shape: &Shape) -> UniqResult<Unique> {
    if shape.ndim() != 1 {
        return Err(UniqError::InvalidRank { ndim: shape.ndim() });
    }
    let storage = CpuStorage::from_bytes(data, kind, shape.size())?;
    unique(&storage, shape)
}

fn validate_vector(shape: &Shape, len: usize) -> UniqResult<()> {
    if shape.ndim() != 1 {
        return Err(UniqError::InvalidRank { ndim: shape.ndim() });
    }
    if shape.size() != len {
        return Err(UniqError::LengthMismatch {
            expected: shape.size(),
            got: len,
        });
    }
    Ok(())
}
