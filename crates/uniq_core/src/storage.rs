//! Flat CPU storage
//!
//! [`CpuStorage`] owns one contiguous buffer per element kind and
//! [`CpuStorageRef`] borrows one. Text elements are kept as raw bytes; they
//! are only decoded when a unique pass needs a key for them.
//!
//! # Raw byte layout
//! - `bool`: one byte per element, nonzero is `true`
//! - `f32`, `f64`, `i32`: little-endian, fixed width
//! - `utf8`: per element, a little-endian `u32` byte count followed by that
//!   many bytes

use crate::{
    compat::*,
    error::{UniqError, UniqResult},
    types::ElementKind,
};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CpuStorage {
    BOOL(Vec<bool>),
    F32(Vec<f32>),
    #[cfg(feature = "f64")]
    F64(Vec<f64>),
    I32(Vec<i32>),
    UTF8(Vec<Vec<u8>>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CpuStorageRef<'a> {
    BOOL(&'a [bool]),
    F32(&'a [f32]),
    #[cfg(feature = "f64")]
    F64(&'a [f64]),
    I32(&'a [i32]),
    UTF8(&'a [Vec<u8>]),
}

macro_rules! impl_from_data {
    ($($type:ty => $variant:ident $(, $cfg:meta)?);* $(;)?) => {
        $(
            $(#[cfg($cfg)])?
            impl From<Vec<$type>> for CpuStorage {
                fn from(data: Vec<$type>) -> Self {
                    Self::$variant(data)
                }
            }

            $(#[cfg($cfg)])?
            impl<'a> From<&'a [$type]> for CpuStorageRef<'a> {
                fn from(data: &'a [$type]) -> Self {
                    Self::$variant(data)
                }
            }
        )*
    };
}

impl_from_data! {
    bool => BOOL;
    f32 => F32;
    f64 => F64, feature = "f64";
    i32 => I32;
    Vec<u8> => UTF8;
}

impl<'a> From<&'a CpuStorage> for CpuStorageRef<'a> {
    fn from(storage: &'a CpuStorage) -> Self {
        storage.as_ref()
    }
}

impl From<Vec<String>> for CpuStorage {
    fn from(data: Vec<String>) -> Self {
        Self::UTF8(data.into_iter().map(String::into_bytes).collect())
    }
}

impl From<Vec<&str>> for CpuStorage {
    fn from(data: Vec<&str>) -> Self {
        Self::UTF8(data.into_iter().map(|s| s.as_bytes().to_vec()).collect())
    }
}

impl CpuStorage {
    pub fn kind(&self) -> ElementKind {
        self.as_ref().kind()
    }

    pub fn len(&self) -> usize {
        self.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_ref(&self) -> CpuStorageRef<'_> {
        match self {
            Self::BOOL(data) => CpuStorageRef::BOOL(data),
            Self::F32(data) => CpuStorageRef::F32(data),
            #[cfg(feature = "f64")]
            Self::F64(data) => CpuStorageRef::F64(data),
            Self::I32(data) => CpuStorageRef::I32(data),
            Self::UTF8(data) => CpuStorageRef::UTF8(data),
        }
    }

    /// Decodes `len` elements of `kind` from a raw little-endian buffer.
    ///
    /// The whole buffer must be consumed: a byte count that does not split
    /// into exactly `len` elements is an error, never truncated or padded.
    /// Bytes that cannot be split into whole elements fail with
    /// `MalformedBuffer`. A buffer that splits cleanly into the wrong number
    /// of elements fails with `LengthMismatch`, checked before decoding for
    /// fixed-width kinds and after the last element for `utf8`.
    pub fn from_bytes(data: &[u8], kind: ElementKind, len: usize) -> UniqResult<Self> {
        log::trace!("decoding {} bytes as {} {} elements", data.len(), len, kind);

        if let Some(width) = kind.get_size_in_bytes() {
            if data.len() % width != 0 {
                return Err(UniqError::MalformedBuffer {
                    kind,
                    reason: format!(
                        "{} bytes is not a multiple of the {}-byte element width",
                        data.len(),
                        width
                    ),
                });
            }
            let got = data.len() / width;
            if got != len {
                return Err(UniqError::LengthMismatch { expected: len, got });
            }
        }

        let storage = match kind {
            ElementKind::BOOL => Self::BOOL(data.iter().map(|&b| b != 0).collect()),
            ElementKind::F32 => Self::F32(
                data.chunks_exact(4)
                    .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ),
            #[cfg(feature = "f64")]
            ElementKind::F64 => Self::F64(
                data.chunks_exact(8)
                    .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
                    .collect(),
            ),
            ElementKind::I32 => Self::I32(
                data.chunks_exact(4)
                    .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ),
            ElementKind::UTF8 => Self::UTF8(split_text_elements(data, len)?),
        };

        Ok(storage)
    }

    /// Encodes the buffer in the raw layout read by [`CpuStorage::from_bytes`].
    pub fn to_bytes(&self) -> UniqResult<Vec<u8>> {
        let bytes = match self {
            Self::BOOL(data) => data.iter().map(|&b| if b { 1u8 } else { 0u8 }).collect(),
            Self::F32(data) => data.iter().flat_map(|v| v.to_le_bytes()).collect(),
            #[cfg(feature = "f64")]
            Self::F64(data) => data.iter().flat_map(|v| v.to_le_bytes()).collect(),
            Self::I32(data) => data.iter().flat_map(|v| v.to_le_bytes()).collect(),
            Self::UTF8(data) => {
                let total = data.iter().map(|e| e.len() + 4).sum();
                let mut bytes = Vec::with_capacity(total);
                for (index, element) in data.iter().enumerate() {
                    let n = u32::try_from(element.len()).map_err(|_| UniqError::MalformedBuffer {
                        kind: ElementKind::UTF8,
                        reason: format!("element {} is longer than u32::MAX bytes", index),
                    })?;
                    bytes.extend_from_slice(&n.to_le_bytes());
                    bytes.extend_from_slice(element);
                }
                bytes
            },
        };
        Ok(bytes)
    }

    /// Builds `self[indices[i]]` for every `i`.
    pub fn gather(&self, indices: &[i32]) -> UniqResult<Self> {
        macro_rules! gather {
            ($data:expr) => {{
                let mut out = Vec::with_capacity(indices.len());
                for &index in indices {
                    let value = usize::try_from(index)
                        .ok()
                        .and_then(|i| $data.get(i))
                        .ok_or(UniqError::IndexOutOfBounds {
                            index,
                            len: $data.len(),
                        })?;
                    out.push(value.clone());
                }
                out
            }};
        }

        let gathered = match self {
            Self::BOOL(data) => Self::BOOL(gather!(data)),
            Self::F32(data) => Self::F32(gather!(data)),
            #[cfg(feature = "f64")]
            Self::F64(data) => Self::F64(gather!(data)),
            Self::I32(data) => Self::I32(gather!(data)),
            Self::UTF8(data) => Self::UTF8(gather!(data)),
        };
        Ok(gathered)
    }
}

impl CpuStorageRef<'_> {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::BOOL(_) => ElementKind::BOOL,
            Self::F32(_) => ElementKind::F32,
            #[cfg(feature = "f64")]
            Self::F64(_) => ElementKind::F64,
            Self::I32(_) => ElementKind::I32,
            Self::UTF8(_) => ElementKind::UTF8,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::BOOL(data) => data.len(),
            Self::F32(data) => data.len(),
            #[cfg(feature = "f64")]
            Self::F64(data) => data.len(),
            Self::I32(data) => data.len(),
            Self::UTF8(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_storage(&self) -> CpuStorage {
        match *self {
            Self::BOOL(data) => CpuStorage::BOOL(data.to_vec()),
            Self::F32(data) => CpuStorage::F32(data.to_vec()),
            #[cfg(feature = "f64")]
            Self::F64(data) => CpuStorage::F64(data.to_vec()),
            Self::I32(data) => CpuStorage::I32(data.to_vec()),
            Self::UTF8(data) => CpuStorage::UTF8(data.to_vec()),
        }
    }
}

fn split_text_elements(data: &[u8], len: usize) -> UniqResult<Vec<Vec<u8>>> {
    // every element costs at least its 4-byte prefix
    let mut elements = Vec::with_capacity(len.min(data.len() / 4));
    let mut rest = data;

    while !rest.is_empty() {
        if rest.len() < 4 {
            let reason = if elements.len() >= len {
                format!("trailing {} bytes after element {}", rest.len(), elements.len())
            } else {
                format!("truncated length prefix for element {}", elements.len())
            };
            return Err(UniqError::MalformedBuffer {
                kind: ElementKind::UTF8,
                reason,
            });
        }
        let (prefix, tail) = rest.split_at(4);
        let n = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
        if tail.len() < n {
            return Err(UniqError::MalformedBuffer {
                kind: ElementKind::UTF8,
                reason: format!(
                    "element {} declares {} bytes but only {} remain",
                    elements.len(),
                    n,
                    tail.len()
                ),
            });
        }
        let (bytes, tail) = tail.split_at(n);
        elements.push(bytes.to_vec());
        rest = tail;
    }

    if elements.len() != len {
        return Err(UniqError::LengthMismatch {
            expected: len,
            got: elements.len(),
        });
    }

    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_fixed_width_little_endian() {
        let bytes = [1i32, -2, 3].iter().flat_map(|v| v.to_le_bytes()).collect::<Vec<_>>();
        let storage = CpuStorage::from_bytes(&bytes, ElementKind::I32, 3).unwrap();
        assert_eq!(storage, CpuStorage::I32(vec![1, -2, 3]));
        assert_eq!(storage.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn decodes_bool_as_nonzero() {
        let storage = CpuStorage::from_bytes(&[0, 1, 7, 0], ElementKind::BOOL, 4).unwrap();
        assert_eq!(storage, CpuStorage::BOOL(vec![false, true, true, false]));
    }

    #[test]
    fn rejects_misaligned_and_short_buffers() {
        assert!(matches!(
            CpuStorage::from_bytes(&[0; 6], ElementKind::F32, 1),
            Err(UniqError::MalformedBuffer { .. })
        ));
        assert_eq!(
            CpuStorage::from_bytes(&[0; 8], ElementKind::I32, 3),
            Err(UniqError::LengthMismatch { expected: 3, got: 2 })
        );
    }

    #[test]
    fn decodes_length_prefixed_text() {
        let mut bytes = Vec::new();
        for s in ["ab", "", "c"] {
            bytes.extend_from_slice(&(s.len() as u32).to_le_bytes());
            bytes.extend_from_slice(s.as_bytes());
        }
        let storage = CpuStorage::from_bytes(&bytes, ElementKind::UTF8, 3).unwrap();
        assert_eq!(storage, CpuStorage::from(vec!["ab", "", "c"]));
        assert_eq!(storage.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn rejects_truncated_text() {
        let mut bytes = 5u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(b"abc");
        assert!(matches!(
            CpuStorage::from_bytes(&bytes, ElementKind::UTF8, 1),
            Err(UniqError::MalformedBuffer { .. })
        ));
        assert!(matches!(
            CpuStorage::from_bytes(&[1, 0], ElementKind::UTF8, 1),
            Err(UniqError::MalformedBuffer { .. })
        ));
    }

    #[test]
    fn rejects_trailing_text_bytes() {
        let mut element = 1u32.to_le_bytes().to_vec();
        element.push(b'a');
        for stray in 1..4 {
            let mut bytes = element.clone();
            bytes.extend(core::iter::repeat(0u8).take(stray));
            match CpuStorage::from_bytes(&bytes, ElementKind::UTF8, 1) {
                Err(UniqError::MalformedBuffer { reason, .. }) => {
                    assert_eq!(reason, format!("trailing {} bytes after element 1", stray));
                },
                other => panic!("expected MalformedBuffer, got {:?}", other),
            }
        }
        match CpuStorage::from_bytes(&[1, 0, 0, 0, b'a', 0, 0], ElementKind::UTF8, 2) {
            Err(UniqError::MalformedBuffer { reason, .. }) => {
                assert_eq!(reason, "truncated length prefix for element 1");
            },
            other => panic!("expected MalformedBuffer, got {:?}", other),
        }
    }

    #[test]
    fn rejects_text_count_mismatch() {
        let mut bytes = 1u32.to_le_bytes().to_vec();
        bytes.push(b'a');
        assert_eq!(
            CpuStorage::from_bytes(&bytes, ElementKind::UTF8, 2),
            Err(UniqError::LengthMismatch { expected: 2, got: 1 })
        );
    }

    #[test]
    fn borrowed_view_round_trips() {
        let storage = CpuStorage::from(vec![String::from("a"), String::from("bc")]);
        let view = CpuStorageRef::from(&storage);
        assert_eq!(view.kind(), ElementKind::UTF8);
        assert_eq!(view.len(), 2);
        assert_eq!(view.to_storage(), storage);
    }

    #[test]
    fn gather_checks_bounds() {
        let storage = CpuStorage::I32(vec![10, 20]);
        assert_eq!(storage.gather(&[1, 0, 1]).unwrap(), CpuStorage::I32(vec![20, 10, 20]));
        assert_eq!(
            storage.gather(&[2]),
            Err(UniqError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert_eq!(
            storage.gather(&[-1]),
            Err(UniqError::IndexOutOfBounds { index: -1, len: 2 })
        );
    }
}
