//! Unique indexer
//!
//! One linear pass over a flat buffer. Each element is mapped to its
//! [`DedupKey`]; the first time a key is seen it is assigned the next
//! distinct index and the element's raw value is appended to the distinct
//! output. Every element records the index of its key in the inverse output.

use crate::{
    compat::*,
    error::{UniqError, UniqResult},
    key::DedupKey,
    storage::{CpuStorage, CpuStorageRef},
    types::ElementKind,
};

/// Runs the first-occurrence unique pass over a borrowed buffer.
#[derive(Debug, Clone, Copy)]
pub struct UniqueIndexer<'a> {
    input: CpuStorageRef<'a>,
}

impl<'a> UniqueIndexer<'a> {
    pub fn new(input: impl Into<CpuStorageRef<'a>>) -> Self {
        Self { input: input.into() }
    }

    pub fn kind(&self) -> ElementKind {
        self.input.kind()
    }

    /// Returns the distinct values in first-occurrence order and the inverse
    /// index of every input element.
    pub fn run(&self) -> UniqResult<(CpuStorage, Vec<i32>)> {
        let kind = self.kind();
        let len = self.input.len();
        log::debug!("unique: {} {} elements", len, kind);

        let (values, indices) = match self.input {
            CpuStorageRef::BOOL(data) => {
                let (values, indices) = unique_bool(data)?;
                (CpuStorage::BOOL(values), indices)
            },
            CpuStorageRef::F32(data) => {
                let (values, indices) = unique_f32(data)?;
                (CpuStorage::F32(values), indices)
            },
            #[cfg(feature = "f64")]
            CpuStorageRef::F64(data) => {
                let (values, indices) = unique_f64(data)?;
                (CpuStorage::F64(values), indices)
            },
            CpuStorageRef::I32(data) => {
                let (values, indices) = unique_i32(data)?;
                (CpuStorage::I32(values), indices)
            },
            CpuStorageRef::UTF8(data) => {
                let (values, indices) = unique_utf8(data)?;
                (CpuStorage::UTF8(values), indices)
            },
        };

        log::debug!("unique: {} distinct of {} {} elements", values.len(), len, kind);
        Ok((values, indices))
    }
}

/// Runs the unique pass over an owned buffer.
pub fn call_unique(storage: &CpuStorage) -> UniqResult<(CpuStorage, Vec<i32>)> {
    UniqueIndexer::new(storage).run()
}

macro_rules! declare_typed_unique {
    ($($type:ty => $suffix:ident $(, $cfg:meta)?);* $(;)?) => {
        paste::paste! {
            $(
                $(#[cfg($cfg)])?
                #[doc = concat!("First-occurrence unique over `", stringify!($type), "` values.")]
                pub fn [<unique_ $suffix>](values: &[$type]) -> UniqResult<(Vec<$type>, Vec<i32>)> {
                    index_by(values, |_, &value| Ok(DedupKey::from(value)))
                }
            )*
        }
    };
}

declare_typed_unique! {
    bool => bool;
    f32 => f32;
    f64 => f64, feature = "f64";
    i32 => i32;
}

/// First-occurrence unique over raw text elements.
///
/// Elements are compared by their decoded text; the distinct output keeps the
/// original bytes. Fails on the first element that is not valid UTF-8.
pub fn unique_utf8(values: &[Vec<u8>]) -> UniqResult<(Vec<Vec<u8>>, Vec<i32>)> {
    log::trace!("unique: decoding {} text elements", values.len());
    index_by(values, |index, bytes| DedupKey::from_text(index, bytes))
}

fn index_by<'a, T, F>(values: &'a [T], mut key_of: F) -> UniqResult<(Vec<T>, Vec<i32>)>
where
    T: Clone,
    F: FnMut(usize, &'a T) -> UniqResult<DedupKey<'a>>,
{
    if i32::try_from(values.len()).is_err() {
        return Err(UniqError::IndexOverflow { len: values.len() });
    }

    let mut occurrences: HashMap<DedupKey<'a>, i32> = HashMap::new();
    let mut distinct = Vec::new();
    let mut inverse = Vec::with_capacity(values.len());

    for (position, value) in values.iter().enumerate() {
        let key = key_of(position, value)?;
        let index = *occurrences.entry(key).or_insert_with(|| {
            distinct.push(value.clone());
            // bounded by the length check above
            (distinct.len() - 1) as i32
        });
        inverse.push(index);
    }

    Ok((distinct, inverse))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_indices_in_first_occurrence_order() {
        let (values, indices) = unique_i32(&[4, 2, 4, 1, 2]).unwrap();
        assert_eq!(values, vec![4, 2, 1]);
        assert_eq!(indices, vec![0, 1, 0, 2, 1]);
    }

    #[test]
    fn keeps_first_raw_value_for_coalesced_floats() {
        let (values, indices) = unique_f32(&[-0.0, 0.0, 1.5]).unwrap();
        assert_eq!(values.len(), 2);
        assert!(values[0] == 0.0 && values[0].is_sign_negative());
        assert_eq!(indices, vec![0, 0, 1]);
    }

    #[test]
    fn utf8_keeps_original_bytes() {
        let input = vec![b"x".to_vec(), b"y".to_vec(), b"x".to_vec()];
        let (values, indices) = unique_utf8(&input).unwrap();
        assert_eq!(values, vec![b"x".to_vec(), b"y".to_vec()]);
        assert_eq!(indices, vec![0, 1, 0]);
    }

    #[test]
    fn utf8_failure_produces_no_output() {
        let input = vec![b"ok".to_vec(), vec![0xc3, 0x28]];
        assert!(matches!(
            unique_utf8(&input),
            Err(UniqError::InvalidUtf8 { index: 1, .. })
        ));
    }

    #[test]
    fn indexer_reports_kind() {
        let data = [true, false];
        let indexer = UniqueIndexer::new(&data[..]);
        assert_eq!(indexer.kind(), ElementKind::BOOL);
        let (values, indices) = indexer.run().unwrap();
        assert_eq!(values, CpuStorage::BOOL(vec![true, false]));
        assert_eq!(indices, vec![0, 1]);
    }
}
