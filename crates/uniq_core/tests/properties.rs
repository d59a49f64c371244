//! Property tests for the unique pass
//!
//! Checks, over random inputs of every kind:
//! - reconstruction through the inverse indices gives back the input
//! - the distinct values hold no duplicates
//! - distinct values appear in first-occurrence order
//! - output lengths and index ranges are bounded
//! - running the pass on its own distinct output is the identity

use proptest::prelude::*;
use uniq_core::key::DedupKey;
use uniq_core::prelude::*;

/// Dedup keys of a buffer, one per element.
fn keys(storage: &CpuStorage) -> Vec<DedupKey<'_>> {
    match storage {
        CpuStorage::BOOL(v) => v.iter().map(|&x| DedupKey::from(x)).collect(),
        CpuStorage::F32(v) => v.iter().map(|&x| DedupKey::from(x)).collect(),
        #[cfg(feature = "f64")]
        CpuStorage::F64(v) => v.iter().map(|&x| DedupKey::from(x)).collect(),
        CpuStorage::I32(v) => v.iter().map(|&x| DedupKey::from(x)).collect(),
        CpuStorage::UTF8(v) => v
            .iter()
            .enumerate()
            .map(|(i, b)| DedupKey::from_text(i, b).unwrap())
            .collect(),
    }
}

fn check_invariants(input: &CpuStorage) -> Result<(), TestCaseError> {
    let n = input.len();
    let out = unique(input, &Shape::vector(n)).unwrap();
    let d = out.len();

    // length bounds
    prop_assert!(d <= n);
    prop_assert_eq!(out.indices.len(), n);
    prop_assert!(out.indices.iter().all(|&i| i >= 0 && (i as usize) < d));
    prop_assert_eq!(out.kind(), input.kind());

    // round-trip
    let input_keys = keys(input);
    let rebuilt = out.reconstruct().unwrap();
    prop_assert_eq!(keys(&rebuilt), input_keys.clone());

    // no duplicates
    let distinct_keys = keys(&out.values);
    for j in 0..d {
        for k in (j + 1)..d {
            prop_assert_ne!(distinct_keys[j], distinct_keys[k]);
        }
    }

    // first-occurrence order
    let first_positions: Vec<usize> = distinct_keys
        .iter()
        .map(|key| input_keys.iter().position(|k| k == key).unwrap())
        .collect();
    prop_assert!(first_positions.windows(2).all(|w| w[0] < w[1]));
    for (k, &first) in first_positions.iter().enumerate() {
        prop_assert_eq!(out.indices[first] as usize, k);
    }

    // idempotence
    let again = unique(&out.values, &Shape::vector(d)).unwrap();
    prop_assert_eq!(keys(&again.values), distinct_keys.clone());
    prop_assert_eq!(again.indices, (0..d as i32).collect::<Vec<_>>());

    Ok(())
}

fn small_floats() -> impl Strategy<Value = f32> {
    prop_oneof![
        (-4i8..4).prop_map(|v| v as f32 * 0.5),
        Just(f32::NAN),
        Just(-0.0f32),
        Just(f32::INFINITY),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_unique_i32(values in prop::collection::vec(-8i32..8, 0..64)) {
        check_invariants(&CpuStorage::I32(values))?;
    }

    #[test]
    fn prop_unique_bool(values in prop::collection::vec(any::<bool>(), 0..32)) {
        check_invariants(&CpuStorage::BOOL(values))?;
    }

    #[test]
    fn prop_unique_f32(values in prop::collection::vec(small_floats(), 0..48)) {
        check_invariants(&CpuStorage::F32(values))?;
    }

    #[cfg(feature = "f64")]
    #[test]
    fn prop_unique_f64(values in prop::collection::vec(small_floats().prop_map(f64::from), 0..48)) {
        check_invariants(&CpuStorage::F64(values))?;
    }

    #[test]
    fn prop_unique_utf8(values in prop::collection::vec("[a-c]{0,2}", 0..48)) {
        check_invariants(&CpuStorage::from(values))?;
    }

    #[test]
    fn prop_unique_bytes_round_trip(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let input = CpuStorage::I32(values);
        let bytes = input.to_bytes().unwrap();
        let out = unique_from_bytes(&bytes, ElementKind::I32, &Shape::vector(input.len())).unwrap();
        prop_assert_eq!(out.reconstruct().unwrap(), input);
    }
}
