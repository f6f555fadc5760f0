//! Unique-item sets in canonical key order.

use std::cmp::Ordering;

use ertp_core::{AmountError, Key, KeyEquality, RawValue, StructuralKeys};
use serde_json::Value as Json;

use crate::elements;
use crate::helpers::MathHelpers;
use crate::set::{common_element_error, ensure_unique, missing_element_error};

/// Duplicate-free keys sorted under the helper's key order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopySet(Vec<Key>);

impl CopySet {
    /// The elements in canonical order.
    pub fn elements(&self) -> &[Key] {
        &self.0
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the elements in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.0.iter()
    }

    /// JSON rendering, a plain array.
    pub fn to_json(&self) -> Json {
        Json::Array(self.0.iter().map(Key::to_json).collect())
    }

    /// Raw form accepted by [`CopySetMath::make`].
    pub fn to_raw(&self) -> RawValue {
        RawValue::List(self.0.iter().map(RawValue::from).collect())
    }

    fn refs(&self) -> Vec<&Key> {
        self.0.iter().collect()
    }
}

/// Math helpers for [`ertp_core::AssetKind::CopySet`].
#[derive(Debug, Clone, Copy)]
pub struct CopySetMath<'a, E: KeyEquality + ?Sized = StructuralKeys> {
    keys: &'a E,
}

impl<'a, E: KeyEquality + ?Sized> CopySetMath<'a, E> {
    /// Helpers comparing elements with `keys`.
    pub fn new(keys: &'a E) -> Self {
        Self { keys }
    }
}

impl<'a, E: KeyEquality + ?Sized> MathHelpers for CopySetMath<'a, E> {
    type Value = CopySet;

    fn make(&self, raw: &RawValue) -> Result<CopySet, AmountError> {
        let mut keys = elements::keys_from_raw(raw, "copySet")?;
        ensure_unique(self.keys, &keys, "copySet.duplicate")?;
        keys.sort_by(|a, b| self.keys.compare_keys(a, b));
        Ok(CopySet(keys))
    }

    fn empty(&self) -> CopySet {
        CopySet::default()
    }

    fn is_empty(&self, value: &CopySet) -> bool {
        value.0.is_empty()
    }

    fn is_gte(&self, left: &CopySet, right: &CopySet) -> bool {
        right.0.len() <= left.0.len()
            && elements::missing(self.keys, &left.refs(), &right.refs()).is_empty()
    }

    fn is_equal(&self, left: &CopySet, right: &CopySet) -> bool {
        left.0.len() == right.0.len()
            && left
                .0
                .iter()
                .zip(&right.0)
                .all(|(a, b)| self.keys.keys_equal(a, b))
    }

    fn add(&self, left: &CopySet, right: &CopySet) -> Result<CopySet, AmountError> {
        let mut merged = Vec::with_capacity(left.0.len() + right.0.len());
        let mut common = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < left.0.len() && j < right.0.len() {
            match self.keys.compare_keys(&left.0[i], &right.0[j]) {
                Ordering::Less => {
                    merged.push(left.0[i].clone());
                    i += 1;
                }
                Ordering::Greater => {
                    merged.push(right.0[j].clone());
                    j += 1;
                }
                Ordering::Equal => {
                    common.push(left.0[i].clone());
                    i += 1;
                    j += 1;
                }
            }
        }
        if !common.is_empty() {
            return Err(common_element_error(&common, "copySet.common-element"));
        }
        merged.extend(left.0[i..].iter().cloned());
        merged.extend(right.0[j..].iter().cloned());
        Ok(CopySet(merged))
    }

    fn subtract(&self, left: &CopySet, right: &CopySet) -> Result<CopySet, AmountError> {
        let r = right.refs();
        let missing = elements::missing(self.keys, &left.refs(), &r);
        if !missing.is_empty() {
            return Err(missing_element_error(&missing, "copySet.missing-element"));
        }
        let remaining = left
            .0
            .iter()
            .filter(|element| !elements::contains(self.keys, &r, element))
            .cloned()
            .collect();
        Ok(CopySet(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_sorts_elements() {
        let math = CopySetMath::new(&StructuralKeys);
        let value = math.make(&RawValue::list(["c", "a", "b"])).unwrap();
        assert_eq!(
            value.elements(),
            &[Key::from("a"), Key::from("b"), Key::from("c")]
        );
    }

    #[test]
    fn add_merges_in_order() {
        let math = CopySetMath::new(&StructuralKeys);
        let left = math.make(&RawValue::list(["a", "d"])).unwrap();
        let right = math.make(&RawValue::list(["b", "c"])).unwrap();
        let sum = math.add(&left, &right).unwrap();
        assert_eq!(sum, math.make(&RawValue::list(["a", "b", "c", "d"])).unwrap());
    }

    #[test]
    fn duplicate_records_detected_structurally() {
        let math = CopySetMath::new(&StructuralKeys);
        let seat = |n: i64| {
            RawValue::Record([("seat".to_string(), RawValue::from(n))].into_iter().collect())
        };
        let err = math
            .make(&RawValue::List(vec![seat(1), seat(2), seat(1)]))
            .unwrap_err();
        assert_eq!(err.code(), "copySet.duplicate");
        assert_eq!(
            err.info().context.get("duplicates").unwrap(),
            r#"[{"seat":1}]"#
        );
    }
}
