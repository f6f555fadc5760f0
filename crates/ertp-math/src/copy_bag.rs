//! Multisets: labels mapped to strictly positive counts.

use std::cmp::Ordering;

use ertp_core::{
    domination_error, duplicate_error, shape_error, AmountError, Key, KeyEquality, RawValue,
    StructuralKeys,
};
use num_bigint::BigUint;
use serde_json::Value as Json;

use crate::elements;
use crate::helpers::MathHelpers;

/// Label to count mapping in canonical label order. No stored count is zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopyBag(Vec<(Key, BigUint)>);

impl CopyBag {
    /// The `(label, count)` entries in canonical order.
    pub fn entries(&self) -> &[(Key, BigUint)] {
        &self.0
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag holds nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Count stored for `label`, if any, using `keys` to find it.
    pub fn count_of<E: KeyEquality + ?Sized>(&self, keys: &E, label: &Key) -> Option<&BigUint> {
        self.0
            .binary_search_by(|(candidate, _)| keys.compare_keys(candidate, label))
            .ok()
            .map(|idx| &self.0[idx].1)
    }

    /// JSON rendering as `[[label, count], ...]`.
    pub fn to_json(&self) -> Json {
        Json::Array(
            self.0
                .iter()
                .map(|(label, count)| {
                    Json::Array(vec![label.to_json(), count_to_json(count)])
                })
                .collect(),
        )
    }

    /// Raw form accepted by [`CopyBagMath::make`].
    pub fn to_raw(&self) -> RawValue {
        RawValue::List(
            self.0
                .iter()
                .map(|(label, count)| {
                    RawValue::List(vec![
                        RawValue::from(label),
                        RawValue::Int(count.clone().into()),
                    ])
                })
                .collect(),
        )
    }
}

fn count_to_json(count: &BigUint) -> Json {
    u64::try_from(count)
        .map(Json::from)
        .unwrap_or_else(|_| Json::String(count.to_string()))
}

/// Math helpers for [`ertp_core::AssetKind::CopyBag`].
#[derive(Debug, Clone, Copy)]
pub struct CopyBagMath<'a, E: KeyEquality + ?Sized = StructuralKeys> {
    keys: &'a E,
}

impl<'a, E: KeyEquality + ?Sized> CopyBagMath<'a, E> {
    /// Helpers comparing labels with `keys`.
    pub fn new(keys: &'a E) -> Self {
        Self { keys }
    }

    fn entry(&self, idx: usize, raw: &RawValue) -> Result<(Key, BigUint), AmountError> {
        let malformed = || {
            shape_error("copyBag.entry", "bag entries must be [label, count] pairs")
                .with_context("index", idx)
                .with_context("entry", raw)
        };
        let RawValue::List(pair) = raw else {
            return Err(malformed());
        };
        let [label, count] = pair.as_slice() else {
            return Err(malformed());
        };
        let label = Key::try_from(label).map_err(|err| err.with_context("index", idx))?;
        let count = match count {
            RawValue::Int(int) => int.to_biguint().filter(|c| *c > BigUint::from(0u8)),
            _ => None,
        }
        .ok_or_else(|| {
            shape_error("copyBag.count", "bag counts must be positive integers")
                .with_context("label", &label)
                .with_context("count", count)
        })?;
        Ok((label, count))
    }
}

impl<'a, E: KeyEquality + ?Sized> MathHelpers for CopyBagMath<'a, E> {
    type Value = CopyBag;

    fn make(&self, raw: &RawValue) -> Result<CopyBag, AmountError> {
        let RawValue::List(items) = raw else {
            return Err(shape_error("copyBag.not-a-list", "bag values must be lists of entries")
                .with_context("value", raw)
                .with_context("type", raw.type_name()));
        };
        let mut entries = items
            .iter()
            .enumerate()
            .map(|(idx, item)| self.entry(idx, item))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by(|a, b| self.keys.compare_keys(&a.0, &b.0));

        let labels: Vec<Key> = entries.iter().map(|(label, _)| label.clone()).collect();
        let dups = elements::duplicates(self.keys, &labels);
        if !dups.is_empty() {
            return Err(duplicate_error("copyBag.duplicate", "bag has duplicate labels")
                .with_context("duplicates", elements::render(&dups))
                .with_hint("coalesce counts per label before making the bag"));
        }
        Ok(CopyBag(entries))
    }

    fn empty(&self) -> CopyBag {
        CopyBag::default()
    }

    fn is_empty(&self, value: &CopyBag) -> bool {
        value.0.is_empty()
    }

    fn is_gte(&self, left: &CopyBag, right: &CopyBag) -> bool {
        right.0.iter().all(|(label, count)| {
            left.count_of(self.keys, label)
                .is_some_and(|held| held >= count)
        })
    }

    fn is_equal(&self, left: &CopyBag, right: &CopyBag) -> bool {
        left.0.len() == right.0.len()
            && left
                .0
                .iter()
                .zip(&right.0)
                .all(|((la, ca), (lb, cb))| self.keys.keys_equal(la, lb) && ca == cb)
    }

    fn add(&self, left: &CopyBag, right: &CopyBag) -> Result<CopyBag, AmountError> {
        let mut merged = Vec::with_capacity(left.0.len() + right.0.len());
        let (mut i, mut j) = (0, 0);
        while i < left.0.len() && j < right.0.len() {
            let (la, ca) = &left.0[i];
            let (lb, cb) = &right.0[j];
            match self.keys.compare_keys(la, lb) {
                Ordering::Less => {
                    merged.push((la.clone(), ca.clone()));
                    i += 1;
                }
                Ordering::Greater => {
                    merged.push((lb.clone(), cb.clone()));
                    j += 1;
                }
                Ordering::Equal => {
                    merged.push((la.clone(), ca + cb));
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend(left.0[i..].iter().cloned());
        merged.extend(right.0[j..].iter().cloned());
        Ok(CopyBag(merged))
    }

    fn subtract(&self, left: &CopyBag, right: &CopyBag) -> Result<CopyBag, AmountError> {
        let mut remaining = Vec::with_capacity(left.0.len());
        let mut i = 0;
        for (label, count) in &right.0 {
            while i < left.0.len()
                && self.keys.compare_keys(&left.0[i].0, label) == Ordering::Less
            {
                remaining.push(left.0[i].clone());
                i += 1;
            }
            let held = match left.0.get(i) {
                Some((held_label, held)) if self.keys.keys_equal(held_label, label) => held,
                _ => {
                    return Err(domination_error("copyBag.missing-label", "right label not in left")
                        .with_context("label", label)
                        .with_context("count", count));
                }
            };
            if held < count {
                return Err(domination_error(
                    "copyBag.insufficient",
                    "right count exceeds left count",
                )
                .with_context("label", label)
                .with_context("left_count", held)
                .with_context("right_count", count));
            }
            if held > count {
                remaining.push((label.clone(), held - count));
            }
            i += 1;
        }
        remaining.extend(left.0[i..].iter().cloned());
        Ok(CopyBag(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(math: &CopyBagMath<'_>, entries: &[(&str, u64)]) -> CopyBag {
        math.make(&RawValue::bag(entries.iter().copied())).unwrap()
    }

    #[test]
    fn add_sums_shared_labels() {
        let math = CopyBagMath::new(&StructuralKeys);
        let sum = math
            .add(&bag(&math, &[("a", 2), ("b", 1)]), &bag(&math, &[("b", 3), ("c", 1)]))
            .unwrap();
        assert_eq!(sum, bag(&math, &[("a", 2), ("b", 4), ("c", 1)]));
    }

    #[test]
    fn subtract_drops_zero_counts() {
        let math = CopyBagMath::new(&StructuralKeys);
        let out = math
            .subtract(&bag(&math, &[("a", 2), ("b", 1)]), &bag(&math, &[("b", 1)]))
            .unwrap();
        assert_eq!(out.entries().len(), 1);
        assert_eq!(out, bag(&math, &[("a", 2)]));
    }

    #[test]
    fn subtract_names_insufficient_label() {
        let math = CopyBagMath::new(&StructuralKeys);
        let err = math
            .subtract(&bag(&math, &[("a", 1)]), &bag(&math, &[("a", 2)]))
            .unwrap_err();
        assert_eq!(err.code(), "copyBag.insufficient");
        assert_eq!(err.info().context.get("label").unwrap(), "\"a\"");
    }

    #[test]
    fn make_rejects_bad_counts() {
        let math = CopyBagMath::new(&StructuralKeys);
        for count in [RawValue::from(0i64), RawValue::from(-2i64), RawValue::Float(1.0)] {
            let raw = RawValue::List(vec![RawValue::List(vec!["a".into(), count])]);
            assert_eq!(math.make(&raw).unwrap_err().code(), "copyBag.count");
        }
        let lonely = RawValue::List(vec![RawValue::List(vec!["a".into()])]);
        assert_eq!(math.make(&lonely).unwrap_err().code(), "copyBag.entry");
    }

    #[test]
    fn make_does_not_coalesce() {
        let math = CopyBagMath::new(&StructuralKeys);
        let err = math
            .make(&RawValue::bag([("a", 1u64), ("a", 2u64)]))
            .unwrap_err();
        assert!(matches!(err, AmountError::Duplicate(_)));
    }
}
