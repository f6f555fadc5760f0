//! Sorted-sequence routines shared by the set helpers.
//!
//! All functions taking `left`/`right` expect both slices sorted under
//! `keys.compare_keys` and free of duplicates.

use std::cmp::Ordering;

use ertp_core::{Key, KeyEquality, RawValue};
use serde_json::Value as Json;

/// Returns references to `keys` sorted under the given order.
pub(crate) fn sorted<'k, E: KeyEquality + ?Sized>(keys: &E, elements: &'k [Key]) -> Vec<&'k Key> {
    let mut refs: Vec<&Key> = elements.iter().collect();
    refs.sort_by(|a, b| keys.compare_keys(a, b));
    refs
}

/// Collects every element occurring more than once, each reported once.
pub(crate) fn duplicates<E: KeyEquality + ?Sized>(keys: &E, elements: &[Key]) -> Vec<Key> {
    let refs = sorted(keys, elements);
    let mut found: Vec<Key> = Vec::new();
    for pair in refs.windows(2) {
        if keys.keys_equal(pair[0], pair[1])
            && !found.last().is_some_and(|last| keys.keys_equal(last, pair[0]))
        {
            found.push(pair[0].clone());
        }
    }
    found
}

/// Elements present in both sequences.
pub(crate) fn common<E: KeyEquality + ?Sized>(keys: &E, left: &[&Key], right: &[&Key]) -> Vec<Key> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match keys.compare_keys(left[i], right[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(left[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Elements of `right` that `left` does not contain.
pub(crate) fn missing<E: KeyEquality + ?Sized>(
    keys: &E,
    left: &[&Key],
    right: &[&Key],
) -> Vec<Key> {
    let mut out = Vec::new();
    let mut i = 0;
    for element in right {
        while i < left.len() && keys.compare_keys(left[i], element) == Ordering::Less {
            i += 1;
        }
        if i < left.len() && keys.keys_equal(left[i], element) {
            i += 1;
        } else {
            out.push((*element).clone());
        }
    }
    out
}

/// Whether `element` occurs in the sorted sequence.
pub(crate) fn contains<E: KeyEquality + ?Sized>(keys: &E, sorted: &[&Key], element: &Key) -> bool {
    sorted
        .binary_search_by(|candidate| keys.compare_keys(candidate, element))
        .is_ok()
}

/// JSON array rendering of a list of keys, for error context.
pub(crate) fn render(elements: &[Key]) -> String {
    Json::Array(elements.iter().map(Key::to_json).collect()).to_string()
}

/// Converts a raw list into keys, rejecting non-list input and non-key
/// elements. `code_prefix` selects the error namespace (`set`, `copySet`).
pub(crate) fn keys_from_raw(
    raw: &RawValue,
    code_prefix: &str,
) -> Result<Vec<Key>, ertp_core::AmountError> {
    let RawValue::List(items) = raw else {
        return Err(ertp_core::shape_error(
            format!("{code_prefix}.not-a-list"),
            "set values must be lists of keys",
        )
        .with_context("value", raw)
        .with_context("type", raw.type_name()));
    };
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| Key::try_from(item).map_err(|err| err.with_context("index", idx)))
        .collect()
}
