//! Legacy unique-item sets: duplicate-free lists kept in caller order.

use ertp_core::{
    domination_error, duplicate_error, AmountError, Key, KeyEquality, RawValue, StructuralKeys,
};
use serde_json::Value as Json;

use crate::elements;
use crate::helpers::MathHelpers;

/// Duplicate-free sequence of keys. Order is preserved but carries no
/// meaning for equality.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetValue(Vec<Key>);

impl SetValue {
    /// The elements in stored order.
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

    /// Iterates the elements in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.0.iter()
    }

    /// JSON rendering, a plain array.
    pub fn to_json(&self) -> Json {
        Json::Array(self.0.iter().map(Key::to_json).collect())
    }

    /// Raw form accepted by [`SetMath::make`].
    pub fn to_raw(&self) -> RawValue {
        RawValue::List(self.0.iter().map(RawValue::from).collect())
    }
}

/// Math helpers for [`ertp_core::AssetKind::Set`].
#[derive(Debug, Clone, Copy)]
pub struct SetMath<'a, E: KeyEquality + ?Sized = StructuralKeys> {
    keys: &'a E,
}

impl<'a, E: KeyEquality + ?Sized> SetMath<'a, E> {
    /// Helpers comparing elements with `keys`.
    pub fn new(keys: &'a E) -> Self {
        Self { keys }
    }
}

/// Rejects sequences holding the same element twice.
pub(crate) fn ensure_unique<E: KeyEquality + ?Sized>(
    keys: &E,
    elements: &[Key],
    code: &str,
) -> Result<(), AmountError> {
    let dups = elements::duplicates(keys, elements);
    if dups.is_empty() {
        return Ok(());
    }
    Err(duplicate_error(code, "value has duplicate elements")
        .with_context("duplicates", elements::render(&dups)))
}

/// Rejects a union whose operands share elements.
pub(crate) fn common_element_error(common: &[Key], code: &str) -> AmountError {
    duplicate_error(code, "left and right have common elements")
        .with_context("common", elements::render(common))
        .with_hint("unique items cannot be added twice")
}

/// Rejects a subtraction naming elements absent from the minuend.
pub(crate) fn missing_element_error(missing: &[Key], code: &str) -> AmountError {
    domination_error(code, "right element(s) not in left")
        .with_context("missing", elements::render(missing))
}

impl<'a, E: KeyEquality + ?Sized> MathHelpers for SetMath<'a, E> {
    type Value = SetValue;

    fn make(&self, raw: &RawValue) -> Result<SetValue, AmountError> {
        let keys = elements::keys_from_raw(raw, "set")?;
        ensure_unique(self.keys, &keys, "set.duplicate")?;
        Ok(SetValue(keys))
    }

    fn empty(&self) -> SetValue {
        SetValue::default()
    }

    fn is_empty(&self, value: &SetValue) -> bool {
        value.0.is_empty()
    }

    fn is_gte(&self, left: &SetValue, right: &SetValue) -> bool {
        if right.0.len() > left.0.len() {
            return false;
        }
        let left = elements::sorted(self.keys, &left.0);
        right
            .0
            .iter()
            .all(|element| elements::contains(self.keys, &left, element))
    }

    fn is_equal(&self, left: &SetValue, right: &SetValue) -> bool {
        left.0.len() == right.0.len() && self.is_gte(left, right)
    }

    fn add(&self, left: &SetValue, right: &SetValue) -> Result<SetValue, AmountError> {
        let l = elements::sorted(self.keys, &left.0);
        let r = elements::sorted(self.keys, &right.0);
        let common = elements::common(self.keys, &l, &r);
        if !common.is_empty() {
            return Err(common_element_error(&common, "set.common-element"));
        }
        let mut union = left.0.clone();
        union.extend(right.0.iter().cloned());
        Ok(SetValue(union))
    }

    fn subtract(&self, left: &SetValue, right: &SetValue) -> Result<SetValue, AmountError> {
        let l = elements::sorted(self.keys, &left.0);
        let r = elements::sorted(self.keys, &right.0);
        let missing = elements::missing(self.keys, &l, &r);
        if !missing.is_empty() {
            return Err(missing_element_error(&missing, "set.missing-element"));
        }
        let remaining = left
            .0
            .iter()
            .filter(|element| !elements::contains(self.keys, &r, element))
            .cloned()
            .collect();
        Ok(SetValue(remaining))
    }
}
