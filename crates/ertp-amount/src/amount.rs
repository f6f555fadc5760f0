//! Validated amounts and the untrusted inputs they are coerced from.

use std::fmt;
use std::sync::Arc;

use ertp_core::{Brand, KeyEquality, RawValue};
use ertp_math::Value;
use serde::{Serialize, Serializer};
use serde_json::{json, Value as Json};

/// Immutable `{ brand, value }` pair.
///
/// Only [`crate::AmountMath`] constructs amounts, so every instance holds a
/// value whose kind matches its brand's display info. The amount also keeps
/// the key equality its elements were canonicalized under, and dispatchers
/// using another one re-canonicalize it before comparing.
///
/// `==` compares brand and stored representation. SET values keep caller
/// order, so `{a, b}` and `{b, a}` are `!=` while
/// [`crate::AmountMath::is_equal`] reports them equal.
#[derive(Debug, Clone)]
pub struct Amount {
    brand: Brand,
    value: Value,
    keys: Arc<dyn KeyEquality>,
}

impl Amount {
    pub(crate) fn new(brand: Brand, value: Value, keys: Arc<dyn KeyEquality>) -> Self {
        Self { brand, value, keys }
    }

    /// The amount's brand.
    pub fn brand(&self) -> &Brand {
        &self.brand
    }

    /// The validated value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Key equality the value was canonicalized under.
    pub fn key_equality(&self) -> &Arc<dyn KeyEquality> {
        &self.keys
    }

    /// Splits the amount into its brand and value.
    pub fn into_parts(self) -> (Brand, Value) {
        (self.brand, self.value)
    }

    /// JSON rendering `{ "brand": "[Alleged: name brand]", "value": ... }`.
    pub fn to_json(&self) -> Json {
        json!({
            "brand": self.brand.to_string(),
            "value": self.value.to_json(),
        })
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.brand == other.brand && self.value == other.value
    }
}

impl Eq for Amount {}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// How an untrusted amount exposes its value.
pub enum ValueSlot<'a> {
    /// A plain stored field holding raw input.
    Stored(&'a RawValue),
    /// A plain stored field holding an already validated value.
    Validated(&'a Value),
    /// A getter producing the value on demand. Getters may answer
    /// differently on every call, so coercion refuses them outright.
    Computed(Box<dyn Fn() -> RawValue + 'a>),
}

impl fmt::Debug for ValueSlot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSlot::Stored(raw) => f.debug_tuple("Stored").field(raw).finish(),
            ValueSlot::Validated(value) => f.debug_tuple("Validated").field(value).finish(),
            ValueSlot::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Anything a caller may present as an amount.
///
/// [`crate::AmountMath::coerce`] reads `brand` and `value_slot` once each
/// and copies what it accepts into a fresh [`Amount`].
pub trait AmountSource {
    /// The alleged brand.
    fn brand(&self) -> &Brand;

    /// The alleged value.
    fn value_slot(&self) -> ValueSlot<'_>;
}

impl AmountSource for Amount {
    fn brand(&self) -> &Brand {
        &self.brand
    }

    fn value_slot(&self) -> ValueSlot<'_> {
        ValueSlot::Validated(&self.value)
    }
}

/// Plain record form of an amount, as received from a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAmount {
    /// Alleged brand.
    pub brand: Brand,
    /// Unvalidated value.
    pub value: RawValue,
}

impl RawAmount {
    /// Pairs a brand with raw input.
    pub fn new(brand: Brand, value: impl Into<RawValue>) -> Self {
        Self {
            brand,
            value: value.into(),
        }
    }
}

impl AmountSource for RawAmount {
    fn brand(&self) -> &Brand {
        &self.brand
    }

    fn value_slot(&self) -> ValueSlot<'_> {
        ValueSlot::Stored(&self.value)
    }
}
