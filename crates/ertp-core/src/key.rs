//! Keys: the values allowed as set elements and bag labels, and the
//! pluggable equality used to compare them.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use num_bigint::BigInt;
use serde_json::{Map, Value as Json};

use crate::errors::{shape_error, AmountError};
use crate::raw::{int_to_json, RawValue};
use crate::remotable::Remotable;

/// A comparable element. Plain data compares structurally; remotables
/// compare by identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// The null key.
    Null,
    /// A boolean key.
    Bool(bool),
    /// An integer key.
    Int(BigInt),
    /// A string key.
    Str(String),
    /// An identity-compared handle.
    Remotable(Remotable),
    /// A list of keys.
    List(Vec<Key>),
    /// A record of keys.
    Record(BTreeMap<String, Key>),
}

impl Key {
    /// Renders the key as JSON for diagnostics.
    pub fn to_json(&self) -> Json {
        match self {
            Key::Null => Json::Null,
            Key::Bool(b) => Json::Bool(*b),
            Key::Int(i) => int_to_json(i),
            Key::Str(s) => Json::String(s.clone()),
            Key::Remotable(r) => Json::String(r.to_string()),
            Key::List(items) => Json::Array(items.iter().map(Key::to_json).collect()),
            Key::Record(fields) => Json::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl TryFrom<&RawValue> for Key {
    type Error = AmountError;

    fn try_from(raw: &RawValue) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawValue::Null => Key::Null,
            RawValue::Bool(b) => Key::Bool(*b),
            RawValue::Int(i) => Key::Int(i.clone()),
            RawValue::Str(s) => Key::Str(s.clone()),
            RawValue::Remotable(r) => Key::Remotable(r.clone()),
            RawValue::List(items) => Key::List(
                items
                    .iter()
                    .map(Key::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            RawValue::Record(fields) => Key::Record(
                fields
                    .iter()
                    .map(|(k, v)| Key::try_from(v).map(|key| (k.clone(), key)))
                    .collect::<Result<BTreeMap<_, _>, _>>()?,
            ),
            RawValue::Float(f) => {
                return Err(shape_error("key.float", "floats cannot be used as keys")
                    .with_context("value", f))
            }
        })
    }
}

impl From<&Key> for RawValue {
    fn from(key: &Key) -> Self {
        match key {
            Key::Null => RawValue::Null,
            Key::Bool(b) => RawValue::Bool(*b),
            Key::Int(i) => RawValue::Int(i.clone()),
            Key::Str(s) => RawValue::Str(s.clone()),
            Key::Remotable(r) => RawValue::Remotable(r.clone()),
            Key::List(items) => RawValue::List(items.iter().map(RawValue::from).collect()),
            Key::Record(fields) => RawValue::Record(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), RawValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(BigInt::from(value))
    }
}

impl From<Remotable> for Key {
    fn from(value: Remotable) -> Self {
        Key::Remotable(value)
    }
}

/// Equality and ordering over keys, supplied to the set and bag helpers.
///
/// Implementations must keep the two methods consistent:
/// `compare_keys(a, b) == Ordering::Equal` exactly when `keys_equal(a, b)`,
/// and `compare_keys` must be a total order.
pub trait KeyEquality: fmt::Debug + Send + Sync {
    /// Returns whether two keys denote the same element.
    fn keys_equal(&self, left: &Key, right: &Key) -> bool;

    /// Total order used to canonicalize and merge sorted key sequences.
    fn compare_keys(&self, left: &Key, right: &Key) -> Ordering;
}

/// Deep structural equality for plain data, identity for remotables.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StructuralKeys;

impl KeyEquality for StructuralKeys {
    fn keys_equal(&self, left: &Key, right: &Key) -> bool {
        left == right
    }

    fn compare_keys(&self, left: &Key, right: &Key) -> Ordering {
        left.cmp(right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_records_are_equal() {
        let raw = RawValue::Record(
            [("seat".to_string(), RawValue::from(3i64))]
                .into_iter()
                .collect(),
        );
        let a = Key::try_from(&raw).unwrap();
        let b = Key::try_from(&raw.clone()).unwrap();
        assert!(StructuralKeys.keys_equal(&a, &b));
        assert_eq!(StructuralKeys.compare_keys(&a, &b), Ordering::Equal);
    }

    #[test]
    fn remotables_compare_by_identity() {
        let a = Key::from(Remotable::new("seat"));
        let b = Key::from(Remotable::new("seat"));
        assert!(!StructuralKeys.keys_equal(&a, &b));
        assert!(StructuralKeys.keys_equal(&a, &a.clone()));
    }

    #[test]
    fn floats_are_not_keys() {
        let err = Key::try_from(&RawValue::Float(0.5)).unwrap_err();
        assert_eq!(err.code(), "key.float");
    }
}
