//! Untrusted, not-yet-validated input values.

use std::collections::BTreeMap;
use std::fmt;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value as Json};

use crate::remotable::Remotable;

/// A candidate value as supplied by a caller, before any asset kind has
/// checked it. Floats are representable here precisely so they can be
/// rejected with a useful error.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An arbitrary precision signed integer.
    Int(BigInt),
    /// A floating point literal.
    Float(f64),
    /// A string.
    Str(String),
    /// An identity-compared handle.
    Remotable(Remotable),
    /// An ordered sequence.
    List(Vec<RawValue>),
    /// A record with string keys.
    Record(BTreeMap<String, RawValue>),
}

impl RawValue {
    /// Builds a list from anything convertible into raw values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RawValue>,
    {
        RawValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds the `[label, count]` entry list accepted by copy bags.
    pub fn bag<I, L, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (L, C)>,
        L: Into<RawValue>,
        C: Into<RawValue>,
    {
        RawValue::List(
            entries
                .into_iter()
                .map(|(label, count)| RawValue::List(vec![label.into(), count.into()]))
                .collect(),
        )
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "boolean",
            RawValue::Int(_) => "integer",
            RawValue::Float(_) => "float",
            RawValue::Str(_) => "string",
            RawValue::Remotable(_) => "remotable",
            RawValue::List(_) => "list",
            RawValue::Record(_) => "record",
        }
    }

    /// Renders the value as JSON. Remotables become their alleged name and
    /// integers outside the `i64`/`u64` range become decimal strings.
    pub fn to_json(&self) -> Json {
        match self {
            RawValue::Null => Json::Null,
            RawValue::Bool(b) => Json::Bool(*b),
            RawValue::Int(i) => int_to_json(i),
            RawValue::Float(f) => Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or_else(|| Json::String(f.to_string())),
            RawValue::Str(s) => Json::String(s.clone()),
            RawValue::Remotable(r) => Json::String(r.to_string()),
            RawValue::List(items) => Json::Array(items.iter().map(RawValue::to_json).collect()),
            RawValue::Record(fields) => Json::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }

    /// Parses JSON into a raw value. JSON cannot express remotables, so the
    /// result never contains one.
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::Null => RawValue::Null,
            Json::Bool(b) => RawValue::Bool(*b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawValue::Int(BigInt::from(i))
                } else if let Some(u) = n.as_u64() {
                    RawValue::Int(BigInt::from(u))
                } else {
                    RawValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => RawValue::Str(s.clone()),
            Json::Array(items) => RawValue::List(items.iter().map(RawValue::from_json).collect()),
            Json::Object(fields) => RawValue::Record(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), RawValue::from_json(v)))
                    .collect(),
            ),
        }
    }
}

pub(crate) fn int_to_json(value: &BigInt) -> Json {
    if let Some(i) = value.to_i64() {
        Json::from(i)
    } else if let Some(u) = value.to_u64() {
        Json::from(u)
    } else {
        Json::String(value.to_string())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<u64> for RawValue {
    fn from(value: u64) -> Self {
        RawValue::Int(BigInt::from(value))
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(BigInt::from(value))
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Int(BigInt::from(value))
    }
}

impl From<BigInt> for RawValue {
    fn from(value: BigInt) -> Self {
        RawValue::Int(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Str(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Str(value)
    }
}

impl From<Remotable> for RawValue {
    fn from(value: Remotable) -> Self {
        RawValue::Remotable(value)
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(value: Vec<RawValue>) -> Self {
        RawValue::List(value)
    }
}
