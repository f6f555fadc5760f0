//! Kind-tagged values and the dispatcher selecting their helpers.

use ertp_core::{shape_error, AmountError, AssetKind, KeyEquality, RawValue};
use num_bigint::BigUint;
use serde_json::Value as Json;

use crate::copy_bag::{CopyBag, CopyBagMath};
use crate::copy_set::{CopySet, CopySetMath};
use crate::helpers::MathHelpers;
use crate::nat::NatMath;
use crate::set::{SetMath, SetValue};

/// A validated value of some asset kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Natural-number count.
    Nat(BigUint),
    /// Legacy ordered set.
    Set(SetValue),
    /// Canonical set.
    CopySet(CopySet),
    /// Multiset with counts.
    CopyBag(CopyBag),
}

impl Value {
    /// Kind implied by the variant.
    pub fn asset_kind(&self) -> AssetKind {
        match self {
            Value::Nat(_) => AssetKind::Nat,
            Value::Set(_) => AssetKind::Set,
            Value::CopySet(_) => AssetKind::CopySet,
            Value::CopyBag(_) => AssetKind::CopyBag,
        }
    }

    /// The count, for natural values.
    pub fn as_nat(&self) -> Option<&BigUint> {
        match self {
            Value::Nat(n) => Some(n),
            _ => None,
        }
    }

    /// JSON rendering for diagnostics.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Nat(n) => u64::try_from(n)
                .map(Json::from)
                .unwrap_or_else(|_| Json::String(n.to_string())),
            Value::Set(s) => s.to_json(),
            Value::CopySet(s) => s.to_json(),
            Value::CopyBag(b) => b.to_json(),
        }
    }

    /// Raw form that coerces back to an equal value.
    pub fn to_raw(&self) -> RawValue {
        match self {
            Value::Nat(n) => RawValue::Int(n.clone().into()),
            Value::Set(s) => s.to_raw(),
            Value::CopySet(s) => s.to_raw(),
            Value::CopyBag(b) => b.to_raw(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<BigUint> for Value {
    fn from(value: BigUint) -> Self {
        Value::Nat(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Nat(BigUint::from(value))
    }
}

/// Runs the helper matching each value's kind.
///
/// Binary operations require both operands to be of the same kind; the amount
/// layer guarantees this by checking brands first, so a mismatch here means
/// a value was built for the wrong brand.
#[derive(Debug, Clone, Copy)]
pub struct ValueMath<'a> {
    keys: &'a dyn KeyEquality,
}

impl<'a> ValueMath<'a> {
    /// Dispatcher using `keys` for set and bag elements.
    pub fn new(keys: &'a dyn KeyEquality) -> Self {
        Self { keys }
    }

    /// Validates `raw` as a value of `kind`.
    pub fn coerce(&self, kind: AssetKind, raw: &RawValue) -> Result<Value, AmountError> {
        Ok(match kind {
            AssetKind::Nat => Value::Nat(NatMath.make(raw)?),
            AssetKind::Set => Value::Set(SetMath::new(self.keys).make(raw)?),
            AssetKind::CopySet => Value::CopySet(CopySetMath::new(self.keys).make(raw)?),
            AssetKind::CopyBag => Value::CopyBag(CopyBagMath::new(self.keys).make(raw)?),
        })
    }

    /// Identity value for `kind`.
    pub fn empty(&self, kind: AssetKind) -> Value {
        match kind {
            AssetKind::Nat => Value::Nat(NatMath.empty()),
            AssetKind::Set => Value::Set(SetMath::new(self.keys).empty()),
            AssetKind::CopySet => Value::CopySet(CopySetMath::new(self.keys).empty()),
            AssetKind::CopyBag => Value::CopyBag(CopyBagMath::new(self.keys).empty()),
        }
    }

    /// Whether `value` is the identity for its kind.
    pub fn is_empty(&self, value: &Value) -> bool {
        match value {
            Value::Nat(n) => NatMath.is_empty(n),
            Value::Set(s) => SetMath::new(self.keys).is_empty(s),
            Value::CopySet(s) => CopySetMath::new(self.keys).is_empty(s),
            Value::CopyBag(b) => CopyBagMath::new(self.keys).is_empty(b),
        }
    }

    /// Whether `left` dominates `right`.
    pub fn is_gte(&self, left: &Value, right: &Value) -> Result<bool, AmountError> {
        Ok(match (left, right) {
            (Value::Nat(l), Value::Nat(r)) => NatMath.is_gte(l, r),
            (Value::Set(l), Value::Set(r)) => SetMath::new(self.keys).is_gte(l, r),
            (Value::CopySet(l), Value::CopySet(r)) => CopySetMath::new(self.keys).is_gte(l, r),
            (Value::CopyBag(l), Value::CopyBag(r)) => CopyBagMath::new(self.keys).is_gte(l, r),
            _ => return Err(kind_mismatch(left, right)),
        })
    }

    /// Kind-specific equality.
    pub fn is_equal(&self, left: &Value, right: &Value) -> Result<bool, AmountError> {
        Ok(match (left, right) {
            (Value::Nat(l), Value::Nat(r)) => NatMath.is_equal(l, r),
            (Value::Set(l), Value::Set(r)) => SetMath::new(self.keys).is_equal(l, r),
            (Value::CopySet(l), Value::CopySet(r)) => CopySetMath::new(self.keys).is_equal(l, r),
            (Value::CopyBag(l), Value::CopyBag(r)) => CopyBagMath::new(self.keys).is_equal(l, r),
            _ => return Err(kind_mismatch(left, right)),
        })
    }

    /// Combines two values of the same kind.
    pub fn add(&self, left: &Value, right: &Value) -> Result<Value, AmountError> {
        Ok(match (left, right) {
            (Value::Nat(l), Value::Nat(r)) => Value::Nat(NatMath.add(l, r)?),
            (Value::Set(l), Value::Set(r)) => Value::Set(SetMath::new(self.keys).add(l, r)?),
            (Value::CopySet(l), Value::CopySet(r)) => {
                Value::CopySet(CopySetMath::new(self.keys).add(l, r)?)
            }
            (Value::CopyBag(l), Value::CopyBag(r)) => {
                Value::CopyBag(CopyBagMath::new(self.keys).add(l, r)?)
            }
            _ => return Err(kind_mismatch(left, right)),
        })
    }

    /// Removes `right` from `left`.
    pub fn subtract(&self, left: &Value, right: &Value) -> Result<Value, AmountError> {
        Ok(match (left, right) {
            (Value::Nat(l), Value::Nat(r)) => Value::Nat(NatMath.subtract(l, r)?),
            (Value::Set(l), Value::Set(r)) => {
                Value::Set(SetMath::new(self.keys).subtract(l, r)?)
            }
            (Value::CopySet(l), Value::CopySet(r)) => {
                Value::CopySet(CopySetMath::new(self.keys).subtract(l, r)?)
            }
            (Value::CopyBag(l), Value::CopyBag(r)) => {
                Value::CopyBag(CopyBagMath::new(self.keys).subtract(l, r)?)
            }
            _ => return Err(kind_mismatch(left, right)),
        })
    }
}

fn kind_mismatch(left: &Value, right: &Value) -> AmountError {
    shape_error("value.kind-mismatch", "values are of different asset kinds")
        .with_context("left_kind", left.asset_kind())
        .with_context("right_kind", right.asset_kind())
}
