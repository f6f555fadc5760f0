//! Non-failing shape predicates over raw input, using structural key
//! equality.

use ertp_core::{AssetKind, RawValue, StructuralKeys};

use crate::value::ValueMath;

/// Whether `raw` would coerce as a value of `kind`.
pub fn is_value_of_kind(kind: AssetKind, raw: &RawValue) -> bool {
    ValueMath::new(&StructuralKeys).coerce(kind, raw).is_ok()
}

/// Whether `raw` is a natural number.
pub fn is_nat_value(raw: &RawValue) -> bool {
    is_value_of_kind(AssetKind::Nat, raw)
}

/// Whether `raw` is a duplicate-free list of keys.
pub fn is_set_value(raw: &RawValue) -> bool {
    is_value_of_kind(AssetKind::Set, raw)
}

/// Whether `raw` would make a canonical set. Accepts the same inputs as
/// [`is_set_value`]; canonical order is imposed, not required.
pub fn is_copy_set_value(raw: &RawValue) -> bool {
    is_value_of_kind(AssetKind::CopySet, raw)
}

/// Whether `raw` is a list of `[label, count]` pairs with unique labels and
/// positive counts.
pub fn is_copy_bag_value(raw: &RawValue) -> bool {
    is_value_of_kind(AssetKind::CopyBag, raw)
}
