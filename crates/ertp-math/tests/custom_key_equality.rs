use std::cmp::Ordering;

use ertp_core::{Key, KeyEquality, RawValue};
use ertp_math::{CopySetMath, MathHelpers, SetMath};

/// Treats string keys case-insensitively; everything else structurally.
#[derive(Debug)]
struct CaseFolded;

fn fold(key: &Key) -> Key {
    match key {
        Key::Str(s) => Key::Str(s.to_lowercase()),
        other => other.clone(),
    }
}

impl KeyEquality for CaseFolded {
    fn keys_equal(&self, left: &Key, right: &Key) -> bool {
        fold(left) == fold(right)
    }

    fn compare_keys(&self, left: &Key, right: &Key) -> Ordering {
        fold(left).cmp(&fold(right))
    }
}

#[test]
fn duplicates_follow_plugged_equality() {
    let math = SetMath::new(&CaseFolded);
    let err = math.make(&RawValue::list(["Ticket", "ticket"])).unwrap_err();
    assert_eq!(err.code(), "set.duplicate");
}

#[test]
fn subtraction_follows_plugged_equality() {
    let math = CopySetMath::new(&CaseFolded);
    let left = math.make(&RawValue::list(["A", "b"])).unwrap();
    let right = math.make(&RawValue::list(["a"])).unwrap();
    let rest = math.subtract(&left, &right).unwrap();
    assert_eq!(rest.elements(), &[Key::from("b")]);
    assert!(math.add(&left, &right).is_err());
}

#[test]
fn trait_object_dispatch() {
    let keys: Box<dyn KeyEquality> = Box::new(CaseFolded);
    let math = ertp_math::ValueMath::new(keys.as_ref());
    let left = math
        .coerce(ertp_core::AssetKind::Set, &RawValue::list(["X"]))
        .unwrap();
    let right = math
        .coerce(ertp_core::AssetKind::Set, &RawValue::list(["x"]))
        .unwrap();
    assert!(math.is_equal(&left, &right).unwrap());
}
