use std::cmp::Ordering;
use std::sync::Arc;

use ertp_amount::{
    AmountError, AmountMath, AmountPattern, AssetKind, Brand, DisplayInfo, Key, KeyEquality,
    RawValue,
};
use serde_json::json;

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

fn dispatchers() -> (AmountMath, AmountMath) {
    (AmountMath::new(), AmountMath::with_key_equality(Arc::new(CaseFolded)))
}

fn brand(kind: AssetKind) -> Brand {
    Brand::new("tickets", DisplayInfo::new(kind)).expect("brand")
}

#[test]
fn folded_dispatcher_reorders_structural_copy_sets() {
    let (structural, folded) = dispatchers();
    let tickets = brand(AssetKind::CopySet);
    let held = structural.make(&tickets, &RawValue::list(["B", "a"])).unwrap();
    let wanted = folded.make(&tickets, &RawValue::list(["a"])).unwrap();
    assert!(!structural.shares_key_equality(&folded));

    assert!(folded.is_gte(&held, &wanted, None).unwrap());
    let rest = folded.subtract(&held, &wanted, None).unwrap();
    assert_eq!(rest.value().to_json(), json!(["B"]));

    let extra = folded.make(&tickets, &RawValue::list(["c"])).unwrap();
    let sum = folded.add(&held, &extra, None).unwrap();
    assert_eq!(sum.value().to_json(), json!(["a", "B", "c"]));

    assert!(structural.is_gte(&held, &wanted, None).unwrap());
    let rest = structural.subtract(&held, &wanted, None).unwrap();
    assert_eq!(rest.value().to_json(), json!(["B"]));
}

#[test]
fn elements_colliding_under_the_new_equality_are_rejected() {
    let (structural, folded) = dispatchers();
    let tickets = brand(AssetKind::CopySet);
    let held = structural.make(&tickets, &RawValue::list(["B", "b"])).unwrap();
    let wanted = folded.make(&tickets, &RawValue::list(["a"])).unwrap();
    let err = folded.is_gte(&held, &wanted, None).unwrap_err();
    assert!(matches!(err, AmountError::Duplicate(_)));
    assert_eq!(err.code(), "copySet.duplicate");
}

#[test]
fn folded_dispatcher_subtracts_structural_bags() {
    let (structural, folded) = dispatchers();
    let potions = brand(AssetKind::CopyBag);
    let held = structural.make(&potions, &RawValue::bag([("B", 1u64), ("a", 2)])).unwrap();
    let spent = folded.make(&potions, &RawValue::bag([("A", 1u64)])).unwrap();
    let rest = folded.subtract(&held, &spent, None).unwrap();
    let expected = folded.make(&potions, &RawValue::bag([("a", 1u64), ("b", 1)])).unwrap();
    assert!(folded.is_equal(&rest, &expected, None).unwrap());
}

#[test]
fn patterns_follow_the_amounts_key_equality() {
    let (structural, folded) = dispatchers();
    let tickets = brand(AssetKind::CopySet);
    let seat = folded.make(&tickets, &RawValue::list(["X"])).unwrap();
    let pattern = AmountPattern::Exact(folded.make(&tickets, &RawValue::list(["x"])).unwrap());
    assert!(pattern.matches(&seat));
    assert!(!structural.matches(&seat, &pattern));
}

#[test]
fn frugal_split_adopts_foreign_amounts() {
    let (structural, folded) = dispatchers();
    let tickets = brand(AssetKind::CopySet);
    let held = structural.make(&tickets, &RawValue::list(["B", "a"])).unwrap();
    let wanted = folded.make(&tickets, &RawValue::list(["a"])).unwrap();
    let split = folded
        .frugal_split(&held, &AmountPattern::Exact(wanted.clone()))
        .unwrap()
        .expect("determined");
    assert_eq!(split.matched, wanted);
    assert_eq!(split.change.value().to_json(), json!(["B"]));
}
