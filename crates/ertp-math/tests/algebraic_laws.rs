use ertp_core::{AssetKind, RawValue, StructuralKeys};
use ertp_math::{Value, ValueMath};
use proptest::prelude::*;

fn math() -> ValueMath<'static> {
    ValueMath::new(&StructuralKeys)
}

fn coerce(kind: AssetKind, raw: RawValue) -> Value {
    math().coerce(kind, &raw).unwrap()
}

/// Three pairwise disjoint sets carved out of one universe, so that set
/// addition is defined for every pair.
fn disjoint_sets(kind: AssetKind) -> impl Strategy<Value = (Value, Value, Value)> {
    prop::collection::btree_set("[a-z]{1,3}", 0..9)
        .prop_flat_map(|universe| {
            let n = universe.len();
            (Just(universe), prop::collection::vec(0u8..4, n))
        })
        .prop_map(move |(universe, owners)| {
            let mut parts: [Vec<String>; 3] = Default::default();
            for (element, owner) in universe.into_iter().zip(owners) {
                if let Some(part) = parts.get_mut(owner as usize) {
                    part.push(element);
                }
            }
            let [x, y, z] = parts;
            (
                coerce(kind, RawValue::list(x)),
                coerce(kind, RawValue::list(y)),
                coerce(kind, RawValue::list(z)),
            )
        })
}

fn nats() -> impl Strategy<Value = (Value, Value, Value)> {
    (any::<u64>(), any::<u64>(), any::<u64>()).prop_map(|(x, y, z)| {
        (
            coerce(AssetKind::Nat, RawValue::from(x)),
            coerce(AssetKind::Nat, RawValue::from(y)),
            coerce(AssetKind::Nat, RawValue::from(z)),
        )
    })
}

fn bag() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-e]", 1u64..5, 0..5)
        .prop_map(|entries| coerce(AssetKind::CopyBag, RawValue::bag(entries)))
}

fn bags() -> impl Strategy<Value = (Value, Value, Value)> {
    (bag(), bag(), bag())
}

fn check_laws(x: &Value, y: &Value, z: &Value) -> Result<(), TestCaseError> {
    let m = math();
    let empty = m.empty(x.asset_kind());
    let eq = |a: &Value, b: &Value| m.is_equal(a, b).unwrap();
    let gte = |a: &Value, b: &Value| m.is_gte(a, b).unwrap();

    // identity
    prop_assert!(eq(&m.add(x, &empty)?, x));
    prop_assert!(eq(&m.add(&empty, x)?, x));
    prop_assert!(gte(x, &empty));
    prop_assert!(m.is_empty(&empty));

    // commutativity, associativity, monotonicity
    let xy = m.add(x, y)?;
    prop_assert!(eq(&xy, &m.add(y, x)?));
    prop_assert!(eq(&m.add(&xy, z)?, &m.add(x, &m.add(y, z)?)?));
    prop_assert!(gte(&xy, x));
    prop_assert!(gte(&xy, y));

    // subtraction inverts addition
    prop_assert!(eq(&m.subtract(&xy, y)?, x));
    prop_assert!(eq(&m.add(&m.subtract(&xy, x)?, x)?, &xy));
    if gte(y, x) {
        prop_assert!(eq(&m.add(&m.subtract(y, x)?, x)?, y));
    } else {
        prop_assert!(m.subtract(y, x).is_err());
    }

    // equality is an equivalence agreeing with mutual dominance
    prop_assert!(eq(x, x));
    prop_assert_eq!(eq(x, y), eq(y, x));
    prop_assert_eq!(eq(x, y), gte(x, y) && gte(y, x));
    if eq(x, y) && eq(y, z) {
        prop_assert!(eq(x, z));
    }

    // dominance is a partial order
    prop_assert!(gte(x, x));
    if gte(x, y) && gte(y, z) {
        prop_assert!(gte(x, z));
    }
    Ok(())
}

proptest! {
    #[test]
    fn nat_laws((x, y, z) in nats()) {
        check_laws(&x, &y, &z)?;
    }

    #[test]
    fn set_laws((x, y, z) in disjoint_sets(AssetKind::Set)) {
        check_laws(&x, &y, &z)?;
    }

    #[test]
    fn copy_set_laws((x, y, z) in disjoint_sets(AssetKind::CopySet)) {
        check_laws(&x, &y, &z)?;
    }

    #[test]
    fn copy_bag_laws((x, y, z) in bags()) {
        check_laws(&x, &y, &z)?;
    }

    #[test]
    fn overlapping_sets_never_add(elements in prop::collection::btree_set("[a-z]{1,3}", 1..6)) {
        for kind in [AssetKind::Set, AssetKind::CopySet] {
            let value = coerce(kind, RawValue::list(elements.iter().cloned()));
            let err = math().add(&value, &value).unwrap_err();
            prop_assert!(err.code().ends_with(".common-element"));
        }
    }
}
