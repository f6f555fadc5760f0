use ertp_amount::{
    Amount, AmountMath, AmountPattern, AssetKind, Brand, DisplayInfo, FrugalSplit, RawValue,
    ValuePattern,
};

fn setup() -> (AmountMath, Brand) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    let brand = Brand::new("moola", DisplayInfo::new(AssetKind::Nat)).expect("brand");
    (AmountMath::new(), brand)
}

fn nat(math: &AmountMath, brand: &Brand, n: u64) -> Amount {
    math.make(brand, &RawValue::from(n)).expect("nat amount")
}

fn split(math: &AmountMath, brand: &Brand, matched: u64, change: u64) -> FrugalSplit {
    FrugalSplit {
        matched: nat(math, brand, matched),
        change: nat(math, brand, change),
    }
}

#[test]
fn exact_pattern_is_accurate() {
    let (math, moola) = setup();
    let three = nat(&math, &moola, 3);
    let pattern = AmountPattern::Exact(nat(&math, &moola, 2));
    assert_eq!(
        math.frugal_split(&three, &pattern).unwrap(),
        Some(split(&math, &moola, 2, 1))
    );

    let too_much = AmountPattern::Exact(nat(&math, &moola, 4));
    assert_eq!(
        math.frugal_split(&three, &too_much).unwrap(),
        Some(split(&math, &moola, 0, 3))
    );
}

#[test]
fn at_least_pattern_is_conservative() {
    let (math, moola) = setup();
    let three = nat(&math, &moola, 3);
    let pattern = AmountPattern::AtLeast(nat(&math, &moola, 2));
    assert_eq!(
        math.frugal_split(&three, &pattern).unwrap(),
        Some(split(&math, &moola, 3, 0))
    );

    let unmet = AmountPattern::AtLeast(nat(&math, &moola, 5));
    assert_eq!(
        math.frugal_split(&three, &unmet).unwrap(),
        Some(split(&math, &moola, 0, 3))
    );
}

#[test]
fn any_and_at_most_match_nothing() {
    let (math, moola) = setup();
    let three = nat(&math, &moola, 3);
    assert_eq!(
        math.frugal_split(&three, &AmountPattern::Any).unwrap(),
        Some(split(&math, &moola, 0, 3))
    );
    let at_most = AmountPattern::AtMost(nat(&math, &moola, 10));
    assert_eq!(
        math.frugal_split(&three, &at_most).unwrap(),
        Some(split(&math, &moola, 0, 3))
    );
}

#[test]
fn conjunction_uses_first_exact_conjunct() {
    let (math, moola) = setup();
    let five = nat(&math, &moola, 5);
    let pattern = AmountPattern::and([
        AmountPattern::AtMost(nat(&math, &moola, 9)),
        AmountPattern::split(&moola, ValuePattern::Exact(RawValue::from(2u64))),
        AmountPattern::Exact(nat(&math, &moola, 4)),
    ]);
    assert_eq!(
        math.frugal_split(&five, &pattern).unwrap(),
        Some(split(&math, &moola, 2, 3))
    );

    let vague = AmountPattern::and([
        AmountPattern::AtLeast(nat(&math, &moola, 1)),
        AmountPattern::AtMost(nat(&math, &moola, 9)),
    ]);
    assert_eq!(math.frugal_split(&five, &vague).unwrap(), None);
}

#[test]
fn split_pattern_checks_brand_then_value() {
    let (math, moola) = setup();
    let five = nat(&math, &moola, 5);
    let foreign = Brand::new("moola", DisplayInfo::new(AssetKind::Nat)).expect("brand");

    let pattern = AmountPattern::split(&foreign, ValuePattern::Any);
    assert_eq!(math.frugal_split(&five, &pattern).unwrap(), None);

    let exact = AmountPattern::split(&moola, ValuePattern::Exact(RawValue::from(4u64)));
    assert_eq!(
        math.frugal_split(&five, &exact).unwrap(),
        Some(split(&math, &moola, 4, 1))
    );

    let at_least = AmountPattern::split(&moola, ValuePattern::AtLeast(RawValue::from(4u64)));
    assert_eq!(
        math.frugal_split(&five, &at_least).unwrap(),
        Some(split(&math, &moola, 5, 0))
    );

    let nested = AmountPattern::split(
        &moola,
        ValuePattern::and([ValuePattern::AtMost(RawValue::from(6u64))]),
    );
    assert_eq!(math.frugal_split(&five, &nested).unwrap(), None);
}

#[test]
fn set_amounts_split_by_exact_subset() {
    let (math, _) = setup();
    let tickets = Brand::new("tickets", DisplayInfo::new(AssetKind::CopySet)).expect("brand");
    let held = math.make(&tickets, &RawValue::list(["a", "b", "c"])).unwrap();
    let wanted = math.make(&tickets, &RawValue::list(["b"])).unwrap();
    let result = math
        .frugal_split(&held, &AmountPattern::Exact(wanted.clone()))
        .unwrap()
        .expect("determined");
    assert_eq!(result.matched, wanted);
    assert_eq!(
        result.change,
        math.make(&tickets, &RawValue::list(["a", "c"])).unwrap()
    );
}

#[test]
fn pattern_containment() {
    let (math, moola) = setup();
    let three = nat(&math, &moola, 3);
    assert!(AmountPattern::Exact(nat(&math, &moola, 3)).matches(&three));
    assert!(AmountPattern::AtLeast(nat(&math, &moola, 2)).matches(&three));
    assert!(!AmountPattern::AtMost(nat(&math, &moola, 2)).matches(&three));
    assert!(AmountPattern::and([
        AmountPattern::AtLeast(nat(&math, &moola, 1)),
        AmountPattern::AtMost(nat(&math, &moola, 3)),
    ])
    .matches(&three));
    let split_exact = AmountPattern::split(&moola, ValuePattern::Exact(RawValue::from(3u64)));
    assert!(split_exact.matches(&three));
    assert!(math.matches(&three, &AmountPattern::Any));
}
