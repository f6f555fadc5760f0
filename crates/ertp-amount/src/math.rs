//! Brand-aware amount arithmetic.
//!
//! [`AmountMath`] reconciles brands, resolves the asset kind from the brand's
//! display info and hands the values to [`ValueMath`]. It holds no state apart
//! from the key equality used for set elements and bag labels.

use std::borrow::Cow;
use std::sync::{Arc, OnceLock};

use ertp_core::{AmountError, AssetKind, Brand, ErrorInfo, KeyEquality, RawValue, StructuralKeys};
use ertp_math::{Value, ValueMath};
use tracing::{debug, trace};

use crate::amount::{Amount, AmountSource, ValueSlot};

/// Stateless amount dispatcher.
#[derive(Debug, Clone)]
pub struct AmountMath {
    keys: Arc<dyn KeyEquality>,
}

impl Default for AmountMath {
    fn default() -> Self {
        Self::new()
    }
}

impl AmountMath {
    /// Dispatcher comparing keys structurally.
    ///
    /// All structural dispatchers share one key equality handle, so their
    /// amounts move between them without re-canonicalization.
    pub fn new() -> Self {
        static STRUCTURAL: OnceLock<Arc<dyn KeyEquality>> = OnceLock::new();
        Self::with_key_equality(STRUCTURAL.get_or_init(|| Arc::new(StructuralKeys)).clone())
    }

    /// Dispatcher comparing set elements and bag labels with `keys`.
    pub fn with_key_equality(keys: Arc<dyn KeyEquality>) -> Self {
        Self { keys }
    }

    pub(crate) fn values(&self) -> ValueMath<'_> {
        ValueMath::new(self.keys.as_ref())
    }

    fn amount(&self, brand: &Brand, value: Value) -> Amount {
        Amount::new(brand.clone(), value, self.keys.clone())
    }

    /// Whether amounts built by `other` are canonical for this dispatcher.
    pub fn shares_key_equality(&self, other: &AmountMath) -> bool {
        same_keys(&self.keys, &other.keys)
    }

    /// `amount` in this dispatcher's canonical form.
    ///
    /// Amounts built under another key equality are re-coerced, which fails
    /// when their elements collide under this one.
    pub(crate) fn adopt<'a>(&self, amount: &'a Amount) -> Result<Cow<'a, Amount>, AmountError> {
        if same_keys(amount.key_equality(), &self.keys) {
            return Ok(Cow::Borrowed(amount));
        }
        trace!(brand = %amount.brand(), "re-canonicalizing amount from another key equality");
        let kind = resolve_kind(amount.brand());
        let value = self
            .values()
            .coerce(kind, &amount.value().to_raw())
            .map_err(|err| err.with_context("brand", amount.brand()))?;
        Ok(Cow::Owned(self.amount(amount.brand(), value)))
    }

    fn operands<'a>(
        &self,
        left: &'a Amount,
        right: &'a Amount,
        expected: Option<&Brand>,
    ) -> Result<(Cow<'a, Amount>, Cow<'a, Amount>), AmountError> {
        reconcile(left, right, expected)?;
        Ok((self.adopt(left)?, self.adopt(right)?))
    }

    /// Builds an amount of `brand` from trusted raw input.
    pub fn make(&self, brand: &Brand, raw: &RawValue) -> Result<Amount, AmountError> {
        let kind = resolve_kind(brand);
        let value = self
            .values()
            .coerce(kind, raw)
            .map_err(|err| err.with_context("brand", brand))?;
        Ok(self.amount(brand, value))
    }

    /// Empty amount of `brand`.
    ///
    /// `kind` defaults to the brand's kind. An explicit kind must agree with
    /// it, since every later operation resolves the kind from the brand.
    pub fn make_empty(
        &self,
        brand: &Brand,
        kind: Option<AssetKind>,
    ) -> Result<Amount, AmountError> {
        let brand_kind = resolve_kind(brand);
        let kind = kind.unwrap_or(brand_kind);
        if kind != brand_kind {
            debug!(
                brand = %brand,
                requested = %kind,
                declared = %brand_kind,
                "empty amount kind disagrees with brand"
            );
            return Err(AmountError::Shape(
                ErrorInfo::new("amount.kind-mismatch", "asset kind does not match the brand")
                    .with_context("brand", brand.to_string())
                    .with_context("requested", kind.to_string())
                    .with_context("declared", brand_kind.to_string()),
            ));
        }
        Ok(self.amount(brand, self.values().empty(kind)))
    }

    /// Empty amount sharing `amount`'s brand.
    pub fn make_empty_from_amount(&self, amount: &Amount) -> Amount {
        let kind = resolve_kind(amount.brand());
        self.amount(amount.brand(), self.values().empty(kind))
    }

    /// Validates an untrusted amount and copies it into a fresh [`Amount`].
    ///
    /// The source's brand and value slot are each read once. Computed slots
    /// are refused without being called.
    pub fn coerce(&self, brand: &Brand, source: &dyn AmountSource) -> Result<Amount, AmountError> {
        let alleged = source.brand();
        if alleged != brand {
            debug!(expected = %brand, actual = %alleged, "coerce rejected foreign brand");
            return Err(brand_mismatch("expected", brand, "actual", alleged));
        }
        let kind = resolve_kind(brand);
        let value = match source.value_slot() {
            ValueSlot::Computed(_) => {
                debug!(brand = %brand, "coerce rejected computed value slot");
                return Err(AmountError::Accessor(
                    ErrorInfo::new(
                        "amount.accessor",
                        "amount value must be a plain stored field",
                    )
                    .with_context("brand", brand.to_string())
                    .with_hint("pass the value itself instead of a getter"),
                ));
            }
            ValueSlot::Stored(raw) => self.values().coerce(kind, raw),
            ValueSlot::Validated(value) => self.values().coerce(kind, &value.to_raw()),
        }
        .map_err(|err| err.with_context("brand", brand))?;
        Ok(self.amount(brand, value))
    }

    /// Coerces `source` and returns only its value.
    pub fn get_value(
        &self,
        brand: &Brand,
        source: &dyn AmountSource,
    ) -> Result<Value, AmountError> {
        Ok(self.coerce(brand, source)?.into_parts().1)
    }

    /// Whether `amount` is the empty amount of its brand.
    pub fn is_empty(&self, amount: &Amount, brand: Option<&Brand>) -> Result<bool, AmountError> {
        check_expected(amount, brand)?;
        Ok(self.values().is_empty(amount.value()))
    }

    /// Whether `left` dominates `right`.
    pub fn is_gte(
        &self,
        left: &Amount,
        right: &Amount,
        brand: Option<&Brand>,
    ) -> Result<bool, AmountError> {
        let (left, right) = self.operands(left, right, brand)?;
        self.values().is_gte(left.value(), right.value())
    }

    /// Whether `left` and `right` hold the same value.
    pub fn is_equal(
        &self,
        left: &Amount,
        right: &Amount,
        brand: Option<&Brand>,
    ) -> Result<bool, AmountError> {
        let (left, right) = self.operands(left, right, brand)?;
        self.values().is_equal(left.value(), right.value())
    }

    /// Combines two amounts of the same brand.
    pub fn add(
        &self,
        left: &Amount,
        right: &Amount,
        brand: Option<&Brand>,
    ) -> Result<Amount, AmountError> {
        let (left, right) = self.operands(left, right, brand)?;
        let value = self.values().add(left.value(), right.value())?;
        Ok(self.amount(left.brand(), value))
    }

    /// Removes `right` from `left`. Fails unless `left` dominates `right`.
    pub fn subtract(
        &self,
        left: &Amount,
        right: &Amount,
        brand: Option<&Brand>,
    ) -> Result<Amount, AmountError> {
        let (left, right) = self.operands(left, right, brand)?;
        let value = self.values().subtract(left.value(), right.value())?;
        Ok(self.amount(left.brand(), value))
    }

    /// The smaller of two comparable amounts.
    pub fn min(
        &self,
        x: &Amount,
        y: &Amount,
        brand: Option<&Brand>,
    ) -> Result<Amount, AmountError> {
        let (x, y) = self.operands(x, y, brand)?;
        if self.values().is_gte(x.value(), y.value())? {
            Ok(y.into_owned())
        } else if self.values().is_gte(y.value(), x.value())? {
            Ok(x.into_owned())
        } else {
            debug!(x = %x, y = %y, "min of incomparable amounts");
            Err(incomparable("min", &x, &y))
        }
    }

    /// The larger of two comparable amounts.
    pub fn max(
        &self,
        x: &Amount,
        y: &Amount,
        brand: Option<&Brand>,
    ) -> Result<Amount, AmountError> {
        let (x, y) = self.operands(x, y, brand)?;
        if self.values().is_gte(x.value(), y.value())? {
            Ok(x.into_owned())
        } else if self.values().is_gte(y.value(), x.value())? {
            Ok(y.into_owned())
        } else {
            debug!(x = %x, y = %y, "max of incomparable amounts");
            Err(incomparable("max", &x, &y))
        }
    }
}

/// Asset kind of `amount`, as declared by its brand.
pub fn get_asset_kind(amount: &Amount) -> AssetKind {
    resolve_kind(amount.brand())
}

fn same_keys(left: &Arc<dyn KeyEquality>, right: &Arc<dyn KeyEquality>) -> bool {
    Arc::as_ptr(left).cast::<()>() == Arc::as_ptr(right).cast::<()>()
}

fn resolve_kind(brand: &Brand) -> AssetKind {
    let kind = brand.asset_kind();
    trace!(brand = %brand, kind = %kind, "resolved asset kind");
    kind
}

fn check_expected(amount: &Amount, expected: Option<&Brand>) -> Result<(), AmountError> {
    match expected {
        Some(expected) if expected != amount.brand() => {
            debug!(
                expected = %expected,
                actual = %amount.brand(),
                "amount has unexpected brand"
            );
            Err(brand_mismatch("expected", expected, "actual", amount.brand()))
        }
        _ => Ok(()),
    }
}

fn reconcile(left: &Amount, right: &Amount, expected: Option<&Brand>) -> Result<(), AmountError> {
    if left.brand() != right.brand() {
        debug!(left = %left.brand(), right = %right.brand(), "brand mismatch");
        return Err(brand_mismatch("left", left.brand(), "right", right.brand()));
    }
    check_expected(left, expected)
}

fn brand_mismatch(first_key: &str, first: &Brand, second_key: &str, second: &Brand) -> AmountError {
    AmountError::BrandMismatch(
        ErrorInfo::new(
            "brand.mismatch",
            format!("brands do not match: {first} vs {second}"),
        )
        .with_context(first_key, format!("{first:?}"))
        .with_context(second_key, format!("{second:?}")),
    )
}

fn incomparable(op: &str, x: &Amount, y: &Amount) -> AmountError {
    AmountError::Incomparable(
        ErrorInfo::new(
            format!("amount.{op}-incomparable"),
            format!("{x} and {y} are incomparable"),
        )
        .with_context("x", x.to_string())
        .with_context("y", y.to_string()),
    )
}
