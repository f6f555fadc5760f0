use ertp_core::{AmountError, RawValue};

/// The six-operation algebra every asset kind implements over bare values.
///
/// Helpers never see brands; the amount dispatcher checks brands before
/// delegating here.
pub trait MathHelpers {
    /// Canonical value representation for this kind.
    type Value: Clone + std::fmt::Debug;

    /// Validates raw input and returns its canonical form.
    fn make(&self, raw: &RawValue) -> Result<Self::Value, AmountError>;

    /// The identity element for [`MathHelpers::add`].
    fn empty(&self) -> Self::Value;

    /// Whether `value` equals [`MathHelpers::empty`].
    fn is_empty(&self, value: &Self::Value) -> bool;

    /// Whether `left` contains at least everything in `right`.
    fn is_gte(&self, left: &Self::Value, right: &Self::Value) -> bool;

    /// Equality, agreeing with mutual [`MathHelpers::is_gte`].
    fn is_equal(&self, left: &Self::Value, right: &Self::Value) -> bool;

    /// Combines two values.
    fn add(&self, left: &Self::Value, right: &Self::Value) -> Result<Self::Value, AmountError>;

    /// Removes `right` from `left`; fails unless `left` dominates `right`.
    fn subtract(&self, left: &Self::Value, right: &Self::Value)
        -> Result<Self::Value, AmountError>;
}
