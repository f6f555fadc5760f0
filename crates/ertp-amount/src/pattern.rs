//! Amount patterns and containment.

use ertp_core::{Brand, RawValue};

use crate::amount::Amount;
use crate::math::AmountMath;

/// Constraint over whole amounts.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountPattern {
    /// Matches every amount.
    Any,
    /// Matches amounts equal to the given one.
    Exact(Amount),
    /// Matches amounts of the same brand dominating the bound.
    AtLeast(Amount),
    /// Matches amounts of the same brand dominated by the bound.
    AtMost(Amount),
    /// Matches amounts satisfying every conjunct.
    And(Vec<AmountPattern>),
    /// Fixes the brand and constrains the value separately.
    Split {
        /// Required brand.
        brand: Brand,
        /// Constraint on the value.
        value: ValuePattern,
    },
}

/// Constraint over the value half of an amount.
///
/// Bounds are raw, so a bound that does not coerce under the amount's brand
/// matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum ValuePattern {
    /// Matches every value.
    Any,
    /// Matches values equal to the given one.
    Exact(RawValue),
    /// Matches values dominating the bound.
    AtLeast(RawValue),
    /// Matches values dominated by the bound.
    AtMost(RawValue),
    /// Matches values satisfying every conjunct.
    And(Vec<ValuePattern>),
}

impl AmountPattern {
    /// Conjunction of `patterns`.
    pub fn and(patterns: impl IntoIterator<Item = AmountPattern>) -> Self {
        AmountPattern::And(patterns.into_iter().collect())
    }

    /// Split pattern on `brand`.
    pub fn split(brand: &Brand, value: ValuePattern) -> Self {
        AmountPattern::Split {
            brand: brand.clone(),
            value,
        }
    }

    /// Whether `amount` satisfies the pattern, comparing keys the way
    /// `amount` was built.
    pub fn matches(&self, amount: &Amount) -> bool {
        AmountMath::with_key_equality(amount.key_equality().clone()).matches(amount, self)
    }
}

impl ValuePattern {
    /// Conjunction of `patterns`.
    pub fn and(patterns: impl IntoIterator<Item = ValuePattern>) -> Self {
        ValuePattern::And(patterns.into_iter().collect())
    }

    /// Whether the value of `amount` satisfies the pattern, comparing keys
    /// the way `amount` was built.
    pub fn matches(&self, amount: &Amount) -> bool {
        AmountMath::with_key_equality(amount.key_equality().clone()).value_matches(amount, self)
    }
}

impl AmountMath {
    /// Whether `amount` satisfies `pattern` under this dispatcher's key
    /// equality.
    pub fn matches(&self, amount: &Amount, pattern: &AmountPattern) -> bool {
        match pattern {
            AmountPattern::Any => true,
            AmountPattern::Exact(bound) => self.is_equal(amount, bound, None).unwrap_or(false),
            AmountPattern::AtLeast(bound) => self.is_gte(amount, bound, None).unwrap_or(false),
            AmountPattern::AtMost(bound) => self.is_gte(bound, amount, None).unwrap_or(false),
            AmountPattern::And(patterns) => patterns.iter().all(|p| self.matches(amount, p)),
            AmountPattern::Split { brand, value } => {
                brand == amount.brand() && self.value_matches(amount, value)
            }
        }
    }

    /// Whether the value of `amount` satisfies `pattern`.
    pub fn value_matches(&self, amount: &Amount, pattern: &ValuePattern) -> bool {
        let bound = |raw: &RawValue| self.make(amount.brand(), raw).ok();
        match pattern {
            ValuePattern::Any => true,
            ValuePattern::Exact(raw) => bound(raw)
                .is_some_and(|b| self.is_equal(amount, &b, None).unwrap_or(false)),
            ValuePattern::AtLeast(raw) => bound(raw)
                .is_some_and(|b| self.is_gte(amount, &b, None).unwrap_or(false)),
            ValuePattern::AtMost(raw) => bound(raw)
                .is_some_and(|b| self.is_gte(&b, amount, None).unwrap_or(false)),
            ValuePattern::And(patterns) => patterns.iter().all(|p| self.value_matches(amount, p)),
        }
    }
}
