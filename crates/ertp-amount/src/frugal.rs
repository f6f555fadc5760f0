//! Pattern-bound subtraction.
//!
//! [`AmountMath::frugal_split`] answers "how much of this amount does the
//! pattern claim?" without ever claiming more than the pattern could demand.
//! Exact and unconstrained patterns get an accurate answer. Lower and upper
//! bounds get a conservative one. Conjunctions without an exact conjunct, and
//! split patterns on another brand, get `None`.

use tracing::debug;

use ertp_core::{AmountError, RawValue};

use crate::amount::Amount;
use crate::math::AmountMath;
use crate::pattern::{AmountPattern, ValuePattern};

/// Result of [`AmountMath::frugal_split`]. `matched + change == amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrugalSplit {
    /// Portion claimed by the pattern.
    pub matched: Amount,
    /// Remainder left to the holder.
    pub change: Amount,
}

impl AmountMath {
    /// Splits `amount` into the part `pattern` claims and the change.
    ///
    /// Returns `Ok(None)` when no safe split can be determined.
    pub fn frugal_split(
        &self,
        amount: &Amount,
        pattern: &AmountPattern,
    ) -> Result<Option<FrugalSplit>, AmountError> {
        let amount = self.adopt(amount)?;
        let amount = &*amount;
        match pattern {
            AmountPattern::Any => {
                debug!(branch = "any", accuracy = "accurate", "frugal split");
                Ok(Some(self.nothing_matched(amount)))
            }
            AmountPattern::Exact(bound) => self.split_exact(amount, bound).map(Some),
            AmountPattern::AtLeast(bound) => self.split_at_least(amount, bound).map(Some),
            AmountPattern::AtMost(_) => {
                debug!(branch = "at_most", accuracy = "conservative", "frugal split");
                Ok(Some(self.nothing_matched(amount)))
            }
            AmountPattern::And(patterns) => match self.exact_conjunct(amount, patterns) {
                Some(bound) => self.split_exact(amount, &bound).map(Some),
                None => {
                    debug!(branch = "and", "frugal split undetermined: no exact conjunct");
                    Ok(None)
                }
            },
            AmountPattern::Split { brand, value } => {
                if brand != amount.brand() {
                    debug!(
                        branch = "split",
                        pattern_brand = %brand,
                        amount_brand = %amount.brand(),
                        "frugal split undetermined: foreign brand"
                    );
                    return Ok(None);
                }
                self.split_value(amount, value)
            }
        }
    }

    fn split_value(
        &self,
        amount: &Amount,
        pattern: &ValuePattern,
    ) -> Result<Option<FrugalSplit>, AmountError> {
        match pattern {
            ValuePattern::Any => {
                debug!(branch = "value_any", accuracy = "accurate", "frugal split");
                Ok(Some(self.nothing_matched(amount)))
            }
            ValuePattern::Exact(raw) => match self.bound(amount, raw) {
                Some(bound) => self.split_exact(amount, &bound).map(Some),
                None => {
                    debug!(
                        branch = "value_exact",
                        accuracy = "accurate",
                        "frugal split: bound does not coerce"
                    );
                    Ok(Some(self.nothing_matched(amount)))
                }
            },
            ValuePattern::AtLeast(raw) => match self.bound(amount, raw) {
                Some(bound) => self.split_at_least(amount, &bound).map(Some),
                None => {
                    debug!(
                        branch = "value_at_least",
                        accuracy = "conservative",
                        "frugal split: bound does not coerce"
                    );
                    Ok(Some(self.nothing_matched(amount)))
                }
            },
            ValuePattern::AtMost(_) => {
                debug!(branch = "value_at_most", accuracy = "conservative", "frugal split");
                Ok(Some(self.nothing_matched(amount)))
            }
            ValuePattern::And(patterns) => match self.exact_value_conjunct(amount, patterns) {
                Some(bound) => self.split_exact(amount, &bound).map(Some),
                None => {
                    debug!(branch = "value_and", "frugal split undetermined: no exact conjunct");
                    Ok(None)
                }
            },
        }
    }

    fn split_exact(&self, amount: &Amount, bound: &Amount) -> Result<FrugalSplit, AmountError> {
        if bound.brand() != amount.brand() {
            debug!(branch = "exact", accuracy = "accurate", "frugal split: foreign bound");
            return Ok(self.nothing_matched(amount));
        }
        let bound = self.adopt(bound)?;
        let bound = &*bound;
        if self.is_gte(amount, bound, None)? {
            debug!(branch = "exact", accuracy = "accurate", matched = %bound, "frugal split");
            Ok(FrugalSplit {
                matched: bound.clone(),
                change: self.subtract(amount, bound, None)?,
            })
        } else {
            debug!(branch = "exact", accuracy = "accurate", "frugal split: bound not covered");
            Ok(self.nothing_matched(amount))
        }
    }

    fn split_at_least(&self, amount: &Amount, bound: &Amount) -> Result<FrugalSplit, AmountError> {
        if bound.brand() == amount.brand() && self.is_gte(amount, bound, None)? {
            debug!(
                branch = "at_least",
                accuracy = "conservative",
                "frugal split: whole amount matched"
            );
            Ok(FrugalSplit {
                matched: amount.clone(),
                change: self.make_empty_from_amount(amount),
            })
        } else {
            debug!(
                branch = "at_least",
                accuracy = "conservative",
                "frugal split: bound not covered"
            );
            Ok(self.nothing_matched(amount))
        }
    }

    fn nothing_matched(&self, amount: &Amount) -> FrugalSplit {
        FrugalSplit {
            matched: self.make_empty_from_amount(amount),
            change: amount.clone(),
        }
    }

    fn bound(&self, amount: &Amount, raw: &RawValue) -> Option<Amount> {
        self.make(amount.brand(), raw).ok()
    }

    /// First conjunct pinning the amount to an exact value of its brand.
    fn exact_conjunct(&self, amount: &Amount, patterns: &[AmountPattern]) -> Option<Amount> {
        patterns.iter().find_map(|pattern| match pattern {
            AmountPattern::Exact(bound) if bound.brand() == amount.brand() => Some(bound.clone()),
            AmountPattern::And(inner) => self.exact_conjunct(amount, inner),
            AmountPattern::Split { brand, value } if brand == amount.brand() => match value {
                ValuePattern::Exact(raw) => self.bound(amount, raw),
                ValuePattern::And(inner) => self.exact_value_conjunct(amount, inner),
                _ => None,
            },
            _ => None,
        })
    }

    fn exact_value_conjunct(&self, amount: &Amount, patterns: &[ValuePattern]) -> Option<Amount> {
        patterns.iter().find_map(|pattern| match pattern {
            ValuePattern::Exact(raw) => self.bound(amount, raw),
            ValuePattern::And(inner) => self.exact_value_conjunct(amount, inner),
            _ => None,
        })
    }
}
