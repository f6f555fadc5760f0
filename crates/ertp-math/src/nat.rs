//! Natural-number counts for fungible assets.

use ertp_core::{domination_error, shape_error, AmountError, RawValue};
use num_bigint::BigUint;
use num_traits::Zero;

use crate::helpers::MathHelpers;

/// Math helpers for [`ertp_core::AssetKind::Nat`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NatMath;

impl MathHelpers for NatMath {
    type Value = BigUint;

    fn make(&self, raw: &RawValue) -> Result<BigUint, AmountError> {
        match raw {
            RawValue::Int(int) => int.to_biguint().ok_or_else(|| {
                shape_error("nat.negative", "value must be a natural number")
                    .with_context("value", raw)
            }),
            RawValue::Float(float) => {
                let message = if float.fract() == 0.0 {
                    "float literals are not natural numbers"
                } else {
                    "fractional values are not natural numbers"
                };
                Err(shape_error("nat.float", message)
                    .with_context("value", raw)
                    .with_hint("pass an integer"))
            }
            other => Err(shape_error("nat.not-numeric", "value must be a natural number")
                .with_context("value", other)
                .with_context("type", other.type_name())),
        }
    }

    fn empty(&self) -> BigUint {
        BigUint::zero()
    }

    fn is_empty(&self, value: &BigUint) -> bool {
        value.is_zero()
    }

    fn is_gte(&self, left: &BigUint, right: &BigUint) -> bool {
        left >= right
    }

    fn is_equal(&self, left: &BigUint, right: &BigUint) -> bool {
        left == right
    }

    fn add(&self, left: &BigUint, right: &BigUint) -> Result<BigUint, AmountError> {
        Ok(left + right)
    }

    fn subtract(&self, left: &BigUint, right: &BigUint) -> Result<BigUint, AmountError> {
        if right > left {
            let magnitude = right - left;
            return Err(domination_error(
                "nat.underflow",
                format!("-{magnitude} is negative"),
            )
            .with_context("left", left)
            .with_context("right", right)
            .with_context("magnitude", magnitude));
        }
        Ok(left - right)
    }
}
