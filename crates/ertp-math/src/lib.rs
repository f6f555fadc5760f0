#![deny(missing_docs)]

//! Per-asset-kind value algebra.
//!
//! Each kind gets a helper implementing [`MathHelpers`]: natural counts
//! ([`NatMath`]), legacy ordered sets ([`SetMath`]), canonical sets
//! ([`CopySetMath`]) and multisets ([`CopyBagMath`]). [`ValueMath`] selects
//! the helper for a kind-tagged [`Value`] with an exhaustive match.
//!
//! Helpers operate on bare values. They know nothing of brands.

mod copy_bag;
mod copy_set;
mod elements;
mod helpers;
mod nat;
mod set;
mod validators;
mod value;

pub use copy_bag::{CopyBag, CopyBagMath};
pub use copy_set::{CopySet, CopySetMath};
pub use helpers::MathHelpers;
pub use nat::NatMath;
pub use set::{SetMath, SetValue};
pub use validators::{
    is_copy_bag_value, is_copy_set_value, is_nat_value, is_set_value, is_value_of_kind,
};
pub use value::{Value, ValueMath};
