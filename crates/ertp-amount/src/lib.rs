#![deny(missing_docs)]
#![doc = "Brand-aware amount math for ERTP: amounts, coercion of untrusted input, patterns and frugal splits."]

pub mod amount;
pub mod config;
pub mod frugal;
pub mod math;
pub mod pattern;

pub use amount::{Amount, AmountSource, RawAmount, ValueSlot};
pub use config::{BrandDecl, BrandManifest, BrandTable};
pub use frugal::FrugalSplit;
pub use math::{get_asset_kind, AmountMath};
pub use pattern::{AmountPattern, ValuePattern};

pub use ertp_core::{
    assert_asset_kind, AmountError, AssetKind, Brand, DisplayInfo, ErrorInfo, Key, KeyEquality,
    RawValue, Remotable, StructuralKeys,
};
pub use ertp_math::Value;
