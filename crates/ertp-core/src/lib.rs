#![deny(missing_docs)]
#![doc = "Core data model for the ERTP amount algebra: brands, asset kinds, keys, raw input values and the shared error type."]

pub mod brand;
pub mod errors;
pub mod key;
pub mod kind;
pub mod raw;
pub mod remotable;

pub use brand::{Brand, DisplayInfo, MAX_DECIMAL_PLACES};
pub use errors::{domination_error, duplicate_error, shape_error, AmountError, ErrorInfo};
pub use key::{Key, KeyEquality, StructuralKeys};
pub use kind::{assert_asset_kind, AssetKind};
pub use raw::RawValue;
pub use remotable::Remotable;
