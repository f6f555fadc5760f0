//! Asset kind enumeration and validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{shape_error, AmountError};

/// The shape and algebra of an asset's values.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AssetKind {
    /// Fungible natural-number counts.
    #[default]
    #[serde(rename = "nat")]
    Nat,
    /// Legacy unique-item sets kept in caller order.
    #[serde(rename = "set")]
    Set,
    /// Unique-item sets in canonical key order.
    #[serde(rename = "copySet")]
    CopySet,
    /// Multisets mapping labels to positive counts.
    #[serde(rename = "copyBag")]
    CopyBag,
}

impl AssetKind {
    /// Every supported kind, in declaration order.
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Nat,
        AssetKind::Set,
        AssetKind::CopySet,
        AssetKind::CopyBag,
    ];

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Nat => "nat",
            AssetKind::Set => "set",
            AssetKind::CopySet => "copySet",
            AssetKind::CopyBag => "copyBag",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                shape_error("asset-kind.unknown", "unrecognized asset kind")
                    .with_context("asset_kind", s)
                    .with_hint("expected one of nat, set, copySet, copyBag")
            })
    }
}

/// Validates an asset kind name, returning the parsed kind.
pub fn assert_asset_kind(name: &str) -> Result<AssetKind, AmountError> {
    name.parse()
}
