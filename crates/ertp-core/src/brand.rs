//! Brands and their display metadata.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{shape_error, AmountError};
use crate::kind::AssetKind;
use crate::remotable::{next_identity, Remotable};

/// Bound on `decimal_places` in either direction.
pub const MAX_DECIMAL_PLACES: i8 = 100;

/// Display metadata published by a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayInfo {
    /// Kind of value carried by amounts of this brand.
    pub asset_kind: AssetKind,
    /// Number of decimal places a user interface should shift by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<i8>,
}

impl DisplayInfo {
    /// Display info for the given kind without decimal places.
    pub fn new(asset_kind: AssetKind) -> Self {
        Self {
            asset_kind,
            decimal_places: None,
        }
    }

    /// Sets the number of decimal places.
    pub fn with_decimal_places(mut self, decimal_places: i8) -> Self {
        self.decimal_places = Some(decimal_places);
        self
    }

    /// Checks that `decimal_places` lies within `-100..=100`.
    pub fn validate(&self) -> Result<(), AmountError> {
        if let Some(places) = self.decimal_places {
            if !(-MAX_DECIMAL_PLACES..=MAX_DECIMAL_PLACES).contains(&places) {
                return Err(shape_error(
                    "display-info.decimal-places",
                    "decimalPlaces out of range",
                )
                .with_context("decimal_places", places)
                .with_hint("decimalPlaces must lie within -100..=100"));
            }
        }
        Ok(())
    }
}

/// Identity token naming an asset type.
///
/// Cloning a brand yields the same brand. Two brands created separately are
/// never equal, whatever their names.
#[derive(Clone)]
pub struct Brand {
    inner: Arc<BrandInner>,
}

struct BrandInner {
    identity: u64,
    alleged_name: String,
    display_info: DisplayInfo,
    issuer: Remotable,
}

impl Brand {
    /// Creates a brand together with a fresh issuer handle.
    pub fn new(
        alleged_name: impl Into<String>,
        display_info: DisplayInfo,
    ) -> Result<Self, AmountError> {
        let alleged_name = alleged_name.into();
        let issuer = Remotable::new(format!("{alleged_name} issuer"));
        Self::with_issuer(alleged_name, display_info, issuer)
    }

    /// Creates a brand bound to an existing issuer handle.
    pub fn with_issuer(
        alleged_name: impl Into<String>,
        display_info: DisplayInfo,
        issuer: Remotable,
    ) -> Result<Self, AmountError> {
        display_info.validate()?;
        Ok(Self {
            inner: Arc::new(BrandInner {
                identity: next_identity(),
                alleged_name: alleged_name.into(),
                display_info,
                issuer,
            }),
        })
    }

    /// Returns whether `issuer` is the issuer this brand was created for.
    pub fn is_my_issuer(&self, issuer: &Remotable) -> bool {
        self.inner.issuer == *issuer
    }

    /// Human-readable name. Not authoritative.
    pub fn alleged_name(&self) -> &str {
        &self.inner.alleged_name
    }

    /// Display metadata, including the asset kind.
    pub fn display_info(&self) -> DisplayInfo {
        self.inner.display_info
    }

    /// Shorthand for `display_info().asset_kind`.
    pub fn asset_kind(&self) -> AssetKind {
        self.inner.display_info.asset_kind
    }

    /// Process-unique identity number.
    pub fn identity(&self) -> u64 {
        self.inner.identity
    }
}

impl PartialEq for Brand {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Brand {}

impl std::hash::Hash for Brand {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Debug for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Alleged: {} brand#{} {}]",
            self.alleged_name(),
            self.identity(),
            self.asset_kind()
        )
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Alleged: {} brand]", self.alleged_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brands_compare_by_identity() {
        let a = Brand::new("moola", DisplayInfo::new(AssetKind::Nat)).unwrap();
        let b = Brand::new("moola", DisplayInfo::new(AssetKind::Nat)).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn issuer_allegation() {
        let issuer = Remotable::new("tickets issuer");
        let brand = Brand::with_issuer("tickets", DisplayInfo::new(AssetKind::Set), issuer.clone())
            .unwrap();
        assert!(brand.is_my_issuer(&issuer));
        assert!(!brand.is_my_issuer(&Remotable::new("tickets issuer")));
    }

    #[test]
    fn decimal_places_bounded() {
        let info = DisplayInfo::new(AssetKind::Nat).with_decimal_places(101);
        let err = Brand::new("bad", info).unwrap_err();
        assert_eq!(err.code(), "display-info.decimal-places");
        let lowest = DisplayInfo::new(AssetKind::Nat).with_decimal_places(-100);
        assert!(Brand::new("ok", lowest).is_ok());
    }

    #[test]
    fn display_info_json_is_camel_case() {
        let info = DisplayInfo::new(AssetKind::CopySet).with_decimal_places(6);
        let json = serde_json::to_value(info).unwrap();
        assert_eq!(json, serde_json::json!({"assetKind": "copySet", "decimalPlaces": 6}));
    }
}
