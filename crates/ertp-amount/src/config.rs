//! YAML brand manifests.

use std::collections::BTreeMap;
use std::path::Path;

use ertp_core::{AmountError, AssetKind, Brand, DisplayInfo, ErrorInfo};
use serde::{Deserialize, Serialize};

fn config_error(code: &str, err: impl ToString) -> AmountError {
    AmountError::Config(ErrorInfo::new(code, err.to_string()))
}

/// List of brands to mint, loadable from YAML.
///
/// ```yaml
/// brands:
///   - name: moola
///     decimal_places: 6
///   - name: tickets
///     asset_kind: copySet
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandManifest {
    /// Declared brands, in file order.
    #[serde(default)]
    pub brands: Vec<BrandDecl>,
}

/// One brand declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandDecl {
    /// Alleged name of the brand. Must be unique within a manifest.
    pub name: String,
    /// Kind of value carried by the brand's amounts.
    #[serde(default)]
    pub asset_kind: AssetKind,
    /// Display hint for user interfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<i8>,
}

impl BrandDecl {
    fn display_info(&self) -> DisplayInfo {
        let info = DisplayInfo::new(self.asset_kind);
        match self.decimal_places {
            Some(places) => info.with_decimal_places(places),
            None => info,
        }
    }
}

impl BrandManifest {
    /// Parses a manifest from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, AmountError> {
        serde_yaml::from_str(contents).map_err(|err| config_error("manifest.yaml", err))
    }

    /// Reads and parses a manifest file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AmountError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| {
            config_error("manifest.read", err).with_context("path", path.display())
        })?;
        Self::from_yaml_str(&contents).map_err(|err| err.with_context("path", path.display()))
    }

    /// Renders the manifest as YAML.
    pub fn to_yaml_string(&self) -> Result<String, AmountError> {
        serde_yaml::to_string(self).map_err(|err| config_error("manifest.yaml", err))
    }

    /// Mints a fresh brand for every declaration.
    ///
    /// Building the same manifest twice yields two disjoint sets of brands.
    pub fn build(&self) -> Result<BrandTable, AmountError> {
        let mut brands = BTreeMap::new();
        for decl in &self.brands {
            if brands.contains_key(&decl.name) {
                return Err(config_error("manifest.duplicate-brand", "brand declared twice")
                    .with_context("name", &decl.name));
            }
            let brand = Brand::new(decl.name.clone(), decl.display_info())
                .map_err(|err| err.with_context("name", &decl.name))?;
            brands.insert(decl.name.clone(), brand);
        }
        Ok(BrandTable { brands })
    }
}

/// Brands minted from a manifest, looked up by alleged name.
#[derive(Debug, Clone, Default)]
pub struct BrandTable {
    brands: BTreeMap<String, Brand>,
}

impl BrandTable {
    /// Brand declared under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Brand> {
        self.brands.get(name)
    }

    /// Brand declared under `name`, or a config error.
    pub fn brand(&self, name: &str) -> Result<&Brand, AmountError> {
        self.get(name).ok_or_else(|| {
            config_error("manifest.unknown-brand", "no brand declared under this name")
                .with_context("name", name)
        })
    }

    /// Brands in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Brand)> {
        self.brands.iter().map(|(name, brand)| (name.as_str(), brand))
    }

    /// Number of brands.
    pub fn len(&self) -> usize {
        self.brands.len()
    }

    /// Whether the table holds no brands.
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}
