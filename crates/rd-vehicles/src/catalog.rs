//! Measured / published CdA profiles keyed by make and model.
//!
//! A catalog is a YAML or JSON document:
//!
//! ```yaml
//! version: 1
//! profiles:
//!   - make: Volkswagen
//!     model: Golf
//!     series: Mk7
//!     year_from: 2013
//!     year_to: 2020
//!     variant: GTI
//!     cda: { value: 0.66, min: 0.63, max: 0.69 }
//!     source: { name: "Manufacturer Cd x frontal area" }
//! ```

use crate::error::{CatalogError, CatalogResult};
use rd_core::numeric::ensure_positive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Drag area estimate with optional bounds (m²).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdaEstimate {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl CdaEstimate {
    /// Both bounds, when present.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.min.zip(self.max)
    }
}

/// Where a profile's numbers came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub make: String,
    pub model: String,
    pub series: String,
    pub year_from: u16,
    pub year_to: u16,
    pub variant: String,
    pub cda: CdaEstimate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ProfileSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl VehicleProfile {
    /// Selection key, unique within one make/model: `"Mk7 · 2013-2020 · GTI"`.
    pub fn key(&self) -> String {
        format!(
            "{} · {}-{} · {}",
            self.series, self.year_from, self.year_to, self.variant
        )
    }

    fn validate(&self) -> CatalogResult<()> {
        let invalid = |reason: &str| CatalogError::InvalidProfile {
            make: self.make.clone(),
            model: self.model.clone(),
            key: self.key(),
            reason: reason.to_string(),
        };

        if self.make.trim().is_empty() || self.model.trim().is_empty() {
            return Err(invalid("make and model must not be empty"));
        }
        if self.year_from > self.year_to {
            return Err(invalid("year_from must not be after year_to"));
        }

        let value = ensure_positive(self.cda.value, "cda.value")
            .map_err(|_| invalid("cda.value must be positive and finite"))?;
        if let Some(min) = self.cda.min {
            ensure_positive(min, "cda.min").map_err(|_| invalid("cda.min must be positive and finite"))?;
            if min > value {
                return Err(invalid("cda.min must not exceed cda.value"));
            }
        }
        if let Some(max) = self.cda.max {
            ensure_positive(max, "cda.max").map_err(|_| invalid("cda.max must be positive and finite"))?;
            if max < value {
                return Err(invalid("cda.max must not be below cda.value"));
            }
        }
        Ok(())
    }
}

/// On-disk catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub profiles: Vec<VehicleProfile>,
}

fn default_version() -> u32 {
    1
}

/// Validated, in-memory profile catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileCatalog {
    profiles: Vec<VehicleProfile>,
}

impl ProfileCatalog {
    pub fn new(profiles: Vec<VehicleProfile>) -> CatalogResult<Self> {
        for profile in &profiles {
            profile.validate()?;
        }
        Ok(Self { profiles })
    }

    pub fn from_yaml_str(content: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::new(file.profiles)
    }

    pub fn from_json_str(content: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::new(file.profiles)
    }

    /// Load a catalog, choosing the parser by file extension.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let catalog = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => {
                return Err(CatalogError::UnknownFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        tracing::debug!(
            path = %path.display(),
            profiles = catalog.len(),
            "loaded vehicle catalog"
        );
        Ok(catalog)
    }

    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            version: default_version(),
            profiles: self.profiles.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn profiles(&self) -> &[VehicleProfile] {
        &self.profiles
    }

    /// All profiles for an exact make and model.
    pub fn find_profiles(&self, make: &str, model: &str) -> Vec<&VehicleProfile> {
        self.profiles
            .iter()
            .filter(|p| p.make == make && p.model == model)
            .collect()
    }

    /// The profile with the given selection key for a make and model.
    pub fn find_by_key(&self, make: &str, model: &str, key: &str) -> Option<&VehicleProfile> {
        self.profiles
            .iter()
            .find(|p| p.make == make && p.model == model && p.key() == key)
    }

    /// Distinct makes, sorted.
    pub fn makes(&self) -> Vec<&str> {
        self.profiles
            .iter()
            .map(|p| p.make.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct models for a make, sorted.
    pub fn models_for(&self, make: &str) -> Vec<&str> {
        self.profiles
            .iter()
            .filter(|p| p.make == make)
            .map(|p| p.model.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
