//! Vehicle profile catalog loading and listing.

use std::path::Path;

use rd_vehicles::{ProfileCatalog, VehicleProfile};

use crate::error::AppResult;

/// One row of a profile listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProfileSummary {
    pub make: String,
    pub model: String,
    pub key: String,
    pub cda_m2: f64,
    pub cda_bounds: Option<(f64, f64)>,
    pub source: Option<String>,
}

impl From<&VehicleProfile> for ProfileSummary {
    fn from(p: &VehicleProfile) -> Self {
        Self {
            make: p.make.clone(),
            model: p.model.clone(),
            key: p.key(),
            cda_m2: p.cda.value,
            cda_bounds: p.cda.bounds(),
            source: p.source.as_ref().map(|s| s.name.clone()),
        }
    }
}

pub fn load_catalog(path: &Path) -> AppResult<ProfileCatalog> {
    let catalog = ProfileCatalog::load(path)?;
    tracing::info!(path = %path.display(), profiles = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Profiles filtered by make and model. Both filters are exact; `None`
/// matches everything.
pub fn list_profiles(
    catalog: &ProfileCatalog,
    make: Option<&str>,
    model: Option<&str>,
) -> Vec<ProfileSummary> {
    catalog
        .profiles()
        .iter()
        .filter(|p| make.is_none_or(|m| p.make == m))
        .filter(|p| model.is_none_or(|m| p.model == m))
        .map(ProfileSummary::from)
        .collect()
}
