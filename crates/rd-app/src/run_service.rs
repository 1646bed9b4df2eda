//! Run file loading and validation for front ends.

use std::path::Path;

use rd_project::RunFile;

use crate::error::{AppError, AppResult};

/// What a valid run file describes, without estimating it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RunSummary {
    pub name: String,
    pub version: u32,
    pub vehicle: String,
    pub uses_profile: bool,
    pub uncertainty_overrides: Vec<String>,
}

impl From<&RunFile> for RunSummary {
    fn from(file: &RunFile) -> Self {
        let v = &file.vehicle;
        let vehicle = match (&v.make, &v.model, &v.profile) {
            (Some(make), Some(model), Some(key)) => format!("{make} {model} ({key})"),
            (Some(make), Some(model), None) => format!("{make} {model}, {}", v.body_type),
            _ => v.body_type.to_string(),
        };
        Self {
            name: file.name.clone(),
            version: file.version,
            vehicle,
            uses_profile: v.profile.is_some(),
            uncertainty_overrides: file
                .uncertainty
                .iter_set()
                .map(|(name, _)| name.to_string())
                .collect(),
        }
    }
}

pub fn load_run(path: &Path) -> AppResult<RunFile> {
    let file = rd_project::load(path).map_err(|e| match e {
        rd_project::ProjectError::Validation(v) => AppError::Validation(v.to_string()),
        other => AppError::RunFile(format!("{}: {}", path.display(), other)),
    })?;
    tracing::debug!(path = %path.display(), name = %file.name, "run file loaded");
    Ok(file)
}

/// Load and validate a run file, returning a summary.
pub fn validate_run(path: &Path) -> AppResult<RunSummary> {
    let file = load_run(path)?;
    Ok(RunSummary::from(&file))
}
