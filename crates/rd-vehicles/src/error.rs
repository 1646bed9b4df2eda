//! Catalog errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported catalog format: {path} (expected .yaml, .yml or .json)")]
    UnknownFormat { path: PathBuf },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid profile '{key}' ({make} {model}): {reason}")]
    InvalidProfile {
        make: String,
        model: String,
        key: String,
        reason: String,
    },

    #[error("Unknown body type: {0}")]
    UnknownBodyType(String),

    #[error("Unknown drivetrain: {0}")]
    UnknownDrivetrain(String),
}
