//! Error types for the rd-app service layer.

/// Application error type that wraps errors from the backend crates
/// and gives front ends one error surface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Run file error: {0}")]
    RunFile(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Run file validation failed: {0}")]
    Validation(String),

    #[error("Could not resolve vehicle parameters: {0}")]
    Resolve(String),

    #[error("Estimate failed: {0}")]
    Estimate(#[from] rd_estimator::EstimatorError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for rd-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<rd_project::ProjectError> for AppError {
    fn from(err: rd_project::ProjectError) -> Self {
        match err {
            rd_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            rd_project::ProjectError::Resolve(e) => AppError::Resolve(e.to_string()),
            other => AppError::RunFile(other.to_string()),
        }
    }
}

impl From<rd_project::ValidationError> for AppError {
    fn from(err: rd_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<rd_project::ResolveError> for AppError {
    fn from(err: rd_project::ResolveError) -> Self {
        AppError::Resolve(err.to_string())
    }
}

impl From<rd_vehicles::CatalogError> for AppError {
    fn from(err: rd_vehicles::CatalogError) -> Self {
        AppError::Catalog(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
