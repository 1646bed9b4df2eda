//! rd-project: run file format, validation, and resolution.

pub mod resolve;
pub mod schema;
pub mod validate;

pub use resolve::{CdaOrigin, ResolveError, ResolvedRun, resolve};
pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_run_file};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<RunFile> {
    let content = std::fs::read_to_string(path)?;
    let file: RunFile = serde_yaml::from_str(&content)?;
    validate_run_file(&file)?;
    Ok(file)
}

pub fn save_yaml(path: &std::path::Path, file: &RunFile) -> ProjectResult<()> {
    validate_run_file(file)?;
    let content = serde_yaml::to_string(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<RunFile> {
    let content = std::fs::read_to_string(path)?;
    let file: RunFile = serde_json::from_str(&content)?;
    validate_run_file(&file)?;
    Ok(file)
}

pub fn save_json(path: &std::path::Path, file: &RunFile) -> ProjectResult<()> {
    validate_run_file(file)?;
    let content = serde_json::to_string_pretty(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load(path: &std::path::Path) -> ProjectResult<RunFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}
