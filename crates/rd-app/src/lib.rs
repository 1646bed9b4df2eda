//! Shared application service layer for rundyno.
//!
//! Front ends call into this crate to load run files and catalogs, resolve
//! vehicle parameters, and produce estimate reports.

pub mod catalog_service;
pub mod error;
pub mod estimate_service;
pub mod report;
pub mod run_service;

// Re-export key types for convenience
pub use catalog_service::{ProfileSummary, list_profiles, load_catalog};
pub use error::{AppError, AppResult};
pub use estimate_service::{ManualRequest, estimate, estimate_manual, estimate_run, run_file};
pub use report::{CdaSummary, EstimateReport};
pub use run_service::{RunSummary, load_run, validate_run};
