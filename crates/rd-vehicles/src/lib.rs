//! rd-vehicles: vehicle-side inputs for the estimator.
//!
//! Provides:
//! - fallback defaults by body type and drivetrain
//! - a CdA profile catalog keyed by make / model / series / variant
//!
//! Nothing here computes power. These are lookups that resolve `cda`,
//! `eta`, `rho` and `crr` before a run reaches `rd-estimator`.

pub mod catalog;
pub mod defaults;
pub mod error;

pub use catalog::{CatalogFile, CdaEstimate, ProfileCatalog, ProfileSource, VehicleProfile};
pub use defaults::{BodyType, DEFAULT_CRR, DEFAULT_RHO, Drivetrain};
pub use error::{CatalogError, CatalogResult};
