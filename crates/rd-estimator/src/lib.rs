//! rd-estimator: average power estimation from a single acceleration run.
//!
//! Provides:
//! - `EstimatorInput`, the per-call parameter record
//! - `estimate_power`, a closed-form energy balance over the run
//! - `estimate_range`, a worst-case interval over +/- parameter perturbations
//!
//! Everything here is pure and synchronous. No I/O, no shared state.
//!
//! # Example
//!
//! ```
//! use rd_estimator::{EstimatorInput, RangeOptions, estimate_power, estimate_range};
//!
//! let input = EstimatorInput::new(1400.0, 100.0, 200.0, 10.0, 350.0, 0.68, 0.015, 0.86);
//!
//! let point = estimate_power(&input).unwrap();
//! let range = estimate_range(&input, &RangeOptions::default()).unwrap();
//!
//! assert!(range.contains_engine(point.engine_power_w));
//! println!("engine: {:.0} hp", point.engine_hp());
//! ```

pub mod error;
pub mod input;
pub mod power;
pub mod range;
pub mod uncertainty;

// Re-exports for ergonomics
pub use error::{EstimateResult, EstimatorError};
pub use input::{DEFAULT_GRADE_PCT, DEFAULT_RHO, EstimatorInput};
pub use power::{ETA_MAX, ETA_MIN, EnergyBreakdown, EstimatorResult, clamp_eta, estimate_power};
pub use range::{CdaBoundsSource, RangeOptions, RangeResult, estimate_range};
pub use uncertainty::{Corner, PerturbationBox, UncertaintyConfig, UncertaintyOverrides};
