//! Estimator errors.

use thiserror::Error;

/// Result type for estimator operations.
pub type EstimateResult<T> = Result<T, EstimatorError>;

/// Rejected estimator input. Both kinds indicate caller error, never a
/// transient condition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    /// Mass, time, or distance not strictly positive (NaN included).
    #[error("mass, time, and distance must be > 0")]
    NonPositive,

    /// Speeds do not increase over the run, or the start speed is negative.
    #[error("invalid velocity")]
    InvalidVelocity { v1_mps: f64, v2_mps: f64 },
}
