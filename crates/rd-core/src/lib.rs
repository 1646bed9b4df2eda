//! rd-core: shared foundation for rundyno.
//!
//! Contains:
//! - units (uom SI types, constructors, km/h and horsepower conversions)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{RdError, RdResult};
pub use numeric::*;
pub use units::*;
