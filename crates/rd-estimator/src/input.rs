//! Estimator input record.

use rd_core::units::{Length, Mass, Time, kg, m, s};

/// Road grade assumed when none is given (percent).
pub const DEFAULT_GRADE_PCT: f64 = 0.0;

/// Air density assumed when none is given (kg/m³).
pub const DEFAULT_RHO: f64 = 1.20;

/// One fully specified set of run parameters.
///
/// Speeds are in km/h as entered; everything else is SI. `cda` has no
/// default and must be resolved by the caller (profile, manual entry, or
/// body-type fallback).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatorInput {
    /// Total mass including driver and fuel (kg)
    pub mass_kg: f64,
    /// Speed at the start of the interval (km/h)
    pub v1_kmh: f64,
    /// Speed at the end of the interval (km/h)
    pub v2_kmh: f64,
    /// Elapsed time between v1 and v2 (s)
    pub time_s: f64,
    /// Distance covered between v1 and v2 (m)
    pub distance_m: f64,
    /// Average road grade (percent, positive = climbing)
    #[cfg_attr(feature = "serde", serde(default))]
    pub grade_pct: Option<f64>,
    /// Air density (kg/m³)
    #[cfg_attr(feature = "serde", serde(default))]
    pub rho: Option<f64>,
    /// Effective drag area (m²)
    pub cda: f64,
    /// Rolling resistance coefficient
    pub crr: f64,
    /// Drivetrain efficiency, clamped by the estimator
    pub eta: f64,
}

impl EstimatorInput {
    /// Create an input with no grade and default air density.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mass_kg: f64,
        v1_kmh: f64,
        v2_kmh: f64,
        time_s: f64,
        distance_m: f64,
        cda: f64,
        crr: f64,
        eta: f64,
    ) -> Self {
        Self {
            mass_kg,
            v1_kmh,
            v2_kmh,
            time_s,
            distance_m,
            grade_pct: None,
            rho: None,
            cda,
            crr,
            eta,
        }
    }

    pub fn with_grade_pct(mut self, grade_pct: f64) -> Self {
        self.grade_pct = Some(grade_pct);
        self
    }

    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = Some(rho);
        self
    }

    /// Grade with the default applied.
    pub fn grade_pct(&self) -> f64 {
        self.grade_pct.unwrap_or(DEFAULT_GRADE_PCT)
    }

    /// Air density with the default applied.
    pub fn rho(&self) -> f64 {
        self.rho.unwrap_or(DEFAULT_RHO)
    }

    pub fn mass(&self) -> Mass {
        kg(self.mass_kg)
    }

    pub fn distance(&self) -> Length {
        m(self.distance_m)
    }

    pub fn duration(&self) -> Time {
        s(self.time_s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let input = EstimatorInput::new(1400.0, 100.0, 200.0, 10.0, 350.0, 0.68, 0.015, 0.86);
        assert_eq!(input.grade_pct(), 0.0);
        assert_eq!(input.rho(), 1.20);
        assert!(input.grade_pct.is_none());
        assert!(input.rho.is_none());
    }

    #[test]
    fn builders_override_defaults() {
        let input = EstimatorInput::new(1400.0, 100.0, 200.0, 10.0, 350.0, 0.68, 0.015, 0.86)
            .with_grade_pct(-1.5)
            .with_rho(1.10);
        assert_eq!(input.grade_pct(), -1.5);
        assert_eq!(input.rho(), 1.10);
    }

    #[test]
    fn typed_accessors_are_si() {
        let input = EstimatorInput::new(1400.0, 100.0, 200.0, 10.0, 350.0, 0.68, 0.015, 0.86);
        assert_eq!(input.mass().value, 1400.0);
        assert_eq!(input.distance().value, 350.0);
        assert_eq!(input.duration().value, 10.0);
    }
}
