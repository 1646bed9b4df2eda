//! Worst-case power interval over a box of parameter perturbations.
//!
//! This is not a statistical interval. Every corner of the box is
//! evaluated and the extremes are kept, so the result is an outer bound
//! under the assumed independent ± margins.

use crate::error::EstimateResult;
use crate::input::EstimatorInput;
use crate::power::estimate_power;
use crate::uncertainty::{PerturbationBox, UncertaintyOverrides};
use rd_core::units::watts_to_hp;

/// Where the CdA extremes of a range came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CdaBoundsSource {
    /// Caller-supplied min/max (e.g. a measured profile)
    Supplied,
    /// ± `cda_rel_plus_minus` around the point value
    RelativeFallback,
}

/// Optional inputs to [`estimate_range`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeOptions {
    pub cda_min: Option<f64>,
    pub cda_max: Option<f64>,
    pub uncertainty: UncertaintyOverrides,
}

impl RangeOptions {
    pub fn with_cda_bounds(cda_min: f64, cda_max: f64) -> Self {
        Self {
            cda_min: Some(cda_min),
            cda_max: Some(cda_max),
            ..Default::default()
        }
    }

    pub fn uncertainty(mut self, overrides: UncertaintyOverrides) -> Self {
        self.uncertainty = overrides;
        self
    }
}

/// Interval bounds found by the corner sweep (W).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeResult {
    pub min_engine_w: f64,
    pub max_engine_w: f64,
    pub min_wheel_w: f64,
    pub max_wheel_w: f64,
    pub cda_source: CdaBoundsSource,
}

impl RangeResult {
    pub fn contains_engine(&self, w: f64) -> bool {
        (self.min_engine_w..=self.max_engine_w).contains(&w)
    }

    pub fn contains_wheel(&self, w: f64) -> bool {
        (self.min_wheel_w..=self.max_wheel_w).contains(&w)
    }

    pub fn engine_width_w(&self) -> f64 {
        self.max_engine_w - self.min_engine_w
    }

    /// Engine bounds in horsepower, `(min, max)`.
    pub fn engine_hp(&self) -> (f64, f64) {
        (watts_to_hp(self.min_engine_w), watts_to_hp(self.max_engine_w))
    }

    /// Wheel bounds in horsepower, `(min, max)`.
    pub fn wheel_hp(&self) -> (f64, f64) {
        (watts_to_hp(self.min_wheel_w), watts_to_hp(self.max_wheel_w))
    }
}

/// Bound engine and wheel power over all 64 corners of the perturbation box.
///
/// Only mass, grade, CdA, efficiency, air density and rolling coefficient
/// vary, so any input that passes [`estimate_power`] keeps passing at every
/// corner. Any error still aborts the whole sweep; no partial interval is
/// returned.
pub fn estimate_range(base: &EstimatorInput, opts: &RangeOptions) -> EstimateResult<RangeResult> {
    let pbox = PerturbationBox::new(base, opts);
    tracing::debug!(
        cda_source = ?pbox.cda_source,
        cda_lo = pbox.cdas[0],
        cda_hi = pbox.cdas[1],
        "sweeping perturbation box"
    );

    let mut min_engine_w = f64::INFINITY;
    let mut max_engine_w = f64::NEG_INFINITY;
    let mut min_wheel_w = f64::INFINITY;
    let mut max_wheel_w = f64::NEG_INFINITY;

    for corner in pbox.corners() {
        let res = estimate_power(&corner.apply(base))?;
        min_engine_w = min_engine_w.min(res.engine_power_w);
        max_engine_w = max_engine_w.max(res.engine_power_w);
        min_wheel_w = min_wheel_w.min(res.wheel_power_w);
        max_wheel_w = max_wheel_w.max(res.wheel_power_w);
    }

    Ok(RangeResult {
        min_engine_w,
        max_engine_w,
        min_wheel_w,
        max_wheel_w,
        cda_source: pbox.cda_source,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_input()(
            mass_kg in 500.0_f64..3000.0,
            v1_kmh in 0.0_f64..150.0,
            dv_kmh in 1.0_f64..150.0,
            time_s in 1.0_f64..30.0,
            distance_m in 10.0_f64..1500.0,
            grade_pct in -3.0_f64..3.0,
            rho in 0.9_f64..1.4,
            cda in 0.3_f64..1.2,
            crr in 0.005_f64..0.03,
            eta in 0.55_f64..0.95,
        ) -> EstimatorInput {
            EstimatorInput::new(mass_kg, v1_kmh, v1_kmh + dv_kmh, time_s, distance_m, cda, crr, eta)
                .with_grade_pct(grade_pct)
                .with_rho(rho)
        }
    }

    proptest! {
        #[test]
        fn range_always_brackets_point(input in valid_input()) {
            let point = estimate_power(&input).unwrap();
            let range = estimate_range(&input, &RangeOptions::default()).unwrap();
            prop_assert!(range.min_wheel_w <= point.wheel_power_w);
            prop_assert!(point.wheel_power_w <= range.max_wheel_w);
            if point.wheel_power_w >= 0.0 {
                prop_assert!(range.contains_engine(point.engine_power_w));
            }
        }

        #[test]
        fn range_is_ordered(input in valid_input()) {
            let range = estimate_range(&input, &RangeOptions::default()).unwrap();
            prop_assert!(range.min_engine_w <= range.max_engine_w);
            prop_assert!(range.min_wheel_w <= range.max_wheel_w);
        }
    }
}
