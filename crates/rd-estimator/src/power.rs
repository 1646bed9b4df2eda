//! Average power from an energy balance over one acceleration run.

use crate::error::{EstimateResult, EstimatorError};
use crate::input::EstimatorInput;
use rd_core::units::{Energy, Power, clamp, constants::G0_MPS2, joules, kmh_to_mps, watts, watts_to_hp};

/// Lowest drivetrain efficiency accepted; lower guesses are raised to this.
pub const ETA_MIN: f64 = 0.5;
/// Highest drivetrain efficiency accepted; higher guesses are lowered to this.
pub const ETA_MAX: f64 = 0.98;

/// Clamp an efficiency guess into the plausible drivetrain band.
///
/// NaN is not propagated: a NaN guess comes back as [`ETA_MIN`].
#[inline]
pub fn clamp_eta(eta: f64) -> f64 {
    clamp(eta, ETA_MIN, ETA_MAX)
}

/// The four additive energy terms of the balance (J).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyBreakdown {
    /// Kinetic energy gained between v1 and v2
    pub de_j: f64,
    /// Aerodynamic drag work at the equivalent velocity
    pub e_drag_j: f64,
    /// Rolling resistance work
    pub e_roll_j: f64,
    /// Potential energy change from grade (negative when descending)
    pub e_grade_j: f64,
}

impl EnergyBreakdown {
    pub fn total_j(&self) -> f64 {
        self.de_j + self.e_drag_j + self.e_roll_j + self.e_grade_j
    }

    pub fn total(&self) -> Energy {
        joules(self.total_j())
    }
}

/// Point estimate for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatorResult {
    /// Average power delivered at the wheels (W)
    pub wheel_power_w: f64,
    /// Average engine power, wheel power divided by efficiency (W)
    pub engine_power_w: f64,
    /// Quadratic-mean velocity used for drag (m/s)
    pub v_eq_mps: f64,
    pub breakdown: EnergyBreakdown,
}

impl EstimatorResult {
    pub fn wheel_power(&self) -> Power {
        watts(self.wheel_power_w)
    }

    pub fn engine_power(&self) -> Power {
        watts(self.engine_power_w)
    }

    pub fn wheel_hp(&self) -> f64 {
        watts_to_hp(self.wheel_power_w)
    }

    pub fn engine_hp(&self) -> f64 {
        watts_to_hp(self.engine_power_w)
    }

    /// Work done at the wheels over the run (J).
    pub fn total_energy_j(&self) -> f64 {
        self.breakdown.total_j()
    }
}

/// Estimate average wheel and engine power over the run.
///
/// Energy balance:
///
/// ```text
/// dE     = ½ m (v2² − v1²)
/// E_drag = ½ ρ CdA v_eq² s      v_eq = √((v1² + v2²) / 2)
/// E_roll = m g Crr s
/// E_grade = m g (grade / 100) s
/// P_wheel = (dE + E_drag + E_roll + E_grade) / t
/// P_engine = P_wheel / η
/// ```
///
/// Only the endpoint speeds are known, so drag uses the quadratic mean of
/// the two as a constant velocity over the whole distance. Golden outputs
/// depend on this exact form.
///
/// # Errors
///
/// - [`EstimatorError::NonPositive`] if mass, time or distance is not > 0
/// - [`EstimatorError::InvalidVelocity`] unless `v2 > v1 >= 0`
pub fn estimate_power(input: &EstimatorInput) -> EstimateResult<EstimatorResult> {
    let m = input.mass_kg;
    let t = input.time_s;
    let s = input.distance_m;

    // Negated comparisons so NaN is rejected too.
    if !(m > 0.0) || !(t > 0.0) || !(s > 0.0) {
        return Err(EstimatorError::NonPositive);
    }

    let v1 = kmh_to_mps(input.v1_kmh);
    let v2 = kmh_to_mps(input.v2_kmh);

    if !(v2 > v1) || v1 < 0.0 {
        return Err(EstimatorError::InvalidVelocity {
            v1_mps: v1,
            v2_mps: v2,
        });
    }

    let rho = input.rho();
    let eta = clamp_eta(input.eta);
    if eta != input.eta {
        tracing::warn!(eta = input.eta, clamped = eta, "drivetrain efficiency outside band");
    }

    let v_eq = ((v1 * v1 + v2 * v2) / 2.0).sqrt();

    let de = 0.5 * m * (v2 * v2 - v1 * v1);

    let f_drag_eq = 0.5 * rho * input.cda * (v_eq * v_eq);
    let e_drag = f_drag_eq * s;

    let f_roll = m * G0_MPS2 * input.crr;
    let e_roll = f_roll * s;

    let grade = input.grade_pct() / 100.0;
    let f_grade = m * G0_MPS2 * grade;
    let e_grade = f_grade * s;

    let wheel_power_w = (de + e_drag + e_roll + e_grade) / t;
    let engine_power_w = wheel_power_w / eta;

    tracing::trace!(
        de,
        e_drag,
        e_roll,
        e_grade,
        wheel_power_w,
        engine_power_w,
        "power estimate"
    );

    Ok(EstimatorResult {
        wheel_power_w,
        engine_power_w,
        v_eq_mps: v_eq,
        breakdown: EnergyBreakdown {
            de_j: de,
            e_drag_j: e_drag,
            e_roll_j: e_roll,
            e_grade_j: e_grade,
        },
    })
}
