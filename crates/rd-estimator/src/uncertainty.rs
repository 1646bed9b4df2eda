//! Perturbation margins and the corner set they span.
//!
//! Each uncertain quantity gets exactly two extremes (center − margin,
//! center + margin). Mass, grade and efficiency margins are absolute; air
//! density, rolling coefficient and drag area margins are fractions of the
//! center value.

use crate::input::EstimatorInput;
use crate::power::clamp_eta;
use crate::range::{CdaBoundsSource, RangeOptions};
use itertools::iproduct;

/// Six independent ± perturbation magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UncertaintyConfig {
    /// Absolute mass margin (kg)
    pub mass_kg_plus_minus: f64,
    /// Absolute grade margin (percentage points)
    pub grade_pct_plus_minus: f64,
    /// Absolute efficiency margin (fraction)
    pub eta_plus_minus: f64,
    /// Relative air density margin
    pub rho_rel_plus_minus: f64,
    /// Relative rolling coefficient margin
    pub crr_rel_plus_minus: f64,
    /// Relative drag area margin, only used without supplied CdA bounds
    pub cda_rel_plus_minus: f64,
}

impl Default for UncertaintyConfig {
    fn default() -> Self {
        Self {
            mass_kg_plus_minus: 20.0,
            grade_pct_plus_minus: 0.2,
            eta_plus_minus: 0.03,
            rho_rel_plus_minus: 0.04,
            crr_rel_plus_minus: 0.10,
            cda_rel_plus_minus: 0.10,
        }
    }
}

impl UncertaintyConfig {
    /// Overlay the fields that are set; unset fields keep `self`'s value.
    pub fn merged(self, overrides: &UncertaintyOverrides) -> Self {
        Self {
            mass_kg_plus_minus: overrides
                .mass_kg_plus_minus
                .unwrap_or(self.mass_kg_plus_minus),
            grade_pct_plus_minus: overrides
                .grade_pct_plus_minus
                .unwrap_or(self.grade_pct_plus_minus),
            eta_plus_minus: overrides.eta_plus_minus.unwrap_or(self.eta_plus_minus),
            rho_rel_plus_minus: overrides
                .rho_rel_plus_minus
                .unwrap_or(self.rho_rel_plus_minus),
            crr_rel_plus_minus: overrides
                .crr_rel_plus_minus
                .unwrap_or(self.crr_rel_plus_minus),
            cda_rel_plus_minus: overrides
                .cda_rel_plus_minus
                .unwrap_or(self.cda_rel_plus_minus),
        }
    }
}

/// Partial uncertainty configuration supplied by a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UncertaintyOverrides {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub mass_kg_plus_minus: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub grade_pct_plus_minus: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub eta_plus_minus: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub rho_rel_plus_minus: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub crr_rel_plus_minus: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub cda_rel_plus_minus: Option<f64>,
}

impl UncertaintyOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Every set margin, paired with its field name.
    pub fn iter_set(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        [
            ("mass_kg_plus_minus", self.mass_kg_plus_minus),
            ("grade_pct_plus_minus", self.grade_pct_plus_minus),
            ("eta_plus_minus", self.eta_plus_minus),
            ("rho_rel_plus_minus", self.rho_rel_plus_minus),
            ("crr_rel_plus_minus", self.crr_rel_plus_minus),
            ("cda_rel_plus_minus", self.cda_rel_plus_minus),
        ]
        .into_iter()
        .filter_map(|(name, v)| v.map(|v| (name, v)))
    }
}

/// One combination of perturbed values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub mass_kg: f64,
    pub grade_pct: f64,
    pub cda: f64,
    pub eta: f64,
    pub rho: f64,
    pub crr: f64,
}

impl Corner {
    /// The base input with this corner's six values substituted.
    pub fn apply(&self, base: &EstimatorInput) -> EstimatorInput {
        EstimatorInput {
            mass_kg: self.mass_kg,
            grade_pct: Some(self.grade_pct),
            cda: self.cda,
            eta: self.eta,
            rho: Some(self.rho),
            crr: self.crr,
            ..*base
        }
    }
}

/// The two extremes of every perturbed quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerturbationBox {
    pub masses: [f64; 2],
    pub grades: [f64; 2],
    pub cdas: [f64; 2],
    pub etas: [f64; 2],
    pub rhos: [f64; 2],
    pub crrs: [f64; 2],
    /// Which branch produced `cdas`
    pub cda_source: CdaBoundsSource,
}

/// Number of corners in a box: two extremes in each of six dimensions.
pub const CORNER_COUNT: usize = 64;

impl PerturbationBox {
    pub fn new(base: &EstimatorInput, opts: &RangeOptions) -> Self {
        let u = UncertaintyConfig::default().merged(&opts.uncertainty);

        let grade = base.grade_pct();
        let rho = base.rho();

        let (cdas, cda_source) = match supplied_cda_bounds(opts.cda_min, opts.cda_max) {
            Some(bounds) => (bounds, CdaBoundsSource::Supplied),
            None => (
                relative_pair(base.cda, u.cda_rel_plus_minus),
                CdaBoundsSource::RelativeFallback,
            ),
        };

        Self {
            masses: absolute_pair(base.mass_kg, u.mass_kg_plus_minus),
            grades: absolute_pair(grade, u.grade_pct_plus_minus),
            cdas,
            etas: [
                clamp_eta(base.eta - u.eta_plus_minus),
                clamp_eta(base.eta + u.eta_plus_minus),
            ],
            rhos: relative_pair(rho, u.rho_rel_plus_minus),
            crrs: relative_pair(base.crr, u.crr_rel_plus_minus),
            cda_source,
        }
    }

    /// Full Cartesian product of the extremes, mass outermost, crr innermost.
    pub fn corners(&self) -> impl Iterator<Item = Corner> + '_ {
        iproduct!(
            self.masses,
            self.grades,
            self.cdas,
            self.etas,
            self.rhos,
            self.crrs
        )
        .map(|(mass_kg, grade_pct, cda, eta, rho, crr)| Corner {
            mass_kg,
            grade_pct,
            cda,
            eta,
            rho,
            crr,
        })
    }
}

fn absolute_pair(center: f64, margin: f64) -> [f64; 2] {
    [center - margin, center + margin]
}

fn relative_pair(center: f64, rel: f64) -> [f64; 2] {
    [center * (1.0 - rel), center * (1.0 + rel)]
}

/// Externally supplied CdA bounds win only when both are finite and > 0.
fn supplied_cda_bounds(min: Option<f64>, max: Option<f64>) -> Option<[f64; 2]> {
    match (min, max) {
        (Some(lo), Some(hi)) if lo.is_finite() && hi.is_finite() && lo > 0.0 && hi > 0.0 => {
            Some([lo, hi])
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> EstimatorInput {
        EstimatorInput::new(1400.0, 100.0, 200.0, 10.0, 350.0, 0.68, 0.015, 0.86)
    }

    #[test]
    fn default_margins() {
        let u = UncertaintyConfig::default();
        assert_eq!(u.mass_kg_plus_minus, 20.0);
        assert_eq!(u.grade_pct_plus_minus, 0.2);
        assert_eq!(u.eta_plus_minus, 0.03);
        assert_eq!(u.rho_rel_plus_minus, 0.04);
        assert_eq!(u.crr_rel_plus_minus, 0.10);
        assert_eq!(u.cda_rel_plus_minus, 0.10);
    }

    #[test]
    fn merge_only_touches_set_fields() {
        let overrides = UncertaintyOverrides {
            mass_kg_plus_minus: Some(5.0),
            cda_rel_plus_minus: Some(0.0),
            ..Default::default()
        };
        let u = UncertaintyConfig::default().merged(&overrides);
        assert_eq!(u.mass_kg_plus_minus, 5.0);
        assert_eq!(u.cda_rel_plus_minus, 0.0);
        assert_eq!(u.grade_pct_plus_minus, 0.2);
        assert_eq!(u.rho_rel_plus_minus, 0.04);
        assert_eq!(overrides.iter_set().count(), 2);
        assert!(!overrides.is_empty());
        assert!(UncertaintyOverrides::default().is_empty());
    }

    #[test]
    fn box_extremes_from_defaults() {
        let b = PerturbationBox::new(&base(), &RangeOptions::default());
        assert_eq!(b.masses, [1380.0, 1420.0]);
        assert_eq!(b.grades, [-0.2, 0.2]);
        assert_eq!(b.etas, [0.86 - 0.03, 0.86 + 0.03]);
        assert_eq!(b.rhos, [1.20 * 0.96, 1.20 * 1.04]);
        assert_eq!(b.crrs, [0.015 * 0.9, 0.015 * 1.1]);
        assert_eq!(b.cdas, [0.68 * 0.9, 0.68 * 1.1]);
        assert_eq!(b.cda_source, CdaBoundsSource::RelativeFallback);
    }

    #[test]
    fn eta_extremes_are_clamped() {
        let mut input = base();
        input.eta = 0.97;
        let b = PerturbationBox::new(&input, &RangeOptions::default());
        assert_eq!(b.etas[1], 0.98);

        input.eta = 0.51;
        let b = PerturbationBox::new(&input, &RangeOptions::default());
        assert_eq!(b.etas[0], 0.5);
    }

    #[test]
    fn supplied_cda_bounds_override_fallback() {
        let opts = RangeOptions::with_cda_bounds(0.60, 0.75);
        let b = PerturbationBox::new(&base(), &opts);
        assert_eq!(b.cdas, [0.60, 0.75]);
        assert_eq!(b.cda_source, CdaBoundsSource::Supplied);
    }

    #[test]
    fn partial_or_invalid_cda_bounds_fall_back() {
        for (min, max) in [
            (Some(0.6), None),
            (None, Some(0.7)),
            (Some(0.0), Some(0.7)),
            (Some(0.6), Some(-0.7)),
            (Some(f64::NAN), Some(0.7)),
            (Some(0.6), Some(f64::INFINITY)),
        ] {
            let opts = RangeOptions {
                cda_min: min,
                cda_max: max,
                ..Default::default()
            };
            let b = PerturbationBox::new(&base(), &opts);
            assert_eq!(b.cda_source, CdaBoundsSource::RelativeFallback);
        }
    }

    #[test]
    fn sixty_four_distinct_corners() {
        let b = PerturbationBox::new(&base(), &RangeOptions::default());
        let corners: Vec<Corner> = b.corners().collect();
        assert_eq!(corners.len(), CORNER_COUNT);
        for (i, a) in corners.iter().enumerate() {
            for c in &corners[i + 1..] {
                assert_ne!(a, c);
            }
        }
    }

    #[test]
    fn corner_keeps_unperturbed_fields() {
        let input = base().with_grade_pct(1.0);
        let b = PerturbationBox::new(&input, &RangeOptions::default());
        let corner = b.corners().next().unwrap();
        let applied = corner.apply(&input);
        assert_eq!(applied.v1_kmh, input.v1_kmh);
        assert_eq!(applied.v2_kmh, input.v2_kmh);
        assert_eq!(applied.time_s, input.time_s);
        assert_eq!(applied.distance_m, input.distance_m);
        assert_eq!(applied.mass_kg, 1380.0);
        assert_eq!(applied.grade_pct, Some(0.8));
    }
}
