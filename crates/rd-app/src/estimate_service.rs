//! Point estimate and range for resolved runs, run files, and manual inputs.

use std::path::Path;

use rd_estimator::{RangeOptions, estimate_power, estimate_range};
use rd_project::{EnvironmentDef, ResolvedRun, RunDef, RunFile, VehicleDef, resolve};
use rd_vehicles::{BodyType, Drivetrain, ProfileCatalog};

use crate::catalog_service::load_catalog;
use crate::error::{AppError, AppResult};
use crate::run_service::load_run;
use crate::report::{CdaSummary, EstimateReport};

/// Inputs for a one-off estimate without a run file.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualRequest {
    pub mass_kg: f64,
    pub v1_kmh: f64,
    pub v2_kmh: f64,
    pub time_s: f64,
    pub distance_m: f64,
    pub grade_pct: Option<f64>,
    pub rho: Option<f64>,
    pub crr: Option<f64>,
    /// Manual drag area; takes precedence over `body_type`
    pub cda_m2: Option<f64>,
    pub body_type: BodyType,
    pub drivetrain: Drivetrain,
    pub eta: Option<f64>,
    pub cda_bounds: Option<(f64, f64)>,
}

impl ManualRequest {
    pub fn new(mass_kg: f64, v1_kmh: f64, v2_kmh: f64, time_s: f64, distance_m: f64) -> Self {
        Self {
            mass_kg,
            v1_kmh,
            v2_kmh,
            time_s,
            distance_m,
            grade_pct: None,
            rho: None,
            crr: None,
            cda_m2: None,
            body_type: BodyType::default(),
            drivetrain: Drivetrain::default(),
            eta: None,
            cda_bounds: None,
        }
    }

    /// The same values as a run file, so flags go through run-file validation.
    pub fn to_run_file(&self) -> RunFile {
        RunFile {
            version: rd_project::LATEST_VERSION,
            name: "manual".to_string(),
            vehicle: VehicleDef {
                body_type: self.body_type,
                drivetrain: self.drivetrain,
                cda_m2: self.cda_m2,
                eta: self.eta,
                ..Default::default()
            },
            run: RunDef {
                mass_kg: self.mass_kg,
                v1_kmh: self.v1_kmh,
                v2_kmh: self.v2_kmh,
                time_s: self.time_s,
                distance_m: self.distance_m,
                grade_pct: self.grade_pct,
            },
            environment: EnvironmentDef {
                rho: self.rho,
                crr: self.crr,
            },
            uncertainty: Default::default(),
        }
    }
}

/// Run the point estimate and the worst-case range for a resolved run.
pub fn estimate(resolved: &ResolvedRun) -> AppResult<EstimateReport> {
    let point = estimate_power(&resolved.input)?;
    let range = estimate_range(&resolved.input, &resolved.range_options)?;

    tracing::info!(
        name = %resolved.name,
        engine_w = point.engine_power_w,
        min_engine_w = range.min_engine_w,
        max_engine_w = range.max_engine_w,
        "estimate complete"
    );

    let cda = CdaSummary::new(resolved.input.cda, &resolved.cda_origin, range.cda_source);
    Ok(EstimateReport::new(
        resolved.name.clone(),
        resolved.input,
        point,
        range,
        cda,
    ))
}

/// Resolve an in-memory run file against an optional catalog and estimate it.
pub fn estimate_run(file: &RunFile, catalog: Option<&ProfileCatalog>) -> AppResult<EstimateReport> {
    rd_project::validate_run_file(file)?;
    let resolved = resolve(file, catalog)?;
    estimate(&resolved)
}

/// Load a run file (and catalog, if given) from disk and estimate it.
pub fn run_file(path: &Path, catalog_path: Option<&Path>) -> AppResult<EstimateReport> {
    let file = load_run(path)?;
    let catalog = catalog_path.map(load_catalog).transpose()?;
    estimate_run(&file, catalog.as_ref())
}

/// Estimate from flags. Manual CdA wins over the body-type default.
pub fn estimate_manual(req: &ManualRequest) -> AppResult<EstimateReport> {
    let file = req.to_run_file();
    rd_project::validate_run_file(&file)?;
    let mut resolved = resolve(&file, None)?;

    if let Some((min, max)) = req.cda_bounds {
        for (name, v) in [("min", min), ("max", max)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(AppError::InvalidInput(format!(
                    "CdA bound {name} must be positive and finite, got {v}"
                )));
            }
        }
        if min > max {
            return Err(AppError::InvalidInput(format!(
                "CdA bounds out of order: min {min} > max {max}"
            )));
        }
        resolved.range_options = RangeOptions::with_cda_bounds(min, max);
    }

    estimate(&resolved)
}
