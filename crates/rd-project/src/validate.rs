//! Run file validation logic.
//!
//! Checks structure and finiteness only. Physical consistency (positive
//! mass, increasing speed) is the estimator's call and surfaces from there.

use crate::schema::{EnvironmentDef, RunDef, RunFile, VehicleDef};
use rd_vehicles::BodyType;

/// Newest run file version this build reads.
pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing value: {field} ({reason})")]
    Missing { field: String, reason: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_run_file(file: &RunFile) -> Result<(), ValidationError> {
    if file.version == 0 || file.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: file.version,
        });
    }

    if file.name.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "name".to_string(),
            reason: "run name must not be empty".to_string(),
        });
    }

    validate_vehicle(&file.vehicle)?;
    validate_run(&file.run)?;
    validate_environment(&file.environment)?;

    for (name, margin) in file.uncertainty.iter_set() {
        if !margin.is_finite() || margin < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: format!("uncertainty.{}", name),
                value: margin.to_string(),
                reason: "must be non-negative and finite".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_vehicle(vehicle: &VehicleDef) -> Result<(), ValidationError> {
    if vehicle.profile.is_some() && (vehicle.make.is_none() || vehicle.model.is_none()) {
        return Err(ValidationError::Missing {
            field: "vehicle.make / vehicle.model".to_string(),
            reason: "a profile is selected within a make and model".to_string(),
        });
    }

    if let Some(cda) = vehicle.cda_m2 {
        ensure_positive(cda, "vehicle.cda_m2")?;
    }

    if vehicle.body_type == BodyType::Custom
        && vehicle.cda_m2.is_none()
        && vehicle.profile.is_none()
    {
        return Err(ValidationError::Missing {
            field: "vehicle.cda_m2".to_string(),
            reason: "body_type 'custom' has no default drag area".to_string(),
        });
    }

    if let Some(eta) = vehicle.eta {
        ensure_positive(eta, "vehicle.eta")?;
    }

    Ok(())
}

fn validate_run(run: &RunDef) -> Result<(), ValidationError> {
    ensure_finite(run.mass_kg, "run.mass_kg")?;
    ensure_finite(run.v1_kmh, "run.v1_kmh")?;
    ensure_finite(run.v2_kmh, "run.v2_kmh")?;
    ensure_finite(run.time_s, "run.time_s")?;
    ensure_finite(run.distance_m, "run.distance_m")?;
    if let Some(grade) = run.grade_pct {
        ensure_finite(grade, "run.grade_pct")?;
    }
    Ok(())
}

fn validate_environment(env: &EnvironmentDef) -> Result<(), ValidationError> {
    if let Some(rho) = env.rho {
        ensure_positive(rho, "environment.rho")?;
    }
    if let Some(crr) = env.crr
        && (!crr.is_finite() || crr < 0.0)
    {
        return Err(ValidationError::InvalidValue {
            field: "environment.crr".to_string(),
            value: crr.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }
    Ok(())
}

fn ensure_finite(value: f64, field: &str) -> Result<(), ValidationError> {
    rd_core::ensure_finite(value, "run value").map_err(|_| ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: "must be finite".to_string(),
    })?;
    Ok(())
}

fn ensure_positive(value: f64, field: &str) -> Result<(), ValidationError> {
    rd_core::ensure_positive(value, "run value").map_err(|_| ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: "must be positive and finite".to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_estimator::UncertaintyOverrides;

    fn minimal() -> RunFile {
        RunFile {
            version: 1,
            name: "pull".to_string(),
            vehicle: VehicleDef::default(),
            run: RunDef {
                mass_kg: 1400.0,
                v1_kmh: 100.0,
                v2_kmh: 200.0,
                time_s: 10.0,
                distance_m: 350.0,
                grade_pct: None,
            },
            environment: EnvironmentDef::default(),
            uncertainty: UncertaintyOverrides::default(),
        }
    }

    #[test]
    fn minimal_file_validates() {
        validate_run_file(&minimal()).unwrap();
    }

    #[test]
    fn rejects_future_version() {
        let mut file = minimal();
        file.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_run_file(&file),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn rejects_blank_name() {
        let mut file = minimal();
        file.name = "  ".to_string();
        assert!(matches!(
            validate_run_file(&file),
            Err(ValidationError::Missing { .. })
        ));
    }

    #[test]
    fn custom_body_needs_cda() {
        let mut file = minimal();
        file.vehicle.body_type = BodyType::Custom;
        let err = validate_run_file(&file).unwrap_err();
        assert!(err.to_string().contains("cda_m2"));

        file.vehicle.cda_m2 = Some(0.7);
        validate_run_file(&file).unwrap();
    }

    #[test]
    fn profile_needs_make_and_model() {
        let mut file = minimal();
        file.vehicle.profile = Some("Mk7 · 2013-2020 · GTI".to_string());
        file.vehicle.make = Some("VOLKSWAGEN".to_string());
        assert!(validate_run_file(&file).is_err());

        file.vehicle.model = Some("Golf".to_string());
        validate_run_file(&file).unwrap();
    }

    #[test]
    fn rejects_non_finite_run_values() {
        let mut file = minimal();
        file.run.time_s = f64::NAN;
        let err = validate_run_file(&file).unwrap_err();
        assert!(err.to_string().contains("run.time_s"));
    }

    #[test]
    fn non_positive_physics_is_left_to_the_estimator() {
        let mut file = minimal();
        file.run.mass_kg = 0.0;
        file.run.v2_kmh = 50.0;
        validate_run_file(&file).unwrap();
    }

    #[test]
    fn rejects_negative_margin() {
        let mut file = minimal();
        file.uncertainty.eta_plus_minus = Some(-0.01);
        let err = validate_run_file(&file).unwrap_err();
        assert!(err.to_string().contains("uncertainty.eta_plus_minus"));
    }

    #[test]
    fn rejects_bad_environment() {
        let mut file = minimal();
        file.environment.rho = Some(0.0);
        assert!(validate_run_file(&file).is_err());

        let mut file = minimal();
        file.environment.crr = Some(-0.01);
        assert!(validate_run_file(&file).is_err());
    }
}
