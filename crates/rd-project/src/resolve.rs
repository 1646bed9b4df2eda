//! Turn a run file into a fully specified estimator input.
//!
//! Drag area precedence: selected catalog profile, then manual `cda_m2`,
//! then the body-type default. CdA bounds for the range sweep come from the
//! selected profile only.

use crate::schema::RunFile;
use rd_estimator::{EstimatorInput, RangeOptions};
use rd_vehicles::{BodyType, DEFAULT_CRR, DEFAULT_RHO, ProfileCatalog, VehicleProfile};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Profile '{key}' selected for {make} {model} but no catalog was provided")]
    CatalogRequired {
        make: String,
        model: String,
        key: String,
    },

    #[error("Profile not found: {make} {model} '{key}'")]
    ProfileNotFound {
        make: String,
        model: String,
        key: String,
    },

    #[error("No drag area available for body type '{0}'")]
    MissingCda(BodyType),
}

/// Where the resolved drag area came from.
#[derive(Debug, Clone, PartialEq)]
pub enum CdaOrigin {
    /// A catalog profile
    Profile {
        key: String,
        source_name: Option<String>,
        notes: Option<String>,
    },
    /// `vehicle.cda_m2`
    Manual,
    /// Default for the body type
    BodyType(BodyType),
}

/// Everything the estimator needs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRun {
    pub name: String,
    pub input: EstimatorInput,
    pub range_options: RangeOptions,
    pub cda_origin: CdaOrigin,
}

pub fn resolve(file: &RunFile, catalog: Option<&ProfileCatalog>) -> Result<ResolvedRun, ResolveError> {
    let vehicle = &file.vehicle;
    let profile = select_profile(file, catalog)?;

    let (cda, cda_origin) = match (profile, vehicle.cda_m2) {
        (Some(p), _) => (
            p.cda.value,
            CdaOrigin::Profile {
                key: p.key(),
                source_name: p.source.as_ref().map(|s| s.name.clone()),
                notes: p.notes.clone(),
            },
        ),
        (None, Some(manual)) => (manual, CdaOrigin::Manual),
        (None, None) => {
            let cda = vehicle
                .body_type
                .default_cda()
                .ok_or(ResolveError::MissingCda(vehicle.body_type))?;
            (cda, CdaOrigin::BodyType(vehicle.body_type))
        }
    };

    let eta = vehicle.eta.unwrap_or_else(|| vehicle.drivetrain.default_eta());
    let rho = file.environment.rho.unwrap_or(DEFAULT_RHO);
    let crr = file.environment.crr.unwrap_or(DEFAULT_CRR);

    let mut input = EstimatorInput::new(
        file.run.mass_kg,
        file.run.v1_kmh,
        file.run.v2_kmh,
        file.run.time_s,
        file.run.distance_m,
        cda,
        crr,
        eta,
    )
    .with_rho(rho);
    if let Some(grade) = file.run.grade_pct {
        input = input.with_grade_pct(grade);
    }

    let range_options = RangeOptions {
        cda_min: profile.and_then(|p| p.cda.min),
        cda_max: profile.and_then(|p| p.cda.max),
        uncertainty: file.uncertainty,
    };

    tracing::debug!(run = %file.name, cda, eta, rho, crr, origin = ?cda_origin, "resolved run");

    Ok(ResolvedRun {
        name: file.name.clone(),
        input,
        range_options,
        cda_origin,
    })
}

fn select_profile<'a>(
    file: &RunFile,
    catalog: Option<&'a ProfileCatalog>,
) -> Result<Option<&'a VehicleProfile>, ResolveError> {
    let vehicle = &file.vehicle;
    let (Some(key), Some(make), Some(model)) = (&vehicle.profile, &vehicle.make, &vehicle.model)
    else {
        return Ok(None);
    };

    let Some(catalog) = catalog else {
        return Err(ResolveError::CatalogRequired {
            make: make.clone(),
            model: model.clone(),
            key: key.clone(),
        });
    };

    catalog
        .find_by_key(make, model, key)
        .map(Some)
        .ok_or_else(|| ResolveError::ProfileNotFound {
            make: make.clone(),
            model: model.clone(),
            key: key.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnvironmentDef, RunDef, VehicleDef};
    use rd_estimator::UncertaintyOverrides;
    use rd_vehicles::{CdaEstimate, Drivetrain, ProfileSource};

    fn run_file(vehicle: VehicleDef) -> RunFile {
        RunFile {
            version: 1,
            name: "pull".to_string(),
            vehicle,
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

    fn catalog() -> ProfileCatalog {
        ProfileCatalog::new(vec![VehicleProfile {
            make: "VOLKSWAGEN".into(),
            model: "Golf".into(),
            series: "Mk7".into(),
            year_from: 2013,
            year_to: 2020,
            variant: "GTI".into(),
            cda: CdaEstimate {
                value: 0.66,
                min: Some(0.63),
                max: Some(0.69),
            },
            source: Some(ProfileSource {
                name: "Manufacturer".into(),
                url: None,
            }),
            notes: None,
        }])
        .unwrap()
    }

    fn gti() -> VehicleDef {
        VehicleDef {
            make: Some("VOLKSWAGEN".into()),
            model: Some("Golf".into()),
            profile: Some("Mk7 · 2013-2020 · GTI".into()),
            ..Default::default()
        }
    }

    #[test]
    fn body_type_defaults() {
        let resolved = resolve(&run_file(VehicleDef::default()), None).unwrap();
        assert_eq!(resolved.input.cda, 0.68);
        assert_eq!(resolved.input.eta, 0.86);
        assert_eq!(resolved.input.rho, Some(1.20));
        assert_eq!(resolved.input.crr, 0.015);
        assert_eq!(resolved.input.grade_pct, None);
        assert_eq!(resolved.cda_origin, CdaOrigin::BodyType(BodyType::Hatch));
        assert_eq!(resolved.range_options.cda_min, None);
    }

    #[test]
    fn awd_uses_lower_efficiency() {
        let vehicle = VehicleDef {
            drivetrain: Drivetrain::Awd,
            body_type: BodyType::Suv,
            ..Default::default()
        };
        let resolved = resolve(&run_file(vehicle), None).unwrap();
        assert_eq!(resolved.input.eta, 0.80);
        assert_eq!(resolved.input.cda, 0.82);
    }

    #[test]
    fn manual_cda_beats_body_type() {
        let vehicle = VehicleDef {
            body_type: BodyType::Sedan,
            cda_m2: Some(0.55),
            ..Default::default()
        };
        let resolved = resolve(&run_file(vehicle), None).unwrap();
        assert_eq!(resolved.input.cda, 0.55);
        assert_eq!(resolved.cda_origin, CdaOrigin::Manual);
    }

    #[test]
    fn profile_beats_manual_and_supplies_bounds() {
        let mut vehicle = gti();
        vehicle.cda_m2 = Some(0.9);
        let cat = catalog();
        let resolved = resolve(&run_file(vehicle), Some(&cat)).unwrap();
        assert_eq!(resolved.input.cda, 0.66);
        assert_eq!(resolved.range_options.cda_min, Some(0.63));
        assert_eq!(resolved.range_options.cda_max, Some(0.69));
        assert!(matches!(
            resolved.cda_origin,
            CdaOrigin::Profile { ref key, .. } if key == "Mk7 · 2013-2020 · GTI"
        ));
    }

    #[test]
    fn profile_without_catalog_is_an_error() {
        let err = resolve(&run_file(gti()), None).unwrap_err();
        assert!(matches!(err, ResolveError::CatalogRequired { .. }));
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let mut vehicle = gti();
        vehicle.profile = Some("Mk6 · 2008-2012 · GTI".into());
        let cat = catalog();
        let err = resolve(&run_file(vehicle), Some(&cat)).unwrap_err();
        assert!(matches!(err, ResolveError::ProfileNotFound { .. }));
    }

    #[test]
    fn custom_body_without_cda_is_an_error() {
        let vehicle = VehicleDef {
            body_type: BodyType::Custom,
            ..Default::default()
        };
        let err = resolve(&run_file(vehicle), None).unwrap_err();
        assert_eq!(err, ResolveError::MissingCda(BodyType::Custom));
    }

    #[test]
    fn environment_and_uncertainty_pass_through() {
        let mut file = run_file(VehicleDef::default());
        file.environment.rho = Some(1.1);
        file.environment.crr = Some(0.012);
        file.run.grade_pct = Some(1.5);
        file.uncertainty.mass_kg_plus_minus = Some(5.0);
        let resolved = resolve(&file, None).unwrap();
        assert_eq!(resolved.input.rho, Some(1.1));
        assert_eq!(resolved.input.crr, 0.012);
        assert_eq!(resolved.input.grade_pct, Some(1.5));
        assert_eq!(resolved.range_options.uncertainty.mass_kg_plus_minus, Some(5.0));
    }
}
