use rd_estimator::UncertaintyOverrides;
use rd_project::schema::*;
use rd_project::{load_json, load_yaml, save_json, save_yaml, validate_run_file};
use rd_vehicles::{BodyType, Drivetrain};

fn full_run_file() -> RunFile {
    RunFile {
        version: 1,
        name: "Golf GTI 100-200".to_string(),
        vehicle: VehicleDef {
            make: Some("VOLKSWAGEN".to_string()),
            model: Some("Golf".to_string()),
            profile: Some("Mk7 · 2013-2020 · GTI".to_string()),
            body_type: BodyType::Hatch,
            drivetrain: Drivetrain::FwdRwd,
            cda_m2: None,
            eta: Some(0.88),
        },
        run: RunDef {
            mass_kg: 1480.0,
            v1_kmh: 100.0,
            v2_kmh: 200.0,
            time_s: 14.2,
            distance_m: 590.0,
            grade_pct: Some(0.3),
        },
        environment: EnvironmentDef {
            rho: Some(1.18),
            crr: None,
        },
        uncertainty: UncertaintyOverrides {
            mass_kg_plus_minus: Some(10.0),
            ..Default::default()
        },
    }
}

#[test]
fn roundtrip_yaml() {
    let file = full_run_file();
    validate_run_file(&file).unwrap();

    let path = std::env::temp_dir().join("rd_project_roundtrip.yaml");
    save_yaml(&path, &file).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(file, loaded);
}

#[test]
fn roundtrip_json() {
    let file = full_run_file();

    let path = std::env::temp_dir().join("rd_project_roundtrip.json");
    save_json(&path, &file).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(file, loaded);
}

#[test]
fn optional_sections_default() {
    let yaml = r#"
version: 1
name: minimal
run:
  mass_kg: 1200
  v1_kmh: 50
  v2_kmh: 100
  time_s: 5
  distance_m: 105
"#;
    let file: RunFile = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(file.vehicle, VehicleDef::default());
    assert_eq!(file.environment, EnvironmentDef::default());
    assert!(file.uncertainty.is_empty());
    assert_eq!(file.run.grade_pct, None);
    validate_run_file(&file).unwrap();
}

#[test]
fn empty_uncertainty_is_not_written() {
    let mut file = full_run_file();
    file.uncertainty = UncertaintyOverrides::default();
    let yaml = serde_yaml::to_string(&file).unwrap();
    assert!(!yaml.contains("uncertainty"));
}

#[test]
fn save_refuses_invalid_file() {
    let mut file = full_run_file();
    file.version = 99;
    let path = std::env::temp_dir().join("rd_project_invalid.yaml");
    assert!(save_yaml(&path, &file).is_err());
}
