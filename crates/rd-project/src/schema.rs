//! Run file schema definitions.

use rd_estimator::UncertaintyOverrides;
use rd_vehicles::{BodyType, Drivetrain};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunFile {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub vehicle: VehicleDef,
    pub run: RunDef,
    #[serde(default)]
    pub environment: EnvironmentDef,
    #[serde(default, skip_serializing_if = "UncertaintyOverrides::is_empty")]
    pub uncertainty: UncertaintyOverrides,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VehicleDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Profile selection key within make/model, see `VehicleProfile::key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default)]
    pub body_type: BodyType,
    #[serde(default)]
    pub drivetrain: Drivetrain,
    /// Manually entered drag area (m²)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cda_m2: Option<f64>,
    /// Efficiency guess overriding the drivetrain default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunDef {
    pub mass_kg: f64,
    pub v1_kmh: f64,
    pub v2_kmh: f64,
    pub time_s: f64,
    pub distance_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentDef {
    /// Air density (kg/m³)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rho: Option<f64>,
    /// Rolling resistance coefficient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crr: Option<f64>,
}
