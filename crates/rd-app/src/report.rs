//! Display-ready estimate reports.

use rd_estimator::{CdaBoundsSource, EstimatorInput, EstimatorResult, RangeResult};
use rd_project::CdaOrigin;
use serde::Serialize;
use uom::si::power::kilowatt;

/// Provenance of the drag area used for a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CdaSummary {
    pub value_m2: f64,
    /// "profile", "manual" or "body_type"
    pub origin: &'static str,
    /// Profile key or body type label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub range_source: CdaBoundsSource,
}

impl CdaSummary {
    pub fn new(value_m2: f64, origin: &CdaOrigin, range_source: CdaBoundsSource) -> Self {
        let (origin, detail, source, notes) = match origin {
            CdaOrigin::Profile {
                key,
                source_name,
                notes,
            } => ("profile", Some(key.clone()), source_name.clone(), notes.clone()),
            CdaOrigin::Manual => ("manual", None, None, None),
            CdaOrigin::BodyType(body) => ("body_type", Some(body.label().to_string()), None, None),
        };
        Self {
            value_m2,
            origin,
            detail,
            source,
            notes,
            range_source,
        }
    }
}

/// Point estimate and worst-case range for one run, in W, kW and hp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateReport {
    pub name: String,
    pub input: EstimatorInput,
    pub point: EstimatorResult,
    pub range: RangeResult,
    pub wheel_hp: f64,
    pub engine_hp: f64,
    pub wheel_kw: f64,
    pub engine_kw: f64,
    pub engine_hp_range: (f64, f64),
    pub wheel_hp_range: (f64, f64),
    pub cda: CdaSummary,
}

impl EstimateReport {
    pub fn new(
        name: impl Into<String>,
        input: EstimatorInput,
        point: EstimatorResult,
        range: RangeResult,
        cda: CdaSummary,
    ) -> Self {
        Self {
            name: name.into(),
            input,
            point,
            range,
            wheel_hp: point.wheel_hp(),
            engine_hp: point.engine_hp(),
            wheel_kw: point.wheel_power().get::<kilowatt>(),
            engine_kw: point.engine_power().get::<kilowatt>(),
            engine_hp_range: range.engine_hp(),
            wheel_hp_range: range.wheel_hp(),
            cda,
        }
    }
}
