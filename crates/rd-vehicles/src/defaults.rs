//! Fallback vehicle parameters when nothing better is known.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use rd_estimator::DEFAULT_RHO;

/// Rolling resistance coefficient for road tyres on asphalt.
pub const DEFAULT_CRR: f64 = 0.015;

/// Drivetrain layout, used to pick a default efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Drivetrain {
    /// Front or rear wheel drive
    #[default]
    FwdRwd,
    /// All wheel drive
    Awd,
}

impl Drivetrain {
    pub const ALL: [Drivetrain; 2] = [Drivetrain::FwdRwd, Drivetrain::Awd];

    pub fn default_eta(&self) -> f64 {
        match self {
            Drivetrain::FwdRwd => 0.86,
            Drivetrain::Awd => 0.80,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Drivetrain::FwdRwd => "fwd_rwd",
            Drivetrain::Awd => "awd",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Drivetrain::FwdRwd => "FWD / RWD",
            Drivetrain::Awd => "AWD",
        }
    }
}

impl fmt::Display for Drivetrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Drivetrain {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "FWD_RWD" | "FWD" | "RWD" | "2WD" => Ok(Drivetrain::FwdRwd),
            "AWD" | "4WD" | "4X4" => Ok(Drivetrain::Awd),
            _ => Err(CatalogError::UnknownDrivetrain(s.to_string())),
        }
    }
}

/// Body style, used to pick a default drag area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    /// Hatchback / compact
    #[default]
    Hatch,
    /// Sedan / coupe
    Sedan,
    /// SUV / crossover
    Suv,
    /// CdA entered by hand, no default
    Custom,
}

impl BodyType {
    pub const ALL: [BodyType; 4] = [
        BodyType::Hatch,
        BodyType::Sedan,
        BodyType::Suv,
        BodyType::Custom,
    ];

    /// Typical drag area (m²); `None` for [`BodyType::Custom`].
    pub fn default_cda(&self) -> Option<f64> {
        match self {
            BodyType::Hatch => Some(0.68),
            BodyType::Sedan => Some(0.60),
            BodyType::Suv => Some(0.82),
            BodyType::Custom => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            BodyType::Hatch => "hatch",
            BodyType::Sedan => "sedan",
            BodyType::Suv => "suv",
            BodyType::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BodyType::Hatch => "Hatch / compact",
            BodyType::Sedan => "Sedan / coupe",
            BodyType::Suv => "SUV / crossover",
            BodyType::Custom => "Manual CdA",
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for BodyType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HATCH" | "HATCHBACK" | "COMPACT" => Ok(BodyType::Hatch),
            "SEDAN" | "SALOON" | "COUPE" => Ok(BodyType::Sedan),
            "SUV" | "CROSSOVER" => Ok(BodyType::Suv),
            "CUSTOM" | "MANUAL" => Ok(BodyType::Custom),
            _ => Err(CatalogError::UnknownBodyType(s.to_string())),
        }
    }
}
