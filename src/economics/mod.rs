//! Crop economics
//!
//! Cost, income and return-on-investment estimates for a planting decision,
//! computed from the compiled-in tables in [`tables`].

pub mod calculator;
pub mod localized;
pub mod tables;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use calculator::{
    calculate, sanitize_area, CostLine, EconomicInputs, EconomicReport, Verdict,
    MIN_AREA_HECTARES,
};
pub use localized::{Figure, LocalizedReport};
pub use tables::CostItem;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EconomicsError {
    #[error("crop name is empty")]
    EmptyCrop,

    #[error("area must be a positive number of hectares, got {0}")]
    InvalidArea(f64),

    #[error("unknown season '{0}'")]
    UnknownSeason(String),

    #[error("unknown irrigation method '{0}'")]
    UnknownIrrigation(String),
}

/// Crops with tabled market data. Anything else is carried as
/// [`Crop::Other`] and priced with the table defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Crop {
    Cotton,
    Soybean,
    Rice,
    Wheat,
    Sugarcane,
    Sorghum,
    Maize,
    Chickpea,
    Grapes,
    Pomegranate,
    Other(String),
}

impl Crop {
    pub const LISTED: [Crop; 10] = [
        Crop::Cotton,
        Crop::Soybean,
        Crop::Rice,
        Crop::Wheat,
        Crop::Sugarcane,
        Crop::Sorghum,
        Crop::Maize,
        Crop::Chickpea,
        Crop::Grapes,
        Crop::Pomegranate,
    ];

    pub fn name(&self) -> &str {
        match self {
            Crop::Cotton => "Cotton",
            Crop::Soybean => "Soybean",
            Crop::Rice => "Rice",
            Crop::Wheat => "Wheat",
            Crop::Sugarcane => "Sugarcane",
            Crop::Sorghum => "Sorghum",
            Crop::Maize => "Maize",
            Crop::Chickpea => "Chickpea",
            Crop::Grapes => "Grapes",
            Crop::Pomegranate => "Pomegranate",
            Crop::Other(name) => name,
        }
    }

    pub fn is_listed(&self) -> bool {
        !matches!(self, Crop::Other(_))
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive; only a blank name is an error.
impl FromStr for Crop {
    type Err = EconomicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(EconomicsError::EmptyCrop);
        }
        Ok(Crop::LISTED
            .into_iter()
            .find(|crop| crop.name().eq_ignore_ascii_case(name))
            .unwrap_or_else(|| Crop::Other(name.to_string())))
    }
}

impl Serialize for Crop {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Crop {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IrrigationMethod {
    Rainfed,
    Flood,
    Sprinkler,
    Drip,
}

impl IrrigationMethod {
    pub const ALL: [IrrigationMethod; 4] = [
        IrrigationMethod::Rainfed,
        IrrigationMethod::Flood,
        IrrigationMethod::Sprinkler,
        IrrigationMethod::Drip,
    ];

    pub fn label_key(self) -> &'static str {
        match self {
            IrrigationMethod::Rainfed => "irrigation.rainfed",
            IrrigationMethod::Flood => "irrigation.flood",
            IrrigationMethod::Sprinkler => "irrigation.sprinkler",
            IrrigationMethod::Drip => "irrigation.drip",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            IrrigationMethod::Rainfed => "rainfed",
            IrrigationMethod::Flood => "flood",
            IrrigationMethod::Sprinkler => "sprinkler",
            IrrigationMethod::Drip => "drip",
        }
    }
}

impl fmt::Display for IrrigationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for IrrigationMethod {
    type Err = EconomicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        IrrigationMethod::ALL
            .into_iter()
            .find(|method| method.slug() == normalized)
            .ok_or_else(|| EconomicsError::UnknownIrrigation(s.to_string()))
    }
}
