//! Static economics lookup tables
//!
//! Market rates, expected yields and per-hectare input costs for the crops
//! offered on the economic-analysis page, plus season and irrigation
//! multipliers. All figures are averages for Maharashtra mandis.
//!
//! Units:
//! - market rate: ₹ per quintal
//! - expected yield: quintal per hectare
//! - input costs: ₹ per hectare

use crate::seasons::Season;

use super::{Crop, IrrigationMethod};

/// Yield used for crops missing from [`CROP_TABLE`].
pub const DEFAULT_YIELD: f64 = 25.0;

/// Market rate used for crops missing from [`CROP_TABLE`].
pub const DEFAULT_RATE: f64 = 3000.0;

/// A crop row: rate and yield
#[derive(Debug, Clone, Copy)]
pub struct CropEconomics {
    pub crop: &'static str,
    pub market_rate: f64,
    pub expected_yield: f64,
}

pub static CROP_TABLE: &[CropEconomics] = &[
    CropEconomics { crop: "Cotton", market_rate: 6500.0, expected_yield: 18.0 },
    CropEconomics { crop: "Soybean", market_rate: 4200.0, expected_yield: 25.0 },
    CropEconomics { crop: "Rice", market_rate: 3500.0, expected_yield: 40.0 },
    CropEconomics { crop: "Wheat", market_rate: 2500.0, expected_yield: 35.0 },
    CropEconomics { crop: "Sugarcane", market_rate: 300.0, expected_yield: 800.0 },
    CropEconomics { crop: "Sorghum", market_rate: 3000.0, expected_yield: 30.0 },
    CropEconomics { crop: "Maize", market_rate: 2200.0, expected_yield: 45.0 },
    CropEconomics { crop: "Chickpea", market_rate: 5500.0, expected_yield: 20.0 },
    CropEconomics { crop: "Grapes", market_rate: 8000.0, expected_yield: 200.0 },
    CropEconomics { crop: "Pomegranate", market_rate: 9000.0, expected_yield: 150.0 },
];

/// Input cost categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CostItem {
    Seeds,
    Fertilizer,
    Labor,
    Irrigation,
    Pesticides,
}

impl CostItem {
    /// Translation key of the cost label.
    pub fn label_key(self) -> &'static str {
        match self {
            CostItem::Seeds => "economic.seeds",
            CostItem::Fertilizer => "economic.fertilizer",
            CostItem::Labor => "economic.labor",
            CostItem::Irrigation => "economic.irrigation",
            CostItem::Pesticides => "economic.pesticides",
        }
    }
}

/// Per-hectare input costs, in display order.
pub static INPUT_COSTS: &[(CostItem, f64)] = &[
    (CostItem::Seeds, 3000.0),
    (CostItem::Fertilizer, 1400.0),
    (CostItem::Labor, 15000.0),
    (CostItem::Irrigation, 8000.0),
    (CostItem::Pesticides, 5000.0),
];

/// Sum of [`INPUT_COSTS`]: ₹32,400 per hectare.
pub fn base_cost_per_hectare() -> f64 {
    INPUT_COSTS.iter().map(|(_, cost)| cost).sum()
}

/// Market rate and expected yield for `crop`, with table defaults for
/// crops the table does not list.
pub fn crop_economics(crop: &Crop) -> (f64, f64) {
    CROP_TABLE
        .iter()
        .find(|row| row.crop == crop.name())
        .map(|row| (row.market_rate, row.expected_yield))
        .unwrap_or((DEFAULT_RATE, DEFAULT_YIELD))
}

// ============================================================================
// MULTIPLIERS
// ============================================================================

/// Yield multiplier by sowing season. Kharif is the reference season.
pub fn season_yield_multiplier(season: Season) -> f64 {
    match season {
        Season::Monsoon => 1.0,
        Season::PostMonsoon => 0.95,
        Season::Winter => 0.9,
        Season::Summer => 0.8,
    }
}

/// Yield multiplier by irrigation method. Flood irrigation is the reference.
pub fn irrigation_yield_multiplier(method: IrrigationMethod) -> f64 {
    match method {
        IrrigationMethod::Rainfed => 0.85,
        IrrigationMethod::Flood => 1.0,
        IrrigationMethod::Sprinkler => 1.05,
        IrrigationMethod::Drip => 1.15,
    }
}

/// Multiplier on the irrigation cost line. Rainfed fields carry no
/// irrigation cost.
pub fn irrigation_cost_multiplier(method: IrrigationMethod) -> f64 {
    match method {
        IrrigationMethod::Rainfed => 0.0,
        IrrigationMethod::Flood => 1.0,
        IrrigationMethod::Sprinkler => 0.8,
        IrrigationMethod::Drip => 0.65,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_cost() {
        assert_eq!(base_cost_per_hectare(), 32_400.0);
    }

    #[test]
    fn test_every_listed_crop_has_a_row() {
        for crop in Crop::LISTED {
            assert!(
                CROP_TABLE.iter().any(|row| row.crop == crop.name()),
                "{crop} missing from table"
            );
        }
    }

    #[test]
    fn test_unknown_crop_defaults() {
        let (rate, yield_q) = crop_economics(&Crop::Other("Millet".into()));
        assert_eq!(rate, DEFAULT_RATE);
        assert_eq!(yield_q, DEFAULT_YIELD);
        assert_eq!(crop_economics(&Crop::Rice), (3500.0, 40.0));
    }
}
