//! Economic analysis for one crop on one field.
//!
//! ```text
//! total_cost   = Σ per-hectare costs × area
//! gross_income = yield × market rate × area
//! net_income   = gross_income − total_cost
//! roi          = net_income / total_cost × 100
//! ```
//!
//! Season and irrigation method scale the yield (and irrigation the
//! irrigation cost line). Leaving both unset reproduces the plain formula.

use serde::{Deserialize, Serialize};

use crate::seasons::Season;

use super::tables::{self, CostItem};
use super::{Crop, EconomicsError, IrrigationMethod};

/// Smallest field the calculator accepts from form input.
pub const MIN_AREA_HECTARES: f64 = 0.1;

/// Area from a free-text form field.
///
/// Reads the leading number and ignores whatever follows it, so `"12abc"`
/// and `"3.5 ha"` are accepted. Input with no leading number, zero or a
/// non-finite value becomes 1 ha; the result is never below
/// [`MIN_AREA_HECTARES`].
pub fn sanitize_area(raw: &str) -> f64 {
    let area = match numeric_prefix(raw.trim_start()).parse::<f64>() {
        Ok(value) if value.is_finite() && value != 0.0 => value,
        _ => 1.0,
    };
    area.max(MIN_AREA_HECTARES)
}

/// Longest prefix of `text` shaped like `[+-]digits[.digits][e[+-]digits]`.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes
            .get(start..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    &text[..end]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicInputs {
    pub crop: Crop,
    pub area_hectares: f64,
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub irrigation: Option<IrrigationMethod>,
}

impl EconomicInputs {
    pub fn new(crop: Crop, area_hectares: f64) -> Self {
        Self {
            crop,
            area_hectares,
            season: None,
            irrigation: None,
        }
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_irrigation(mut self, irrigation: IrrigationMethod) -> Self {
        self.irrigation = Some(irrigation);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Profitable,
    ConsiderAlternatives,
}

impl Verdict {
    pub fn key(self) -> &'static str {
        match self {
            Verdict::Profitable => "economic.profitableVenture",
            Verdict::ConsiderAlternatives => "economic.considerAlternatives",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostLine {
    pub item: CostItem,
    pub key: &'static str,
    pub per_hectare: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicReport {
    pub crop: Crop,
    pub area_hectares: f64,
    pub season: Option<Season>,
    pub irrigation: Option<IrrigationMethod>,
    /// ₹ per quintal
    pub market_rate: f64,
    /// Quintal per hectare after season and irrigation adjustment
    pub expected_yield: f64,
    pub costs: Vec<CostLine>,
    pub cost_per_hectare: f64,
    pub total_cost: f64,
    pub gross_income: f64,
    pub net_income: f64,
    pub roi_percent: f64,
    pub verdict: Verdict,
}

impl EconomicReport {
    pub fn is_profitable(&self) -> bool {
        self.verdict == Verdict::Profitable
    }
}

pub fn calculate(inputs: &EconomicInputs) -> Result<EconomicReport, EconomicsError> {
    if inputs.crop.name().trim().is_empty() {
        return Err(EconomicsError::EmptyCrop);
    }
    let area = inputs.area_hectares;
    if !area.is_finite() || area <= 0.0 {
        return Err(EconomicsError::InvalidArea(area));
    }

    let (market_rate, base_yield) = tables::crop_economics(&inputs.crop);
    if !inputs.crop.is_listed() {
        tracing::debug!(
            "No market data for '{}', using default rate and yield",
            inputs.crop
        );
    }

    let season_factor = inputs.season.map_or(1.0, tables::season_yield_multiplier);
    let irrigation_factor = inputs
        .irrigation
        .map_or(1.0, tables::irrigation_yield_multiplier);
    let irrigation_cost_factor = inputs
        .irrigation
        .map_or(1.0, tables::irrigation_cost_multiplier);
    let expected_yield = base_yield * season_factor * irrigation_factor;

    let costs: Vec<CostLine> = tables::INPUT_COSTS
        .iter()
        .map(|&(item, base)| {
            let per_hectare = match item {
                CostItem::Irrigation => base * irrigation_cost_factor,
                _ => base,
            };
            CostLine {
                item,
                key: item.label_key(),
                per_hectare,
                total: per_hectare * area,
            }
        })
        .collect();

    let cost_per_hectare: f64 = costs.iter().map(|line| line.per_hectare).sum();
    let total_cost = cost_per_hectare * area;
    let gross_income = expected_yield * market_rate * area;
    let net_income = gross_income - total_cost;
    let roi_percent = net_income / total_cost * 100.0;

    let verdict = if net_income > 0.0 {
        Verdict::Profitable
    } else {
        Verdict::ConsiderAlternatives
    };

    Ok(EconomicReport {
        crop: inputs.crop.clone(),
        area_hectares: area,
        season: inputs.season,
        irrigation: inputs.irrigation,
        market_rate,
        expected_yield,
        costs,
        cost_per_hectare,
        total_cost,
        gross_income,
        net_income,
        roi_percent,
        verdict,
    })
}
