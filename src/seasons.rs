//! Seasonal crop calendar
//!
//! The four Indian cropping seasons with their months and recommended
//! crops, as shown on the weather-planning page. Names and month ranges are
//! translation keys so the calendar renders in any supported language.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::economics::EconomicsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Monsoon,     // Kharif, June - September
    PostMonsoon, // Rabi, October - November
    Winter,      // December - February
    Summer,      // Zaid, March - May
}

impl Season {
    pub const ALL: [Season; 4] = [
        Season::Monsoon,
        Season::PostMonsoon,
        Season::Winter,
        Season::Summer,
    ];

    pub fn name_key(self) -> &'static str {
        match self {
            Season::Monsoon => "weather.monsoon",
            Season::PostMonsoon => "weather.postMonsoon",
            Season::Winter => "weather.winter",
            Season::Summer => "weather.summer",
        }
    }

    pub fn months_key(self) -> &'static str {
        match self {
            Season::Monsoon => "weather.monthsJuneSept",
            Season::PostMonsoon => "weather.monthsOctNov",
            Season::Winter => "weather.monthsDecFeb",
            Season::Summer => "weather.monthsMarMay",
        }
    }

    pub fn recommended_crops(self) -> &'static [&'static str] {
        match self {
            Season::Monsoon => &["Rice", "Cotton", "Soybean", "Maize"],
            Season::PostMonsoon => &["Wheat", "Chickpea", "Sorghum"],
            Season::Winter => &["Wheat", "Gram", "Mustard"],
            Season::Summer => &["Groundnut", "Sunflower", "Vegetables"],
        }
    }

    pub fn plan(self) -> SeasonPlan {
        SeasonPlan {
            season: self,
            name_key: self.name_key(),
            months_key: self.months_key(),
            crops: self.recommended_crops(),
        }
    }

    /// Season containing `month` (1 = January).
    pub fn for_month(month: u32) -> Option<Season> {
        match month {
            6..=9 => Some(Season::Monsoon),
            10 | 11 => Some(Season::PostMonsoon),
            12 | 1 | 2 => Some(Season::Winter),
            3..=5 => Some(Season::Summer),
            _ => None,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Season::Monsoon => "monsoon",
            Season::PostMonsoon => "post_monsoon",
            Season::Winter => "winter",
            Season::Summer => "summer",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Accepts the snake_case name plus the traditional season names.
impl FromStr for Season {
    type Err = EconomicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "monsoon" | "kharif" => Ok(Season::Monsoon),
            "post_monsoon" | "postmonsoon" | "rabi" => Ok(Season::PostMonsoon),
            "winter" => Ok(Season::Winter),
            "summer" | "zaid" => Ok(Season::Summer),
            _ => Err(EconomicsError::UnknownSeason(s.to_string())),
        }
    }
}

/// One card of the season calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonPlan {
    pub season: Season,
    pub name_key: &'static str,
    pub months_key: &'static str,
    pub crops: &'static [&'static str],
}

/// All seasons in calendar order starting with the monsoon.
pub fn season_calendar() -> Vec<SeasonPlan> {
    Season::ALL.into_iter().map(Season::plan).collect()
}

/// Translation keys of the general planning tips.
pub fn planning_tip_keys() -> [&'static str; 4] {
    ["weather.tip1", "weather.tip2", "weather.tip3", "weather.tip4"]
}
