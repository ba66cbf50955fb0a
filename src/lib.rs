//! Agricultural advisor core
//!
//! Localization and planning logic behind the farmer-facing advisory pages:
//! - `i18n/`: key-based translation across eight Indian languages, with
//!   English fallback, `{name}` interpolation, plurals, date/number display
//! - `economics/`: cost, income and ROI estimates per crop and field
//! - `seasons`: cropping-season calendar
//! - `config`: environment configuration
//! - `api_server` (feature `api`): JSON HTTP surface over the above

pub mod config;
pub mod economics;
pub mod i18n;
pub mod seasons;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use config::{AppConfig, ConfigError};
pub use economics::{calculate, Crop, EconomicInputs, EconomicReport, EconomicsError, IrrigationMethod};
pub use i18n::{LanguageCode, Params, Resolver, TranslationContext};
pub use seasons::{season_calendar, Season, SeasonPlan};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
