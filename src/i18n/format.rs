//! Locale-aware date and number formatting
//!
//! The language code doubles as the locale. Dates go through chrono's
//! localized strftime tables (`unstable-locales`); numbers use Western
//! three-digit grouping for English and Indian lakh/crore grouping for the
//! Indian languages, with native digits where that is the locale default
//! (Marathi, Bengali).
//!
//! The `try_*` functions report failures; callers that must always display
//! something go through [`Resolver::format_date`](super::Resolver::format_date)
//! and [`Resolver::format_number`](super::Resolver::format_number), which
//! degrade to the input's text form.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::language::LanguageCode;

/// Largest fraction-digit count accepted by the number formatter.
pub const MAX_FRACTION_DIGITS: u8 = 20;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    #[error("'{0}' is not a recognizable date")]
    NotADate(String),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{0} cannot be formatted")]
    NonFinite(f64),

    #[error("invalid fraction digits: minimum {min}, maximum {max}")]
    FractionDigits { min: u8, max: u8 },

    #[error("invalid currency code '{0}'")]
    InvalidCurrency(String),

    #[error("invalid date pattern '{0}'")]
    Pattern(String),
}

fn chrono_locale(language: LanguageCode) -> Locale {
    match language {
        LanguageCode::En => Locale::en_US,
        LanguageCode::Hi => Locale::hi_IN,
        LanguageCode::Mr => Locale::mr_IN,
        LanguageCode::Kn => Locale::kn_IN,
        LanguageCode::Ta => Locale::ta_IN,
        LanguageCode::Te => Locale::te_IN,
        LanguageCode::Bn => Locale::bn_IN,
        LanguageCode::Gu => Locale::gu_IN,
    }
}

// ============================================================================
// Dates
// ============================================================================

/// Anything a caller may hand to the date formatter.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// RFC 3339, `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`.
    Text(String),
}

impl DateInput {
    /// Coerce to a UTC timestamp.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, FormatError> {
        match self {
            DateInput::DateTime(dt) => Ok(*dt),
            DateInput::Date(d) => midnight(*d).ok_or_else(|| FormatError::NotADate(d.to_string())),
            DateInput::EpochMillis(ms) => Utc
                .timestamp_millis_opt(*ms)
                .single()
                .ok_or_else(|| FormatError::NotADate(ms.to_string())),
            DateInput::Text(raw) => parse_date_text(raw.trim())
                .ok_or_else(|| FormatError::NotADate(raw.clone())),
        }
    }
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

fn parse_date_text(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&ndt));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().and_then(midnight)
}

impl fmt::Display for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateInput::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
            DateInput::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            DateInput::EpochMillis(ms) => write!(f, "{ms}"),
            DateInput::Text(raw) => f.write_str(raw),
        }
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::DateTime(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<i64> for DateInput {
    fn from(value: i64) -> Self {
        DateInput::EpochMillis(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    Short,
    Medium,
    Long,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStyle {
    Short,
    Medium,
}

/// Date formatting request. Timestamps are rendered in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatOptions {
    pub date_style: Option<DateStyle>,
    pub time_style: Option<TimeStyle>,
    /// Raw strftime pattern; overrides both styles when set.
    pub pattern: Option<String>,
}

impl Default for DateFormatOptions {
    fn default() -> Self {
        Self {
            date_style: Some(DateStyle::Medium),
            time_style: None,
            pattern: None,
        }
    }
}

impl DateFormatOptions {
    pub fn date(style: DateStyle) -> Self {
        Self {
            date_style: Some(style),
            ..Self::default()
        }
    }

    pub fn with_time(mut self, style: TimeStyle) -> Self {
        self.time_style = Some(style);
        self
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            date_style: None,
            time_style: None,
            pattern: Some(pattern.into()),
        }
    }
}

fn date_pattern(language: LanguageCode, style: DateStyle) -> &'static str {
    match (language, style) {
        (LanguageCode::En, DateStyle::Short) => "%-m/%-d/%y",
        (LanguageCode::En, DateStyle::Medium) => "%b %-d, %Y",
        (LanguageCode::En, DateStyle::Long) => "%B %-d, %Y",
        (LanguageCode::En, DateStyle::Full) => "%A, %B %-d, %Y",
        (_, DateStyle::Short) => "%-d/%-m/%y",
        (_, DateStyle::Medium) => "%-d %b %Y",
        (_, DateStyle::Long) => "%-d %B %Y",
        (_, DateStyle::Full) => "%A, %-d %B %Y",
    }
}

fn time_pattern(style: TimeStyle) -> &'static str {
    match style {
        TimeStyle::Short => "%-I:%M %p",
        TimeStyle::Medium => "%-I:%M:%S %p",
    }
}

pub fn try_format_date(
    language: LanguageCode,
    value: &DateInput,
    options: &DateFormatOptions,
) -> Result<String, FormatError> {
    let datetime = value.to_datetime()?;

    let pattern = match &options.pattern {
        Some(p) => p.clone(),
        None => {
            let date = options.date_style.map(|s| date_pattern(language, s));
            let time = options.time_style.map(time_pattern);
            match (date, time) {
                (Some(d), Some(t)) => format!("{d}, {t}"),
                (Some(d), None) => d.to_string(),
                (None, Some(t)) => t.to_string(),
                (None, None) => date_pattern(language, DateStyle::Short).to_string(),
            }
        }
    };

    let mut out = String::new();
    write!(
        out,
        "{}",
        datetime.format_localized(&pattern, chrono_locale(language))
    )
    .map_err(|_| FormatError::Pattern(pattern.clone()))?;
    Ok(out)
}

// ============================================================================
// Numbers
// ============================================================================

/// Anything a caller may hand to the number formatter.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberInput {
    Float(f64),
    Int(i64),
    Text(String),
}

impl NumberInput {
    pub fn to_f64(&self) -> Result<f64, FormatError> {
        match self {
            NumberInput::Float(v) => Ok(*v),
            NumberInput::Int(v) => Ok(*v as f64),
            NumberInput::Text(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| FormatError::NotANumber(raw.clone())),
        }
    }
}

impl fmt::Display for NumberInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberInput::Float(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "Infinity" } else { "-Infinity" })
            }
            NumberInput::Float(v) => write!(f, "{v}"),
            NumberInput::Int(v) => write!(f, "{v}"),
            NumberInput::Text(raw) => f.write_str(raw),
        }
    }
}

impl From<f64> for NumberInput {
    fn from(value: f64) -> Self {
        NumberInput::Float(value)
    }
}

impl From<i64> for NumberInput {
    fn from(value: i64) -> Self {
        NumberInput::Int(value)
    }
}

impl From<&str> for NumberInput {
    fn from(value: &str) -> Self {
        NumberInput::Text(value.to_string())
    }
}

impl From<String> for NumberInput {
    fn from(value: String) -> Self {
        NumberInput::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberStyle {
    Decimal,
    /// Value multiplied by 100 with a `%` suffix.
    Percent,
    /// ISO 4217 code, e.g. `"INR"`.
    Currency(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormatOptions {
    pub style: NumberStyle,
    pub minimum_fraction_digits: Option<u8>,
    pub maximum_fraction_digits: Option<u8>,
    pub use_grouping: bool,
}

impl Default for NumberFormatOptions {
    fn default() -> Self {
        Self {
            style: NumberStyle::Decimal,
            minimum_fraction_digits: None,
            maximum_fraction_digits: None,
            use_grouping: true,
        }
    }
}

impl NumberFormatOptions {
    pub fn percent() -> Self {
        Self {
            style: NumberStyle::Percent,
            ..Self::default()
        }
    }

    pub fn currency(code: impl Into<String>) -> Self {
        Self {
            style: NumberStyle::Currency(code.into()),
            ..Self::default()
        }
    }

    /// Exactly `digits` fraction digits.
    pub fn fixed(mut self, digits: u8) -> Self {
        self.minimum_fraction_digits = Some(digits);
        self.maximum_fraction_digits = Some(digits);
        self
    }

    pub fn without_grouping(mut self) -> Self {
        self.use_grouping = false;
        self
    }

    fn fraction_digits(&self) -> Result<(u8, u8), FormatError> {
        let (default_min, default_max) = match self.style {
            NumberStyle::Decimal => (0, 3),
            NumberStyle::Percent => (0, 0),
            NumberStyle::Currency(_) => (2, 2),
        };

        let (min, max) = match (self.minimum_fraction_digits, self.maximum_fraction_digits) {
            (Some(min), Some(max)) => (min, max),
            (Some(min), None) => (min, default_max.max(min)),
            (None, Some(max)) => (default_min.min(max), max),
            (None, None) => (default_min, default_max),
        };

        if min > max || max > MAX_FRACTION_DIGITS {
            return Err(FormatError::FractionDigits { min, max });
        }
        Ok((min, max))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grouping {
    Western, // 1,234,567
    Indian,  // 12,34,567
}

fn grouping(language: LanguageCode) -> Grouping {
    match language {
        LanguageCode::En => Grouping::Western,
        _ => Grouping::Indian,
    }
}

/// Code point of the native zero, for locales whose default numbering
/// system is not Latin.
fn native_zero(language: LanguageCode) -> Option<u32> {
    match language {
        LanguageCode::Mr => Some(0x0966), // Devanagari
        LanguageCode::Bn => Some(0x09E6), // Bengali
        _ => None,
    }
}

fn currency_symbol(code: &str) -> Result<String, FormatError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FormatError::InvalidCurrency(code.to_string()));
    }
    let code = code.to_ascii_uppercase();
    let symbol = match code.as_str() {
        "INR" => "₹".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        _ => format!("{code}\u{a0}"),
    };
    Ok(symbol)
}

fn group_digits(int: &str, grouping: Grouping) -> String {
    if int.len() <= 3 {
        return int.to_string();
    }
    let (head, tail) = int.split_at(int.len() - 3);
    let size = match grouping {
        Grouping::Western => 3,
        Grouping::Indian => 2,
    };

    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(size);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

fn localize_digits(text: &str, language: LanguageCode) -> String {
    match native_zero(language) {
        Some(zero) => text
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) => char::from_u32(zero + d).unwrap_or(c),
                None => c,
            })
            .collect(),
        None => text.to_string(),
    }
}

pub fn try_format_number(
    language: LanguageCode,
    value: &NumberInput,
    options: &NumberFormatOptions,
) -> Result<String, FormatError> {
    let mut number = value.to_f64()?;
    if !number.is_finite() {
        return Err(FormatError::NonFinite(number));
    }

    let (min, max) = options.fraction_digits()?;
    let symbol = match &options.style {
        NumberStyle::Currency(code) => Some(currency_symbol(code)?),
        _ => None,
    };
    if options.style == NumberStyle::Percent {
        number *= 100.0;
    }

    let factor = 10f64.powi(i32::from(max));
    let scaled = number.abs() * factor;
    if !scaled.is_finite() {
        return Err(FormatError::NonFinite(number));
    }
    let rounded = scaled.round() / factor;
    let negative = number < 0.0 && rounded != 0.0;

    let fixed = format!("{:.*}", usize::from(max), rounded);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (fixed.as_str(), ""),
    };

    let mut frac = frac_part.to_string();
    while frac.len() > usize::from(min) && frac.ends_with('0') {
        frac.pop();
    }

    let mut body = if options.use_grouping {
        group_digits(int_part, grouping(language))
    } else {
        int_part.to_string()
    };
    if !frac.is_empty() {
        body.push('.');
        body.push_str(&frac);
    }
    let body = localize_digits(&body, language);

    let sign = if negative { "-" } else { "" };
    Ok(match (&options.style, symbol) {
        (NumberStyle::Percent, _) => format!("{sign}{body}%"),
        (_, Some(symbol)) => format!("{sign}{symbol}{body}"),
        _ => format!("{sign}{body}"),
    })
}
