//! Display-ready economic report in one language.

use serde::Serialize;

use crate::i18n::{LanguageCode, NumberFormatOptions, Params, Resolver};

use super::calculator::{EconomicReport, Verdict};

/// One labelled figure, e.g. `"Total Cost"` / `"₹64,800.00"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub key: &'static str,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedReport {
    pub language: LanguageCode,
    pub title: String,
    pub crop: String,
    pub summary: Vec<Figure>,
    pub costs: Vec<Figure>,
    pub assumptions: Vec<Figure>,
    pub verdict: Verdict,
    pub verdict_text: String,
    pub note: String,
}

impl EconomicReport {
    /// Render every label and figure in `language`. Money is shown in INR.
    pub fn localize(&self, resolver: &Resolver, language: LanguageCode) -> LocalizedReport {
        let none = Params::new();
        let t = |key: &str| resolver.resolve(language, key, &none);
        let money = |value: f64| {
            resolver.format_number(language, value, &NumberFormatOptions::currency("INR"))
        };
        let number = |value: f64| {
            resolver.format_number(language, value, &NumberFormatOptions::default())
        };
        let figure = |key: &'static str, value: String| Figure {
            key,
            label: t(key),
            value,
        };

        let roi = resolver.format_number(
            language,
            self.roi_percent / 100.0,
            &NumberFormatOptions::percent().fixed(1),
        );

        let summary = vec![
            figure("economic.totalCost", money(self.total_cost)),
            figure("economic.grossIncome", money(self.gross_income)),
            figure("economic.netProfit", money(self.net_income)),
            figure("economic.returnOnInvestment", roi),
        ];

        let costs = self
            .costs
            .iter()
            .map(|line| figure(line.key, money(line.total)))
            .collect();

        let mut assumptions = vec![
            figure(
                "economic.expectedYield",
                format!(
                    "{} {}",
                    number(self.expected_yield),
                    t("economic.quintalPerHectare")
                ),
            ),
            figure(
                "economic.marketRate",
                format!("{}/{}", money(self.market_rate), t("economic.quintal")),
            ),
            figure(
                "economic.cultivationArea",
                format!("{} {}", number(self.area_hectares), t("economic.hectares")),
            ),
        ];
        if let Some(season) = self.season {
            assumptions.push(figure("economic.season", t(season.name_key())));
        }
        if let Some(irrigation) = self.irrigation {
            assumptions.push(figure("economic.irrigationMethod", t(irrigation.label_key())));
        }

        LocalizedReport {
            language,
            title: t("economic.title"),
            crop: self.crop.to_string(),
            summary,
            costs,
            assumptions,
            verdict: self.verdict,
            verdict_text: t(self.verdict.key()),
            note: t("economic.note"),
        }
    }
}
