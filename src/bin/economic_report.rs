// Economic report CLI
//
// Purpose: Print a localized cost/income/ROI report for one crop
// Usage: cargo run --bin economic_report -- <crop> <area> [season] [irrigation] [lang]
//   e.g. economic_report Rice 2 kharif drip hi
// A given [lang] is saved to LANGUAGE_PREFS; later runs without one reuse it.

use agri_advisor::economics::{calculate, sanitize_area, Crop, EconomicInputs};
use agri_advisor::i18n::Params;
use agri_advisor::{AppConfig, LanguageCode};
use anyhow::Context;

const USAGE: &str = "usage: economic_report <crop> <area> [season] [irrigation] [lang]";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agri_advisor=info,warn".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        anyhow::bail!(USAGE);
    }

    let crop: Crop = args[0].parse()?;
    let mut inputs = EconomicInputs::new(crop, sanitize_area(&args[1]));
    // "-" skips an optional positional argument
    let optional = |i: usize| args.get(i).map(String::as_str).filter(|s| *s != "-");
    if let Some(season) = optional(2) {
        inputs = inputs.with_season(season.parse()?);
    }
    if let Some(method) = optional(3) {
        inputs = inputs.with_irrigation(method.parse()?);
    }
    let ctx = config.translation_context()?;
    if let Some(code) = optional(4) {
        let language = LanguageCode::parse(code)
            .with_context(|| format!("unsupported language '{}'", code))?;
        ctx.change_language(language.code())?;
    }
    let language = ctx.language();
    let resolver = ctx.resolver();

    let report = calculate(&inputs)?;
    let localized = report.localize(resolver, language);

    println!("\n=== {}: {} ===\n", localized.title, localized.crop);
    for figure in &localized.assumptions {
        println!("  {:<24} {}", figure.label, figure.value);
    }

    println!(
        "\n--- {} ---",
        resolver.resolve(language, "economic.inputCosts", &Params::new())
    );
    for figure in &localized.costs {
        println!("  {:<24} {:>16}", figure.label, figure.value);
    }

    println!();
    for figure in &localized.summary {
        println!("  {:<24} {:>16}", figure.label, figure.value);
    }

    println!("\n{}", localized.verdict_text);
    println!("{}", localized.note);
    Ok(())
}
