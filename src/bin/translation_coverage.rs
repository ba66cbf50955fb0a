// Translation coverage report
//
// Purpose: Show how much of the English dictionary each language translates,
// and fail when any dictionary defines keys English lacks.
// Usage: cargo run --bin translation_coverage [LOCALES_DIR]

use agri_advisor::i18n::DictionaryStore;
use agri_advisor::AppConfig;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agri_advisor=info,warn".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let locales_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or(config.locales_dir);

    let mut store = DictionaryStore::embedded()?;
    if let Some(dir) = &locales_dir {
        store = store.with_overrides_dir(dir)?;
    }

    let report = store.coverage_report(config.default_language);

    println!("\n=== TRANSLATION COVERAGE ===\n");
    println!(
        "Default language: {} ({} keys)\n",
        report.default_language, report.total_keys
    );
    println!("{:<6} {:>8} {:>8} {:>8} {:>9}", "lang", "present", "missing", "orphans", "coverage");
    println!("{}", "-".repeat(43));
    for coverage in &report.languages {
        println!(
            "{:<6} {:>8} {:>8} {:>8} {:>8.1}%",
            coverage.language.code(),
            coverage.present,
            coverage.missing.len(),
            coverage.orphans.len(),
            coverage.coverage_percent
        );
    }

    if report.has_orphans() {
        println!("\n=== ORPHAN KEYS (not in {}) ===\n", report.default_language);
        for coverage in report.languages.iter().filter(|c| !c.orphans.is_empty()) {
            for key in &coverage.orphans {
                println!("  [{}] {}", coverage.language, key);
            }
        }
        anyhow::bail!(
            "dictionaries define keys missing from the '{}' dictionary",
            report.default_language
        );
    }

    println!("\n✓ Every key resolves through the {} dictionary", report.default_language);
    Ok(())
}
