//! Integration tests for profession-cost functionality.
//! Tests the underlying library functions that the CLI commands invoke.

use profcost_core::catalog::{MarketSnapshot, PriceCatalog};
use profcost_core::config::ProfCostConfig;
use profcost_core::model::MissingPricePolicy;
use profcost_estimator::{CachedGuideFetcher, GuideSource, estimate_guides, load_guides, rank};
use std::path::Path;
use std::time::Duration;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn project() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(
        &root.join(".profcost").join("config.toml"),
        r#"
[pricing]
missing_price = "zero"

[guides]
offline = true

[[professions]]
name = "Alchemy"
url = "http://127.0.0.1:9/alchemy"

[[professions]]
name = "Inscription"
url = "http://127.0.0.1:9/inscription"
dialect = "stack-count"
"#,
    );
    write(
        &root.join("cache").join("Alchemy.html"),
        r#"<ul class="circle white"><li>1-60: 20 x [Peacebloom]</li><li>60-70: [Mystery Herb]</li></ul>"#,
    );
    write(
        &root.join("cache").join("Inscription.html"),
        r#"<ul class="circle white"><li>1 stacks of the following: [Peacebloom] [Earthroot]</li></ul>"#,
    );
    write(
        &root.join("data").join("stormrage.xml"),
        r#"<?xml version="1.0" encoding="UTF-8"?>
<realm name="Stormrage">
  <item name="Peacebloom"><market>10000</market></item>
  <item name="Earthroot"><market>500</market></item>
</realm>"#,
    );
    tmp
}

#[test]
fn test_config_load_from_project() {
    let tmp = project();
    let config = ProfCostConfig::load(tmp.path()).unwrap();
    assert_eq!(config.professions.len(), 2);
    assert!(config.guides.offline);
    assert_eq!(config.pricing.missing_price, MissingPricePolicy::ZeroCost);
    assert_eq!(config.cache_dir(tmp.path()), tmp.path().join("cache"));
}

#[test]
fn test_default_pattern_selects_xml_exports() {
    let tmp = project();
    let config = ProfCostConfig::load(tmp.path()).unwrap();
    let matcher = globset::Glob::new(&config.data.pattern)
        .unwrap()
        .compile_matcher();
    assert!(matcher.is_match("stormrage.xml"));
    assert!(!matcher.is_match("stormrage.json"));

    let snapshot = MarketSnapshot::load(&config.data_dir(tmp.path()).join("stormrage.xml")).unwrap();
    assert_eq!(snapshot.realm(), "Stormrage");
    assert_eq!(snapshot.price_of("Earthroot"), Some(500));
}

#[test]
fn test_report_pipeline() {
    let tmp = project();
    let root = tmp.path();
    let config = ProfCostConfig::load(root).unwrap();
    let fetcher = CachedGuideFetcher::new(
        config.cache_dir(root),
        Duration::from_secs(config.guides.timeout_secs),
        config.guides.offline,
    );

    let guides = load_guides(&config.professions, &fetcher, |_| {}).unwrap();
    let snapshot = MarketSnapshot::load(&config.data_dir(root).join("stormrage.xml")).unwrap();
    let results = rank(estimate_guides(&guides, &snapshot, config.pricing.missing_price).unwrap());

    // Inscription: 20 each, 10000 vs 200000. Alchemy: 200000 + 0.
    assert_eq!(results[0].name, "Inscription");
    assert_eq!(results[0].low, 10_000);
    assert_eq!(results[0].high, 200_000);
    assert_eq!(results[0].average, 105_000);
    assert_eq!(results[1].name, "Alchemy");
    assert_eq!(results[1].average, 200_000);
    assert_eq!(results[1].not_found, vec!["Mystery Herb"]);
}

#[test]
fn test_offline_fetcher_serves_cache_only() {
    let tmp = project();
    let root = tmp.path();
    let config = ProfCostConfig::load(root).unwrap();
    let fetcher = CachedGuideFetcher::new(config.cache_dir(root), Duration::from_secs(1), true);

    let alchemy = config.profession("alchemy").unwrap();
    assert!(fetcher.is_cached(alchemy));
    assert!(fetcher.guide_text(alchemy).unwrap().contains("Peacebloom"));

    std::fs::remove_file(root.join("cache").join("Alchemy.html")).unwrap();
    assert!(fetcher.guide_text(alchemy).is_err());
}
