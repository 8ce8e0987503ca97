//! End-to-end estimation from a pre-filled guide cache and a snapshot file.

use profcost_core::catalog::MarketSnapshot;
use profcost_core::config::Profession;
use profcost_core::model::{Dialect, MissingPricePolicy};
use profcost_estimator::{
    CachedGuideFetcher, EstimateError, GuideError, estimate_all, estimate_guides, load_guides,
    rank,
};
use std::time::Duration;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "realm": "Stormrage",
  "items": [
    { "name": "Copper Bar", "market": 1000 },
    { "name": "Rough Stone", "market": 200 },
    { "name": "Peacebloom", "market": 50 },
    { "name": "Silverleaf", "market": 80 },
    { "name": "Linen Cloth", "market": 300 }
  ]
}"#;

const BLACKSMITHING: &str = r#"<ul class="circle white">
<li>1-25: 30 x [Rough Stone]</li>
<li>25-50: 10 x [Copper Bar] or 60 x [Rough Stone]</li>
<li>50-75: 5 x [Bronze Bar]</li>
</ul>"#;

const INSCRIPTION: &str = r#"<ul class="circle white">
<li>1-18: 2.5 stacks of any of the following: [Peacebloom] [Silverleaf]</li>
</ul>"#;

const TAILORING: &str = "40 x [Linen Cloth]\n[Linen Cloth]\n";

fn professions() -> Vec<Profession> {
    vec![
        Profession::new("Blacksmithing", "http://127.0.0.1:9/bs", Dialect::Generic),
        Profession::new("Inscription", "http://127.0.0.1:9/ins", Dialect::StackCount),
        Profession::new("Tailoring", "http://127.0.0.1:9/tail", Dialect::Generic),
    ]
}

fn setup() -> (TempDir, CachedGuideFetcher, MarketSnapshot) {
    let tmp = TempDir::new().unwrap();
    let cache = tmp.path().join("cache");
    std::fs::create_dir_all(&cache).unwrap();
    std::fs::write(cache.join("Blacksmithing.html"), BLACKSMITHING).unwrap();
    std::fs::write(cache.join("Inscription.html"), INSCRIPTION).unwrap();
    std::fs::write(cache.join("Tailoring.html"), TAILORING).unwrap();

    let snapshot_path = tmp.path().join("stormrage.json");
    std::fs::write(&snapshot_path, SNAPSHOT).unwrap();
    let snapshot = MarketSnapshot::load(&snapshot_path).unwrap();

    let fetcher = CachedGuideFetcher::new(cache, Duration::from_secs(1), true);
    (tmp, fetcher, snapshot)
}

#[test]
fn test_full_run_from_cache() {
    let (_tmp, fetcher, snapshot) = setup();
    let results = estimate_all(
        &professions(),
        &fetcher,
        &snapshot,
        MissingPricePolicy::ZeroCost,
    )
    .unwrap();

    let bs = &results[0];
    // Steps: [6000], [10000, 12000], [0 (missing)].
    assert_eq!(bs.low, 6000 + 10000);
    assert_eq!(bs.high, 6000 + 12000);
    assert_eq!(bs.median, 6000 + 11000);
    assert_eq!(bs.average, 17000);
    assert_eq!(bs.not_found, vec!["Bronze Bar"]);

    let ins = &results[1];
    // 2.5 stacks = 50 of each: 2500 or 4000.
    assert_eq!((ins.low, ins.high, ins.median), (2500, 4000, 3250));

    let tail = &results[2];
    assert_eq!((tail.low, tail.high), (12300, 12300));

    let ranked = rank(results);
    let order: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(order, vec!["Inscription", "Tailoring", "Blacksmithing"]);
}

#[test]
fn test_exclude_policy_end_to_end() {
    let (_tmp, fetcher, snapshot) = setup();
    let guides = load_guides(&professions()[..1], &fetcher, |_| {}).unwrap();
    let results =
        estimate_guides(&guides, &snapshot, MissingPricePolicy::ExcludeAlternative).unwrap();
    // The unpriced step is dropped instead of priced at zero; totals match.
    assert_eq!(results[0].low, 16000);
    assert_eq!(results[0].not_found, vec!["Bronze Bar"]);
}

#[test]
fn test_guides_are_reused_across_snapshots() {
    let (_tmp, fetcher, snapshot) = setup();
    let guides = load_guides(&professions(), &fetcher, |_| {}).unwrap();

    let cheap: MarketSnapshot = [
        ("Copper Bar", 1),
        ("Rough Stone", 1),
        ("Bronze Bar", 1),
        ("Peacebloom", 1),
        ("Silverleaf", 1),
        ("Linen Cloth", 1),
    ]
    .into_iter()
    .collect();

    let first = estimate_guides(&guides, &snapshot, MissingPricePolicy::ZeroCost).unwrap();
    let second = estimate_guides(&guides, &cheap, MissingPricePolicy::ZeroCost).unwrap();
    assert!(second[0].average < first[0].average);
    assert!(second[0].not_found.is_empty());
}

#[test]
fn test_missing_cache_entry_offline_fails_run() {
    let (tmp, fetcher, snapshot) = setup();
    std::fs::remove_file(tmp.path().join("cache").join("Inscription.html")).unwrap();

    let err = estimate_all(
        &professions(),
        &fetcher,
        &snapshot,
        MissingPricePolicy::ZeroCost,
    )
    .unwrap_err();
    match err {
        EstimateError::Guide { profession, source } => {
            assert_eq!(profession, "Inscription");
            assert!(matches!(source, GuideError::NotCached { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}
