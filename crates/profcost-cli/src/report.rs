//! Console and JSON rendering of ranked results.

use profcost_core::model::ProfessionResult;
use serde::Serialize;
use std::path::Path;

const HEADERS: [&str; 5] = ["Profession", "Low", "High", "Median", "Average"];
const INDENT: &str = "  ";
const GAP: usize = 2;

/// Whole gold pieces, truncated: raw copper / 100 / 100.
pub fn gold(copper: u64) -> String {
    format!("{}g", copper / 100 / 100)
}

/// Aligned table of ranked results under a realm label.
pub fn render_table(label: &str, results: &[ProfessionResult]) -> String {
    let rows: Vec<[String; 5]> = results
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                gold(r.low),
                gold(r.high),
                gold(r.median),
                gold(r.average),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(label);
    out.push('\n');
    out.push_str(INDENT);
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + GAP * (widths.len() - 1)));
    out.push('\n');
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let mut line = String::from(INDENT);
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i + 1 == cells.len() {
            line.push_str(cell);
        } else {
            line.push_str(&format!("{:<w$}", cell, w = width + GAP));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Unpriced reagents per profession, or `None` when every reagent had a price.
pub fn render_missing(results: &[ProfessionResult]) -> Option<String> {
    let mut out = String::new();
    for result in results {
        let summary = result.missing_summary();
        if summary.is_empty() {
            continue;
        }
        let names: Vec<String> = summary
            .into_iter()
            .map(|(name, count)| {
                if count > 1 {
                    format!("{} (x{})", name, count)
                } else {
                    name.to_string()
                }
            })
            .collect();
        out.push_str(&format!("{}{}: {}\n", INDENT, result.name, names.join(", ")));
    }
    if out.is_empty() {
        None
    } else {
        Some(format!("{}Reagents without a market price:\n{}", INDENT, out))
    }
}

/// One snapshot's ranking, as written by `report --format json`.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub realm: &'a str,
    pub snapshot: String,
    pub results: &'a [ProfessionResult],
}

impl<'a> JsonReport<'a> {
    pub fn new(realm: &'a str, snapshot: &Path, results: &'a [ProfessionResult]) -> Self {
        Self {
            realm,
            snapshot: snapshot.display().to_string(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profcost_core::model::CostTotals;

    fn result(name: &str, low: u64, high: u64, median: u64, not_found: &[&str]) -> ProfessionResult {
        CostTotals {
            low,
            high,
            median,
            not_found: not_found.iter().map(|s| s.to_string()).collect(),
            steps: 1,
        }
        .finish(name)
    }

    #[test]
    fn test_gold_truncates() {
        assert_eq!(gold(0), "0g");
        assert_eq!(gold(9_999), "0g");
        assert_eq!(gold(10_000), "1g");
        assert_eq!(gold(1_234_567), "123g");
    }

    #[test]
    fn test_render_table() {
        let results = vec![
            result("Alchemy", 120_000, 250_000, 180_000, &[]),
            result("Blacksmithing", 1_500_000, 3_000_000, 2_000_000, &[]),
        ];
        let table = render_table("Stormrage", &results);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Stormrage");
        assert!(lines[1].trim().chars().all(|c| c == '-'));
        assert_eq!(lines[2], "  Profession     Low   High  Median  Average");
        assert_eq!(lines[3], "  Alchemy        12g   25g   18g     18g");
        assert_eq!(lines[4], "  Blacksmithing  150g  300g  200g    225g");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_render_missing() {
        let results = vec![
            result("Alchemy", 0, 0, 0, &[]),
            result("Enchanting", 0, 0, 0, &["Ghost", "Phantom", "Ghost"]),
        ];
        let text = render_missing(&results).unwrap();
        assert!(text.contains("Enchanting: Ghost (x2), Phantom"));
        assert!(!text.contains("Alchemy"));
        assert!(render_missing(&results[..1]).is_none());
    }

    #[test]
    fn test_json_report() {
        let results = vec![result("Alchemy", 2, 4, 3, &["Ghost"])];
        let report = JsonReport::new("Stormrage", Path::new("data/s.json"), &results);
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["realm"], "Stormrage");
        assert_eq!(json["results"][0]["average"], 3);
        assert_eq!(json["results"][0]["not_found"][0], "Ghost");
    }
}
