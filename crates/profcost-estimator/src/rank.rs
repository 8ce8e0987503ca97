//! Ordering of finished results.

use profcost_core::model::ProfessionResult;

/// Sort results by `average`, cheapest first. Equal averages keep their
/// input order.
pub fn rank(mut results: Vec<ProfessionResult>) -> Vec<ProfessionResult> {
    results.sort_by_key(|r| r.average);
    results
}
