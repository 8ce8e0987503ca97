//! Pricing of a single guide step.

use profcost_core::catalog::PriceCatalog;
use profcost_core::model::{MissingPricePolicy, RequirementSet, ResolvedStep, StepStats};

/// Errors from step resolution. Only raised under [`MissingPricePolicy::Fail`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CostError {
    #[error("no market price for reagent '{reagent}'")]
    PriceNotFound { reagent: String },
}

/// Derive low/high/median from the costs of a step's alternatives.
///
/// With more than two alternatives the median is the element at index
/// `n / 2` of the ascending list; with one or two it is the midpoint of low
/// and high. No alternatives gives [`StepStats::ZERO`].
pub fn step_stats(mut costs: Vec<u64>) -> StepStats {
    costs.sort_unstable();
    let (Some(&low), Some(&high)) = (costs.first(), costs.last()) else {
        return StepStats::ZERO;
    };
    let median = if costs.len() > 2 {
        costs[costs.len() / 2]
    } else {
        low.midpoint(high)
    };
    StepStats { low, high, median }
}

/// Price every alternative of `set` and summarise the step.
///
/// Each unpriced reagent occurrence is recorded in `not_found`; what it does
/// to its alternative depends on `policy`.
pub fn resolve_step<C: PriceCatalog + ?Sized>(
    set: &RequirementSet,
    catalog: &C,
    policy: MissingPricePolicy,
) -> Result<ResolvedStep, CostError> {
    let mut not_found = Vec::new();
    let mut costs = Vec::with_capacity(set.len());

    for group in set.groups() {
        let mut total = 0u64;
        let mut complete = true;
        for reagent in group.reagents() {
            match catalog.price_of(&reagent.name) {
                Some(price) => {
                    total = total.saturating_add(u64::from(reagent.count).saturating_mul(price));
                }
                None => {
                    tracing::debug!(reagent = %reagent.name, "no market price");
                    if policy == MissingPricePolicy::Fail {
                        return Err(CostError::PriceNotFound {
                            reagent: reagent.name.clone(),
                        });
                    }
                    not_found.push(reagent.name.clone());
                    complete = false;
                }
            }
        }
        if complete || policy == MissingPricePolicy::ZeroCost {
            costs.push(total);
        }
    }

    let stats = step_stats(costs);
    tracing::trace!(
        alternatives = set.len(),
        low = stats.low,
        high = stats.high,
        median = stats.median,
        "resolved step"
    );
    Ok(ResolvedStep { stats, not_found })
}
