//! Folding a profession's guide steps into one result.

use crate::resolve::{CostError, resolve_step};
use profcost_core::catalog::PriceCatalog;
use profcost_core::model::{CostTotals, Dialect, MissingPricePolicy, ProfessionResult};
use profcost_parser::{guide, parse_line};

/// Parse, price and sum every step line in document order.
///
/// Step statistics are added into running totals; `average` is taken once
/// from the final low and high.
pub fn aggregate<C, S>(
    profession: &str,
    lines: &[S],
    dialect: Dialect,
    catalog: &C,
    policy: MissingPricePolicy,
) -> Result<ProfessionResult, CostError>
where
    C: PriceCatalog + ?Sized,
    S: AsRef<str>,
{
    let totals = lines
        .iter()
        .try_fold(CostTotals::default(), |totals, line| {
            let set = parse_line(dialect, line.as_ref());
            if set.is_empty() {
                tracing::trace!(profession, line = line.as_ref(), "step has no reagents");
            }
            Ok::<_, CostError>(totals.absorb(resolve_step(&set, catalog, policy)?))
        })?;

    let result = totals.finish(profession);
    tracing::debug!(
        profession,
        steps = result.steps,
        low = result.low,
        high = result.high,
        missing = result.not_found.len(),
        "aggregated profession"
    );
    Ok(result)
}

/// Extract the steps of a raw guide document, then [`aggregate`] them.
pub fn aggregate_document<C: PriceCatalog + ?Sized>(
    profession: &str,
    document: &str,
    dialect: Dialect,
    catalog: &C,
    policy: MissingPricePolicy,
) -> Result<ProfessionResult, CostError> {
    let steps = guide::extract_steps(document);
    aggregate(profession, &steps, dialect, catalog, policy)
}
