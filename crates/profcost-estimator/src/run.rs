//! Whole-run orchestration: load every guide, then estimate in parallel.

use crate::aggregate::aggregate;
use crate::resolve::CostError;
use crate::source::{GuideError, GuideSource};
use profcost_core::catalog::PriceCatalog;
use profcost_core::config::Profession;
use profcost_core::model::{MissingPricePolicy, ProfessionResult};
use profcost_parser::guide;
use rayon::prelude::*;

/// Errors that end an estimation run.
#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    #[error("failed to load the {profession} guide: {source}")]
    Guide {
        profession: String,
        #[source]
        source: GuideError,
    },
    #[error("failed to price {profession}: {source}")]
    Cost {
        profession: String,
        #[source]
        source: CostError,
    },
}

/// A profession together with the step lines of its guide.
#[derive(Debug, Clone)]
pub struct GuideDocument {
    pub profession: Profession,
    pub steps: Vec<String>,
}

/// Fetch and split every guide, in order, stopping at the first failure.
///
/// `on_loaded` is called after each guide, for progress display.
pub fn load_guides<G, F>(
    professions: &[Profession],
    source: &G,
    mut on_loaded: F,
) -> Result<Vec<GuideDocument>, EstimateError>
where
    G: GuideSource + ?Sized,
    F: FnMut(&Profession),
{
    professions
        .iter()
        .map(|profession| {
            let text = source
                .guide_text(profession)
                .map_err(|source| EstimateError::Guide {
                    profession: profession.name.clone(),
                    source,
                })?;
            let steps = guide::extract_steps(&text);
            tracing::debug!(profession = %profession.name, steps = steps.len(), "loaded guide");
            on_loaded(profession);
            Ok(GuideDocument {
                profession: profession.clone(),
                steps,
            })
        })
        .collect()
}

/// Estimate every loaded guide against one catalog.
///
/// Professions are independent and the catalog is read-only, so they are
/// aggregated in parallel. Output order matches `guides`.
pub fn estimate_guides<C: PriceCatalog + ?Sized>(
    guides: &[GuideDocument],
    catalog: &C,
    policy: MissingPricePolicy,
) -> Result<Vec<ProfessionResult>, EstimateError> {
    guides
        .par_iter()
        .map(|doc| {
            aggregate(
                &doc.profession.name,
                &doc.steps,
                doc.profession.dialect,
                catalog,
                policy,
            )
            .map_err(|source| EstimateError::Cost {
                profession: doc.profession.name.clone(),
                source,
            })
        })
        .collect()
}

/// Load all guides from `source` and estimate them against `catalog`.
pub fn estimate_all<G, C>(
    professions: &[Profession],
    source: &G,
    catalog: &C,
    policy: MissingPricePolicy,
) -> Result<Vec<ProfessionResult>, EstimateError>
where
    G: GuideSource + ?Sized,
    C: PriceCatalog + ?Sized,
{
    let guides = load_guides(professions, source, |_| {})?;
    estimate_guides(&guides, catalog, policy)
}
