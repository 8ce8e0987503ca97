//! Leveling cost estimation for crafting professions.
//!
//! # Architecture
//!
//! - **resolve**: prices one parsed guide step and derives its low/high/median
//! - **aggregate**: folds every step of a guide into a [`ProfessionResult`]
//! - **rank**: orders results from cheapest to most expensive
//! - **source**: `GuideSource` trait with a caching HTTP implementation
//! - **run**: loads all guides, then estimates professions in parallel
//!
//! [`ProfessionResult`]: profcost_core::model::ProfessionResult

pub mod aggregate;
pub mod rank;
pub mod resolve;
pub mod run;
pub mod source;

pub use aggregate::{aggregate, aggregate_document};
pub use rank::rank;
pub use resolve::{CostError, resolve_step, step_stats};
pub use run::{EstimateError, GuideDocument, estimate_all, estimate_guides, load_guides};
pub use source::{CachedGuideFetcher, GuideError, GuideSource};
