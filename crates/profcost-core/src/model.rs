//! Reagent requirements, step statistics, and per-profession results.
//!
//! A guide step is modelled as a [`RequirementSet`]: an OR over
//! [`AlternativeGroup`]s, each of which is an AND over [`Reagent`]s.
//! Prices and costs are raw integer copper (1g = 100s = 10000c).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of items in one auction-house stack.
pub const ITEMS_PER_STACK: u32 = 20;

/// A named consumable and the quantity required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reagent {
    pub name: String,
    pub count: u32,
}

impl Reagent {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

impl fmt::Display for Reagent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x [{}]", self.count, self.name)
    }
}

/// Reagents that must all be bought together. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeGroup {
    reagents: Vec<Reagent>,
}

impl AlternativeGroup {
    /// Build a group from reagents. Returns `None` for an empty list.
    pub fn new(reagents: Vec<Reagent>) -> Option<Self> {
        if reagents.is_empty() {
            None
        } else {
            Some(Self { reagents })
        }
    }

    /// A group holding exactly one reagent.
    pub fn single(reagent: Reagent) -> Self {
        Self {
            reagents: vec![reagent],
        }
    }

    pub fn reagents(&self) -> &[Reagent] {
        &self.reagents
    }
}

impl fmt::Display for AlternativeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, reagent) in self.reagents.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{}", reagent)?;
        }
        Ok(())
    }
}

/// All alternative ways of satisfying one guide step.
///
/// Built once per guide line by a parser and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementSet {
    groups: Vec<AlternativeGroup>,
}

impl RequirementSet {
    pub fn new(groups: Vec<AlternativeGroup>) -> Self {
        Self { groups }
    }

    /// The set a parser returns when the line holds no reagents.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[AlternativeGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<AlternativeGroup> for RequirementSet {
    fn from_iter<I: IntoIterator<Item = AlternativeGroup>>(iter: I) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for RequirementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.groups.is_empty() {
            return f.write_str("(no reagents)");
        }
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str(" OR ")?;
            }
            write!(f, "({})", group)?;
        }
        Ok(())
    }
}

/// Text dialect used by a profession's leveling guide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// `60 x [Item]` tokens, each one an independent alternative.
    #[default]
    Generic,
    /// `2.5 stacks of the following: [A][B]`, quantity per item in stacks.
    StackCount,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Generic => "generic",
            Dialect::StackCount => "stack-count",
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(Dialect::Generic),
            "stack-count" | "stack_count" | "stacks" => Ok(Dialect::StackCount),
            other => Err(format!(
                "unknown dialect '{}': expected 'generic' or 'stack-count'",
                other
            )),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How to treat a reagent that has no market price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingPricePolicy {
    /// Price the reagent at zero and keep its alternative.
    #[default]
    #[serde(rename = "zero")]
    ZeroCost,
    /// Drop every alternative that contains the reagent.
    #[serde(rename = "exclude")]
    ExcludeAlternative,
    /// Stop estimating the profession.
    #[serde(rename = "fail")]
    Fail,
}

impl FromStr for MissingPricePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(MissingPricePolicy::ZeroCost),
            "exclude" => Ok(MissingPricePolicy::ExcludeAlternative),
            "fail" => Ok(MissingPricePolicy::Fail),
            other => Err(format!(
                "unknown missing-price policy '{}': expected zero, exclude or fail",
                other
            )),
        }
    }
}

/// Cost statistics of one guide step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStats {
    pub low: u64,
    pub high: u64,
    pub median: u64,
}

impl StepStats {
    /// Contribution of a step with no priced alternatives.
    pub const ZERO: StepStats = StepStats {
        low: 0,
        high: 0,
        median: 0,
    };
}

/// Statistics of one step plus the reagent names that had no price.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedStep {
    pub stats: StepStats,
    pub not_found: Vec<String>,
}

/// Running totals for a profession while its steps are folded in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostTotals {
    pub low: u64,
    pub high: u64,
    pub median: u64,
    pub not_found: Vec<String>,
    pub steps: usize,
}

impl CostTotals {
    /// Add one step's statistics to the running sums. Sums saturate at
    /// `u64::MAX`.
    #[must_use]
    pub fn absorb(mut self, step: ResolvedStep) -> Self {
        self.low = self.low.saturating_add(step.stats.low);
        self.high = self.high.saturating_add(step.stats.high);
        self.median = self.median.saturating_add(step.stats.median);
        self.not_found.extend(step.not_found);
        self.steps += 1;
        self
    }

    /// Freeze the totals into a result. `average` is computed here, once.
    pub fn finish(self, name: impl Into<String>) -> ProfessionResult {
        ProfessionResult {
            name: name.into(),
            low: self.low,
            high: self.high,
            median: self.median,
            average: self.low.midpoint(self.high),
            not_found: self.not_found,
            steps: self.steps,
        }
    }
}

/// Final leveling cost of one profession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionResult {
    pub name: String,
    pub low: u64,
    pub high: u64,
    pub median: u64,
    pub average: u64,
    /// Unpriced reagent names, one entry per occurrence, in encounter order.
    pub not_found: Vec<String>,
    /// Number of guide steps folded in.
    pub steps: usize,
}

impl ProfessionResult {
    /// Distinct unpriced names with their occurrence counts, first-seen order.
    pub fn missing_summary(&self) -> Vec<(&str, usize)> {
        let mut summary: Vec<(&str, usize)> = Vec::new();
        for name in &self.not_found {
            match summary.iter_mut().find(|(n, _)| *n == name.as_str()) {
                Some((_, count)) => *count += 1,
                None => summary.push((name.as_str(), 1)),
            }
        }
        summary
    }
}
