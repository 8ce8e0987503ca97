//! Configuration for guide fetching, price data and cost policy.
//!
//! Load order: `.profcost/config.toml` → environment variables → defaults.

use crate::model::{Dialect, MissingPricePolicy};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfCostConfig {
    pub pricing: PricingConfig,
    pub guides: GuideConfig,
    pub data: DataConfig,
    pub professions: Vec<Profession>,
}

/// Cost policy configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// What an unpriced reagent does to its alternative: zero, exclude or fail.
    pub missing_price: MissingPricePolicy,
}

/// Leveling guide download and cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Cache directory for downloaded guides, relative to the project root.
    pub cache_dir: PathBuf,
    /// Global timeout for one guide download.
    pub timeout_secs: u64,
    /// Never download; a guide missing from the cache is an error.
    pub offline: bool,
}

/// Market snapshot discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding snapshot files, relative to the project root.
    pub dir: PathBuf,
    /// Glob selecting snapshot files inside `dir`.
    pub pattern: String,
}

/// A crafting profession and where its leveling guide lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profession {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub dialect: Dialect,
}

impl Profession {
    pub fn new(name: &str, url: &str, dialect: Dialect) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            dialect,
        }
    }
}

/// The professions covered by the wowprofessions.com 1-600 guides.
pub fn builtin_professions() -> Vec<Profession> {
    const BASE: &str = "http://wowprofessions.com";
    [
        ("Alchemy", "alchemy-leveling-guide-1-600/", Dialect::Generic),
        ("Blacksmithing", "blacksmithing-leveling-guide-1-600/", Dialect::Generic),
        ("Enchanting", "enchanting-leveling-guide-1-600-2/", Dialect::Generic),
        ("Engineering", "engineering-leveling-guide-1-600/", Dialect::Generic),
        ("Inscription", "inscription-leveling-guide-1-600/", Dialect::StackCount),
        ("Jewelcrafting", "jewelcrafting-leveling-guide-1-600/", Dialect::Generic),
        ("Leatherworking", "leatherworking-leveling-guide-1-600/", Dialect::Generic),
        ("Tailoring", "tailoring-leveling-guide-1-600/", Dialect::Generic),
    ]
    .into_iter()
    .map(|(name, path, dialect)| Profession::new(name, &format!("{}/{}", BASE, path), dialect))
    .collect()
}

impl Default for ProfCostConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            guides: GuideConfig::default(),
            data: DataConfig::default(),
            professions: builtin_professions(),
        }
    }
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("cache"),
            timeout_secs: 30,
            offline: false,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            pattern: "*.xml".to_string(),
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl ProfCostConfig {
    /// Load config from `.profcost/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".profcost").join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        // Environment variable overrides
        env_override(
            "PROFCOST_MISSING_PRICE",
            &mut config.pricing.missing_price,
        );
        env_override("PROFCOST_CACHE_DIR", &mut config.guides.cache_dir);
        env_override("PROFCOST_TIMEOUT_SECS", &mut config.guides.timeout_secs);
        env_override("PROFCOST_OFFLINE", &mut config.guides.offline);
        env_override("PROFCOST_DATA_DIR", &mut config.data.dir);

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make a run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.guides.timeout_secs == 0 {
            anyhow::bail!("guides.timeout_secs must be greater than zero");
        }
        if self.data.pattern.trim().is_empty() {
            anyhow::bail!("data.pattern must not be empty");
        }
        let mut seen = HashSet::new();
        for profession in &self.professions {
            if profession.name.trim().is_empty() {
                anyhow::bail!("profession names must not be empty");
            }
            if !seen.insert(profession.name.as_str()) {
                anyhow::bail!("duplicate profession '{}'", profession.name);
            }
        }
        Ok(())
    }

    /// Cache directory resolved against the project root.
    pub fn cache_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.guides.cache_dir)
    }

    /// Snapshot directory resolved against the project root.
    pub fn data_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.data.dir)
    }

    /// Look up a configured profession by case-insensitive name.
    pub fn profession(&self, name: &str) -> Option<&Profession> {
        self.professions
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}
