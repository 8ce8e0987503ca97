//! Market price lookup.
//!
//! Snapshots are auction-house exports listing item names and their market
//! price in copper. The Undermine Journal XML export is the native format:
//!
//! ```xml
//! <realm name="Stormrage">
//!   <item name="Copper Bar"><market>1250</market></item>
//! </realm>
//! ```
//!
//! Files ending in `.json` are read as
//! `{ "realm": "Stormrage", "items": [ { "name": "Copper Bar", "market": 1250 } ] }`.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Errors raised while loading a price snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read price snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid price snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid price snapshot XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Exact-match name to unit price lookup.
pub trait PriceCatalog: Send + Sync {
    /// Unit market price of `name`, or `None` when the catalog has no entry.
    fn price_of(&self, name: &str) -> Option<u64>;
}

impl PriceCatalog for HashMap<String, u64> {
    fn price_of(&self, name: &str) -> Option<u64> {
        self.get(name).copied()
    }
}

#[derive(Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    realm: Option<String>,
    #[serde(default)]
    items: Vec<SnapshotItem>,
}

#[derive(Deserialize)]
struct SnapshotItem {
    name: String,
    #[serde(default)]
    market: u64,
}

/// Prices for one realm at one point in time.
#[derive(Debug, Clone, Default)]
pub struct MarketSnapshot {
    realm: String,
    prices: HashMap<String, u64>,
}

impl MarketSnapshot {
    /// Read and parse a snapshot file. `.json` files are read as JSON,
    /// everything else as XML.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            Self::from_json(&text)
        } else {
            Self::from_xml(&text)
        }
    }

    /// Parse an XML export.
    ///
    /// The realm is the `name` of the first `<realm>` element. Every
    /// `<item name="..">` is priced from its `<market>` child; a missing or
    /// non-numeric market is 0. The first item with a given name wins.
    pub fn from_xml(xml: &str) -> Result<Self, CatalogError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(xml, options)?;

        let realm = doc
            .descendants()
            .find(|n| n.has_tag_name("realm"))
            .and_then(|n| n.attribute("name"))
            .unwrap_or_default()
            .to_string();

        let mut prices = HashMap::new();
        for item in doc.descendants().filter(|n| n.has_tag_name("item")) {
            let Some(name) = item.attribute("name") else {
                continue;
            };
            prices
                .entry(name.to_string())
                .or_insert_with(|| market_price(item));
        }
        Ok(Self { realm, prices })
    }

    /// Parse a snapshot document. The first entry for a name wins.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: SnapshotDocument = serde_json::from_str(json)?;
        let mut prices = HashMap::with_capacity(doc.items.len());
        for item in doc.items {
            prices.entry(item.name).or_insert(item.market);
        }
        Ok(Self {
            realm: doc.realm.unwrap_or_default(),
            prices,
        })
    }

    /// Attach a realm label to an in-memory snapshot.
    #[must_use]
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    /// Realm label, empty when the document carried none.
    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

fn market_price(item: roxmltree::Node<'_, '_>) -> u64 {
    item.descendants()
        .find(|n| n.has_tag_name("market"))
        .and_then(|market| market.text())
        .and_then(|text| text.trim().parse().ok())
        .unwrap_or(0)
}

impl<S: Into<String>> FromIterator<(S, u64)> for MarketSnapshot {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut prices = HashMap::new();
        for (name, price) in iter {
            prices.entry(name.into()).or_insert(price);
        }
        Self {
            realm: String::new(),
            prices,
        }
    }
}

impl PriceCatalog for MarketSnapshot {
    fn price_of(&self, name: &str) -> Option<u64> {
        self.prices.get(name).copied()
    }
}
