//! Leveling guide retrieval.
//!
//! Guides are downloaded once and kept in a cache directory as
//! `<Profession>.html`; later runs read the cached copy.
//! Uses blocking HTTP via `ureq`, the CLI has no async runtime.

use profcost_core::config::Profession;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Errors from guide retrieval. All of them end the run.
#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    #[error("HTTP request for {url} failed: {message}")]
    Http { url: String, message: String },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("guide cache I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("guide for {profession} is not cached and downloads are disabled")]
    NotCached { profession: String },
    #[error("no guide available for {profession}")]
    Missing { profession: String },
}

/// Supplies the raw guide document of a profession.
///
/// Repeated calls within a run must return the same text.
pub trait GuideSource {
    fn guide_text(&self, profession: &Profession) -> Result<String, GuideError>;
}

/// In-memory guides keyed by profession name.
impl GuideSource for HashMap<String, String> {
    fn guide_text(&self, profession: &Profession) -> Result<String, GuideError> {
        self.get(&profession.name)
            .cloned()
            .ok_or_else(|| GuideError::Missing {
                profession: profession.name.clone(),
            })
    }
}

/// Downloads guides over HTTP and caches them on disk.
pub struct CachedGuideFetcher {
    cache_dir: PathBuf,
    offline: bool,
    agent: ureq::Agent,
}

impl CachedGuideFetcher {
    pub fn new(cache_dir: impl Into<PathBuf>, timeout: Duration, offline: bool) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            offline,
            agent: ureq::Agent::new_with_config(
                ureq::config::Config::builder()
                    .timeout_global(Some(timeout))
                    .build(),
            ),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache file for a profession.
    pub fn cache_path(&self, profession: &Profession) -> PathBuf {
        self.cache_dir.join(format!("{}.html", profession.name))
    }

    pub fn is_cached(&self, profession: &Profession) -> bool {
        self.cache_path(profession).is_file()
    }

    /// Download the guide and overwrite its cache entry.
    pub fn download(&self, profession: &Profession) -> Result<String, GuideError> {
        if self.offline {
            return Err(GuideError::NotCached {
                profession: profession.name.clone(),
            });
        }

        tracing::info!(profession = %profession.name, url = %profession.url, "downloading guide");
        let body = self.fetch(&profession.url)?;

        std::fs::create_dir_all(&self.cache_dir).map_err(|source| GuideError::Io {
            path: self.cache_dir.clone(),
            source,
        })?;
        let path = self.cache_path(profession);
        std::fs::write(&path, &body).map_err(|source| GuideError::Io { path, source })?;
        Ok(body)
    }

    fn fetch(&self, url: &str) -> Result<String, GuideError> {
        let mut response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::StatusCode(status) => GuideError::Status {
                url: url.to_string(),
                status,
            },
            other => GuideError::Http {
                url: url.to_string(),
                message: other.to_string(),
            },
        })?;

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| GuideError::Http {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}

impl GuideSource for CachedGuideFetcher {
    fn guide_text(&self, profession: &Profession) -> Result<String, GuideError> {
        let path = self.cache_path(profession);
        if path.is_file() {
            tracing::debug!(profession = %profession.name, path = %path.display(), "guide cache hit");
            return std::fs::read_to_string(&path).map_err(|source| GuideError::Io { path, source });
        }
        self.download(profession)
    }
}
