//! Market snapshot discovery.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Files directly inside `dir` whose name matches `pattern`, sorted by path.
///
/// A missing directory yields no snapshots rather than an error.
pub fn find_snapshots(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = globset::Glob::new(pattern)
        .with_context(|| format!("invalid snapshot pattern '{}'", pattern))?
        .compile_matcher();

    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "snapshot directory does not exist");
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to list snapshots in {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file()
            && let Some(name) = path.file_name()
            && matcher.is_match(name)
        {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Report label for a snapshot: its realm, else the file stem.
pub fn snapshot_label(realm: &str, path: &Path) -> String {
    if realm.is_empty() {
        path.file_stem()
            .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
    } else {
        realm.to_string()
    }
}
