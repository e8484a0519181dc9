use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{Error, Result};

/// Application directory slug used under XDG-style data roots.
const APP_DIR: &str = "tfdocs";
/// Dot-directory used when no XDG data root is set.
const DOT_DIR: &str = ".tfdocs";

/// Local filesystem layout for cached entity lists and recent views.
///
/// ```text
/// <root>/
///   cache/<hash>.json   one record per provider set
///   recent.json         recently viewed entities
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    root_dir: PathBuf,
}

impl Storage {
    /// Creates a storage instance at the default root directory.
    ///
    /// `TFDOCS_DATA_DIR` wins, then `XDG_DATA_HOME/tfdocs`, then `~/.tfdocs`.
    pub fn new() -> Result<Self> {
        if let Ok(dir) = std::env::var("TFDOCS_DATA_DIR") {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return Self::with_root(PathBuf::from(trimmed));
            }
        }

        let root_dir = match std::env::var("XDG_DATA_HOME") {
            Ok(xdg) if !xdg.trim().is_empty() => PathBuf::from(xdg.trim()).join(APP_DIR),
            _ => Self::fallback_data_dir()?,
        };
        Self::with_root(root_dir)
    }

    fn fallback_data_dir() -> Result<PathBuf> {
        let home = BaseDirs::new()
            .ok_or_else(|| Error::Storage("Failed to determine home directory".into()))?;
        Ok(home.home_dir().join(DOT_DIR))
    }

    /// Creates a storage instance with a custom root directory.
    pub fn with_root(root_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root_dir)
            .map_err(|e| Error::Storage(format!("Failed to create root directory: {e}")))?;
        Ok(Self { root_dir })
    }

    /// Returns the root data directory path
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Directory holding cached entity lists.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.root_dir.join("cache")
    }

    /// File holding recently viewed entities.
    #[must_use]
    pub fn recent_path(&self) -> PathBuf {
        self.root_dir.join("recent.json")
    }

}

/// Write `content` to `path` through a temporary file and a rename.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::Storage(format!("Failed to create {}: {e}", parent.display())))?;
    }

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, content)
        .map_err(|e| Error::Storage(format!("Failed to write {}: {e}", tmp_path.display())))?;

    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)
            .map_err(|e| Error::Storage(format!("Failed to replace {}: {e}", path.display())))?;
    }

    fs::rename(&tmp_path, path)
        .map_err(|e| Error::Storage(format!("Failed to commit {}: {e}", path.display())))?;

    debug!("Saved {}", path.display());
    Ok(())
}

// Note: Default is not implemented as Storage::new() can fail.
