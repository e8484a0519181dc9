//! Recently viewed entities, most recent first.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{Storage, write_atomic};
use crate::{Entity, Error, Result};

/// How many entries are kept.
pub const MAX_RECENT_VIEWS: usize = 10;

/// One remembered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentView {
    pub entity: Entity,
    pub viewed_at: DateTime<Utc>,
}

/// JSON-file backed list of recent views.
#[derive(Debug, Clone)]
pub struct RecentViews {
    path: PathBuf,
}

impl RecentViews {
    /// Recent views stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Recent views stored in the data directory of `storage`.
    #[must_use]
    pub fn in_storage(storage: &Storage) -> Self {
        Self::new(storage.recent_path())
    }

    /// All entries, most recent first. A missing or unreadable file is empty.
    #[must_use]
    pub fn list(&self) -> Vec<RecentView> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("failed to read recent views at {}: {e}", self.path.display());
                return Vec::new();
            },
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("ignoring corrupt recent views at {}: {e}", self.path.display());
            Vec::new()
        })
    }

    /// Put `entity` at the front, dropping any earlier view of the same entity.
    pub fn record(&self, entity: &Entity, now: DateTime<Utc>) -> Result<Vec<RecentView>> {
        let lock_path = self.path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)?;
        lock.lock_exclusive()
            .map_err(|e| Error::Storage(format!("Failed to lock recent views: {e}")))?;

        let views = push_front(self.list(), entity, now);
        write_atomic(&self.path, &serde_json::to_string_pretty(&views)?)?;
        // `lock` is released on drop
        Ok(views)
    }
}

fn push_front(mut views: Vec<RecentView>, entity: &Entity, now: DateTime<Utc>) -> Vec<RecentView> {
    views.retain(|view| !view.entity.same_identity(entity));
    views.insert(
        0,
        RecentView {
            entity: entity.clone(),
            viewed_at: now,
        },
    );
    views.truncate(MAX_RECENT_VIEWS);
    views
}
