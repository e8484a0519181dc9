//! Time-boxed cache of the materialized entity list.
//!
//! The cache is split in two layers:
//!
//! - a [`CacheStore`]: a dumb string key-value store ([`MemoryStore`] for tests,
//!   [`FileStore`] for the CLI)
//! - a [`ResultCache`]: serializes [`CacheRecord`]s and decides validity
//!
//! A record is usable only if its `provider_set_key` equals the current input
//! string exactly and it has not expired. Anything unreadable is a miss.
//!
//! ```rust
//! use tfdocs_core::cache::{MemoryStore, ResultCache};
//! use chrono::Utc;
//!
//! let cache = ResultCache::new(MemoryStore::default());
//! cache.store("hashicorp/aws", Vec::new(), Utc::now());
//! assert!(cache.lookup("hashicorp/aws", Utc::now()).is_some());
//! assert!(cache.lookup("hashicorp/aws,hashicorp/google", Utc::now()).is_none());
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::storage::Storage;
use crate::{Entity, Error, Result};

/// How long a written record stays valid, in hours.
pub const CACHE_TTL_HOURS: i64 = 24;

/// How long a written record stays valid.
#[must_use]
pub fn cache_ttl() -> Duration {
    Duration::hours(CACHE_TTL_HOURS)
}

/// Persisted payload for one provider set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    pub entities: Vec<Entity>,
    /// Exact input string the entities were computed from.
    pub provider_set_key: String,
    pub expires_at: DateTime<Utc>,
}

impl CacheRecord {
    /// Whether this record may be served for `key` at `now`.
    #[must_use]
    pub fn is_valid_for(&self, key: &str, now: DateTime<Utc>) -> bool {
        self.provider_set_key == key && now < self.expires_at
    }
}

/// Key-value persistence behind the result cache.
pub trait CacheStore: Send + Sync {
    /// Read the raw value for `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Overwrite the raw value for `key`.
    fn put(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".into()))
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store keeping one JSON file per key under `<data dir>/cache`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store inside the cache directory of `storage`.
    #[must_use]
    pub fn in_storage(storage: &Storage) -> Self {
        Self::new(storage.cache_dir())
    }

    /// File name for a key. Keys are arbitrary strings, so they are hashed.
    fn path_for(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir
            .join(format!("{}.json", URL_SAFE_NO_PAD.encode(digest)))
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage(format!(
                "Failed to read cache file {}: {e}",
                path.display()
            ))),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        crate::storage::write_atomic(&self.path_for(key), value)
    }
}

/// Validity-checking cache of entity lists keyed by provider set.
pub struct ResultCache<S> {
    store: S,
}

impl<S: CacheStore> ResultCache<S> {
    /// Wrap a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub const fn inner(&self) -> &S {
        &self.store
    }

    /// Return the cached entities for `key` if a valid record exists at `now`.
    ///
    /// Read failures and corrupt records count as misses.
    pub fn lookup(&self, key: &str, now: DateTime<Utc>) -> Option<Vec<Entity>> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("cache miss for '{}': no record", key);
                return None;
            },
            Err(e) => {
                warn!("cache read failed for '{}': {}", key, e);
                return None;
            },
        };

        let record: CacheRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!("ignoring corrupt cache record for '{}': {}", key, e);
                return None;
            },
        };

        if record.is_valid_for(key, now) {
            debug!("cache hit for '{}' ({} entities)", key, record.entities.len());
            Some(record.entities)
        } else {
            debug!("cache miss for '{}': stale or mismatched record", key);
            None
        }
    }

    /// Write `entities` for `key`, valid for [`cache_ttl`] from `now`.
    ///
    /// Write failures are logged, not returned: the fetched data is still usable.
    pub fn store(&self, key: &str, entities: Vec<Entity>, now: DateTime<Utc>) {
        let record = CacheRecord {
            entities,
            provider_set_key: key.to_string(),
            expires_at: now + cache_ttl(),
        };
        let result = serde_json::to_string(&record)
            .map_err(Error::from)
            .and_then(|json| self.store.put(key, &json));
        if let Err(e) = result {
            warn!("failed to write cache record for '{}': {}", key, e);
        }
    }
}
