//! Drives resolution, enumeration and caching across a provider set.
//!
//! ```text
//! identifiers ──resolve (concurrent)──▶ providers ──enumerate (concurrent)──▶ entities
//!        │                                  │
//!        └──────── failures ◀───────────────┘
//! ```
//!
//! Nothing here is fatal: every per-provider error ends up in
//! [`FetchReport::failures`] and the remaining providers still contribute
//! their entities.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::cache::{CacheStore, ResultCache};
use crate::config::split_identifiers;
use crate::enumerator::{EnumerationStrategy, Enumerator};
use crate::github::GitHubClient;
use crate::resolver::Resolver;
use crate::{Entity, ProviderFailure};

/// The providers to load, plus the exact input string used as cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSet {
    key: String,
    identifiers: Vec<String>,
}

impl ProviderSet {
    /// Parse a comma-separated list. The key is `input` verbatim.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self {
            key: input.to_string(),
            identifiers: split_identifiers(input),
        }
    }

    /// Build from a list; the key is the list joined with `,`.
    #[must_use]
    pub fn from_identifiers<I, T>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let joined = identifiers
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        Self::parse(&joined)
    }

    /// Cache key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Trimmed, non-blank identifiers in input order.
    #[must_use]
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// Result of one pipeline run.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Entities grouped by provider, providers in input order.
    pub entities: Vec<Entity>,
    /// Resolution failures first, then enumeration failures, each in input order.
    pub failures: Vec<ProviderFailure>,
}

impl FetchReport {
    /// Whether no provider produced a result.
    #[must_use]
    pub fn all_failed(&self, attempted: usize) -> bool {
        attempted > 0 && self.failures.len() >= attempted
    }
}

/// Whether `load` may serve a cached record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Serve a valid cached record if there is one.
    PreferCache,
    /// Skip the cache, run the pipeline and overwrite the record.
    Reload,
}

/// Result of [`Orchestrator::load`].
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub entities: Vec<Entity>,
    /// Always empty when served from the cache.
    pub failures: Vec<ProviderFailure>,
    pub from_cache: bool,
}

/// Runs the discovery pipeline with a result cache in front of it.
pub struct Orchestrator<S> {
    resolver: Resolver,
    enumerator: Enumerator,
    cache: ResultCache<S>,
}

impl<S: CacheStore> Orchestrator<S> {
    /// Creates an orchestrator over `client`, caching into `store`.
    pub fn new(client: GitHubClient, strategy: EnumerationStrategy, store: S) -> Self {
        Self {
            resolver: Resolver::new(client.clone()),
            enumerator: Enumerator::new(client, strategy),
            cache: ResultCache::new(store),
        }
    }

    /// The cache in front of the pipeline.
    pub const fn cache(&self) -> &ResultCache<S> {
        &self.cache
    }

    /// Resolve and enumerate every identifier. Never touches the cache.
    pub async fn fetch_all(&self, identifiers: &[String]) -> FetchReport {
        let mut report = FetchReport::default();
        if identifiers.is_empty() {
            return report;
        }

        let resolved = join_all(identifiers.iter().map(|id| self.resolver.resolve(id))).await;

        let mut providers = Vec::with_capacity(resolved.len());
        for (identifier, result) in identifiers.iter().zip(resolved) {
            match result {
                Ok(provider) => providers.push((identifier, Arc::new(provider))),
                Err(e) => {
                    debug!("Skipping {}: {}", identifier, e);
                    report.failures.push(ProviderFailure::new(identifier, e));
                },
            }
        }

        let enumerated = join_all(
            providers
                .iter()
                .map(|(_, provider)| self.enumerator.enumerate(Arc::clone(provider))),
        )
        .await;

        for ((identifier, _), result) in providers.iter().zip(enumerated) {
            match result {
                Ok(entities) => report.entities.extend(entities),
                Err(e) => {
                    debug!("Skipping {}: {}", identifier, e);
                    report.failures.push(ProviderFailure::new(identifier.as_str(), e));
                },
            }
        }

        info!(
            "Loaded {} entities from {} providers ({} failed)",
            report.entities.len(),
            identifiers.len(),
            report.failures.len()
        );
        report
    }

    /// Load the entities of `set`, using and refreshing the cache.
    pub async fn load(&self, set: &ProviderSet, mode: LoadMode) -> LoadOutcome {
        self.load_at(set, mode, Utc::now()).await
    }

    /// [`Self::load`] with an explicit clock.
    ///
    /// An empty set makes no remote call and writes nothing. A run where
    /// every provider failed is not cached, so the next call retries.
    pub async fn load_at(
        &self,
        set: &ProviderSet,
        mode: LoadMode,
        now: DateTime<Utc>,
    ) -> LoadOutcome {
        if set.is_empty() {
            debug!("No providers configured");
            return LoadOutcome::default();
        }

        if mode == LoadMode::PreferCache {
            if let Some(entities) = self.cache.lookup(set.key(), now) {
                return LoadOutcome {
                    entities,
                    failures: Vec::new(),
                    from_cache: true,
                };
            }
        }

        let report = self.fetch_all(set.identifiers()).await;
        if report.all_failed(set.identifiers().len()) {
            warn!("Every provider failed; cache left untouched");
        } else {
            self.cache.store(set.key(), report.entities.clone(), now);
        }

        LoadOutcome {
            entities: report.entities,
            failures: report.failures,
            from_cache: false,
        }
    }
}
