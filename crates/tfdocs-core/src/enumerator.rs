//! Enumeration of the resources and data sources a provider documents.
//!
//! Two strategies produce the same [`Entity`] values:
//!
//! - [`EnumerationStrategy::DirectListing`] lists both kind directories through
//!   the contents API and trusts each file's `download_url` (2 requests).
//! - [`EnumerationStrategy::TreeWalk`] lists the documentation root to find the
//!   subtree hash of each kind directory, then lists those trees and builds the
//!   raw URL from the layout policy (1 + 2 requests).
//!
//! A kind directory that does not exist contributes no entities. Any other
//! failure fails the whole provider with [`Error::Enumeration`]; the
//! orchestrator records it and carries on with the other providers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::github::GitHubClient;
use crate::{Entity, EntityKind, Error, Provider, Result};

/// How entity listings are obtained from the remote repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumerationStrategy {
    /// Contents API listing with per-file download links.
    #[default]
    DirectListing,
    /// Git tree API with URLs synthesized from the layout policy.
    TreeWalk,
}

/// Entity name from a documentation file name: everything before the first `.`.
#[must_use]
pub fn entity_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Lists documentation entities for resolved providers.
#[derive(Debug, Clone)]
pub struct Enumerator {
    client: GitHubClient,
    strategy: EnumerationStrategy,
}

impl Enumerator {
    /// Creates an enumerator using `strategy`.
    #[must_use]
    pub const fn new(client: GitHubClient, strategy: EnumerationStrategy) -> Self {
        Self { client, strategy }
    }

    /// List every resource and data source of `provider`.
    pub async fn enumerate(&self, provider: Arc<Provider>) -> Result<Vec<Entity>> {
        let entities = match self.strategy {
            EnumerationStrategy::DirectListing => self.direct_listing(&provider).await,
            EnumerationStrategy::TreeWalk => self.tree_walk(&provider).await,
        }
        .map_err(|e| Error::Enumeration {
            provider: provider.to_string(),
            reason: e.to_string(),
        })?;

        debug!(
            "Enumerated {} entities for {} ({:?})",
            entities.len(),
            provider,
            self.strategy
        );
        Ok(entities)
    }

    async fn direct_listing(&self, provider: &Arc<Provider>) -> Result<Vec<Entity>> {
        let (resources, data_sources) = futures::join!(
            self.list_kind(provider, EntityKind::Resource),
            self.list_kind(provider, EntityKind::DataSource),
        );
        let mut entities = resources?;
        entities.extend(data_sources?);
        Ok(entities)
    }

    async fn list_kind(&self, provider: &Arc<Provider>, kind: EntityKind) -> Result<Vec<Entity>> {
        let url = self.client.endpoints().listing_url(provider, kind);
        let listing = match self.client.directory_listing(&url).await {
            Ok(listing) => listing,
            Err(Error::NotFound(_)) => {
                debug!("{} has no {} directory", provider, kind.slug());
                return Ok(Vec::new());
            },
            Err(e) => return Err(e),
        };

        Ok(listing
            .into_iter()
            .filter(crate::github::ContentEntry::is_file)
            .map(|entry| {
                let name = entity_name(&entry.name).to_string();
                let raw_content_url = entry.download_url.unwrap_or_else(|| {
                    self.client
                        .endpoints()
                        .raw_content_url(provider, kind, &name)
                });
                Entity {
                    name,
                    kind,
                    provider: Arc::clone(provider),
                    raw_content_url,
                }
            })
            .collect())
    }

    async fn tree_walk(&self, provider: &Arc<Provider>) -> Result<Vec<Entity>> {
        let endpoints = self.client.endpoints();
        let parent = match self
            .client
            .directory_listing(&endpoints.parent_listing_url(provider))
            .await
        {
            Ok(parent) => parent,
            Err(Error::NotFound(_)) => {
                debug!("{} has no documentation root", provider);
                return Ok(Vec::new());
            },
            Err(e) => return Err(e),
        };

        let policy = provider.policy();
        let subtree = |kind: EntityKind| {
            parent
                .iter()
                .find(|entry| entry.name == policy.kind_dir(kind))
                .map(|entry| entry.sha.clone())
        };

        let (resources, data_sources) = futures::join!(
            self.list_subtree(provider, EntityKind::Resource, subtree(EntityKind::Resource)),
            self.list_subtree(provider, EntityKind::DataSource, subtree(EntityKind::DataSource)),
        );
        let mut entities = resources?;
        entities.extend(data_sources?);
        Ok(entities)
    }

    async fn list_subtree(
        &self,
        provider: &Arc<Provider>,
        kind: EntityKind,
        sha: Option<String>,
    ) -> Result<Vec<Entity>> {
        let Some(sha) = sha else {
            debug!("{} has no {} directory", provider, kind.slug());
            return Ok(Vec::new());
        };

        let endpoints = self.client.endpoints();
        let tree = self.client.tree(&endpoints.tree_url(provider, &sha)).await?;
        if tree.truncated {
            warn!(
                "{} listing for {} was truncated; some entities may be missing",
                kind.label(),
                provider
            );
        }
        Ok(tree
            .tree
            .into_iter()
            .filter(crate::github::TreeEntry::is_blob)
            .map(|entry| {
                let name = entity_name(&entry.path).to_string();
                let raw_content_url = endpoints.raw_content_url(provider, kind, &name);
                Entity {
                    name,
                    kind,
                    provider: Arc::clone(provider),
                    raw_content_url,
                }
            })
            .collect())
    }
}
