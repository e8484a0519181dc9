//! Resolution of `owner/name` identifiers into [`Provider`] records.
//!
//! Resolution makes two remote calls per provider, in order:
//!
//! 1. list the repository root to detect the [`LayoutEra`] (a `website`
//!    directory marks the legacy layout); a missing repository stops here
//!    with [`Error::NotFound`]
//! 2. fetch the tag list and take the first tag name as the version
//!
//! The tag list is trusted to be newest-first; no semver ordering or
//! pre-release filtering is applied.

use tracing::debug;

use crate::github::GitHubClient;
use crate::{Error, LayoutEra, Provider, ProviderRef, Result};

/// Turns provider identifiers into resolved providers.
#[derive(Debug, Clone)]
pub struct Resolver {
    client: GitHubClient,
}

impl Resolver {
    /// Creates a resolver backed by `client`.
    #[must_use]
    pub const fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    /// Resolve one `owner/name` identifier.
    pub async fn resolve(&self, identifier: &str) -> Result<Provider> {
        let reference = ProviderRef::parse(identifier)?;
        let era = self.detect_layout(&reference).await?;
        let version = self.latest_version(&reference).await?;
        debug!("Resolved {} to {} ({} layout)", reference, version, era);
        Ok(Provider::resolved(reference, era, version))
    }

    /// Detect which documentation layout the repository uses.
    pub async fn detect_layout(&self, reference: &ProviderRef) -> Result<LayoutEra> {
        let entries = self.client.root_listing(reference).await?;
        Ok(LayoutEra::detect(entries.iter().map(|entry| entry.name.as_str())))
    }

    /// Take the first tag of the repository as its latest version.
    pub async fn latest_version(&self, reference: &ProviderRef) -> Result<String> {
        let tags = self
            .client
            .tags(reference)
            .await
            .map_err(|e| Error::VersionUnavailable {
                provider: reference.to_string(),
                reason: e.to_string(),
            })?;

        tags.into_iter()
            .next()
            .map(|tag| tag.name)
            .ok_or_else(|| Error::VersionUnavailable {
                provider: reference.to_string(),
                reason: "the repository has no tags".to_string(),
            })
    }
}
