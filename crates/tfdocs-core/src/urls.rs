//! URL construction for the GitHub API, the raw content host and the public
//! Terraform registry.
//!
//! All functions are pure string templates over already-validated data.
//! Hosts are carried by [`Endpoints`] so tests and mirrors can point the
//! pipeline elsewhere.

use serde::{Deserialize, Serialize};

use crate::{Entity, EntityKind, Provider, ProviderRef};

/// Default GitHub REST API base.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Default raw file host.
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";
/// Default public registry.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.terraform.io";

/// Base URLs of the three remote hosts the pipeline talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// GitHub REST API base, without trailing slash.
    pub api: String,
    /// Raw content host base, without trailing slash.
    pub raw: String,
    /// Public registry base, without trailing slash.
    pub registry: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api: DEFAULT_API_URL.to_string(),
            raw: DEFAULT_RAW_URL.to_string(),
            registry: DEFAULT_REGISTRY_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Strip trailing slashes so templates never produce `//`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for base in [&mut self.api, &mut self.raw, &mut self.registry] {
            while base.ends_with('/') {
                base.pop();
            }
        }
        self
    }

    fn repo_api(&self, owner: &str, repository: &str) -> String {
        format!("{}/repos/{owner}/{repository}", self.api)
    }

    /// Repository root listing, used for layout detection.
    #[must_use]
    pub fn root_listing_url(&self, provider: &ProviderRef) -> String {
        format!(
            "{}/contents/",
            self.repo_api(&provider.owner, &provider.repository())
        )
    }

    /// Tag list, newest first.
    #[must_use]
    pub fn tags_url(&self, provider: &ProviderRef) -> String {
        format!("{}/tags", self.repo_api(&provider.owner, &provider.repository()))
    }

    /// Listing of the resource or data-source directory at the provider's version.
    #[must_use]
    pub fn listing_url(&self, provider: &Provider, kind: EntityKind) -> String {
        format!(
            "{}/contents/{}?ref={}",
            self.repo_api(&provider.owner, &provider.repository()),
            provider.policy().kind_path(kind),
            provider.version
        )
    }

    /// Listing of the documentation root, used to discover subtree hashes.
    #[must_use]
    pub fn parent_listing_url(&self, provider: &Provider) -> String {
        format!(
            "{}/contents/{}?ref={}",
            self.repo_api(&provider.owner, &provider.repository()),
            provider.policy().content_root_dir,
            provider.version
        )
    }

    /// Non-recursive tree listing for a subtree hash.
    #[must_use]
    pub fn tree_url(&self, provider: &Provider, subtree_sha: &str) -> String {
        format!(
            "{}/git/trees/{subtree_sha}?ref={}&recursive=false",
            self.repo_api(&provider.owner, &provider.repository()),
            provider.version
        )
    }

    /// Raw documentation source for an entity of `provider`.
    #[must_use]
    pub fn raw_content_url(&self, provider: &Provider, kind: EntityKind, name: &str) -> String {
        let policy = provider.policy();
        format!(
            "{}/{}/{}/{}/{}/{name}{}",
            self.raw,
            provider.owner,
            provider.repository(),
            provider.version,
            policy.kind_path(kind),
            policy.file_suffix
        )
    }

    /// Raw documentation source for an existing entity.
    #[must_use]
    pub fn entity_raw_content_url(&self, entity: &Entity) -> String {
        self.raw_content_url(&entity.provider, entity.kind, &entity.name)
    }

    /// Public registry documentation page for an entity.
    #[must_use]
    pub fn public_doc_url(&self, entity: &Entity) -> String {
        let provider = &entity.provider;
        format!(
            "{}/providers/{}/{}/{}/docs/{}s/{}",
            self.registry,
            provider.owner,
            provider.name,
            provider.registry_version(),
            entity.kind.slug(),
            entity.name
        )
    }
}
