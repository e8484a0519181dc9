use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::layout::{LayoutEra, LayoutPolicy, policy_for};
use crate::{Error, Result};

/// Repository name prefix shared by every Terraform provider.
pub const REPOSITORY_PREFIX: &str = "terraform-provider-";

/// An unresolved provider: just the `owner/name` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderRef {
    pub owner: String,
    pub name: String,
}

impl ProviderRef {
    /// Parse an `owner/name` identifier, splitting on the first `/` only.
    pub fn parse(identifier: &str) -> Result<Self> {
        match identifier.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(Error::MalformedInput(identifier.to_string())),
        }
    }

    /// Repository name, e.g. `terraform-provider-aws`.
    #[must_use]
    pub fn repository(&self) -> String {
        format!("{REPOSITORY_PREFIX}{}", self.name)
    }
}

impl std::fmt::Display for ProviderRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A fully resolved provider. Only values of this type reach the enumerator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub owner: String,
    pub name: String,
    /// Tag name of the latest release, verbatim (usually `v`-prefixed).
    pub version: String,
    pub layout_era: LayoutEra,
}

impl Provider {
    /// Complete a [`ProviderRef`] with its resolved era and version.
    #[must_use]
    pub fn resolved(reference: ProviderRef, layout_era: LayoutEra, version: String) -> Self {
        Self {
            owner: reference.owner,
            name: reference.name,
            version,
            layout_era,
        }
    }

    /// Repository name, e.g. `terraform-provider-aws`.
    #[must_use]
    pub fn repository(&self) -> String {
        format!("{REPOSITORY_PREFIX}{}", self.name)
    }

    /// Layout policy for this provider's era.
    #[must_use]
    pub const fn policy(&self) -> &'static LayoutPolicy {
        policy_for(self.layout_era)
    }

    /// Version with one leading `v` removed, as used by the public registry.
    #[must_use]
    pub fn registry_version(&self) -> &str {
        self.version.strip_prefix('v').unwrap_or(&self.version)
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// What kind of documented object an entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Resource,
    DataSource,
}

impl EntityKind {
    /// Both kinds, in enumeration order.
    pub const ALL: [Self; 2] = [Self::Resource, Self::DataSource];

    /// Human label: `Resource` or `Data Source`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Resource => "Resource",
            Self::DataSource => "Data Source",
        }
    }

    /// Lowercased, hyphenated label: `resource` or `data-source`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::DataSource => "data-source",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One documented resource or data source of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: String,
    pub kind: EntityKind,
    pub provider: Arc<Provider>,
    pub raw_content_url: String,
}

impl Entity {
    /// Display title, e.g. `aws_instance`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{}_{}", self.provider.name, self.name)
    }

    /// Whether two entities refer to the same documented object.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.name == other.name
            && self.provider.owner == other.provider.owner
            && self.provider.name == other.provider.name
    }
}
