//! Documentation layout conventions used by Terraform provider repositories.
//!
//! Older providers keep their docs under `website/docs/{r,d}` with
//! `.html.markdown` files; newer ones use `docs/{resources,data-sources}` with
//! plain `.md` files. Everything that builds a repository path goes through
//! [`policy_for`] so the two conventions stay declarative.

use serde::{Deserialize, Serialize};

use crate::EntityKind;

/// Which documentation directory convention a provider repository uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutEra {
    /// `website/docs/r`, `website/docs/d`, `.html.markdown`
    Legacy,
    /// `docs/resources`, `docs/data-sources`, `.md`
    Current,
}

impl LayoutEra {
    /// Name of the root entry whose presence marks a legacy repository.
    pub const LEGACY_MARKER: &'static str = "website";

    /// Pick the era from the names found in a repository root listing.
    pub fn detect<'a>(root_entries: impl IntoIterator<Item = &'a str>) -> Self {
        if root_entries
            .into_iter()
            .any(|name| name == Self::LEGACY_MARKER)
        {
            Self::Legacy
        } else {
            Self::Current
        }
    }
}

impl std::fmt::Display for LayoutEra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Current => f.write_str("current"),
        }
    }
}

/// Directory names and file suffix for one layout era.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPolicy {
    /// Directory holding all documentation, relative to the repository root.
    pub content_root_dir: &'static str,
    /// Sub-directory of `content_root_dir` holding resource docs.
    pub resource_dir_name: &'static str,
    /// Sub-directory of `content_root_dir` holding data-source docs.
    pub data_source_dir_name: &'static str,
    /// Suffix appended to an entity name to form its file name.
    pub file_suffix: &'static str,
}

impl LayoutPolicy {
    /// Directory name for the given entity kind.
    #[must_use]
    pub const fn kind_dir(&self, kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::Resource => self.resource_dir_name,
            EntityKind::DataSource => self.data_source_dir_name,
        }
    }

    /// `content_root_dir/kind_dir`
    #[must_use]
    pub fn kind_path(&self, kind: EntityKind) -> String {
        format!("{}/{}", self.content_root_dir, self.kind_dir(kind))
    }
}

const LEGACY: LayoutPolicy = LayoutPolicy {
    content_root_dir: "website/docs",
    resource_dir_name: "r",
    data_source_dir_name: "d",
    file_suffix: ".html.markdown",
};

const CURRENT: LayoutPolicy = LayoutPolicy {
    content_root_dir: "docs",
    resource_dir_name: "resources",
    data_source_dir_name: "data-sources",
    file_suffix: ".md",
};

/// Look up the layout policy for an era.
#[must_use]
pub const fn policy_for(era: LayoutEra) -> &'static LayoutPolicy {
    match era {
        LayoutEra::Legacy => &LEGACY,
        LayoutEra::Current => &CURRENT,
    }
}
