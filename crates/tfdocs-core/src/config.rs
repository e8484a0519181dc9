//! Configuration for the documentation pipeline.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. `config.toml` in the config directory (`TFDOCS_CONFIG_DIR`, or the
//!    platform config dir)
//! 3. environment variables (`TFDOCS_*`, `GITHUB_TOKEN`)
//!
//! The CLI applies its own `--providers` flag on top.
//!
//! ## Example Configuration File
//!
//! ```toml
//! providers = ["hashicorp/aws", "DataDog/datadog"]
//! strategy = "direct-listing"
//!
//! [endpoints]
//! api = "https://api.github.com"
//! raw = "https://raw.githubusercontent.com"
//! registry = "https://registry.terraform.io"
//!
//! [fetch]
//! timeout_secs = 30
//! ```
//!
//! ```rust
//! use tfdocs_core::Config;
//!
//! let config: Config = toml::from_str("providers = [\"hashicorp/google\"]")?;
//! assert_eq!(config.provider_input(), "hashicorp/google");
//! assert_eq!(config.fetch.timeout_secs, 30);
//! # Ok::<(), toml::de::Error>(())
//! ```

use crate::enumerator::EnumerationStrategy;
use crate::github::GitHubClient;
use crate::{Endpoints, Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Provider list used when nothing is configured.
pub const DEFAULT_PROVIDER: &str = "hashicorp/aws";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Provider identifiers in `owner/name` form, in display order.
    pub providers: Vec<String>,
    /// How entity listings are obtained.
    pub strategy: EnumerationStrategy,
    /// Remote hosts.
    pub endpoints: Endpoints,
    /// HTTP client settings.
    pub fetch: FetchConfig,
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// GitHub API token. Raises the anonymous rate limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            providers: vec![DEFAULT_PROVIDER.to_string()],
            strategy: EnumerationStrategy::default(),
            endpoints: Endpoints::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: crate::github::DEFAULT_TIMEOUT.as_secs(),
            github_token: None,
        }
    }
}

impl Config {
    /// Load from the default location and apply environment overrides.
    ///
    /// A missing file yields defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from `path` without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Location of `config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("TFDOCS_CONFIG_DIR") {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed).join(CONFIG_FILE));
            }
        }
        let project_dirs = directories::ProjectDirs::from("io", "tfdocs", "tfdocs")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join(CONFIG_FILE))
    }

    /// Apply environment-style overrides read through `lookup`.
    ///
    /// Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(list) = get("TFDOCS_PROVIDERS") {
            self.providers = split_identifiers(&list);
        }
        if let Some(api) = get("TFDOCS_GITHUB_API_URL") {
            self.endpoints.api = api;
        }
        if let Some(raw) = get("TFDOCS_RAW_URL") {
            self.endpoints.raw = raw;
        }
        if let Some(registry) = get("TFDOCS_REGISTRY_URL") {
            self.endpoints.registry = registry;
        }
        if let Some(token) = get("GITHUB_TOKEN") {
            self.fetch.github_token = Some(token);
        }
    }

    /// The configured providers as one comma-separated input string.
    #[must_use]
    pub fn provider_input(&self) -> String {
        self.providers.join(",")
    }

    /// Build the HTTP client these settings describe.
    pub fn client(&self) -> Result<GitHubClient> {
        GitHubClient::with_options(
            self.endpoints.clone(),
            Duration::from_secs(self.fetch.timeout_secs),
            self.fetch.github_token.as_deref(),
        )
    }
}

/// Split a comma-separated provider list, trimming and dropping blanks.
#[must_use]
pub fn split_identifiers(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
