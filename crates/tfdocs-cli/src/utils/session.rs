//! Everything a command needs: configuration, storage and the pipeline.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use colored::Colorize;
use tfdocs_core::cache::FileStore;
use tfdocs_core::github::GitHubClient;
use tfdocs_core::orchestrator::{LoadMode, LoadOutcome, Orchestrator, ProviderSet};
use tfdocs_core::recent::RecentViews;
use tfdocs_core::{Config, Entity, EntityKind, Storage};
use tracing::warn;

pub struct Session {
    client: GitHubClient,
    orchestrator: Orchestrator<FileStore>,
    recent: RecentViews,
    providers: ProviderSet,
    quiet: bool,
}

impl Session {
    /// Load configuration and open the data directory.
    ///
    /// `providers_override` replaces the configured provider list.
    pub fn open(providers_override: Option<&str>, quiet: bool) -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        let storage = Storage::new().context("Failed to open data directory")?;
        let client = config.client().context("Failed to create HTTP client")?;

        let providers = providers_override.map_or_else(
            || ProviderSet::from_identifiers(&config.providers),
            ProviderSet::parse,
        );

        Ok(Self {
            orchestrator: Orchestrator::new(
                client.clone(),
                config.strategy,
                FileStore::in_storage(&storage),
            ),
            recent: RecentViews::in_storage(&storage),
            client,
            providers,
            quiet,
        })
    }

    pub const fn client(&self) -> &GitHubClient {
        &self.client
    }

    pub const fn providers(&self) -> &ProviderSet {
        &self.providers
    }

    pub const fn recent(&self) -> &RecentViews {
        &self.recent
    }

    /// Run the pipeline (or serve the cache), reporting provider failures on stderr.
    pub async fn load(&self, mode: LoadMode) -> LoadOutcome {
        let outcome = self.orchestrator.load(&self.providers, mode).await;
        if !self.quiet {
            for failure in &outcome.failures {
                eprintln!("{} {}", "warning:".yellow().bold(), failure);
            }
        }
        outcome
    }

    /// Find the single entity with display title `title`.
    pub async fn find(&self, title: &str, kind: Option<EntityKind>) -> Result<Entity> {
        if self.providers.is_empty() {
            bail!("{}", no_providers_message());
        }

        let entities = self.load(LoadMode::PreferCache).await.entities;
        let mut matches: Vec<Entity> = entities
            .into_iter()
            .filter(|e| e.title() == title && kind.is_none_or(|k| e.kind == k))
            .collect();

        match matches.len() {
            0 => bail!("No resource or data source titled '{title}'. Try `tfdocs search {title}`."),
            1 => Ok(matches.remove(0)),
            _ => {
                let candidates: Vec<String> = matches
                    .iter()
                    .map(|e| format!("{} {}", e.provider, e.kind.slug()))
                    .collect();
                bail!(
                    "'{title}' is ambiguous ({}); pass --kind or narrow --providers",
                    candidates.join(", ")
                )
            },
        }
    }

    /// Record a view. Failures are logged; the command still succeeds.
    pub fn remember(&self, entity: &Entity) {
        if let Err(e) = self.recent.record(entity, Utc::now()) {
            warn!("Failed to record recent view of {}: {}", entity.title(), e);
        }
    }
}

/// Shown whenever the provider list is empty.
pub fn no_providers_message() -> String {
    let location = Config::config_path().map_or_else(
        |_| "config.toml".to_string(),
        |path| path.display().to_string(),
    );
    format!(
        "No providers configured. Set `providers` in {location}, TFDOCS_PROVIDERS, or pass --providers owner/name."
    )
}
