//! # tfdocs-core
//!
//! Core functionality for tfdocs - discovery and caching of Terraform provider
//! documentation published on GitHub.
//!
//! Given `owner/name` provider identifiers, the pipeline resolves each provider
//! to its latest tag, detects which documentation layout its repository uses,
//! lists the resources and data sources it documents, and derives raw-content
//! and public registry URLs for each of them.
//!
//! ## Architecture
//!
//! - **Layout**: the two documentation layouts and their directory names
//! - **Resolver**: `owner/name` to a resolved [`Provider`]
//! - **Enumerator**: a [`Provider`] to its [`Entity`] list
//! - **URLs**: pure URL templates over configurable [`Endpoints`]
//! - **Cache**: time-boxed entity lists keyed by the exact provider input
//! - **Orchestrator**: runs the above across a provider set, collecting failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tfdocs_core::cache::FileStore;
//! use tfdocs_core::orchestrator::{LoadMode, Orchestrator, ProviderSet};
//! use tfdocs_core::{Config, Storage};
//!
//! # async fn run() -> tfdocs_core::Result<()> {
//! let config = Config::load()?;
//! let storage = Storage::new()?;
//! let orchestrator = Orchestrator::new(
//!     config.client()?,
//!     config.strategy,
//!     FileStore::in_storage(&storage),
//! );
//!
//! let set = ProviderSet::from_identifiers(&config.providers);
//! let outcome = orchestrator.load(&set, LoadMode::PreferCache).await;
//! for entity in &outcome.entities {
//!     println!("{} ({})", entity.title(), entity.kind);
//! }
//! for failure in &outcome.failures {
//!     eprintln!("warning: {failure}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Per-provider failures never abort a run; they are reported as
//! [`ProviderFailure`] values next to the entities that did load.

/// Time-boxed cache of entity lists
pub mod cache;
/// Configuration loading and environment overrides
pub mod config;
/// Raw documentation retrieval and front-matter stripping
pub mod document;
/// Entity enumeration strategies
pub mod enumerator;
/// Error types and result aliases
pub mod error;
/// Minimal GitHub REST client
pub mod github;
/// Documentation layout conventions
pub mod layout;
/// Pipeline driver
pub mod orchestrator;
/// Recently viewed entities
pub mod recent;
/// Provider resolution
pub mod resolver;
/// Fuzzy search over entities
pub mod search;
/// Local filesystem storage for cached data
pub mod storage;
/// Core data types
pub mod types;
/// URL templates
pub mod urls;

// Re-export commonly used types
pub use config::{Config, FetchConfig};
pub use enumerator::EnumerationStrategy;
pub use error::{Error, ProviderFailure, Result};
pub use layout::{LayoutEra, LayoutPolicy, policy_for};
pub use storage::Storage;
pub use types::*;
pub use urls::Endpoints;
