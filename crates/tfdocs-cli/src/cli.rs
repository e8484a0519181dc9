//! # CLI Structure and Argument Parsing
//!
//! `tfdocs` lists, searches and renders the documentation of the resources and
//! data sources published by Terraform providers.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # Everything the configured providers document (cached for 24h)
//! tfdocs list
//! tfdocs --providers hashicorp/aws,DataDog/datadog list --kind data-source
//!
//! # Find and read
//! tfdocs search s3 bucket
//! tfdocs show aws_s3_bucket
//! tfdocs url aws_instance --kind resource
//!
//! # Refetch everything
//! tfdocs reload
//! ```
//!
//! Entities are addressed by their display title, `{provider}_{name}`. When a
//! provider documents a resource and a data source under the same name, pass
//! `--kind` to pick one.

use clap::{Parser, Subcommand, ValueEnum};
use tfdocs_core::EntityKind;

use crate::utils::cli_args::FormatArg;

/// Main CLI structure for the `tfdocs` command
#[derive(Parser, Clone, Debug)]
#[command(name = "tfdocs")]
#[command(version)]
#[command(about = "tfdocs - Terraform provider documentation in your terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Comma-separated `owner/name` providers (overrides config and `TFDOCS_PROVIDERS`)
    #[arg(long, global = true, value_name = "LIST")]
    pub providers: Option<String>,

    /// Enable verbose logging output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

/// Available subcommands for the `tfdocs` CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// List every resource and data source of the configured providers
    #[command(visible_alias = "ls")]
    List {
        /// Ignore the cache and fetch again
        #[arg(long)]
        reload: bool,

        /// Only list one kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Fuzzy search entity titles
    Search {
        /// Search terms, joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Maximum number of results
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,

        /// Only search one kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Print the documentation of an entity as markdown
    Show {
        /// Display title, e.g. `aws_instance`
        title: String,

        /// Disambiguate when a resource and a data source share a title
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Print the public registry URL of an entity
    Url {
        /// Display title, e.g. `aws_instance`
        title: String,

        /// Disambiguate when a resource and a data source share a title
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Print the raw source URL instead
        #[arg(long)]
        raw: bool,
    },

    /// Fetch all providers again and overwrite the cache
    Reload {
        #[command(flatten)]
        format: FormatArg,
    },

    /// Recently viewed entities, most recent first
    Recent {
        #[command(flatten)]
        format: FormatArg,
    },
}

/// `--kind` values
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Resource,
    DataSource,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Resource => Self::Resource,
            KindArg::DataSource => Self::DataSource,
        }
    }
}
