//! tfdocs CLI - Terraform provider documentation from the terminal
//!
//! This is the main entry point for the tfdocs command-line interface.
//! Command implementations live in separate modules under `commands`.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod output;
mod utils;

use cli::{Cli, Commands};
use utils::logging::initialize_logging;
use utils::session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    execute_command(cli).await
}

async fn execute_command(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;
    let session = Session::open(cli.providers.as_deref(), quiet)?;

    match cli.command {
        Commands::List {
            reload,
            kind,
            format,
        } => {
            commands::list(&session, reload, kind.map(Into::into), format.resolve()).await?;
        },

        Commands::Search {
            query,
            limit,
            kind,
            format,
        } => {
            let query = query.join(" ");
            commands::search(&session, &query, limit, kind.map(Into::into), format.resolve())
                .await?;
        },

        Commands::Show { title, kind } => {
            commands::show(&session, &title, kind.map(Into::into)).await?;
        },

        Commands::Url { title, kind, raw } => {
            commands::url(&session, &title, kind.map(Into::into), raw).await?;
        },

        Commands::Reload { format } => {
            commands::reload(&session, format.resolve()).await?;
        },

        Commands::Recent { format } => {
            commands::recent(&session, format.resolve())?;
        },
    }

    Ok(())
}
