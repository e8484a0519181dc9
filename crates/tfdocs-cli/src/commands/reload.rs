//! Reload command implementation

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use tfdocs_core::orchestrator::LoadMode;

use crate::output::OutputFormat;
use crate::utils::session::{Session, no_providers_message};

/// Run the whole pipeline and overwrite the cached record
pub async fn execute(session: &Session, format: OutputFormat) -> Result<()> {
    let providers = session.providers();
    if providers.is_empty() {
        if format == OutputFormat::Text {
            println!("{}", no_providers_message());
        }
        return Ok(());
    }

    let outcome = session.load(LoadMode::Reload).await;
    let attempted = providers.identifiers().len();
    let loaded = attempted - outcome.failures.len().min(attempted);

    match format {
        OutputFormat::Text => {
            let summary = format!(
                "Reloaded {} entities from {loaded}/{attempted} providers",
                outcome.entities.len()
            );
            if outcome.failures.is_empty() {
                println!("{} {summary}", "✓".green());
            } else {
                println!("{} {summary}", "!".yellow());
            }
        },
        OutputFormat::Json | OutputFormat::Jsonl => {
            let failures: Vec<_> = outcome
                .failures
                .iter()
                .map(|failure| {
                    json!({
                        "provider": failure.identifier,
                        "category": failure.error.category(),
                        "error": failure.error.to_string(),
                    })
                })
                .collect();
            let report = json!({
                "providers": providers.identifiers(),
                "entities": outcome.entities.len(),
                "failures": failures,
            });
            if format == OutputFormat::Jsonl {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        },
    }
    Ok(())
}
