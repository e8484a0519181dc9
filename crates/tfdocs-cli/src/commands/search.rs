//! Search command implementation

use anyhow::Result;
use colored::Colorize;
use serde_json::Value;
use tfdocs_core::EntityKind;
use tfdocs_core::orchestrator::LoadMode;
use tfdocs_core::search::search;

use crate::output::{OutputFormat, entity_to_json, print_json_items};
use crate::utils::formatting::{kind_label, title_width};
use crate::utils::session::{Session, no_providers_message};

/// Execute a fuzzy search over entity titles
pub async fn execute(
    session: &Session,
    query: &str,
    limit: usize,
    kind: Option<EntityKind>,
    format: OutputFormat,
) -> Result<()> {
    if session.providers().is_empty() {
        eprintln!("{}", no_providers_message());
    }

    let entities = if session.providers().is_empty() {
        Vec::new()
    } else {
        session.load(LoadMode::PreferCache).await.entities
    };
    let hits = search(&entities, query, kind, limit);

    match format {
        OutputFormat::Text => {
            if hits.is_empty() {
                println!("No matches for '{query}'");
                return Ok(());
            }
            let width = title_width(hits.iter().map(|hit| hit.entity));
            for hit in &hits {
                println!(
                    "{:<width$}  {:<11}  {}",
                    hit.entity.title(),
                    kind_label(hit.entity.kind),
                    hit.score.to_string().bright_black()
                );
            }
        },
        OutputFormat::Json | OutputFormat::Jsonl => {
            let endpoints = session.client().endpoints();
            let items: Vec<Value> = hits
                .iter()
                .map(|hit| {
                    let mut value = entity_to_json(hit.entity, endpoints);
                    value["score"] = hit.score.into();
                    value["matchField"] = serde_json::to_value(hit.match_field)
                        .unwrap_or(Value::Null);
                    value
                })
                .collect();
            print_json_items(&items, format)?;
        },
    }
    Ok(())
}
