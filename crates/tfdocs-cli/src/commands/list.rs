//! List command implementation

use anyhow::Result;
use colored::Colorize;
use serde_json::Value;
use tfdocs_core::orchestrator::LoadMode;
use tfdocs_core::{Entity, EntityKind};

use crate::output::{OutputFormat, entity_to_json, print_json_items};
use crate::utils::formatting::{kind_label, title_width};
use crate::utils::session::{Session, no_providers_message};

/// Execute the list command
pub async fn execute(
    session: &Session,
    reload: bool,
    kind: Option<EntityKind>,
    format: OutputFormat,
) -> Result<()> {
    if session.providers().is_empty() {
        if format == OutputFormat::Text {
            println!("{}", no_providers_message());
        } else if format == OutputFormat::Json {
            println!("[]");
        }
        return Ok(());
    }

    let mode = if reload {
        LoadMode::Reload
    } else {
        LoadMode::PreferCache
    };
    let outcome = session.load(mode).await;
    let entities: Vec<&Entity> = outcome
        .entities
        .iter()
        .filter(|e| kind.is_none_or(|k| e.kind == k))
        .collect();

    match format {
        OutputFormat::Text => print_text(&entities, outcome.from_cache),
        OutputFormat::Json | OutputFormat::Jsonl => {
            let endpoints = session.client().endpoints();
            let items: Vec<Value> = entities
                .iter()
                .map(|entity| entity_to_json(entity, endpoints))
                .collect();
            print_json_items(&items, format)?;
        },
    }
    Ok(())
}

fn print_text(entities: &[&Entity], from_cache: bool) {
    if entities.is_empty() {
        println!("No documented resources or data sources found.");
        return;
    }

    let width = title_width(entities.iter().copied());
    let mut current_provider = None;
    for entity in entities {
        let provider = entity.provider.to_string();
        if current_provider.as_ref() != Some(&provider) {
            if current_provider.is_some() {
                println!();
            }
            println!(
                "{} {}",
                provider.bold(),
                entity.provider.version.bright_black()
            );
            current_provider = Some(provider);
        }
        println!("  {:<width$}  {}", entity.title(), kind_label(entity.kind));
    }

    let source = if from_cache { " (cached)" } else { "" };
    println!();
    println!("{} entities{}", entities.len(), source.bright_black());
}
