//! Recent command implementation

use anyhow::Result;
use colored::Colorize;
use serde_json::Value;

use crate::output::{OutputFormat, entity_to_json, print_json_items};
use crate::utils::formatting::{kind_label, title_width};
use crate::utils::session::Session;

/// List recently viewed entities, most recent first
pub fn execute(session: &Session, format: OutputFormat) -> Result<()> {
    let views = session.recent().list();

    match format {
        OutputFormat::Text => {
            if views.is_empty() {
                println!("Nothing viewed yet. Use 'tfdocs show <TITLE>' to read a page.");
                return Ok(());
            }
            let width = title_width(views.iter().map(|view| &view.entity));
            for view in &views {
                println!(
                    "{:<width$}  {:<11}  {}",
                    view.entity.title(),
                    kind_label(view.entity.kind),
                    view.viewed_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black()
                );
            }
        },
        OutputFormat::Json | OutputFormat::Jsonl => {
            let endpoints = session.client().endpoints();
            let items: Vec<Value> = views
                .iter()
                .map(|view| {
                    let mut value = entity_to_json(&view.entity, endpoints);
                    value["viewedAt"] = Value::String(view.viewed_at.to_rfc3339());
                    value
                })
                .collect();
            print_json_items(&items, format)?;
        },
    }
    Ok(())
}
