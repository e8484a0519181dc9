//! Output formats and the JSON shapes shared by commands.

use serde_json::{Value, json};
use tfdocs_core::{Endpoints, Entity};

/// Output format options supported by listing commands
///
/// - **Text**: colored, human-readable lines
/// - **Json**: a single pretty-printed JSON array or object
/// - **Jsonl**: one JSON object per line
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty text output (default on a terminal)
    Text,
    /// Single JSON document
    Json,
    /// Newline-delimited JSON
    #[value(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    /// Whether this format is meant for machines.
    pub const fn is_machine(self) -> bool {
        matches!(self, Self::Json | Self::Jsonl)
    }
}

/// JSON shape of an entity.
pub fn entity_to_json(entity: &Entity, endpoints: &Endpoints) -> Value {
    json!({
        "title": entity.title(),
        "name": entity.name,
        "kind": entity.kind.slug(),
        "provider": entity.provider.to_string(),
        "version": entity.provider.version,
        "layoutEra": entity.provider.layout_era,
        "rawUrl": entity.raw_content_url,
        "docUrl": endpoints.public_doc_url(entity),
    })
}

/// Print `items` as a JSON array or as JSON lines.
pub fn print_json_items(items: &[Value], format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Jsonl {
        for item in items {
            println!("{}", serde_json::to_string(item)?);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(items)?);
    }
    Ok(())
}
