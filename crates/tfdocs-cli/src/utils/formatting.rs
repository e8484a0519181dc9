//! Formatting utilities

use colored::Colorize;
use tfdocs_core::{Entity, EntityKind};

/// Kind label colored per kind: resources cyan, data sources magenta.
pub fn kind_label(kind: EntityKind) -> colored::ColoredString {
    match kind {
        EntityKind::Resource => kind.label().cyan(),
        EntityKind::DataSource => kind.label().magenta(),
    }
}

/// Width of the widest title, for aligned text columns.
pub fn title_width<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> usize {
    entities
        .into_iter()
        .map(|e| e.title().len())
        .max()
        .unwrap_or(0)
}
