//! Show command implementation

use anyhow::{Context, Result};
use tfdocs_core::EntityKind;
use tfdocs_core::document::fetch_document;

use crate::utils::session::Session;

/// Print the documentation of one entity and remember the view
pub async fn execute(session: &Session, title: &str, kind: Option<EntityKind>) -> Result<()> {
    let entity = session.find(title, kind).await?;
    let markdown = fetch_document(session.client(), &entity)
        .await
        .with_context(|| format!("Failed to fetch documentation for '{}'", entity.title()))?;

    println!("{}", markdown.trim_end());
    session.remember(&entity);
    Ok(())
}
