//! URL command implementation

use anyhow::Result;
use tfdocs_core::EntityKind;

use crate::utils::session::Session;

/// Print the public (or raw) URL of one entity and remember the view
pub async fn execute(
    session: &Session,
    title: &str,
    kind: Option<EntityKind>,
    raw: bool,
) -> Result<()> {
    let entity = session.find(title, kind).await?;
    let url = if raw {
        entity.raw_content_url.clone()
    } else {
        session.client().endpoints().public_doc_url(&entity)
    };

    println!("{url}");
    session.remember(&entity);
    Ok(())
}
