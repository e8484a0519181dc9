use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::github::GitHubClient;
use crate::{Entity, Result};

/// Leading `---` ... `---` metadata block, including its closing line break.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static FRONT_MATTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A---[ \t]*\r?\n(?s:.*?\r?\n)??---[ \t]*(?:\r?\n|\z)").unwrap());

/// Remove a front-matter block from the very start of `content`.
///
/// Only a block opening on the first line is stripped; `---` rules later in
/// the document are left alone.
#[must_use]
pub fn strip_front_matter(content: &str) -> &str {
    FRONT_MATTER_RE
        .find(content)
        .map_or(content, |m| &content[m.end()..])
}

/// Fetch the raw documentation of `entity` and return it as markdown.
pub async fn fetch_document(client: &GitHubClient, entity: &Entity) -> Result<String> {
    let raw = client.fetch_text(&entity.raw_content_url).await?;
    let body = strip_front_matter(&raw);
    debug!(
        "Rendered {} ({} of {} bytes kept)",
        entity.title(),
        body.len(),
        raw.len()
    );
    Ok(body.trim_start_matches(['\r', '\n']).to_string())
}
