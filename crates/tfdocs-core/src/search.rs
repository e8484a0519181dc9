use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::Serialize;

use crate::{Entity, EntityKind};

/// Which field of an entity produced the best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    /// The display title, e.g. `aws_instance`.
    Title,
    /// The kind label, e.g. `Data Source`.
    Kind,
}

/// One ranked search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub entity: &'a Entity,
    pub score: i64,
    pub match_field: MatchField,
}

/// Fuzzy-match `query` against each entity's title and kind label.
///
/// Results are sorted by score, best first; ties keep input order. A blank
/// query matches nothing. `kind` restricts the candidates.
#[must_use]
pub fn search<'a>(
    entities: &'a [Entity],
    query: &str,
    kind: Option<EntityKind>,
    limit: usize,
) -> Vec<SearchHit<'a>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut hits: Vec<SearchHit<'a>> = entities
        .iter()
        .filter(|entity| kind.is_none_or(|k| entity.kind == k))
        .filter_map(|entity| {
            let title = matcher
                .fuzzy_match(&entity.title().to_lowercase(), &query)
                .map(|score| (score, MatchField::Title));
            let label = matcher
                .fuzzy_match(&entity.kind.label().to_lowercase(), &query)
                .map(|score| (score, MatchField::Kind));

            // Title wins ties
            let best = match (title, label) {
                (Some(t), Some(l)) if l.0 > t.0 => Some(l),
                (Some(t), _) => Some(t),
                (None, l) => l,
            };
            best.map(|(score, match_field)| SearchHit {
                entity,
                score,
                match_field,
            })
        })
        .collect();

    // Stable sort keeps input order for equal scores
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(limit);
    hits
}
