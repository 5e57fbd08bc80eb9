//! Relevance ranking over the project catalog
//!
//! Scores every record against a free-text query and returns the best
//! matches in a deterministic order. The scoring model is intentionally
//! simple and fully local:
//!
//! ## Scoring rules
//!
//! - The query is lowercased and split on whitespace into terms.
//! - Each record exposes a lowercase searchable text built from its name,
//!   description, status, responsible name, tags and document titles.
//!   Missing optional fields contribute nothing.
//! - Each term adds one point per non-overlapping occurrence inside the
//!   searchable text. Plain substring matching, no word boundaries, so a
//!   term like "plan" also hits "planificación".
//! - A record whose full name appears inside the query earns a fixed
//!   bonus on top of the term points.
//!
//! Ties keep catalog order (the sort is stable), so equal-score results
//! are reproducible across calls.

use crate::types::ProjectRecord;

/// Extra points when the query mentions a record by its full name.
pub const NAME_MENTION_BONUS: usize = 3;

/// A catalog record paired with its relevance score for one query.
#[derive(Debug, Clone, Copy)]
pub struct ScoredMatch<'a> {
    pub record: &'a ProjectRecord,
    pub score: usize,
}

/// Rank `projects` against `query` and return at most `limit` matches,
/// best first.
///
/// Zero-score records are still eligible: with a large enough `limit` the
/// whole catalog comes back, ordered by score and then by catalog position.
pub fn rank<'a>(
    projects: &'a [ProjectRecord],
    query: &str,
    limit: usize,
) -> Vec<ScoredMatch<'a>> {
    if limit == 0 || projects.is_empty() {
        return Vec::new();
    }

    let query_lower = query.to_lowercase();
    let terms: Vec<&str> = query_lower.split_whitespace().collect();

    let mut scored: Vec<ScoredMatch<'a>> = projects
        .iter()
        .map(|record| ScoredMatch {
            record,
            score: score_record(record, &query_lower, &terms),
        })
        .collect();

    // Stable sort: equal scores keep their catalog order.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Score a single record: one point per term occurrence plus the name
/// mention bonus.
fn score_record(record: &ProjectRecord, query_lower: &str, terms: &[&str]) -> usize {
    let haystack = searchable_text(record);

    let mut score: usize = terms
        .iter()
        .map(|term| haystack.matches(term).count())
        .sum();

    if query_lower.contains(&record.name.to_lowercase()) {
        score += NAME_MENTION_BONUS;
    }

    score
}

/// Lowercase text blob the terms are matched against.
fn searchable_text(record: &ProjectRecord) -> String {
    let mut parts: Vec<&str> =
        Vec::with_capacity(4 + record.tags.len() + record.documents.len());
    parts.push(record.name.as_str());
    parts.push(record.description.as_str());
    parts.push(record.status.as_str());
    if let Some(name) = record.responsible_name() {
        parts.push(name);
    }
    parts.extend(record.tags.iter().map(String::as_str));
    parts.extend(record.document_titles());

    parts.join(" ").to_lowercase()
}
