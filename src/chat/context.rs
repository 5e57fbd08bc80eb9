//! Context block rendering
//!
//! Renders ranked matches into the plain-text block the provider receives as
//! grounding material. One numbered entry per match, Spanish field labels,
//! deterministic fallbacks for missing data so the provider never sees an
//! empty field.

use crate::ranker::ScoredMatch;
use crate::types::ProjectRecord;

/// Shown when an optional field has no value.
pub(crate) const NOT_AVAILABLE: &str = "N/D";

/// Shown for a project without documents, and as the whole block when there
/// are no matches at all.
pub(crate) const EMPTY_MARKER: &str = "—";

/// Render the ranked matches into the context block.
///
/// An empty match list renders as the bare empty marker, which tells the
/// provider explicitly that no catalog data applied.
pub fn build_context_block(matches: &[ScoredMatch<'_>]) -> String {
    if matches.is_empty() {
        return EMPTY_MARKER.to_string();
    }

    matches
        .iter()
        .enumerate()
        .map(|(i, m)| format_entry(i + 1, m.record))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_entry(position: usize, record: &ProjectRecord) -> String {
    let progress = record
        .progress
        .map_or_else(|| NOT_AVAILABLE.to_string(), |p| p.to_string());

    let documents = if record.documents.is_empty() {
        EMPTY_MARKER.to_string()
    } else {
        record.document_titles().collect::<Vec<_>>().join(", ")
    };

    format!(
        "#{position} {name}\nEstado: {status} | Avance: {progress} | Responsable: {responsible} | Última actualización: {updated}\nDocumentos: {documents}\nDescripción: {description}",
        position = position,
        name = record.name,
        status = record.status,
        progress = progress,
        responsible = record.responsible_name().unwrap_or(NOT_AVAILABLE),
        updated = record.last_update().unwrap_or(NOT_AVAILABLE),
        documents = documents,
        description = record.description,
    )
}
