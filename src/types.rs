//! Shared data structures for the project-catalog Q&A pipeline
//!
//! This module defines the wire-faithful catalog model:
//! - `ProjectRecord`: one portfolio project as stored in the dataset JSON
//! - `Responsible`: the person accountable for a project
//! - `ProjectDocument`: a document attached to a project
//!
//! Field names follow the dataset's camelCase convention (`lastUpdate`), and
//! unknown keys on nested objects are preserved through flattened maps so
//! `/api/projects` returns the catalog exactly as loaded.

use serde::{Deserialize, Serialize};

// ============================================================================
// Catalog Records
// ============================================================================

/// A single project in the portfolio catalog.
///
/// Loaded once at startup and never mutated afterwards. Optional fields carry
/// no in-band sentinel: a missing value is `None`, never a literal placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectRecord {
    /// Project name. Expected to be catalog-unique, but duplicates are
    /// accepted silently — the ranker treats records independently.
    pub name: String,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Free-form status label (e.g. "activo", "completado").
    #[serde(default)]
    pub status: String,

    /// Completion percentage. No validated range — stored as given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,

    /// Accountable person, when assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible: Option<Responsible>,

    /// Last-update marker. Unvalidated date representation, kept opaque.
    #[serde(default, rename = "lastUpdate", skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,

    /// Ordered classification tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Ordered attached documents.
    #[serde(default)]
    pub documents: Vec<ProjectDocument>,
}

impl ProjectRecord {
    /// Responsible person's name, treating an empty string as unassigned.
    ///
    /// The dataset has loose hygiene: some records carry `responsible` objects
    /// with blank names. Display and KPI paths must not surface those blanks.
    pub fn responsible_name(&self) -> Option<&str> {
        self.responsible
            .as_ref()
            .map(|r| r.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Last-update string, treating an empty string as missing.
    pub fn last_update(&self) -> Option<&str> {
        self.last_update.as_deref().filter(|s| !s.is_empty())
    }

    /// Titles of all attached documents, in catalog order.
    pub fn document_titles(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|doc| doc.title.as_str())
    }
}

/// Person accountable for a project. Carries at least a `name`; any extra
/// fields in the dataset (email, role, ...) ride along untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Responsible {
    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Document attached to a project. Only `title` participates in ranking and
/// context assembly; extra fields are preserved for `/api/projects`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProjectDocument {
    #[serde(default)]
    pub title: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
