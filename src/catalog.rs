//! In-memory project catalog
//!
//! The catalog is loaded once at startup from a JSON array of
//! [`ProjectRecord`]s and shared read-only for the lifetime of the process.
//! Every request sees the same immutable data; `Catalog` clones are
//! refcount bumps, never copies.
//!
//! A missing or malformed dataset is not fatal: the service starts with an
//! empty catalog and logs a warning, so the chat endpoint still answers with
//! its no-data reply instead of the process refusing to boot.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::types::ProjectRecord;

/// Error type for catalog loading
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only, reference-counted project catalog shared by every request.
///
/// Serializes transparently as the array of records, so handlers can embed it
/// in a response without copying the underlying data.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    projects: Arc<Vec<ProjectRecord>>,
}

impl Catalog {
    /// Wrap an already-loaded record list.
    pub fn new(projects: Vec<ProjectRecord>) -> Self {
        Self {
            projects: Arc::new(projects),
        }
    }

    /// Catalog with no records.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Load the catalog from a JSON file containing an array of records.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let projects: Vec<ProjectRecord> = serde_json::from_str(&raw)?;
        Ok(Self::new(projects))
    }

    /// Load the catalog, degrading to an empty one on any failure.
    ///
    /// A broken dataset must not stop the service: ranking and the chat
    /// orchestrator both handle an empty catalog at every call site.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => {
                info!(
                    count = catalog.len(),
                    path = %path.display(),
                    "Project catalog loaded"
                );
                catalog
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load project catalog — serving an empty catalog"
                );
                Self::empty()
            }
        }
    }

    /// All records, in dataset order.
    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
