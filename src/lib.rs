//! Faro: project portfolio assistant
//!
//! Spanish-facing HTTP service answering natural-language questions about an
//! in-memory catalog of organizational projects.
//!
//! ## Architecture
//!
//! - **Ranker**: substring-frequency relevance scoring over the catalog
//! - **Chat**: single-call orchestration with provider and local paths
//! - **LLM Module**: OpenAI-compatible provider behind a trait
//! - **API**: Axum endpoints plus the embedded front-end

pub mod api;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod llm;
pub mod ranker;
pub mod types;

// Re-export the catalog container
pub use catalog::Catalog;

// Re-export chat components
pub use chat::{ChatAnswer, ChatEngine, ChatError, KpiSummary};

// Re-export configuration
pub use config::Config;

// Re-export commonly used types
pub use types::{ProjectDocument, ProjectRecord, Responsible};
