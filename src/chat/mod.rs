//! Chat answering pipeline
//!
//! Turns one user question into one answer backed by the project catalog:
//!
//! 1. Rank the catalog against the question ([`crate::ranker`]).
//! 2. Render the best matches into a numbered context block ([`context`]).
//! 3. Answer through the configured provider, or from local data when no
//!    provider exists ([`orchestrator`]).
//!
//! KPIs travel next to the reply and always come from the top-ranked record,
//! never from generated text.

use thiserror::Error;

use crate::llm::ProviderError;

pub mod context;
pub mod orchestrator;

pub use orchestrator::{ChatAnswer, ChatEngine, KpiSummary};

/// Chat request failures
///
/// `InvalidInput` is rejected before any ranking happens; `Upstream` means
/// the provider call failed and the request fails with it. There is no
/// silent downgrade to the local answer.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid chat request: {0}")]
    InvalidInput(&'static str),
    #[error("provider call failed: {0}")]
    Upstream(#[from] ProviderError),
}
