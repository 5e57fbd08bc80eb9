//! Chat orchestration
//!
//! One question in, one answer out. The engine ranks the catalog, derives
//! the KPI summary from the top match, then answers through exactly one of
//! two paths:
//!
//! - **Provider path**: the configured provider gets the question plus the
//!   rendered context block, in a single call. A failed call fails the
//!   request; there is no retry and no fallback to the local answer.
//! - **Local path**: without a provider the reply is templated from the top
//!   match (or a fixed no-data reply) and labeled `local-fallback`.
//!
//! KPIs are always computed locally, before any provider call, so a
//! hallucinated reply can never bend the numbers shown next to it.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use super::context::{self, NOT_AVAILABLE};
use super::ChatError;
use crate::catalog::Catalog;
use crate::llm::{GenerationParams, GenerationProvider};
use crate::ranker;
use crate::types::ProjectRecord;

/// How many ranked projects feed the context block.
const CONTEXT_TOP_K: usize = 4;

/// Cap on generated reply length.
const MAX_REPLY_TOKENS: u32 = 300;

/// Low temperature keeps replies close to the supplied context.
const REPLY_TEMPERATURE: f32 = 0.2;

/// Model label reported when answering without a provider.
const LOCAL_MODEL_LABEL: &str = "local-fallback";

/// System instruction sent with every provider call.
const SYSTEM_PROMPT: &str = "Eres el asistente del portafolio de proyectos. \
    Responde de forma concisa. Si la pregunta es ambigua, pide una aclaración. \
    Usa el contexto proporcionado solo cuando sea relevante y nunca inventes \
    datos fuera de él. Cuando aplique, menciona Estado, Responsable y Última \
    actualización.";

/// Fixed reply when there is no provider and no catalog data.
const NO_LOCAL_DATA_REPLY: &str = "No tengo datos de proyectos para responder localmente.";

/// Fixed reply when the provider returns empty text.
const EMPTY_GENERATION_REPLY: &str = "No se pudo generar una respuesta.";

/// Key indicators for the top-ranked project, derived from catalog data only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    pub docs: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

impl KpiSummary {
    fn from_record(record: &ProjectRecord) -> Self {
        Self {
            status: record.status.clone(),
            progress: record.progress,
            docs: record.documents.len(),
            last_update: record.last_update().map(str::to_string),
        }
    }
}

/// A complete chat answer
#[derive(Debug, Clone)]
pub struct ChatAnswer {
    pub reply: String,
    /// `None` when the catalog produced no match at all.
    pub kpis: Option<KpiSummary>,
    /// Model that produced the reply, or the local fallback label.
    pub used_model: String,
}

/// Catalog-backed question answering engine
pub struct ChatEngine {
    catalog: Catalog,
    provider: Option<Arc<dyn GenerationProvider>>,
}

impl ChatEngine {
    /// Create an engine over `catalog`, optionally backed by a provider.
    pub fn new(catalog: Catalog, provider: Option<Arc<dyn GenerationProvider>>) -> Self {
        Self { catalog, provider }
    }

    /// Answer one user message.
    pub async fn answer(&self, message: &str) -> Result<ChatAnswer, ChatError> {
        let matches = ranker::rank(self.catalog.projects(), message, CONTEXT_TOP_K);
        let top = matches.first().map(|m| m.record);
        let kpis = top.map(KpiSummary::from_record);

        let Some(provider) = &self.provider else {
            return Ok(ChatAnswer {
                reply: local_reply(top),
                kpis,
                used_model: LOCAL_MODEL_LABEL.to_string(),
            });
        };

        let context_block = context::build_context_block(&matches);
        let user_prompt = format!(
            "Pregunta: {message}\n\nContexto de proyectos:\n{context_block}"
        );
        let params = GenerationParams {
            max_tokens: MAX_REPLY_TOKENS,
            temperature: REPLY_TEMPERATURE,
        };

        let start = Instant::now();
        let generated = provider
            .generate(SYSTEM_PROMPT, &user_prompt, &params)
            .await?;

        debug!(
            latency_ms = start.elapsed().as_millis(),
            model = provider.model_name(),
            context_projects = matches.len(),
            "Chat reply generated"
        );

        let generated = generated.trim();
        let reply = if generated.is_empty() {
            EMPTY_GENERATION_REPLY.to_string()
        } else {
            generated.to_string()
        };

        Ok(ChatAnswer {
            reply,
            kpis,
            used_model: provider.model_name().to_string(),
        })
    }
}

/// Deterministic reply used when no provider is configured.
fn local_reply(top: Option<&ProjectRecord>) -> String {
    match top {
        Some(record) => {
            let status = if record.status.is_empty() {
                NOT_AVAILABLE
            } else {
                &record.status
            };
            format!(
                "Según los datos locales, el proyecto {} está en estado {}. Responsable: {}. Última actualización: {}.",
                record.name,
                status,
                record.responsible_name().unwrap_or(NOT_AVAILABLE),
                record.last_update().unwrap_or(NOT_AVAILABLE),
            )
        }
        None => NO_LOCAL_DATA_REPLY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Responsible;

    fn record(name: &str, description: &str, status: &str) -> ProjectRecord {
        ProjectRecord {
            name: name.to_string(),
            description: description.to_string(),
            status: status.to_string(),
            progress: None,
            responsible: None,
            last_update: None,
            tags: Vec::new(),
            documents: Vec::new(),
        }
    }

    fn sample_catalog() -> Catalog {
        let mut alpha = record("Alpha", "Modernización del alumbrado", "activo");
        alpha.progress = Some(40.0);
        alpha.responsible = Some(Responsible {
            name: "Marta Ruiz".to_string(),
            extra: serde_json::Map::new(),
        });
        alpha.last_update = Some("2026-06-01".to_string());

        let beta = record("Beta", "Ampliación de la depuradora", "pausado");
        Catalog::new(vec![alpha, beta])
    }

    #[tokio::test]
    async fn test_local_path_templated_reply() {
        let engine = ChatEngine::new(sample_catalog(), None);
        let answer = engine.answer("estado de alpha").await.unwrap();

        assert_eq!(
            answer.reply,
            "Según los datos locales, el proyecto Alpha está en estado activo. Responsable: Marta Ruiz. Última actualización: 2026-06-01."
        );
        assert_eq!(answer.used_model, "local-fallback");
    }

    #[tokio::test]
    async fn test_local_path_missing_fields_use_fallbacks() {
        let engine = ChatEngine::new(sample_catalog(), None);
        let answer = engine.answer("depuradora").await.unwrap();

        assert_eq!(
            answer.reply,
            "Según los datos locales, el proyecto Beta está en estado pausado. Responsable: N/D. Última actualización: N/D."
        );
    }

    #[tokio::test]
    async fn test_local_path_empty_catalog_fixed_reply() {
        let engine = ChatEngine::new(Catalog::empty(), None);
        let answer = engine.answer("hola").await.unwrap();

        assert_eq!(answer.reply, NO_LOCAL_DATA_REPLY);
        assert!(answer.kpis.is_none());
        assert_eq!(answer.used_model, "local-fallback");
    }

    #[tokio::test]
    async fn test_kpis_come_from_top_match() {
        let engine = ChatEngine::new(sample_catalog(), None);
        let answer = engine.answer("alumbrado alpha").await.unwrap();

        let kpis = answer.kpis.expect("top match produces KPIs");
        assert_eq!(kpis.status, "activo");
        assert_eq!(kpis.progress, Some(40.0));
        assert_eq!(kpis.docs, 0);
        assert_eq!(kpis.last_update.as_deref(), Some("2026-06-01"));
    }

    #[test]
    fn test_kpi_serialization_omits_missing_optionals() {
        let kpis = KpiSummary {
            status: "pausado".to_string(),
            progress: None,
            docs: 2,
            last_update: None,
        };
        let value = serde_json::to_value(&kpis).unwrap();

        assert_eq!(value["status"], "pausado");
        assert_eq!(value["docs"], 2);
        assert!(value.get("progress").is_none());
        assert!(value.get("lastUpdate").is_none());
    }

    #[test]
    fn test_kpi_serialization_uses_camel_case() {
        let kpis = KpiSummary {
            status: "activo".to_string(),
            progress: Some(10.0),
            docs: 0,
            last_update: Some("2026-01-01".to_string()),
        };
        let value = serde_json::to_value(&kpis).unwrap();

        assert_eq!(value["lastUpdate"], "2026-01-01");
        assert_eq!(value["progress"], 10.0);
    }
}
