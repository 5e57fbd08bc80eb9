//! API route handlers
//!
//! Request handling for the three service endpoints, plus the HTTP mapping
//! for chat failures. User-facing error bodies are fixed Spanish strings;
//! the diagnostic detail only goes to the logs.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::catalog::Catalog;
use crate::chat::{ChatAnswer, ChatEngine, ChatError, KpiSummary};

/// Body returned with every 400 from the chat endpoint.
const INVALID_MESSAGE_ERROR: &str = "Mensaje inválido";

/// Body returned with every 500 from the chat endpoint.
const CHAT_FAILURE_ERROR: &str = "Fallo interno de chat";

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded project catalog, shared read-only
    pub catalog: Catalog,
    /// Chat engine behind POST /api/chat
    pub engine: Arc<ChatEngine>,
}

// ============================================================================
// Health Endpoint
// ============================================================================

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// GET /health - liveness probe
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

// ============================================================================
// Projects Endpoint
// ============================================================================

/// Catalog listing response
#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Catalog,
}

/// GET /api/projects - the catalog exactly as loaded
pub async fn get_projects(State(state): State<AppState>) -> Json<ProjectsResponse> {
    Json(ProjectsResponse {
        projects: state.catalog.clone(),
    })
}

// ============================================================================
// Chat Endpoint
// ============================================================================

/// Chat response payload
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    /// KPI object for the top match, `null` when nothing matched.
    pub kpis: Option<KpiSummary>,
    #[serde(rename = "usedModel")]
    pub used_model: String,
}

impl From<ChatAnswer> for ChatResponse {
    fn from(answer: ChatAnswer) -> Self {
        Self {
            reply: answer.reply,
            kpis: answer.kpis,
            used_model: answer.used_model,
        }
    }
}

/// POST /api/chat - answer one question about the catalog
///
/// The body must be a JSON object with a string `message`. A `history`
/// field is accepted for client compatibility and ignored. Anything else
/// (missing body, invalid JSON, wrong type) is rejected before any ranking
/// happens.
pub async fn post_chat(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<ChatResponse>, ChatError> {
    let message = body
        .as_ref()
        .and_then(|body| body.get("message"))
        .and_then(Value::as_str)
        .ok_or(ChatError::InvalidInput("message must be a string"))?;

    let answer = state.engine.answer(message).await?;
    Ok(Json(answer.into()))
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        match self {
            ChatError::InvalidInput(reason) => {
                debug!(reason, "Rejected chat request");
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": INVALID_MESSAGE_ERROR })),
                )
                    .into_response()
            }
            ChatError::Upstream(e) => {
                error!(error = %e, "Chat request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": CHAT_FAILURE_ERROR })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProjectRecord;
    use axum::body::to_bytes;

    fn create_test_state() -> AppState {
        let catalog = Catalog::new(vec![ProjectRecord {
            name: "Alpha".to_string(),
            description: "Modernización del alumbrado".to_string(),
            status: "activo".to_string(),
            progress: Some(40.0),
            responsible: None,
            last_update: None,
            tags: Vec::new(),
            documents: Vec::new(),
        }]);
        AppState {
            catalog: catalog.clone(),
            engine: Arc::new(ChatEngine::new(catalog, None)),
        }
    }

    #[tokio::test]
    async fn test_health_body() {
        let response = get_health().await;
        assert!(response.ok);
    }

    #[tokio::test]
    async fn test_projects_wraps_catalog() {
        let state = create_test_state();
        let response = get_projects(State(state)).await;
        let value = serde_json::to_value(&response.0).unwrap();

        assert_eq!(value["projects"][0]["name"], "Alpha");
        assert_eq!(value["projects"][0]["status"], "activo");
    }

    #[tokio::test]
    async fn test_chat_rejects_missing_message() {
        let state = create_test_state();
        let body = Json(serde_json::json!({ "history": [] }));

        let result = post_chat(State(state), Some(body)).await;
        assert!(matches!(result, Err(ChatError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_chat_rejects_non_string_message() {
        let state = create_test_state();
        let body = Json(serde_json::json!({ "message": 42 }));

        let result = post_chat(State(state), Some(body)).await;
        assert!(matches!(result, Err(ChatError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_chat_answers_valid_message() {
        let state = create_test_state();
        let body = Json(serde_json::json!({ "message": "estado de alpha" }));

        let response = post_chat(State(state), Some(body)).await.unwrap();
        assert_eq!(response.0.used_model, "local-fallback");
        assert!(response.0.reply.contains("Alpha"));
    }

    #[tokio::test]
    async fn test_invalid_input_maps_to_400_with_fixed_body() {
        let response = ChatError::InvalidInput("missing").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, serde_json::json!({ "error": "Mensaje inválido" }));
    }
}
