//! HTTP routes.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use civicsim_domain::OrdinanceOutcome;
use civicsim_shared::{ChatRequest, ChatResponse, ErrorBody, JudgeRequest};

use crate::app::App;
use crate::infrastructure::correlation::{CorrelationId, CORRELATION_HEADER};
use crate::infrastructure::ports::LlmError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/judge", post(judge))
}

async fn health() -> &'static str {
    "OK"
}

fn correlation_id(headers: &HeaderMap) -> CorrelationId {
    CorrelationId::from_header(
        headers
            .get(CORRELATION_HEADER)
            .and_then(|v| v.to_str().ok()),
    )
}

async fn chat(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let correlation_id = correlation_id(&headers);
    tracing::debug!(
        correlation_id = %correlation_id.short(),
        turns = request.history.len(),
        "Forwarding chat"
    );
    let response = app
        .use_cases
        .oracle
        .forward_chat
        .execute(request)
        .await
        .map_err(|e| ApiError::from_llm(e, correlation_id))?;
    Ok(Json(response))
}

async fn judge(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    Json(request): Json<JudgeRequest>,
) -> Result<Json<OrdinanceOutcome>, ApiError> {
    let correlation_id = correlation_id(&headers);
    tracing::debug!(correlation_id = %correlation_id.short(), "Evaluating ordinance");
    let outcome = app
        .use_cases
        .oracle
        .evaluate_ordinance
        .execute(request)
        .await
        .map_err(|e| ApiError::from_llm(e, correlation_id))?;
    Ok(Json(outcome))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    /// The server holds no upstream credential.
    MissingCredential(&'static str),
    /// Upstream answered with a non-success status; passed through as is.
    Upstream { status: u16, detail: String },
    Internal(String),
}

impl ApiError {
    fn from_llm(e: LlmError, correlation_id: CorrelationId) -> Self {
        tracing::warn!(correlation_id = %correlation_id.short(), error = %e, "Upstream generation failed");
        e.into()
    }
}

impl From<LlmError> for ApiError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingCredential(var) => ApiError::MissingCredential(var),
            LlmError::Upstream { status, detail } => ApiError::Upstream { status, detail },
            LlmError::RequestFailed(msg) | LlmError::InvalidResponse(msg) => ApiError::Internal(msg),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::MissingCredential(var) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(format!("Missing {}", var))),
            )
                .into_response(),
            ApiError::Upstream { status, detail } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, Json(ErrorBody::new("Upstream error").with_detail(detail))).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Oracle request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new("Internal error")),
                )
                    .into_response()
            }
        }
    }
}
