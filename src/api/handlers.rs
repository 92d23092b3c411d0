//! HTTP request handlers

use super::types::{
    AnalyzeRequest, AnalyzeResponse, ChatRequest, ChatResponse, ErrorResponse, HistoryResponse,
};
use super::AppState;
use crate::estimator::{estimate_price, format_price, PropertyInput};
use crate::history::{record_best_effort, HistoryStore};
use crate::responder::respond;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_HISTORY_LIMIT: u32 = 50;
pub const MAX_HISTORY_LIMIT: u32 = 500;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze/", post(analyze_property))
        .route("/chat/", post(chat))
        .route("/history/", get(list_history))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Price Estimate
// ============================================================

async fn analyze_property(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    let input = PropertyInput::from_values(
        req.area.as_ref(),
        req.bedrooms.as_ref(),
        req.location_factor.as_ref(),
    );
    let price = estimate_price(&input);
    let message = format!("Estimated property value: ₹{}", format_price(price));
    tracing::debug!(?input, price, "Computed estimate");

    let question = format!(
        "Analyze: area={}, bedrooms={}, location_factor={}",
        echo(req.area.as_ref(), "0"),
        echo(req.bedrooms.as_ref(), "0"),
        echo(req.location_factor.as_ref(), "1"),
    );
    record_best_effort(state.history.as_ref(), &question, &message).await;

    Json(AnalyzeResponse {
        estimated_price: price,
        message,
    })
}

/// Raw request value as it appears in the logged question
fn echo(value: Option<&Value>, missing: &str) -> String {
    match value {
        None => missing.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// ============================================================
// Chat
// ============================================================

async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Json<ChatResponse> {
    let reply = respond(req.message.as_ref());
    tracing::debug!(reply, "Chat reply selected");

    let question = echo(req.message.as_ref(), "");
    record_best_effort(state.history.as_ref(), &question, reply).await;

    Json(ChatResponse {
        reply: reply.to_string(),
    })
}

// ============================================================
// History
// ============================================================

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<u32>,
}

async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);

    let entries = state
        .history
        .recent(limit)
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(HistoryResponse { entries }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("pixel-perfect ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
