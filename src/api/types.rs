//! API request and response types

use crate::db::QueryHistory;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `/analyze/`.
///
/// Fields stay as raw JSON so any scalar is accepted; coercion happens in
/// the estimator.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub area: Option<Value>,
    #[serde(default)]
    pub bedrooms: Option<Value>,
    #[serde(default)]
    pub location_factor: Option<Value>,
}

/// Response for `/analyze/`
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub estimated_price: f64,
    pub message: String,
}

/// Request body for `/chat/`
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

/// Response for `/chat/`
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Response for the history listing
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<QueryHistory>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
