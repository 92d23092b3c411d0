//! Query history log
//!
//! Both endpoints record what was asked and what was answered. Writes are
//! best-effort: a failed write is logged and dropped, and the request
//! carries on as if it had succeeded.

#[cfg(test)]
pub mod testing;

use crate::db::{Database, QueryHistory};
use async_trait::async_trait;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

/// Append-only storage for question/response pairs
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append an entry stamped with the current time
    async fn record(&self, question: &str, response: &str) -> Result<QueryHistory, String>;

    /// Most recent entries, newest first
    async fn recent(&self, limit: u32) -> Result<Vec<QueryHistory>, String>;
}

#[async_trait]
impl<T: HistoryStore + ?Sized> HistoryStore for Arc<T> {
    async fn record(&self, question: &str, response: &str) -> Result<QueryHistory, String> {
        (**self).record(question, response).await
    }

    async fn recent(&self, limit: u32) -> Result<Vec<QueryHistory>, String> {
        (**self).recent(limit).await
    }
}

#[async_trait]
impl HistoryStore for Database {
    async fn record(&self, question: &str, response: &str) -> Result<QueryHistory, String> {
        self.insert_query(question, response).map_err(|e| e.to_string())
    }

    async fn recent(&self, limit: u32) -> Result<Vec<QueryHistory>, String> {
        self.list_recent(limit).map_err(|e| e.to_string())
    }
}

/// Run a side-effecting operation whose failure must not reach the caller.
///
/// Returns the value on success; on error the error is logged under
/// `operation` and discarded.
pub async fn best_effort<T, E, F>(operation: &str, fut: F) -> Option<T>
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    match fut.await {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(operation, error = %e, "Best-effort write failed, ignoring");
            None
        }
    }
}

/// Record a question/response pair without surfacing failures
pub async fn record_best_effort(store: &dyn HistoryStore, question: &str, response: &str) {
    if let Some(entry) = best_effort("record_history", store.record(question, response)).await {
        tracing::debug!(id = entry.id, question = %entry.summary(), "Recorded query history");
    }
}
