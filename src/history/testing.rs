//! Test doubles for [`HistoryStore`]

use super::HistoryStore;
use crate::db::QueryHistory;
use async_trait::async_trait;
use std::sync::Mutex;

/// Keeps entries in memory, oldest first
#[derive(Default)]
pub struct InMemoryHistory {
    entries: Mutex<Vec<QueryHistory>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<QueryHistory> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistory {
    async fn record(&self, question: &str, response: &str) -> Result<QueryHistory, String> {
        let mut entries = self.entries.lock().unwrap();
        let entry = QueryHistory {
            id: i64::try_from(entries.len()).unwrap() + 1,
            question: question.to_string(),
            response: response.to_string(),
            created_at: chrono::Utc::now(),
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn recent(&self, limit: u32) -> Result<Vec<QueryHistory>, String> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// Every operation fails, like a database that has gone away
pub struct FailingHistory;

#[async_trait]
impl HistoryStore for FailingHistory {
    async fn record(&self, _question: &str, _response: &str) -> Result<QueryHistory, String> {
        Err("Database error: unable to open database file".to_string())
    }

    async fn recent(&self, _limit: u32) -> Result<Vec<QueryHistory>, String> {
        Err("Database error: unable to open database file".to_string())
    }
}
