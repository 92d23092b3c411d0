//! Database schema and types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL schema for initialization
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS query_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question TEXT NOT NULL,
    response TEXT NOT NULL,
    created_at TEXT NOT NULL
);
";

/// Characters of the question shown by [`QueryHistory::summary`]
pub const SUMMARY_CHARS: usize = 50;

/// One question/response pair from either endpoint.
///
/// Rows are append-only: nothing in this crate updates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryHistory {
    pub id: i64,
    pub question: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

impl QueryHistory {
    /// Leading characters of the question, for listings and logs
    pub fn summary(&self) -> String {
        self.question.chars().take(SUMMARY_CHARS).collect()
    }
}

impl fmt::Display for QueryHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
