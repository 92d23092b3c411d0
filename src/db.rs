//! Database module for Pixel Perfect
//!
//! Provides the append-only query history log.

mod schema;

pub use schema::*;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("History entry not found: {0}")]
    EntryNotFound(i64),
    #[error("Database connection lock poisoned")]
    Poisoned,
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn conn(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::Poisoned)
    }

    fn run_migrations(&self) -> DbResult<()> {
        self.conn()?.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Append a question/response pair stamped with the current time
    pub fn insert_query(&self, question: &str, response: &str) -> DbResult<QueryHistory> {
        let conn = self.conn()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO query_history (question, response, created_at) VALUES (?1, ?2, ?3)",
            params![question, response, now.to_rfc3339()],
        )?;

        Ok(QueryHistory {
            id: conn.last_insert_rowid(),
            question: question.to_string(),
            response: response.to_string(),
            created_at: now,
        })
    }

    /// Get a history entry by ID
    #[allow(dead_code)] // Used in tests
    pub fn get_query(&self, id: i64) -> DbResult<QueryHistory> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, question, response, created_at FROM query_history WHERE id = ?1",
        )?;

        stmt.query_row(params![id], row_to_entry)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => DbError::EntryNotFound(id),
                other => DbError::Sqlite(other),
            })
    }

    /// Most recent entries, newest first
    pub fn list_recent(&self, limit: u32) -> DbResult<Vec<QueryHistory>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, question, response, created_at FROM query_history
             ORDER BY id DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit], row_to_entry)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// Total number of logged entries
    pub fn count(&self) -> DbResult<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM query_history", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<QueryHistory> {
    Ok(QueryHistory {
        id: row.get(0)?,
        question: row.get(1)?,
        response: row.get(2)?,
        created_at: parse_datetime(&row.get::<_, String>(3)?),
    })
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get_query() {
        let db = Database::open_in_memory().unwrap();

        let entry = db.insert_query("hi there", "Hello!").unwrap();
        assert_eq!(entry.question, "hi there");
        assert_eq!(entry.response, "Hello!");

        let fetched = db.get_query(entry.id).unwrap();
        assert_eq!(fetched.id, entry.id);
        assert_eq!(fetched.question, "hi there");
        assert_eq!(fetched.created_at.timestamp(), entry.created_at.timestamp());
    }

    #[test]
    fn test_get_missing_entry() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(db.get_query(42), Err(DbError::EntryNotFound(42))));
    }

    #[test]
    fn test_list_recent_is_newest_first() {
        let db = Database::open_in_memory().unwrap();
        db.insert_query("first", "a").unwrap();
        db.insert_query("second", "b").unwrap();
        db.insert_query("third", "c").unwrap();

        let recent = db.list_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].question, "third");
        assert_eq!(recent[1].question, "second");
        assert_eq!(db.count().unwrap(), 3);
    }

    #[test]
    fn test_accepts_empty_and_long_text() {
        let db = Database::open_in_memory().unwrap();
        let long = "area ".repeat(10_000);

        db.insert_query("", "generic").unwrap();
        let entry = db.insert_query(&long, "generic").unwrap();

        assert_eq!(db.get_query(entry.id).unwrap().question, long);
        assert_eq!(db.count().unwrap(), 2);
    }

    #[test]
    fn test_reopen_preserves_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.db");

        {
            let db = Database::open(&path).unwrap();
            db.insert_query("price?", "To estimate price...").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.count().unwrap(), 1);
        assert_eq!(db.list_recent(10).unwrap()[0].question, "price?");
    }
}
