//! Thread document repository.
//!
//! Each thread is stored as a single JSON document with its replies
//! embedded, so every change to a thread (new reply, tombstone, report
//! flag) is a rewrite of one row. Rewrites are guarded by the row's
//! `version` column: a write only lands if nobody else wrote the row since
//! it was read.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use super::types::Thread;
use crate::db::DbPool;
use crate::{BoardError, Result};

/// How many times a read-modify-write is retried after losing a race.
const MAX_MODIFY_ATTEMPTS: usize = 8;

/// What a [`ThreadRepository::modify`] callback did to the thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nothing to write.
    Unchanged,
    /// Write the modified document back.
    Updated,
    /// Remove the document.
    Deleted,
}

/// Sortable text form of a timestamp.
///
/// Fixed-width UTC with microseconds, so lexical order is time order.
fn sort_key(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Repository for thread documents.
pub struct ThreadRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ThreadRepository<'a> {
    /// Create a new ThreadRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new thread document.
    pub async fn insert(&self, thread: &Thread) -> Result<()> {
        let document = serde_json::to_string(thread)?;

        sqlx::query("INSERT INTO threads (id, board, bumped_on, document) VALUES (?, ?, ?, ?)")
            .bind(&thread.id)
            .bind(&thread.board)
            .bind(sort_key(&thread.bumped_on))
            .bind(document)
            .execute(self.pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(())
    }

    /// Get a thread by ID.
    pub async fn get(&self, id: &str) -> Result<Option<Thread>> {
        let document: Option<String> =
            sqlx::query_scalar("SELECT document FROM threads WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool)
                .await
                .map_err(|e| BoardError::Database(e.to_string()))?;

        match document {
            Some(document) => Ok(Some(serde_json::from_str(&document)?)),
            None => Ok(None),
        }
    }

    /// List threads by latest activity, newest first.
    ///
    /// Threads bumped at the same instant come out in reverse insertion
    /// order.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<Thread>> {
        let documents: Vec<String> = sqlx::query_scalar(
            "SELECT document FROM threads ORDER BY bumped_on DESC, seq DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        documents
            .iter()
            .map(|document| serde_json::from_str(document).map_err(BoardError::from))
            .collect()
    }

    /// Count all stored threads.
    #[cfg(test)]
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM threads")
            .fetch_one(self.pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;
        Ok(count)
    }

    /// Atomically read, modify and write back one thread.
    ///
    /// `apply` receives a freshly loaded copy of the thread and says what to
    /// do with it. If another writer got in between the read and the write,
    /// the thread is reloaded and `apply` runs again on the new copy, so it
    /// may be called more than once.
    ///
    /// Returns `None` if the thread does not exist.
    pub async fn modify<F>(&self, id: &str, mut apply: F) -> Result<Option<Change>>
    where
        F: FnMut(&mut Thread) -> Change + Send,
    {
        for attempt in 1..=MAX_MODIFY_ATTEMPTS {
            let row: Option<(i64, String)> =
                sqlx::query_as("SELECT version, document FROM threads WHERE id = ?")
                    .bind(id)
                    .fetch_optional(self.pool)
                    .await
                    .map_err(|e| BoardError::Database(e.to_string()))?;

            let Some((version, document)) = row else {
                return Ok(None);
            };

            let mut thread: Thread = serde_json::from_str(&document)?;
            let change = apply(&mut thread);

            let result = match change {
                Change::Unchanged => return Ok(Some(change)),
                Change::Updated => {
                    let document = serde_json::to_string(&thread)?;
                    sqlx::query(
                        "UPDATE threads SET document = ?, bumped_on = ?, version = version + 1
                         WHERE id = ? AND version = ?",
                    )
                    .bind(document)
                    .bind(sort_key(&thread.bumped_on))
                    .bind(id)
                    .bind(version)
                    .execute(self.pool)
                    .await
                }
                Change::Deleted => {
                    sqlx::query("DELETE FROM threads WHERE id = ? AND version = ?")
                        .bind(id)
                        .bind(version)
                        .execute(self.pool)
                        .await
                }
            }
            .map_err(|e| BoardError::Database(e.to_string()))?;

            if result.rows_affected() > 0 {
                return Ok(Some(change));
            }

            debug!(thread_id = id, attempt, "Thread changed during update, retrying");
        }

        Err(BoardError::Conflict(format!(
            "thread {id} kept changing during update"
        )))
    }
}
