//! Board service.
//!
//! The thread and reply lifecycle: posting, listing, reporting and
//! password-gated deletion. Every mutation of a thread goes through a single
//! [`ThreadRepository::modify`] call, so the check and the write happen
//! against the same copy of the document.

use chrono::Utc;
use tracing::{debug, info};

use super::outcome::{
    AddReplyOutcome, DeleteReplyOutcome, DeleteThreadOutcome, ReportOutcome, ReportReplyOutcome,
};
use super::repository::{Change, ThreadRepository};
use super::types::{parse_id, Reply, Thread, ThreadView};
use crate::db::Database;
use crate::{BoardError, Result};

/// Number of threads returned by [`BoardService::list_recent_threads`].
pub const RECENT_THREAD_LIMIT: i64 = 10;

/// Number of replies shown per thread in the listing.
pub const PREVIEW_REPLY_LIMIT: usize = 3;

/// Maximum length for thread and reply text (in characters).
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Maximum length for a delete password (in characters).
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate thread or reply text.
fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(BoardError::Validation("text is required".to_string()));
    }
    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(BoardError::Validation(format!(
            "text must be at most {MAX_TEXT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a delete password.
fn validate_password(password: &str) -> Result<()> {
    if password.trim().is_empty() {
        return Err(BoardError::Validation(
            "delete_password is required".to_string(),
        ));
    }
    if password.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(BoardError::Validation(format!(
            "delete_password must be at most {MAX_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Service for thread and reply operations.
///
/// The board name is recorded on new threads but does not partition the
/// store: every board sees the same collection of threads.
pub struct BoardService<'a> {
    db: &'a Database,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn threads(&self) -> ThreadRepository<'_> {
        ThreadRepository::new(self.db.pool())
    }

    /// Start a new thread.
    ///
    /// Returns the stored record, password included, since the caller just
    /// supplied it.
    pub async fn create_thread(
        &self,
        board: &str,
        text: &str,
        delete_password: &str,
    ) -> Result<Thread> {
        validate_text(text)?;
        validate_password(delete_password)?;

        let thread = Thread::new(board, text, delete_password, Utc::now());
        self.threads().insert(&thread).await?;

        info!(thread_id = %thread.id, board, "Thread created");
        Ok(thread)
    }

    /// The most recently active threads, each with its latest replies.
    pub async fn list_recent_threads(&self, board: &str) -> Result<Vec<ThreadView>> {
        let threads = self.threads().list_recent(RECENT_THREAD_LIMIT).await?;
        debug!(board, count = threads.len(), "Listed recent threads");

        Ok(threads
            .iter()
            .map(|thread| ThreadView::preview(thread, PREVIEW_REPLY_LIMIT))
            .collect())
    }

    /// A thread with all of its replies, or `None` if it does not exist.
    pub async fn get_thread_with_replies(&self, thread_id: &str) -> Result<Option<ThreadView>> {
        let Some(thread_id) = parse_id(thread_id) else {
            return Ok(None);
        };

        let thread = self.threads().get(&thread_id).await?;
        Ok(thread.as_ref().map(ThreadView::full))
    }

    /// Permanently delete a thread and its replies if the password matches.
    pub async fn delete_thread(
        &self,
        thread_id: &str,
        delete_password: &str,
    ) -> Result<DeleteThreadOutcome> {
        let Some(thread_id) = parse_id(thread_id) else {
            return Ok(DeleteThreadOutcome::NotFound);
        };

        let mut outcome = DeleteThreadOutcome::NotFound;
        self.threads()
            .modify(&thread_id, |thread| {
                if thread.delete_password == delete_password {
                    outcome = DeleteThreadOutcome::Deleted;
                    Change::Deleted
                } else {
                    outcome = DeleteThreadOutcome::WrongPassword;
                    Change::Unchanged
                }
            })
            .await?;

        match outcome {
            DeleteThreadOutcome::Deleted => info!(thread_id = %thread_id, "Thread deleted"),
            _ => debug!(thread_id = %thread_id, ?outcome, "Thread not deleted"),
        }
        Ok(outcome)
    }

    /// Flag a thread for moderation. Reporting twice is harmless.
    pub async fn report_thread(&self, thread_id: &str) -> Result<ReportOutcome> {
        let Some(thread_id) = parse_id(thread_id) else {
            return Ok(ReportOutcome::NotFound);
        };

        let change = self
            .threads()
            .modify(&thread_id, |thread| {
                if thread.reported {
                    Change::Unchanged
                } else {
                    thread.reported = true;
                    Change::Updated
                }
            })
            .await?;

        let outcome = match change {
            Some(_) => ReportOutcome::Reported,
            None => ReportOutcome::NotFound,
        };
        debug!(thread_id = %thread_id, ?outcome, "Thread report");
        Ok(outcome)
    }

    /// Append a reply to a thread and bump the thread.
    ///
    /// The reply and the new `bumped_on` are written together. Returns the
    /// stored reply, password included.
    pub async fn add_reply(
        &self,
        thread_id: &str,
        text: &str,
        delete_password: &str,
    ) -> Result<AddReplyOutcome> {
        validate_text(text)?;
        validate_password(delete_password)?;

        let Some(thread_id) = parse_id(thread_id) else {
            return Ok(AddReplyOutcome::ThreadNotFound);
        };

        let now = Utc::now();
        let reply = Reply::new(text, delete_password, now);

        let change = self
            .threads()
            .modify(&thread_id, |thread| {
                thread.replies.push(reply.clone());
                thread.bump(now);
                Change::Updated
            })
            .await?;

        if change.is_none() {
            debug!(thread_id = %thread_id, "Reply to missing thread");
            return Ok(AddReplyOutcome::ThreadNotFound);
        }

        info!(thread_id = %thread_id, reply_id = %reply.id, "Reply added");
        Ok(AddReplyOutcome::Added(reply))
    }

    /// Tombstone a reply if the password matches.
    ///
    /// The reply keeps its ID, position and timestamps; only the text is
    /// replaced.
    pub async fn delete_reply(
        &self,
        thread_id: &str,
        reply_id: &str,
        delete_password: &str,
    ) -> Result<DeleteReplyOutcome> {
        let Some(thread_id) = parse_id(thread_id) else {
            return Ok(DeleteReplyOutcome::ThreadNotFound);
        };
        let reply_id = parse_id(reply_id);

        let mut outcome = DeleteReplyOutcome::ThreadNotFound;
        self.threads()
            .modify(&thread_id, |thread| {
                let reply = match reply_id.as_deref() {
                    Some(id) => thread.reply_mut(id),
                    None => None,
                };
                match reply {
                    None => {
                        outcome = DeleteReplyOutcome::ReplyNotFound;
                        Change::Unchanged
                    }
                    Some(reply) if reply.delete_password != delete_password => {
                        outcome = DeleteReplyOutcome::WrongPassword;
                        Change::Unchanged
                    }
                    Some(reply) => {
                        outcome = DeleteReplyOutcome::Tombstoned;
                        if reply.is_tombstone() {
                            Change::Unchanged
                        } else {
                            reply.tombstone();
                            Change::Updated
                        }
                    }
                }
            })
            .await?;

        match outcome {
            DeleteReplyOutcome::Tombstoned => {
                info!(thread_id = %thread_id, reply_id = ?reply_id, "Reply deleted")
            }
            _ => debug!(thread_id = %thread_id, ?outcome, "Reply not deleted"),
        }
        Ok(outcome)
    }

    /// Flag a reply for moderation. Reporting twice is harmless.
    pub async fn report_reply(&self, thread_id: &str, reply_id: &str) -> Result<ReportReplyOutcome> {
        let Some(thread_id) = parse_id(thread_id) else {
            return Ok(ReportReplyOutcome::ThreadNotFound);
        };
        let reply_id = parse_id(reply_id);

        let mut outcome = ReportReplyOutcome::ThreadNotFound;
        self.threads()
            .modify(&thread_id, |thread| {
                let reply = match reply_id.as_deref() {
                    Some(id) => thread.reply_mut(id),
                    None => None,
                };
                match reply {
                    None => {
                        outcome = ReportReplyOutcome::ReplyNotFound;
                        Change::Unchanged
                    }
                    Some(reply) => {
                        outcome = ReportReplyOutcome::Reported;
                        if reply.reported {
                            Change::Unchanged
                        } else {
                            reply.reported = true;
                            Change::Updated
                        }
                    }
                }
            })
            .await?;

        debug!(thread_id = %thread_id, ?outcome, "Reply report");
        Ok(outcome)
    }
}
