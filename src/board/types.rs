//! Thread and reply models.
//!
//! `Thread` and `Reply` are the stored records, password and report flag
//! included. Everything handed to a reader goes through `ThreadView` and
//! `ReplyView`, which do not have those fields at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Text a reply is overwritten with when its author deletes it.
pub const TOMBSTONE: &str = "[deleted]";

/// Generate a fresh identifier for a thread or reply.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Normalise a client-supplied identifier.
///
/// Returns `None` for anything that is not a UUID; such an id can never
/// match a stored record.
pub fn parse_id(raw: &str) -> Option<String> {
    Uuid::parse_str(raw.trim()).ok().map(|id| id.to_string())
}

/// A reply as stored inside its parent thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Reply {
    /// Unique reply ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Reply body, or [`TOMBSTONE`] once deleted.
    pub text: String,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
    /// Whether someone flagged this reply.
    pub reported: bool,
    /// Password required to delete this reply.
    pub delete_password: String,
}

impl Reply {
    /// Create a new, unreported reply.
    pub fn new(text: impl Into<String>, delete_password: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            created_on: at,
            reported: false,
            delete_password: delete_password.into(),
        }
    }

    /// Whether the reply has been soft-deleted.
    pub fn is_tombstone(&self) -> bool {
        self.text == TOMBSTONE
    }

    /// Replace the text with the tombstone marker.
    ///
    /// Id, position and timestamps are left alone.
    pub fn tombstone(&mut self) {
        self.text = TOMBSTONE.to_string();
    }
}

/// A thread document with its embedded replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Thread {
    /// Unique thread ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Board name from the path the thread was posted under.
    pub board: String,
    /// Opening post text.
    pub text: String,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
    /// Timestamp of the latest activity (creation or last reply).
    pub bumped_on: DateTime<Utc>,
    /// Whether someone flagged this thread.
    pub reported: bool,
    /// Password required to delete this thread.
    pub delete_password: String,
    /// Replies in insertion order.
    pub replies: Vec<Reply>,
}

impl Thread {
    /// Create a new thread with no replies.
    pub fn new(
        board: impl Into<String>,
        text: impl Into<String>,
        delete_password: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_id(),
            board: board.into(),
            text: text.into(),
            created_on: at,
            bumped_on: at,
            reported: false,
            delete_password: delete_password.into(),
            replies: Vec::new(),
        }
    }

    /// Move `bumped_on` forward to `at`. Never moves it backwards.
    pub fn bump(&mut self, at: DateTime<Utc>) {
        if at > self.bumped_on {
            self.bumped_on = at;
        }
    }

    /// Find a reply by ID for modification.
    pub fn reply_mut(&mut self, reply_id: &str) -> Option<&mut Reply> {
        self.replies.iter_mut().find(|r| r.id == reply_id)
    }
}

/// Reader-facing view of a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReplyView {
    /// Reply ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Reply body.
    pub text: String,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
}

impl From<&Reply> for ReplyView {
    fn from(reply: &Reply) -> Self {
        Self {
            id: reply.id.clone(),
            text: reply.text.clone(),
            created_on: reply.created_on,
        }
    }
}

/// Reader-facing view of a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ThreadView {
    /// Thread ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Board name the thread was posted under.
    pub board: String,
    /// Opening post text.
    pub text: String,
    /// Creation timestamp.
    pub created_on: DateTime<Utc>,
    /// Latest activity timestamp.
    pub bumped_on: DateTime<Utc>,
    /// Total number of replies, including ones not shown.
    pub replycount: usize,
    /// Replies, oldest first.
    pub replies: Vec<ReplyView>,
}

impl ThreadView {
    /// View with every reply.
    pub fn full(thread: &Thread) -> Self {
        Self::with_replies(thread, &thread.replies)
    }

    /// View with only the latest `limit` replies, still oldest first.
    pub fn preview(thread: &Thread, limit: usize) -> Self {
        let start = thread.replies.len().saturating_sub(limit);
        Self::with_replies(thread, &thread.replies[start..])
    }

    fn with_replies(thread: &Thread, replies: &[Reply]) -> Self {
        Self {
            id: thread.id.clone(),
            board: thread.board.clone(),
            text: thread.text.clone(),
            created_on: thread.created_on,
            bumped_on: thread.bumped_on,
            replycount: thread.replies.len(),
            replies: replies.iter().map(ReplyView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn thread_with_replies(count: usize) -> Thread {
        let now = Utc::now();
        let mut thread = Thread::new("general", "opening", "secret", now);
        for i in 0..count {
            thread
                .replies
                .push(Reply::new(format!("reply {i}"), "pw", now + Duration::seconds(i as i64)));
        }
        thread
    }

    #[test]
    fn test_new_thread() {
        let now = Utc::now();
        let thread = Thread::new("general", "hello", "pw", now);
        assert_eq!(thread.created_on, thread.bumped_on);
        assert!(!thread.reported);
        assert!(thread.replies.is_empty());
        assert!(parse_id(&thread.id).is_some());
    }

    #[test]
    fn test_ids_are_unique() {
        let now = Utc::now();
        let a = Reply::new("a", "pw", now);
        let b = Reply::new("b", "pw", now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_parse_id() {
        let id = new_id();
        assert_eq!(parse_id(&id), Some(id.clone()));
        assert_eq!(parse_id(&format!("  {}  ", id.to_uppercase())), Some(id));
        assert_eq!(parse_id("not-an-id"), None);
        assert_eq!(parse_id(""), None);
    }

    #[test]
    fn test_bump_never_moves_backwards() {
        let now = Utc::now();
        let mut thread = Thread::new("b", "t", "p", now);

        thread.bump(now - Duration::seconds(10));
        assert_eq!(thread.bumped_on, now);

        let later = now + Duration::seconds(10);
        thread.bump(later);
        assert_eq!(thread.bumped_on, later);
    }

    #[test]
    fn test_tombstone_keeps_identity() {
        let now = Utc::now();
        let mut reply = Reply::new("hello", "pw", now);
        let id = reply.id.clone();

        reply.tombstone();

        assert!(reply.is_tombstone());
        assert_eq!(reply.id, id);
        assert_eq!(reply.created_on, now);
        assert_eq!(reply.delete_password, "pw");
    }

    #[test]
    fn test_reply_lookup() {
        let mut thread = thread_with_replies(2);
        let id = thread.replies[1].id.clone();

        let reply = thread.reply_mut(&id).unwrap();
        assert_eq!(reply.text, "reply 1");
        reply.reported = true;
        assert!(thread.replies[1].reported);
        assert!(thread.reply_mut("missing").is_none());
    }

    #[test]
    fn test_preview_keeps_latest_replies_oldest_first() {
        let thread = thread_with_replies(5);

        let view = ThreadView::preview(&thread, 3);
        let texts: Vec<&str> = view.replies.iter().map(|r| r.text.as_str()).collect();

        assert_eq!(texts, vec!["reply 2", "reply 3", "reply 4"]);
        assert_eq!(view.replycount, 5);
    }

    #[test]
    fn test_preview_with_fewer_replies_than_limit() {
        let thread = thread_with_replies(2);
        let view = ThreadView::preview(&thread, 3);
        assert_eq!(view.replies.len(), 2);
    }

    #[test]
    fn test_full_view_has_every_reply() {
        let thread = thread_with_replies(7);
        assert_eq!(ThreadView::full(&thread).replies.len(), 7);
    }

    #[test]
    fn test_views_do_not_serialize_secrets() {
        let mut thread = thread_with_replies(2);
        thread.reported = true;
        thread.replies[0].reported = true;

        let json = serde_json::to_value(ThreadView::full(&thread)).unwrap();

        assert!(json.get("delete_password").is_none());
        assert!(json.get("reported").is_none());
        for reply in json["replies"].as_array().unwrap() {
            assert!(reply.get("delete_password").is_none());
            assert!(reply.get("reported").is_none());
            assert!(reply.get("_id").is_some());
        }
    }

    #[test]
    fn test_stored_thread_serializes_full_record() {
        let thread = thread_with_replies(1);
        let json = serde_json::to_value(&thread).unwrap();

        assert_eq!(json["_id"], thread.id);
        assert_eq!(json["delete_password"], "secret");
        assert_eq!(json["reported"], false);
        assert_eq!(json["replies"][0]["delete_password"], "pw");

        let back: Thread = serde_json::from_value(json).unwrap();
        assert_eq!(back, thread);
    }
}
