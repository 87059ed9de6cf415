//! Outcomes of the mutating board operations.
//!
//! Wrong passwords and missing records are ordinary results here, not
//! errors. `Err(BoardError)` is reserved for store faults and bad input.
//! Threads are removed on delete while replies are tombstoned, so each gets
//! its own outcome type.

use super::types::Reply;

/// Result of deleting a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteThreadOutcome {
    /// The thread and all of its replies are gone.
    Deleted,
    /// The password did not match; nothing changed.
    WrongPassword,
    /// No thread with that ID.
    NotFound,
}

/// Result of deleting a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteReplyOutcome {
    /// The reply text was replaced with the tombstone marker.
    Tombstoned,
    /// The password did not match; nothing changed.
    WrongPassword,
    /// No thread with that ID.
    ThreadNotFound,
    /// The thread exists but has no reply with that ID.
    ReplyNotFound,
}

/// Result of reporting a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The thread is flagged (it may already have been).
    Reported,
    /// No thread with that ID.
    NotFound,
}

/// Result of reporting a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportReplyOutcome {
    /// The reply is flagged (it may already have been).
    Reported,
    /// No thread with that ID.
    ThreadNotFound,
    /// The thread exists but has no reply with that ID.
    ReplyNotFound,
}

/// Result of replying to a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddReplyOutcome {
    /// The stored reply, password included.
    Added(Reply),
    /// No thread with that ID.
    ThreadNotFound,
}
