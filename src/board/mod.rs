//! Message board module.
//!
//! Threads are stored as whole documents with their replies embedded:
//! - `types`: stored records and the reader-facing views
//! - `repository`: document storage with atomic read-modify-write
//! - `service`: the thread and reply lifecycle
//! - `outcome`: results of the mutating operations

mod outcome;
mod repository;
mod service;
mod types;

pub use outcome::{
    AddReplyOutcome, DeleteReplyOutcome, DeleteThreadOutcome, ReportOutcome, ReportReplyOutcome,
};
pub use repository::{Change, ThreadRepository};
pub use service::{
    BoardService, MAX_PASSWORD_LENGTH, MAX_TEXT_LENGTH, PREVIEW_REPLY_LIMIT, RECENT_THREAD_LIMIT,
};
pub use types::{new_id, parse_id, Reply, ReplyView, Thread, ThreadView, TOMBSTONE};
