//! msgboard - anonymous message board backend
//!
//! Threads with embedded replies, password-gated deletion and report flags,
//! served over HTTP and stored in SQLite.

pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use board::{
    AddReplyOutcome, BoardService, DeleteReplyOutcome, DeleteThreadOutcome, Reply, ReplyView,
    ReportOutcome, ReportReplyOutcome, Thread, ThreadView,
};
pub use config::Config;
pub use db::Database;
pub use error::{BoardError, Result};
pub use web::WebServer;
