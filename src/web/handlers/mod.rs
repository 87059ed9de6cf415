//! API handlers.

pub mod replies;
pub mod threads;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::db::Database;

pub use replies::*;
pub use threads::*;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Arc<Database>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

pub(crate) const SUCCESS: &str = "success";
pub(crate) const REPORTED: &str = "reported";
pub(crate) const INCORRECT_PASSWORD: &str = "incorrect password";
pub(crate) const THREAD_NOT_FOUND: &str = "thread not found";
pub(crate) const REPLY_NOT_FOUND: &str = "reply not found";

/// A plain-text outcome response.
pub(crate) fn text(status: StatusCode, body: &'static str) -> Response {
    (status, body).into_response()
}
