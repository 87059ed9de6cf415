//! Request DTOs for the HTTP API.
//!
//! Every body may arrive as JSON or as a urlencoded form; see
//! [`ValidatedBody`](super::ValidatedBody).

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validation::{new_password, not_empty_trimmed, post_text};

// ============================================================================
// Thread Requests
// ============================================================================

/// Create thread request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateThreadRequest {
    /// Opening post text.
    #[validate(custom(function = "post_text"))]
    pub text: String,
    /// Password needed later to delete the thread.
    #[validate(custom(function = "new_password"))]
    pub delete_password: String,
}

/// Delete thread request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteThreadRequest {
    #[validate(custom(function = "not_empty_trimmed"))]
    pub thread_id: String,
    #[validate(custom(function = "not_empty_trimmed"))]
    pub delete_password: String,
}

/// Report thread request.
///
/// Older clients send the thread ID as `report_id`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReportThreadRequest {
    #[serde(alias = "report_id")]
    #[validate(custom(function = "not_empty_trimmed"))]
    pub thread_id: String,
}

// ============================================================================
// Reply Requests
// ============================================================================

/// Create reply request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReplyRequest {
    /// Thread to reply to.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub thread_id: String,
    /// Reply text.
    #[validate(custom(function = "post_text"))]
    pub text: String,
    /// Password needed later to delete the reply.
    #[validate(custom(function = "new_password"))]
    pub delete_password: String,
}

/// Delete reply request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteReplyRequest {
    #[validate(custom(function = "not_empty_trimmed"))]
    pub thread_id: String,
    #[validate(custom(function = "not_empty_trimmed"))]
    pub reply_id: String,
    #[validate(custom(function = "not_empty_trimmed"))]
    pub delete_password: String,
}

/// Report reply request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReportReplyRequest {
    #[validate(custom(function = "not_empty_trimmed"))]
    pub thread_id: String,
    #[validate(custom(function = "not_empty_trimmed"))]
    pub reply_id: String,
}

/// Query for `GET /api/replies/:board`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ThreadQuery {
    /// Thread to fetch.
    pub thread_id: String,
}
