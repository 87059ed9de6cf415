//! Reply handlers.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{
    text, AppState, INCORRECT_PASSWORD, REPLY_NOT_FOUND, REPORTED, SUCCESS, THREAD_NOT_FOUND,
};
use crate::board::{
    AddReplyOutcome, BoardService, DeleteReplyOutcome, Reply, ReportReplyOutcome, ThreadView,
};
use crate::web::dto::{
    CreateReplyRequest, DeleteReplyRequest, ReportReplyRequest, ThreadQuery, ValidatedBody,
};
use crate::web::error::ApiError;

/// GET /api/replies/:board?thread_id= - Get a thread with every reply.
#[utoipa::path(
    get,
    path = "/api/replies/{board}",
    tag = "replies",
    params(
        ("board" = String, Path, description = "Board name"),
        ThreadQuery
    ),
    responses(
        (status = 200, description = "Thread with all replies", body = ThreadView),
        (status = 400, description = "Missing or malformed thread_id"),
        (status = 404, description = "thread not found", body = String)
    )
)]
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Path(_board): Path<String>,
    query: Result<Query<ThreadQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::bad_request(format!("Invalid query: {}", e)))?;
    let service = BoardService::new(&state.db);

    Ok(match service.get_thread_with_replies(&query.thread_id).await? {
        Some(thread) => Json(thread).into_response(),
        None => text(StatusCode::NOT_FOUND, THREAD_NOT_FOUND),
    })
}

/// POST /api/replies/:board - Reply to a thread.
#[utoipa::path(
    post,
    path = "/api/replies/{board}",
    tag = "replies",
    params(
        ("board" = String, Path, description = "Board name")
    ),
    request_body = CreateReplyRequest,
    responses(
        (status = 200, description = "Stored reply, password included", body = Reply),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "thread not found", body = String),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_reply(
    State(state): State<Arc<AppState>>,
    Path(_board): Path<String>,
    ValidatedBody(req): ValidatedBody<CreateReplyRequest>,
) -> Result<Response, ApiError> {
    let service = BoardService::new(&state.db);
    let outcome = service
        .add_reply(&req.thread_id, &req.text, &req.delete_password)
        .await?;

    Ok(match outcome {
        AddReplyOutcome::Added(reply) => Json(reply).into_response(),
        AddReplyOutcome::ThreadNotFound => text(StatusCode::NOT_FOUND, THREAD_NOT_FOUND),
    })
}

/// DELETE /api/replies/:board - Delete a reply with its password.
#[utoipa::path(
    delete,
    path = "/api/replies/{board}",
    tag = "replies",
    params(
        ("board" = String, Path, description = "Board name")
    ),
    request_body = DeleteReplyRequest,
    responses(
        (status = 200, description = "success", body = String),
        (status = 401, description = "incorrect password", body = String),
        (status = 404, description = "thread not found / reply not found", body = String)
    )
)]
pub async fn delete_reply(
    State(state): State<Arc<AppState>>,
    Path(_board): Path<String>,
    ValidatedBody(req): ValidatedBody<DeleteReplyRequest>,
) -> Result<Response, ApiError> {
    let service = BoardService::new(&state.db);
    let outcome = service
        .delete_reply(&req.thread_id, &req.reply_id, &req.delete_password)
        .await?;

    Ok(match outcome {
        DeleteReplyOutcome::Tombstoned => text(StatusCode::OK, SUCCESS),
        DeleteReplyOutcome::WrongPassword => text(StatusCode::UNAUTHORIZED, INCORRECT_PASSWORD),
        DeleteReplyOutcome::ThreadNotFound => text(StatusCode::NOT_FOUND, THREAD_NOT_FOUND),
        DeleteReplyOutcome::ReplyNotFound => text(StatusCode::NOT_FOUND, REPLY_NOT_FOUND),
    })
}

/// PUT /api/replies/:board - Report a reply.
#[utoipa::path(
    put,
    path = "/api/replies/{board}",
    tag = "replies",
    params(
        ("board" = String, Path, description = "Board name")
    ),
    request_body = ReportReplyRequest,
    responses(
        (status = 200, description = "reported", body = String),
        (status = 404, description = "thread not found / reply not found", body = String)
    )
)]
pub async fn report_reply(
    State(state): State<Arc<AppState>>,
    Path(_board): Path<String>,
    ValidatedBody(req): ValidatedBody<ReportReplyRequest>,
) -> Result<Response, ApiError> {
    let service = BoardService::new(&state.db);
    let outcome = service.report_reply(&req.thread_id, &req.reply_id).await?;

    Ok(match outcome {
        ReportReplyOutcome::Reported => text(StatusCode::OK, REPORTED),
        ReportReplyOutcome::ThreadNotFound => text(StatusCode::NOT_FOUND, THREAD_NOT_FOUND),
        ReportReplyOutcome::ReplyNotFound => text(StatusCode::NOT_FOUND, REPLY_NOT_FOUND),
    })
}
