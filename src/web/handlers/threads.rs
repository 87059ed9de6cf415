//! Thread handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use std::sync::Arc;

use super::{text, AppState, INCORRECT_PASSWORD, REPORTED, SUCCESS, THREAD_NOT_FOUND};
use crate::board::{BoardService, DeleteThreadOutcome, ReportOutcome, Thread, ThreadView};
use crate::web::dto::{
    CreateThreadRequest, DeleteThreadRequest, ReportThreadRequest, ValidatedBody,
};
use crate::web::error::ApiError;

/// GET /api/threads/:board - List the most recently active threads.
#[utoipa::path(
    get,
    path = "/api/threads/{board}",
    tag = "threads",
    params(
        ("board" = String, Path, description = "Board name")
    ),
    responses(
        (status = 200, description = "Up to 10 threads with their 3 latest replies", body = Vec<ThreadView>)
    )
)]
pub async fn list_threads(
    State(state): State<Arc<AppState>>,
    Path(board): Path<String>,
) -> Result<Json<Vec<ThreadView>>, ApiError> {
    let service = BoardService::new(&state.db);
    let threads = service.list_recent_threads(&board).await?;
    Ok(Json(threads))
}

/// POST /api/threads/:board - Start a new thread.
#[utoipa::path(
    post,
    path = "/api/threads/{board}",
    tag = "threads",
    params(
        ("board" = String, Path, description = "Board name")
    ),
    request_body = CreateThreadRequest,
    responses(
        (status = 200, description = "Stored thread, password included", body = Thread),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    Path(board): Path<String>,
    ValidatedBody(req): ValidatedBody<CreateThreadRequest>,
) -> Result<Json<Thread>, ApiError> {
    let service = BoardService::new(&state.db);
    let thread = service
        .create_thread(&board, &req.text, &req.delete_password)
        .await?;
    Ok(Json(thread))
}

/// DELETE /api/threads/:board - Delete a thread with its password.
#[utoipa::path(
    delete,
    path = "/api/threads/{board}",
    tag = "threads",
    params(
        ("board" = String, Path, description = "Board name")
    ),
    request_body = DeleteThreadRequest,
    responses(
        (status = 200, description = "success", body = String),
        (status = 401, description = "incorrect password", body = String),
        (status = 404, description = "thread not found", body = String)
    )
)]
pub async fn delete_thread(
    State(state): State<Arc<AppState>>,
    Path(_board): Path<String>,
    ValidatedBody(req): ValidatedBody<DeleteThreadRequest>,
) -> Result<Response, ApiError> {
    let service = BoardService::new(&state.db);
    let outcome = service
        .delete_thread(&req.thread_id, &req.delete_password)
        .await?;

    Ok(match outcome {
        DeleteThreadOutcome::Deleted => text(StatusCode::OK, SUCCESS),
        DeleteThreadOutcome::WrongPassword => text(StatusCode::UNAUTHORIZED, INCORRECT_PASSWORD),
        DeleteThreadOutcome::NotFound => text(StatusCode::NOT_FOUND, THREAD_NOT_FOUND),
    })
}

/// PUT /api/threads/:board - Report a thread.
#[utoipa::path(
    put,
    path = "/api/threads/{board}",
    tag = "threads",
    params(
        ("board" = String, Path, description = "Board name")
    ),
    request_body = ReportThreadRequest,
    responses(
        (status = 200, description = "reported", body = String),
        (status = 404, description = "thread not found", body = String)
    )
)]
pub async fn report_thread(
    State(state): State<Arc<AppState>>,
    Path(_board): Path<String>,
    ValidatedBody(req): ValidatedBody<ReportThreadRequest>,
) -> Result<Response, ApiError> {
    let service = BoardService::new(&state.db);

    Ok(match service.report_thread(&req.thread_id).await? {
        ReportOutcome::Reported => text(StatusCode::OK, REPORTED),
        ReportOutcome::NotFound => text(StatusCode::NOT_FOUND, THREAD_NOT_FOUND),
    })
}
