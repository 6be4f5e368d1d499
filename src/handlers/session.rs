// src/handlers/session.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::session::{CreateSessionRequest, QuizSession, UpdateSessionRequest},
    services::sessions::SessionManager,
    utils::extract::ValidatedJson,
};

/// Starts a new quiz session.
#[utoipa::path(
    post,
    path = "/api/sessions",
    tag = "Sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Session created", body = QuizSession),
        (status = 400, description = "Invalid session data")
    )
)]
pub async fn create_session(
    State(sessions): State<SessionManager>,
    ValidatedJson(payload): ValidatedJson<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = sessions.start(payload).await?;
    Ok(Json(session))
}

/// Retrieves a session by ID.
#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "The session", body = QuizSession),
        (status = 404, description = "Session not found")
    )
)]
pub async fn get_session(
    State(sessions): State<SessionManager>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = sessions
        .get(&id)
        .await?
        .ok_or(AppError::NotFound("Session not found".to_string()))?;

    Ok(Json(session))
}

/// Partially updates a session.
///
/// Only fields present in the body change. `answers` and `markedForReview`
/// are replaced wholesale; `null` clears `completedAt`, `timeSpent` or `score`.
#[utoipa::path(
    patch,
    path = "/api/sessions/{id}",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session ID")),
    request_body = UpdateSessionRequest,
    responses(
        (status = 200, description = "Updated session", body = QuizSession),
        (status = 400, description = "Invalid update data"),
        (status = 404, description = "Session not found")
    )
)]
pub async fn update_session(
    State(sessions): State<SessionManager>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = sessions
        .update(&id, payload)
        .await?
        .ok_or(AppError::NotFound("Session not found".to_string()))?;

    Ok(Json(session))
}
