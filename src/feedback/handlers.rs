use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::repo::User,
    error::ApiError,
    feedback::{
        dto::{
            CreateFeedbackRequest, DeleteFeedbackRequest, DeleteResponse, FeedbackResponse,
            ReplyRequest, UpdateFeedbackRequest,
        },
        repo::Feedback,
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/data", get(list_feedback))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/data", post(create_feedback))
        .route("/data/:id", put(update_feedback).delete(delete_feedback))
        .route("/data/:id/reply", put(reply_feedback))
}

/// Only the owner may edit an entry.
fn may_update(feedback: &Feedback, requester_id: Uuid) -> bool {
    feedback.owner_id == requester_id
}

/// Owner or admin may delete. An unknown requester may do neither.
fn may_delete(feedback: &Feedback, requester: Option<&User>) -> bool {
    requester
        .map(|u| u.id == feedback.owner_id || u.is_admin())
        .unwrap_or(false)
}

/// Replying is admin-only.
fn may_reply(requester: Option<&User>) -> bool {
    requester.map(|u| u.is_admin()).unwrap_or(false)
}

#[instrument(skip(state, payload))]
pub async fn create_feedback(
    State(state): State<AppState>,
    Json(payload): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Name is required"));
    }
    if payload.feedback.trim().is_empty() {
        return Err(ApiError::Validation("Feedback text is required"));
    }

    let row = Feedback::insert(
        &state.db,
        &payload.name,
        &payload.feedback,
        payload.comment.as_deref(),
        payload.owner_id,
    )
    .await?;

    info!(id = %row.id, owner_id = %row.owner_id, "feedback saved");
    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            message: "Feedback saved!",
            data: row,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_feedback(
    State(state): State<AppState>,
) -> Result<Json<Vec<Feedback>>, ApiError> {
    let rows = Feedback::list_all(&state.db).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn update_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFeedbackRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Name is required"));
    }
    if payload.feedback.trim().is_empty() {
        return Err(ApiError::Validation("Feedback text is required"));
    }

    let existing = Feedback::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::FeedbackNotFound)?;

    if !may_update(&existing, payload.requester_id) {
        warn!(%id, requester_id = %payload.requester_id, owner_id = %existing.owner_id, "update denied");
        return Err(ApiError::Forbidden("You can only update your own feedback"));
    }

    let row = Feedback::update_content(
        &state.db,
        id,
        &payload.name,
        &payload.feedback,
        payload.comment.as_deref(),
    )
    .await?
    .ok_or(ApiError::FeedbackNotFound)?;

    info!(%id, "feedback updated");
    Ok(Json(FeedbackResponse {
        message: "Feedback updated!",
        data: row,
    }))
}

#[instrument(skip(state, payload))]
pub async fn delete_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DeleteFeedbackRequest>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let existing = Feedback::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::FeedbackNotFound)?;

    let requester = User::find_by_id(&state.db, payload.requester_id).await?;
    if !may_delete(&existing, requester.as_ref()) {
        warn!(%id, requester_id = %payload.requester_id, "delete denied");
        return Err(ApiError::Forbidden(
            "Only the owner or an admin can delete feedback",
        ));
    }

    if !Feedback::delete(&state.db, id).await? {
        return Err(ApiError::FeedbackNotFound);
    }

    info!(%id, requester_id = %payload.requester_id, "feedback deleted");
    Ok(Json(DeleteResponse {
        message: "Feedback deleted successfully",
    }))
}

#[instrument(skip(state, payload))]
pub async fn reply_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplyRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    Feedback::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::FeedbackNotFound)?;

    let requester = User::find_by_id(&state.db, payload.requester_id).await?;
    if !may_reply(requester.as_ref()) {
        warn!(%id, requester_id = %payload.requester_id, "reply denied");
        return Err(ApiError::Forbidden("Only admins can reply"));
    }

    let row = Feedback::set_reply(&state.db, id, &payload.reply)
        .await?
        .ok_or(ApiError::FeedbackNotFound)?;

    info!(%id, requester_id = %payload.requester_id, "reply saved");
    Ok(Json(FeedbackResponse {
        message: "Reply saved!",
        data: row,
    }))
}
