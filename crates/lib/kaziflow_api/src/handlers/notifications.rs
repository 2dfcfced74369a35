//! Notification request handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use kaziflow_core::notifications;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::CurrentAccount;
use crate::models::{NotificationResponse, StatusResponse};

/// `GET /notifications` — the caller's notifications, newest first.
pub async fn list_notifications_handler(
    State(state): State<AppState>,
    axum::Extension(account): axum::Extension<CurrentAccount>,
) -> AppResult<Json<Vec<NotificationResponse>>> {
    let rows = notifications::list_for_account(&state.pool, account.0.id).await?;
    Ok(Json(
        rows.into_iter().map(NotificationResponse::from).collect(),
    ))
}

/// `POST /notifications/{id}/read` — mark one of the caller's
/// notifications as read. Ids outside the caller's scope are a no-op.
pub async fn mark_read_handler(
    State(state): State<AppState>,
    axum::Extension(account): axum::Extension<CurrentAccount>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<StatusResponse>> {
    notifications::mark_read(&state.pool, id, account.0.id).await?;
    Ok(Json(StatusResponse {
        status: "success".to_string(),
        message: "Notification marked as read".to_string(),
    }))
}
