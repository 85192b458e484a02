//! Notification services - Notifiche per il pannello admin (solo polling, nessun evento)

use super::ensure_valid_id;
use crate::core::{AppError, AppState};
use crate::dtos::{
    MessageResponse, NotificationDTO, NotificationListResponse, NotificationResponse,
    UpdateNotificationDTO,
};
use crate::repositories::Update;
use axum::extract::{Json, Path, State};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const LATEST_NOTIFICATIONS: i64 = 50;

#[instrument(skip(state))]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NotificationListResponse>, AppError> {
    debug!("Listing notifications");
    let notifications = state.notification.find_latest(LATEST_NOTIFICATIONS).await?;
    let unread_count = state.notification.count_unread().await?;

    Ok(Json(NotificationListResponse {
        success: true,
        data: notifications.into_iter().map(NotificationDTO::from).collect(),
        unread_count,
    }))
}

#[instrument(skip(state), fields(notification_id = %notification_id))]
pub async fn mark_notification_read(
    State(state): State<Arc<AppState>>,
    Path(notification_id): Path<String>,
) -> Result<Json<NotificationResponse>, AppError> {
    ensure_valid_id(&notification_id, "Invalid id format")?;

    let notification = state
        .notification
        .update(
            &notification_id,
            &UpdateNotificationDTO {
                is_read: Some(true),
            },
        )
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => {
                warn!("Notification not found");
                AppError::not_found("Notification not found")
            }
            other => AppError::from(other),
        })?;

    Ok(Json(NotificationResponse {
        success: true,
        data: NotificationDTO::from(notification),
    }))
}

#[instrument(skip(state))]
pub async fn mark_all_notifications_read(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, AppError> {
    let updated = state.notification.mark_all_read().await?;
    info!("Marked {} notifications as read", updated);
    Ok(Json(MessageResponse::ok("All notifications marked as read")))
}
