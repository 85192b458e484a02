//! Notification DTOs - Data Transfer Objects per le notifiche admin

use crate::entities::Notification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub order_id: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationDTO {
    fn from(value: Notification) -> Self {
        Self {
            id: value.id,
            notification_type: value.notification_type,
            title: value.title,
            message: value.message,
            order_id: value.order_id,
            is_read: value.is_read,
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponse {
    pub success: bool,
    pub data: Vec<NotificationDTO>,
    pub unread_count: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct NotificationResponse {
    pub success: bool,
    pub data: NotificationDTO,
}

/// DTO per creare una notifica (senza id)
#[derive(Debug, Clone)]
pub struct CreateNotificationDTO {
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub order_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// DTO per aggiornare una notifica (solo campi modificabili)
#[derive(Debug, Clone, Default)]
pub struct UpdateNotificationDTO {
    pub is_read: Option<bool>,
}
