//! Notification entity - Notifiche visibili solo agli admin

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Notification {
    pub id: String,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub order_id: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
