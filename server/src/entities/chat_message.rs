//! ChatMessage entity - Messaggio della chat di assistenza cliente

use super::enums::MessageSender;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct ChatMessage {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub sender: MessageSender,
    pub is_read: bool,
    pub timestamp: DateTime<Utc>,
}
