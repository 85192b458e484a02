//! Chat DTOs - Data Transfer Objects per la chat di assistenza

use crate::entities::{ChatMessage, MessageSender};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDTO {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub sender: MessageSender,
    pub is_read: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageDTO {
    fn from(value: ChatMessage) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            message: value.message,
            sender: value.sender,
            is_read: value.is_read,
            timestamp: value.timestamp,
        }
    }
}

/// Messaggio arricchito con nome ed email dell'utente, per il pannello admin
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AdminChatMessageDTO {
    #[serde(flatten)]
    pub message: ChatMessageDTO,
    pub user_name: String,
    pub user_email: String,
}

/// Body di `POST /api/chat/message`: i campi sono opzionali per poter rispondere
/// con il messaggio di errore specifico invece di un rifiuto generico della deserializzazione
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageDTO {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

pub type AdminReplyDTO = SendMessageDTO;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub success: bool,
    pub user_message: ChatMessageDTO,
    pub admin_response: ChatMessageDTO,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AdminReplyResponse {
    pub success: bool,
    pub reply: ChatMessageDTO,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MarkReadResponse {
    pub success: bool,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AdminMarkReadResponse {
    pub success: bool,
    pub modified_count: u64,
}

/// DTO per creare un nuovo messaggio (senza id)
#[derive(Debug, Clone)]
pub struct CreateChatMessageDTO {
    pub user_id: String,
    pub message: String,
    pub sender: MessageSender,
    pub timestamp: DateTime<Utc>,
}
