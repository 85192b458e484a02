//! ChatMessageRepository - Repository per i messaggi della chat di assistenza

use super::{Create, PoolType};
use crate::core::ids::new_id;
use crate::dtos::CreateChatMessageDTO;
use crate::entities::ChatMessage;
use sqlx::Error;

const MESSAGE_COLUMNS: &str = "id, user_id, message, sender, is_read, timestamp";

pub struct ChatMessageRepository {
    connection_pool: PoolType,
}

impl ChatMessageRepository {
    pub fn new(connection_pool: PoolType) -> Self {
        Self { connection_pool }
    }

    /// Conversazione di un utente, dal messaggio più vecchio.
    /// A parità di timestamp vale l'ordine di inserimento (rowid).
    pub async fn find_many_by_user_id(&self, user_id: &str) -> Result<Vec<ChatMessage>, Error> {
        let messages = sqlx::query_as::<_, ChatMessage>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM chat_messages WHERE user_id = ? ORDER BY timestamp ASC, rowid ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(messages)
    }

    /// Tutti i messaggi di tutti gli utenti, dal più recente
    pub async fn find_all(&self) -> Result<Vec<ChatMessage>, Error> {
        let messages = sqlx::query_as::<_, ChatMessage>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM chat_messages ORDER BY timestamp DESC, rowid DESC"
        ))
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(messages)
    }

    /// Segna come letti i messaggi non letti dell'utente, ritorna quanti ne ha modificati
    pub async fn mark_read_by_user_id(&self, user_id: &str) -> Result<u64, Error> {
        let result =
            sqlx::query("UPDATE chat_messages SET is_read = 1 WHERE user_id = ? AND is_read = 0")
                .bind(user_id)
                .execute(&self.connection_pool)
                .await?;

        Ok(result.rows_affected())
    }
}

impl Create<ChatMessage, CreateChatMessageDTO> for ChatMessageRepository {
    async fn create(&self, data: &CreateChatMessageDTO) -> Result<ChatMessage, Error> {
        let message = ChatMessage {
            id: new_id(),
            user_id: data.user_id.clone(),
            message: data.message.clone(),
            sender: data.sender,
            is_read: false,
            timestamp: data.timestamp,
        };

        sqlx::query(&format!(
            "INSERT INTO chat_messages ({MESSAGE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?)"
        ))
        .bind(&message.id)
        .bind(&message.user_id)
        .bind(&message.message)
        .bind(message.sender)
        .bind(message.is_read)
        .bind(message.timestamp)
        .execute(&self.connection_pool)
        .await?;

        Ok(message)
    }
}
