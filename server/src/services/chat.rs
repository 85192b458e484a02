//! Chat services - Chat di assistenza tra clienti e admin
//!
//! Ogni messaggio dell'utente passa per due stadi eseguiti nella stessa richiesta:
//! salvataggio del messaggio e risposta automatica (una e una sola per messaggio).

use super::ensure_valid_id;
use crate::core::{AppError, AppState};
use crate::dtos::{
    AdminChatMessageDTO, AdminMarkReadResponse, AdminReplyDTO, AdminReplyResponse, ChatMessageDTO,
    CreateChatMessageDTO, MarkReadResponse, SendMessageDTO, SendMessageResponse,
};
use crate::entities::{ChatMessage, MessageSender, User};
use crate::repositories::{Create, Read};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_macros::debug_handler;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Testo fisso della risposta automatica
pub const CANNED_REPLY: &str = "Thank you for your message. Our team will get back to you shortly.";

/// Stadio di risposta automatica: dato il messaggio dell'utente appena salvato
/// produce il messaggio admin da salvare. Nessun intent matching, sempre lo stesso testo.
pub fn canned_reply(user_message: &ChatMessage) -> CreateChatMessageDTO {
    CreateChatMessageDTO {
        user_id: user_message.user_id.clone(),
        message: CANNED_REPLY.to_string(),
        sender: MessageSender::Admin,
        timestamp: Utc::now(),
    }
}

/// Verifica formato ed esistenza dell'utente della conversazione
async fn load_chat_user(state: &AppState, user_id: &str) -> Result<User, AppError> {
    ensure_valid_id(user_id, "Invalid user ID format")?;
    state.user.read(user_id).await?.ok_or_else(|| {
        warn!("User not found with ID: {}", user_id);
        AppError::not_found("User not found")
    })
}

#[instrument(skip(state), fields(user_id = %user_id))]
pub async fn get_user_messages(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ChatMessageDTO>>, AppError> {
    debug!("Fetching chat messages for user");
    load_chat_user(&state, &user_id).await?;

    let messages = state.chat.find_many_by_user_id(&user_id).await?;
    info!("Found {} messages", messages.len());
    Ok(Json(messages.into_iter().map(ChatMessageDTO::from).collect()))
}

#[instrument(skip(state, body))]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SendMessageDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Received chat message");
    // 1. userId obbligatorio e ben formato, l'utente deve esistere
    // 2. il messaggio non può essere vuoto (dopo trim)
    // 3. salvare il messaggio dell'utente
    // 4. stadio di risposta automatica: salvare la risposta admin
    // 5. ritornare 201 con entrambi i messaggi
    let user_id = body
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::bad_request("User ID is required"))?;
    load_chat_user(&state, &user_id).await?;

    let message = body
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Message cannot be empty"))?;
    let user_message = state
        .chat
        .create(&CreateChatMessageDTO {
            user_id,
            message,
            sender: MessageSender::User,
            timestamp: Utc::now(),
        })
        .await?;
    debug!("User message saved with ID: {}", user_message.id);

    let admin_response = state.chat.create(&canned_reply(&user_message)).await?;
    debug!("Admin response saved with ID: {}", admin_response.id);

    info!("Chat message handled for user {}", user_message.user_id);
    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse {
            success: true,
            user_message: ChatMessageDTO::from(user_message),
            admin_response: ChatMessageDTO::from(admin_response),
        }),
    ))
}

#[instrument(skip(state), fields(user_id = %user_id))]
pub async fn mark_messages_read(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<MarkReadResponse>, AppError> {
    ensure_valid_id(&user_id, "Invalid user ID format")?;

    let count = state.chat.mark_read_by_user_id(&user_id).await?;
    info!("Marked {} messages as read", count);
    Ok(Json(MarkReadResponse {
        success: true,
        count,
    }))
}

/// Tutti i messaggi dal più recente, arricchiti con nome ed email dell'utente (solo admin)
#[instrument(skip(state))]
pub async fn admin_list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AdminChatMessageDTO>>, AppError> {
    debug!("Fetching all chat messages for admin");
    let messages = state.chat.find_all().await?;

    let user_ids: Vec<String> = messages
        .iter()
        .map(|m| m.user_id.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let users: HashMap<String, User> = state
        .user
        .find_many_by_ids(&user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id.clone(), u))
        .collect();

    let enriched: Vec<AdminChatMessageDTO> = messages
        .into_iter()
        .map(|msg| {
            let (user_name, user_email) = match users.get(&msg.user_id) {
                Some(user) => (user.name.clone(), user.email.clone()),
                None => ("Unknown User".to_string(), "No Email".to_string()),
            };
            AdminChatMessageDTO {
                message: ChatMessageDTO::from(msg),
                user_name,
                user_email,
            }
        })
        .collect();

    info!("Retrieved {} messages from {} users", enriched.len(), user_ids.len());
    Ok(Json(enriched))
}

#[instrument(skip(state, body))]
pub async fn admin_reply(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AdminReplyDTO>,
) -> Result<impl IntoResponse, AppError> {
    let (user_id, message) = match (body.user_id, body.message) {
        (Some(uid), Some(msg)) if !uid.is_empty() && !msg.trim().is_empty() => (uid, msg),
        _ => return Err(AppError::bad_request("User ID and message are required")),
    };
    ensure_valid_id(&user_id, "Invalid user ID format")?;

    let reply = state
        .chat
        .create(&CreateChatMessageDTO {
            user_id,
            message: message.trim().to_string(),
            sender: MessageSender::Admin,
            timestamp: Utc::now(),
        })
        .await?;

    info!("Admin reply {} sent to user {}", reply.id, reply.user_id);
    Ok((
        StatusCode::CREATED,
        Json(AdminReplyResponse {
            success: true,
            reply: ChatMessageDTO::from(reply),
        }),
    ))
}

#[debug_handler]
pub async fn admin_mark_read(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<AdminMarkReadResponse>, AppError> {
    ensure_valid_id(&user_id, "Invalid user ID format")?;

    let modified_count = state.chat.mark_read_by_user_id(&user_id).await?;
    info!("Admin marked {} messages as read for user {}", modified_count, user_id);
    Ok(Json(AdminMarkReadResponse {
        success: true,
        modified_count,
    }))
}
