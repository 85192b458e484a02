//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Ogni sotto-modulo gestisce gli endpoint HTTP di una risorsa (un router per risorsa).
//! Gli handler leggono e scrivono direttamente tramite i repository.

pub mod chat;
pub mod notification;
pub mod order;
pub mod user;

// Re-exports per facilitare l'import
pub use chat::{
    admin_list_messages, admin_mark_read, admin_reply, get_user_messages, mark_messages_read,
    send_message,
};
pub use notification::{list_notifications, mark_all_notifications_read, mark_notification_read};
pub use order::{
    assign_rider, create_order, delete_order, get_order, list_orders, replace_order,
    update_order_status, verify_delivery,
};
pub use user::{create_rider, get_user_by_id, list_riders, sign_in, sign_up};

use crate::core::{AppError, AppState, ids::is_valid_id};
use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

/// Root endpoint - health check con lo stato della connessione al database
pub async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
    let connected = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    if !connected {
        warn!("Health check: database not reachable");
    }

    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "message": "Backend is up and responding.",
        "uptimeSeconds": state.started_at.elapsed().as_secs(),
        "timestamp": Utc::now().to_rfc3339(),
        "environment": state.app_env,
        "database": {
            "connected": connected,
        },
    }))
}

/// Rifiuta con 400 un id fornito dal client che non rispetta il formato
pub(crate) fn ensure_valid_id(id: &str, message: &'static str) -> Result<(), AppError> {
    if is_valid_id(id) {
        Ok(())
    } else {
        warn!("Invalid id format: {:?}", id);
        Err(AppError::bad_request(message))
    }
}
