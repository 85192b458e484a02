//! Server library - espone i moduli principali per i test e per il client

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use core::{AppError, AppState, Config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};
use std::sync::Arc;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api/user", configure_user_routes(state.clone()))
        .nest("/api/orders", configure_order_routes(state.clone()))
        .nest("/api/chat", configure_chat_routes(state.clone()))
        .nest(
            "/api/notifications",
            configure_notification_routes(state.clone()),
        )
        .with_state(state)
}

/// Applica autenticazione + controllo admin a un gruppo di rotte.
/// I layer sono eseguiti dall'ultimo aggiunto: prima l'autenticazione, poi il ruolo.
fn admin_only(router: Router<Arc<AppState>>, state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::{admin_middleware, authentication_middleware};

    router
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes degli utenti (registrazione, login, rider)
fn configure_user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    let public_routes = Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in));

    let authenticated_routes = Router::new()
        .route("/{id}", get(get_user_by_id))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authentication_middleware,
        ));

    let admin_routes = admin_only(
        Router::new().route("/admin/riders", get(list_riders).post(create_rider)),
        state,
    );

    public_routes
        .merge(authenticated_routes)
        .merge(admin_routes)
}

/// Configura le routes degli ordini
fn configure_order_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    // Rotte per qualsiasi utente autenticato (i controlli di ownership sono negli handler)
    let authenticated_routes = Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", get(get_order))
        .route("/verify-delivery/{id}", put(verify_delivery))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authentication_middleware,
        ));

    // Rotte di gestione, riservate agli admin
    let admin_routes = admin_only(
        Router::new()
            .route("/{id}", put(replace_order).delete(delete_order))
            .route("/{id}/status", patch(update_order_status))
            .route("/assign-rider/{id}", put(assign_rider)),
        state,
    );

    authenticated_routes.merge(admin_routes)
}

/// Configura le routes della chat di assistenza
fn configure_chat_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use services::*;

    // Le rotte utente non richiedono autenticazione: l'utente è identificato dal userId
    let user_routes = Router::new()
        .route("/message", post(send_message))
        .route("/{user_id}", get(get_user_messages))
        .route("/mark-read/{user_id}", put(mark_messages_read));

    let admin_routes = admin_only(
        Router::new()
            .route("/admin/messages", get(admin_list_messages))
            .route("/admin/reply", post(admin_reply))
            .route("/admin/mark-read/{user_id}", put(admin_mark_read)),
        state,
    );

    user_routes.merge(admin_routes)
}

/// Configura le routes delle notifiche (solo admin)
fn configure_notification_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use services::*;

    admin_only(
        Router::new()
            .route("/", get(list_notifications))
            .route("/read-all", put(mark_all_notifications_read))
            .route("/{id}/read", put(mark_notification_read)),
        state,
    )
}
