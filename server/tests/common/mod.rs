#![allow(dead_code)]

use axum_test::TestServer;
use shop_server::core::{AppState, encode_jwt};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

pub const JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";

/// Fixture disponibili in `fixtures/`, caricate nell'ordine indicato
pub const ALL_FIXTURES: &[&str] = &["users", "orders", "chat", "notifications"];

fn fixture_sql(name: &str) -> &'static str {
    match name {
        "users" => include_str!("../../fixtures/users.sql"),
        "orders" => include_str!("../../fixtures/orders.sql"),
        "chat" => include_str!("../../fixtures/chat.sql"),
        "notifications" => include_str!("../../fixtures/notifications.sql"),
        other => panic!("Unknown fixture: {}", other),
    }
}

/// Crea un database SQLite in memoria con migrations e fixtures applicate
///
/// Il pool ha una sola connessione che non viene mai chiusa: ogni connessione
/// a `sqlite::memory:` apre un database diverso.
pub async fn create_test_pool(fixtures: &[&str]) -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    for fixture in fixtures {
        sqlx::raw_sql(fixture_sql(fixture))
            .execute(&pool)
            .await
            .expect("Failed to load fixture");
    }

    pool
}

/// Crea un AppState per i test
///
/// # Arguments
/// * `fixtures` - Nomi delle fixture da caricare
///
/// # Returns
/// Arc<AppState> configurato con il JWT secret di test
pub async fn create_test_state(fixtures: &[&str]) -> Arc<AppState> {
    let pool = create_test_pool(fixtures).await;
    Arc::new(AppState::new(pool, JWT_SECRET.to_string()))
}

/// Come `create_test_state` ma con il lock sugli ordini consegnati attivo lato server
pub async fn create_locked_test_state(fixtures: &[&str]) -> Arc<AppState> {
    let pool = create_test_pool(fixtures).await;
    Arc::new(AppState::new(pool, JWT_SECRET.to_string()).with_delivered_lock(true))
}

/// Crea un TestServer per i test
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = shop_server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Genera un JWT di sessione valido per l'utente indicato
pub fn create_test_jwt(user_id: &str, email: &str) -> String {
    encode_jwt(email.to_string(), user_id.to_string(), JWT_SECRET)
        .expect("Failed to create JWT token")
}

/// Valore dell'header Authorization per l'utente indicato
pub fn bearer(user_id: &str, email: &str) -> String {
    format!("Bearer {}", create_test_jwt(user_id, email))
}

pub fn admin_bearer() -> String {
    bearer("A1", "admin@shop.test")
}

pub fn alice_bearer() -> String {
    bearer("U1", "alice@shop.test")
}

pub fn bob_bearer() -> String {
    bearer("U2", "bob@shop.test")
}

pub fn rita_bearer() -> String {
    bearer("R1", "rita@shop.test")
}
