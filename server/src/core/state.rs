//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository e la configurazione condivisa tra le richieste.
//! Oltre al pool di connessioni non esiste stato mutabile condiviso tra richieste.

use super::config::Config;
use crate::repositories::{
    ChatMessageRepository, NotificationRepository, OrderRepository, PoolType, UserRepository,
};
use std::time::Instant;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione degli utenti e dei rider
    pub user: UserRepository,

    /// Repository per la gestione degli ordini
    pub order: OrderRepository,

    /// Repository per la gestione dei messaggi della chat
    pub chat: ChatMessageRepository,

    /// Repository per la gestione delle notifiche admin
    pub notification: NotificationRepository,

    /// Pool condiviso, usato direttamente solo dall'health check
    pub pool: PoolType,

    /// Secret key per JWT token (sessioni e token di consegna dei rider)
    pub jwt_secret: String,

    /// Rifiuta lato server le modifiche agli ordini consegnati
    pub enforce_delivered_lock: bool,

    pub app_env: String,

    pub started_at: Instant,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito e la JWT secret.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni condiviso
    /// * `jwt_secret` - Chiave segreta per la firma dei token JWT
    pub fn new(pool: PoolType, jwt_secret: String) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            order: OrderRepository::new(pool.clone()),
            chat: ChatMessageRepository::new(pool.clone()),
            notification: NotificationRepository::new(pool.clone()),
            pool,
            jwt_secret,
            enforce_delivered_lock: false,
            app_env: "development".to_string(),
            started_at: Instant::now(),
        }
    }

    /// Crea lo stato a partire dalla configurazione caricata all'avvio
    pub fn from_config(pool: PoolType, config: &Config) -> Self {
        Self::new(pool, config.jwt_secret.clone())
            .with_delivered_lock(config.enforce_delivered_lock)
            .with_environment(config.app_env.clone())
    }

    pub fn with_delivered_lock(mut self, enforce: bool) -> Self {
        self.enforce_delivered_lock = enforce;
        self
    }

    pub fn with_environment(mut self, app_env: String) -> Self {
        self.app_env = app_env;
        self
    }
}
