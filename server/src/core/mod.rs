//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Autenticazione e JWT
//! - Configurazione
//! - Gestione errori
//! - Generazione degli id
//! - Stato applicazione

pub mod auth;
pub mod config;
pub mod error;
pub mod ids;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{
    Claims, RiderTokenClaims, admin_middleware, authentication_middleware, decode_jwt,
    decode_rider_token, encode_jwt, encode_rider_token,
};
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
