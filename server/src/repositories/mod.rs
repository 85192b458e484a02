//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Ogni repository gestisce le operazioni di persistenza per una specifica collezione.
//! Non esiste un service layer: gli handler chiamano direttamente i repository.

// ************************* NOTA SULLE QUERY ************************* //

/*
   Le query usano le funzioni runtime di sqlx (query / query_as con bind) e non le macro
   query! / query_as!: le macro richiedono un database raggiungibile in fase di compilazione,
   mentre così il crate compila ovunque e lo schema è garantito dalle migrations in `migrations/`.
   Le righe vengono mappate sulle entity con `#[derive(sqlx::FromRow)]`, quindi i nomi delle
   colonne nella SELECT devono coincidere con i campi della struct.
   Le righe prodotto degli ordini sono un documento JSON (sqlx::types::Json).
*/

// ************************* MODULI REPOSITORY ************************* //

pub mod chat_message;
pub mod notification;
pub mod order;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read, Update};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use chat_message::ChatMessageRepository;
pub use notification::NotificationRepository;
pub use order::OrderRepository;
pub use user::UserRepository;

// alias di tipo per il pool, per semplificare lo switch in caso in cui vogliamo usare un altro db
pub type PoolType = sqlx::SqlitePool;
