//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i documenti persistiti.
//! Ogni entity corrisponde a una collezione (tabella) nel database.

pub mod chat_message;
pub mod enums;
pub mod notification;
pub mod order;
pub mod user;

// Re-exports per facilitare l'import
pub use chat_message::ChatMessage;
pub use enums::{MessageSender, OrderStatus, UserRole};
pub use notification::Notification;
pub use order::{Order, OrderItem};
pub use user::User;
