//! Client per il backend del negozio: wrapper HTTP, workflow del pannello admin
//! e helper di visualizzazione (ricevute, totali vendite, paginazione).

pub mod api;
pub mod error;
pub mod models;
pub mod receipt;
pub mod sales;
pub mod workflows;

pub use api::ApiClient;
pub use error::ClientError;
pub use models::{Credentials, Order, OrderStatus};
pub use workflows::{AssignOutcome, assign_rider, change_order_status};
