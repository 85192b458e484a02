//! Query DTOs - Data Transfer Objects per query string

use serde::{Deserialize, Serialize};

/// DTO per query parameters della lista ordini (`/api/orders?userid=...`)
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct OrdersQuery {
    #[serde(default)]
    pub userid: Option<String>,
}
