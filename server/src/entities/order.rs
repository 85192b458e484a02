//! Order entity - Entità ordine con snapshot del cliente e righe prodotto

use super::enums::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// Riga prodotto, salvata come documento JSON dentro l'ordine
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub product_title: String,
    pub quantity: i32,
    pub price: f64,
    pub sub_total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Order {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub pincode: String,
    pub email: String,
    pub user_id: String,
    pub products: Json<Vec<OrderItem>>,
    pub amount: f64,
    pub payment_id: String,
    pub status: OrderStatus,
    // riferimento all'id del rider, non embedded
    pub delivery_rider: Option<String>,
    pub qr: Option<String>,
    pub rider_token: Option<String>,
    // token di concorrenza ottimistica, incrementato ad ogni scrittura
    pub version: i64,
    pub date: DateTime<Utc>,
}
