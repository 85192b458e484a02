//! Order DTOs - Data Transfer Objects per ordini e workflow di consegna

use crate::entities::{Order, OrderItem, OrderStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Riga prodotto in ingresso, validata prima di diventare un `OrderItem`
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDTO {
    #[validate(length(min = 1, message = "productId is required"))]
    pub product_id: String,
    #[validate(length(min = 1, max = 200, message = "productTitle must be between 1 and 200 characters"))]
    pub product_title: String,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
    #[validate(range(min = 0.0, message = "subTotal cannot be negative"))]
    pub sub_total: f64,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<OrderItemDTO> for OrderItem {
    fn from(value: OrderItemDTO) -> Self {
        Self {
            product_id: value.product_id,
            product_title: value.product_title,
            quantity: value.quantity,
            price: value.price,
            sub_total: value.sub_total,
            image: value.image,
        }
    }
}

/// Struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderDTO {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub pincode: String,
    pub email: String,
    pub userid: String,
    pub products: Vec<OrderItem>,
    pub amount: f64,
    pub payment_id: String,
    pub status: OrderStatus,
    pub delivery_rider: Option<String>,
    pub qr: Option<String>,
    pub rider_token: Option<String>,
    pub version: i64,
    pub date: DateTime<Utc>,
}

impl From<Order> for OrderDTO {
    fn from(value: Order) -> Self {
        Self {
            id: value.id,
            name: value.name,
            phone_number: value.phone_number,
            address: value.address,
            pincode: value.pincode,
            email: value.email,
            userid: value.user_id,
            products: value.products.0,
            amount: value.amount,
            payment_id: value.payment_id,
            status: value.status,
            delivery_rider: value.delivery_rider,
            qr: value.qr,
            rider_token: value.rider_token,
            version: value.version,
            date: value.date,
        }
    }
}

/// DTO per creare un nuovo ordine (senza id, stato iniziale pending)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderDTO {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "Phone number must be between 1 and 20 characters"))]
    pub phone_number: String,
    #[validate(length(min = 1, max = 500, message = "Address must be between 1 and 500 characters"))]
    pub address: String,
    #[validate(length(min = 1, max = 12, message = "Pincode must be between 1 and 12 characters"))]
    pub pincode: String,
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
    #[validate(range(min = 0.0, message = "Amount cannot be negative"))]
    pub amount: f64,
    #[serde(default)]
    pub payment_id: String,
    #[validate(length(min = 1, message = "An order needs at least one product"), nested)]
    pub products: Vec<OrderItemDTO>,
}

/// Payload della sostituzione completa (`PUT /api/orders/{id}`).
///
/// Tutti i campi del documento vengono riscritti. `version`, se presente, deve coincidere
/// con quella salvata, altrimenti la scrittura viene rifiutata; se assente vince l'ultimo
/// che scrive. I campi del rider sono gestiti solo da assign-rider e verify-delivery.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceOrderDTO {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "Phone number must be between 1 and 20 characters"))]
    pub phone_number: String,
    #[validate(length(min = 1, max = 500, message = "Address must be between 1 and 500 characters"))]
    pub address: String,
    #[validate(length(min = 1, max = 12, message = "Pincode must be between 1 and 12 characters"))]
    pub pincode: String,
    pub email: String,
    pub userid: String,
    #[validate(nested)]
    pub products: Vec<OrderItemDTO>,
    #[validate(range(min = 0.0, message = "Amount cannot be negative"))]
    pub amount: f64,
    #[serde(default)]
    pub payment_id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub qr: Option<String>,
    #[serde(default)]
    pub version: Option<i64>,
}

/// Aggiornamento parziale del solo stato (`PATCH /api/orders/{id}/status`)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateStatusDTO {
    pub status: OrderStatus,
    #[serde(default)]
    pub version: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssignRiderDTO {
    #[serde(default)]
    pub rider_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VerifyDeliveryDTO {
    pub rider_token: String,
}
