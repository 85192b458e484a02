//! OrderRepository - Repository per la gestione degli ordini
//!
//! Tutte le scritture incrementano `version`. Quando il chiamante passa una versione attesa
//! la scrittura avviene solo se coincide con quella salvata (concorrenza ottimistica);
//! senza versione vince l'ultimo che scrive.

use super::{Create, Delete, PoolType, Read};
use crate::core::ids::new_id;
use crate::dtos::{CreateOrderDTO, ReplaceOrderDTO};
use crate::entities::{Order, OrderItem, OrderStatus};
use chrono::Utc;
use sqlx::Error;
use sqlx::types::Json;

const ORDER_COLUMNS: &str = "id, name, phone_number, address, pincode, email, user_id, products, \
     amount, payment_id, status, delivery_rider, qr, rider_token, version, date";

pub struct OrderRepository {
    connection_pool: PoolType,
}

/// Dati di creazione già validati, con il proprietario risolto dal token
pub struct NewOrder<'a> {
    pub user_id: &'a str,
    pub data: &'a CreateOrderDTO,
}

impl OrderRepository {
    pub fn new(connection_pool: PoolType) -> Self {
        Self { connection_pool }
    }

    /// Lista degli ordini dal più recente, opzionalmente filtrata per utente
    pub async fn find_all(&self, user_id: Option<&str>) -> Result<Vec<Order>, Error> {
        let orders = match user_id {
            Some(uid) => {
                sqlx::query_as::<_, Order>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = ? ORDER BY date DESC"
                ))
                .bind(uid)
                .fetch_all(&self.connection_pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Order>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders ORDER BY date DESC"
                ))
                .fetch_all(&self.connection_pool)
                .await?
            }
        };

        Ok(orders)
    }

    /// Sostituisce tutti i campi del documento forniti dal payload.
    ///
    /// # Returns
    /// * `Ok(Some(Order))` - documento aggiornato
    /// * `Ok(None)` - nessun documento con quell'id, oppure versione non coincidente
    pub async fn replace(
        &self,
        id: &str,
        data: &ReplaceOrderDTO,
        expected_version: Option<i64>,
    ) -> Result<Option<Order>, Error> {
        let products: Vec<OrderItem> = data.products.iter().cloned().map(OrderItem::from).collect();

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                name = ?, phone_number = ?, address = ?, pincode = ?, email = ?, user_id = ?,
                products = ?, amount = ?, payment_id = ?, status = ?, qr = ?,
                version = version + 1
            WHERE id = ? AND (? IS NULL OR version = ?)
            "#,
        )
        .bind(&data.name)
        .bind(&data.phone_number)
        .bind(&data.address)
        .bind(&data.pincode)
        .bind(&data.email)
        .bind(&data.userid)
        .bind(Json(&products))
        .bind(data.amount)
        .bind(&data.payment_id)
        .bind(data.status)
        .bind(&data.qr)
        .bind(id)
        .bind(expected_version)
        .bind(expected_version)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.read(id).await
    }

    /// Aggiornamento parziale del solo stato
    pub async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
        expected_version: Option<i64>,
    ) -> Result<Option<Order>, Error> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET status = ?, version = version + 1
            WHERE id = ? AND (? IS NULL OR version = ?)
            "#,
        )
        .bind(status)
        .bind(id)
        .bind(expected_version)
        .bind(expected_version)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.read(id).await
    }

    /// Imposta il rider e il token di consegna
    pub async fn assign_rider(
        &self,
        id: &str,
        rider_id: &str,
        rider_token: &str,
    ) -> Result<Option<Order>, Error> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET delivery_rider = ?, rider_token = ?, version = version + 1
            WHERE id = ?
            "#,
        )
        .bind(rider_id)
        .bind(rider_token)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.read(id).await
    }
}

impl<'a> Create<Order, NewOrder<'a>> for OrderRepository {
    async fn create(&self, new_order: &NewOrder<'a>) -> Result<Order, Error> {
        let data = new_order.data;
        let order = Order {
            id: new_id(),
            name: data.name.clone(),
            phone_number: data.phone_number.clone(),
            address: data.address.clone(),
            pincode: data.pincode.clone(),
            email: data.email.clone(),
            user_id: new_order.user_id.to_string(),
            products: Json(data.products.iter().cloned().map(OrderItem::from).collect()),
            amount: data.amount,
            payment_id: data.payment_id.clone(),
            status: OrderStatus::Pending,
            delivery_rider: None,
            qr: None,
            rider_token: None,
            version: 1,
            date: Utc::now(),
        };

        sqlx::query(&format!(
            "INSERT INTO orders ({ORDER_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&order.id)
        .bind(&order.name)
        .bind(&order.phone_number)
        .bind(&order.address)
        .bind(&order.pincode)
        .bind(&order.email)
        .bind(&order.user_id)
        .bind(&order.products)
        .bind(order.amount)
        .bind(&order.payment_id)
        .bind(order.status)
        .bind(&order.delivery_rider)
        .bind(&order.qr)
        .bind(&order.rider_token)
        .bind(order.version)
        .bind(order.date)
        .execute(&self.connection_pool)
        .await?;

        Ok(order)
    }
}

impl Read<Order, str> for OrderRepository {
    async fn read(&self, id: &str) -> Result<Option<Order>, Error> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(order)
    }
}

impl Delete<str> for OrderRepository {
    async fn delete(&self, id: &str) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
