//! Order services - Lista, dettaglio, creazione, stato e assegnazione del rider

use super::ensure_valid_id;
use crate::core::{AppError, AppState, decode_rider_token, encode_rider_token};
use crate::dtos::{
    AssignRiderDTO, CreateNotificationDTO, CreateOrderDTO, MessageResponse, OrderDTO, OrdersQuery,
    ReplaceOrderDTO, UpdateStatusDTO, VerifyDeliveryDTO,
};
use crate::entities::{Order, OrderStatus, User, UserRole};
use crate::repositories::order::NewOrder;
use crate::repositories::{Create, Delete, Read};
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Carica un ordine dal path, 400 se l'id è malformato e 404 se non esiste
async fn load_order(state: &AppState, order_id: &str) -> Result<Order, AppError> {
    ensure_valid_id(order_id, "Invalid id format")?;
    state.order.read(order_id).await?.ok_or_else(|| {
        warn!("Order not found: {}", order_id);
        AppError::not_found("Order not found")
    })
}

/// Gli ordini consegnati non dovrebbero più cambiare. Lato server la regola viene solo
/// segnalata nei log, a meno che `enforce_delivered_lock` non sia attivo.
fn check_delivered_lock(state: &AppState, order: &Order) -> Result<(), AppError> {
    if !order.status.is_terminal() {
        return Ok(());
    }
    if state.enforce_delivered_lock {
        warn!("Rejected change on delivered order {}", order.id);
        return Err(AppError::conflict("Cannot modify status of delivered orders"));
    }
    warn!(
        "Order {} is delivered but is being modified: delivered lock not enforced server-side",
        order.id
    );
    Ok(())
}

/// Confronta la versione inviata dal client con quella salvata
fn check_version(order: &Order, expected: Option<i64>) -> Result<(), AppError> {
    match expected {
        Some(version) if version != order.version => {
            warn!(
                "Stale version for order {}: expected {}, stored {}",
                order.id, version, order.version
            );
            Err(AppError::conflict("Order was modified by someone else")
                .with_details(format!("current version is {}", order.version)))
        }
        _ => Ok(()),
    }
}

#[instrument(skip(state, current_user, params), fields(user_id = %current_user.id))]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Query(params): Query<OrdersQuery>,
) -> Result<Json<Vec<OrderDTO>>, AppError> {
    debug!("Listing orders");
    // Gli admin vedono tutti gli ordini (eventualmente filtrati per ?userid=),
    // gli altri utenti solo i propri
    let filter = if current_user.has_admin_access() {
        if let Some(uid) = params.userid.as_deref() {
            ensure_valid_id(uid, "Invalid user ID format")?;
        }
        params.userid
    } else {
        Some(current_user.id.clone())
    };

    let orders = state.order.find_all(filter.as_deref()).await?;
    info!("Retrieved {} orders", orders.len());
    Ok(Json(orders.into_iter().map(OrderDTO::from).collect()))
}

#[instrument(skip(state, current_user), fields(order_id = %order_id, user_id = %current_user.id))]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    Extension(current_user): Extension<User>,
) -> Result<Json<OrderDTO>, AppError> {
    debug!("Fetching order");
    let order = load_order(&state, &order_id).await?;

    let is_owner = order.user_id == current_user.id;
    let is_assigned_rider = order.delivery_rider.as_deref() == Some(current_user.id.as_str());
    if !(is_owner || is_assigned_rider || current_user.has_admin_access()) {
        warn!("User {} cannot read order {}", current_user.id, order.id);
        return Err(AppError::forbidden("You cannot access this order"));
    }

    Ok(Json(OrderDTO::from(order)))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateOrderDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Creating new order");
    // 1. Validare il DTO (almeno un prodotto, campi cliente presenti)
    // 2. Salvare l'ordine con stato pending e versione 1
    // 3. Creare una notifica per gli admin che referenzia l'ordine
    // 4. Ritornare 201 con l'ordine creato
    body.validate()?;

    let order = state
        .order
        .create(&NewOrder {
            user_id: &current_user.id,
            data: &body,
        })
        .await?;

    state
        .notification
        .create(&CreateNotificationDTO {
            notification_type: "new-order".to_string(),
            title: "New order received".to_string(),
            message: format!("{} placed order {}", order.name, order.id),
            order_id: Some(order.id.clone()),
            created_at: Utc::now(),
        })
        .await?;

    info!("Order {} created", order.id);
    Ok((StatusCode::CREATED, Json(OrderDTO::from(order))))
}

#[instrument(skip(state, body), fields(order_id = %order_id, status = %body.status))]
pub async fn replace_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    Json(body): Json<ReplaceOrderDTO>,
) -> Result<Json<OrderDTO>, AppError> {
    debug!("Replacing order document");
    // Sostituzione completa: il pannello admin rilegge l'ordine, cambia lo stato e
    // rimanda l'intero documento. Con `version` la scrittura è condizionata.
    body.validate()?;
    let existing = load_order(&state, &order_id).await?;
    check_delivered_lock(&state, &existing)?;
    check_version(&existing, body.version)?;

    let updated = state
        .order
        .replace(&order_id, &body, body.version)
        .await?
        .ok_or_else(|| {
            warn!("Order {} changed during replace", order_id);
            AppError::conflict("Order was modified by someone else")
        })?;

    info!("Order {} replaced, now version {}", updated.id, updated.version);
    Ok(Json(OrderDTO::from(updated)))
}

#[instrument(skip(state, body), fields(order_id = %order_id, status = %body.status))]
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    Json(body): Json<UpdateStatusDTO>,
) -> Result<Json<OrderDTO>, AppError> {
    debug!("Updating order status");
    let existing = load_order(&state, &order_id).await?;
    check_delivered_lock(&state, &existing)?;
    check_version(&existing, body.version)?;

    let updated = state
        .order
        .update_status(&order_id, body.status, body.version)
        .await?
        .ok_or_else(|| AppError::conflict("Order was modified by someone else"))?;

    info!("Order {} moved to {}", updated.id, updated.status);
    Ok(Json(OrderDTO::from(updated)))
}

#[instrument(skip(state, body), fields(order_id = %order_id))]
pub async fn assign_rider(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    Json(body): Json<AssignRiderDTO>,
) -> Result<Json<OrderDTO>, AppError> {
    debug!("Assigning rider to order");
    // 1. Validare riderId (presente e ben formato)
    // 2. Verificare che l'ordine esista
    // 3. Verificare che il rider esista e abbia ruolo rider
    // 4. Generare il token di consegna e salvare rider + token sull'ordine
    let rider_id = body
        .rider_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Rider ID is required"))?;
    ensure_valid_id(&rider_id, "Invalid rider ID format")?;

    let order = load_order(&state, &order_id).await?;

    match state.user.read(&rider_id).await? {
        Some(user) if user.role == UserRole::Rider => {}
        _ => {
            warn!("Rider {} not found", rider_id);
            return Err(AppError::not_found("Rider not found"));
        }
    }

    let rider_token = encode_rider_token(&order.id, &rider_id, &state.jwt_secret)?;

    let updated = state
        .order
        .assign_rider(&order.id, &rider_id, &rider_token)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    info!("Rider {} assigned to order {}", rider_id, updated.id);
    Ok(Json(OrderDTO::from(updated)))
}

#[instrument(skip(state, current_user, body), fields(order_id = %order_id, user_id = %current_user.id))]
pub async fn verify_delivery(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    Extension(current_user): Extension<User>,
    Json(body): Json<VerifyDeliveryDTO>,
) -> Result<Json<OrderDTO>, AppError> {
    debug!("Verifying delivery token");
    let order = load_order(&state, &order_id).await?;

    if order.delivery_rider.as_deref() != Some(current_user.id.as_str()) {
        warn!("User {} is not the rider of order {}", current_user.id, order.id);
        return Err(AppError::forbidden("Order is not assigned to you"));
    }

    let claims = decode_rider_token(&body.rider_token, &state.jwt_secret)
        .map_err(|_| AppError::bad_request("Invalid rider token"))?;
    let token_matches = claims.order_id == order.id
        && claims.rider_id == current_user.id
        && order.rider_token.as_deref() == Some(body.rider_token.as_str());
    if !token_matches {
        warn!("Rider token does not match order {}", order.id);
        return Err(AppError::bad_request("Invalid rider token"));
    }

    if order.status == OrderStatus::Delivered {
        debug!("Order {} already delivered", order.id);
        return Ok(Json(OrderDTO::from(order)));
    }

    let delivered = state
        .order
        .update_status(&order.id, OrderStatus::Delivered, None)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    info!("Order {} delivered by rider {}", delivered.id, current_user.id);
    Ok(Json(OrderDTO::from(delivered)))
}

#[instrument(skip(state), fields(order_id = %order_id))]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    ensure_valid_id(&order_id, "Invalid id format")?;

    if !state.order.delete(&order_id).await? {
        return Err(AppError::not_found("Order not found"));
    }

    info!("Order {} deleted", order_id);
    Ok(Json(MessageResponse::ok("Order deleted")))
}
