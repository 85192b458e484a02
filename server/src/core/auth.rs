use crate::core::{AppError, AppState};
use crate::entities::User;
use crate::repositories::Read;
use axum::extract::State;
use axum::{
    body::Body,
    extract::Request,
    http::{self, HeaderMap, Response},
    middleware::Next,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

// struct che codifica il contenuto del token jwt di sessione
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub id: String,
    pub email: String,
}

// token consegnato al rider (e codificato nel QR): lega un ordine al rider assegnato
#[derive(Debug, Serialize, Deserialize)]
pub struct RiderTokenClaims {
    pub exp: usize,
    pub iat: usize,
    pub order_id: String,
    pub rider_id: String,
}

#[instrument(skip(secret), fields(email = %email, id = %id))]
pub fn encode_jwt(
    email: String,
    id: String,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let claim = Claims {
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(24)).timestamp() as usize,
        email,
        id,
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .inspect_err(|e| error!("Failed to encode JWT token: {:?}", e))
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(
    jwt_token: &str,
    secret: &str,
) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    debug!("Decoding JWT token");
    decode(
        jwt_token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .inspect_err(|e| warn!("Failed to decode JWT token: {:?}", e))
}

#[instrument(skip(secret), fields(order_id = %order_id, rider_id = %rider_id))]
pub fn encode_rider_token(
    order_id: &str,
    rider_id: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = RiderTokenClaims {
        iat: now.timestamp() as usize,
        exp: (now + Duration::days(7)).timestamp() as usize,
        order_id: order_id.to_string(),
        rider_id: rider_id.to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

pub fn decode_rider_token(
    token: &str,
    secret: &str,
) -> Result<RiderTokenClaims, jsonwebtoken::errors::Error> {
    decode::<RiderTokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Estrae il token da un header `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(http::header::AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => {
            Some(token.to_string())
        }
        _ => None,
    }
}

#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let token = bearer_token(req.headers()).ok_or_else(|| {
        warn!("Missing or malformed authorization header");
        AppError::unauthorized("Unauthorized - No token provided")
    })?;

    let token_data = decode_jwt(&token, &state.jwt_secret)
        .map_err(|_| AppError::unauthorized("Unauthorized - Invalid token"))?;

    // Fetch the user details from the database
    let current_user = state
        .user
        .read(&token_data.claims.id)
        .await?
        .ok_or_else(|| {
            warn!("User not found in database: {}", token_data.claims.id);
            AppError::not_found("User not found")
        })?;

    info!("User authenticated: {}", current_user.email);
    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

/// Middleware che verifica che l'utente corrente sia admin (ruolo admin oppure flag isAdmin).
/// Deve essere montato dopo `authentication_middleware`.
#[instrument(skip(req, next))]
pub async fn admin_middleware(req: Request, next: Next) -> Result<Response<Body>, AppError> {
    let current_user = req.extensions().get::<User>().ok_or_else(|| {
        warn!("User not found in request extensions");
        AppError::unauthorized("Unauthorized - No token provided")
    })?;

    if !current_user.has_admin_access() {
        warn!("User {} tried to access an admin route", current_user.id);
        return Err(AppError::forbidden("Admin access required"));
    }

    debug!("Admin check passed for user {}", current_user.id);
    Ok(next.run(req).await)
}
