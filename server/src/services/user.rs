//! User services - Registrazione, login, profilo e gestione rider

use super::ensure_valid_id;
use crate::core::{AppError, AppState, encode_jwt};
use crate::dtos::{CreateRiderDTO, CreateUserDTO, RiderDTO, SignInDTO, SignInResponse, SignUpDTO, UserDTO};
use crate::entities::{User, UserRole};
use crate::repositories::{Create, Read};
use axum::{
    extract::{Json, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Registra un account controllando l'unicità dell'email
async fn register_account(
    state: &AppState,
    body: SignUpDTO,
    role: UserRole,
) -> Result<User, AppError> {
    body.validate()?;

    if state.user.find_by_email(&body.email).await?.is_some() {
        warn!("Email already registered: {}", body.email);
        return Err(AppError::conflict("User already exists"));
    }

    let password_hash = User::hash_password(&body.password)?;

    let new_user = CreateUserDTO {
        name: body.name.trim().to_string(),
        email: body.email,
        phone: body.phone,
        password: password_hash,
        role,
        is_admin: role == UserRole::Admin,
    };

    Ok(state.user.create(&new_user).await?)
}

#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignUpDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Registering new user");
    // 1. Validare il DTO con validator (nome, email, password)
    // 2. Controllare che l'email non sia già registrata, altrimenti CONFLICT
    // 3. Generare l'hash della password e salvare l'utente con ruolo user
    // 4. Ritornare 201 con il DTO dell'utente (senza password)
    let created = register_account(&state, body, UserRole::User).await?;
    info!("User registered with id {}", created.id);
    Ok((StatusCode::CREATED, Json(UserDTO::from(created))))
}

#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignInDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("User sign in");
    // 1. Cercare l'utente tramite email, se non esiste UNAUTHORIZED
    // 2. Verificare la password contro l'hash memorizzato
    // 3. Generare il token JWT e restituirlo sia nel body sia nell'header Authorization
    let user = match state.user.find_by_email(&body.email).await? {
        Some(user) => user,
        None => {
            warn!("Sign in attempt for unknown email");
            return Err(AppError::unauthorized("Invalid email or password"));
        }
    };

    if !user.verify_password(&body.password) {
        warn!("Wrong password for user {}", user.id);
        return Err(AppError::unauthorized("Invalid email or password"));
    }

    let token = encode_jwt(user.email.clone(), user.id.clone(), &state.jwt_secret)?;

    let mut headers = HeaderMap::new();
    let header_value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| AppError::internal_server_error("Failed to build authorization header"))?;
    headers.insert("Authorization", header_value);

    info!("User {} signed in", user.id);
    Ok((
        StatusCode::OK,
        headers,
        Json(SignInResponse {
            success: true,
            token,
            user: UserDTO::from(user),
        }),
    ))
}

#[instrument(skip(state), fields(user_id = %user_id))]
pub async fn get_user_by_id(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserDTO>, AppError> {
    debug!("Fetching user by ID");
    ensure_valid_id(&user_id, "Invalid user ID format")?;

    let user = state
        .user
        .read(&user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserDTO::from(user)))
}

/// Lista dei rider per il menu di assegnazione (solo admin)
#[instrument(skip(state))]
pub async fn list_riders(State(state): State<Arc<AppState>>) -> Result<Json<Vec<RiderDTO>>, AppError> {
    let riders = state.user.find_riders().await?;
    info!("Found {} riders", riders.len());
    Ok(Json(riders.into_iter().map(RiderDTO::from).collect()))
}

#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn create_rider(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateRiderDTO>,
) -> Result<impl IntoResponse, AppError> {
    let rider = register_account(&state, body, UserRole::Rider).await?;
    info!("Rider created with id {}", rider.id);
    Ok((StatusCode::CREATED, Json(RiderDTO::from(rider))))
}

/// Crea l'account admin indicato in configurazione se non esiste ancora
pub async fn bootstrap_admin(state: &AppState, email: &str, password: &str) -> Result<(), AppError> {
    if state.user.find_by_email(email).await?.is_some() {
        debug!("Bootstrap admin already present");
        return Ok(());
    }

    let admin = register_account(
        state,
        SignUpDTO {
            name: "Administrator".to_string(),
            email: email.to_string(),
            phone: None,
            password: password.to_string(),
        },
        UserRole::Admin,
    )
    .await?;

    info!("Bootstrap admin created with id {}", admin.id);
    Ok(())
}
