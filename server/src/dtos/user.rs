//! User DTOs - Data Transfer Objects per utenti e rider

use crate::entities::{User, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// struct per gestire io col client, la password non è mai esposta
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_admin: bool,
    pub date: DateTime<Utc>,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            role: value.role,
            is_admin: value.is_admin,
            date: value.date,
        }
    }
}

/// Vista ridotta di un rider per il menu di assegnazione
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RiderDTO {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for RiderDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct SignUpDTO {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Email is not valid"))]
    pub email: String,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[validate(length(min = 6, max = 128, message = "Password must be between 6 and 128 characters"))]
    pub password: String,
}

/// Il rider viene creato da un admin con gli stessi campi della registrazione
pub type CreateRiderDTO = SignUpDTO;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignInDTO {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SignInResponse {
    pub success: bool,
    pub token: String,
    pub user: UserDTO,
}

/// DTO per creare un nuovo utente (senza id, password già hashata)
#[derive(Debug, Clone)]
pub struct CreateUserDTO {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub role: UserRole,
    pub is_admin: bool,
}
