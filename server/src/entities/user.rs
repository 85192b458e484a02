//! User entity - Entità utente con metodi per gestione password

use super::enums::UserRole;
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    // hash bcrypt, mai serializzato verso il client (si passa sempre da UserDTO)
    pub password: String,
    pub role: UserRole,
    pub is_admin: bool,
    pub date: DateTime<Utc>,
}

impl User {
    /// Verify if target_password matches the stored hashed password
    pub fn verify_password(&self, target_password: &str) -> bool {
        verify(target_password, &self.password).unwrap_or(false)
    }

    /// Hash a password using bcrypt with default cost
    pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
        let hash = hash(password, DEFAULT_COST)?;
        Ok(hash)
    }

    /// Un utente è admin se ha il ruolo admin oppure il flag isAdmin
    pub fn has_admin_access(&self) -> bool {
        self.role == UserRole::Admin || self.is_admin
    }
}
