//! UserRepository - Repository per la gestione degli utenti (clienti, staff, admin, rider)

use super::{Create, PoolType, Read};
use crate::core::ids::new_id;
use crate::dtos::CreateUserDTO;
use crate::entities::{User, UserRole};
use chrono::Utc;
use sqlx::{Error, QueryBuilder, Sqlite};

const USER_COLUMNS: &str = "id, name, email, phone, password, role, is_admin, date";

pub struct UserRepository {
    connection_pool: PoolType,
}

impl UserRepository {
    pub fn new(connection_pool: PoolType) -> UserRepository {
        Self { connection_pool }
    }

    /// L'email è univoca, viene usata come credenziale di login
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }

    /// Tutti gli utenti con ruolo rider, ordinati per nome
    pub async fn find_riders(&self) -> Result<Vec<User>, Error> {
        let riders = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = ? ORDER BY name ASC"
        ))
        .bind(UserRole::Rider)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(riders)
    }

    /// Lookup multiplo per id, usato per arricchire i messaggi della chat admin
    pub async fn find_many_by_ids(&self, ids: &[String]) -> Result<Vec<User>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query =
            QueryBuilder::<Sqlite>::new(format!("SELECT {USER_COLUMNS} FROM users WHERE id IN ("));
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let users = query
            .build_query_as::<User>()
            .fetch_all(&self.connection_pool)
            .await?;

        Ok(users)
    }
}

impl Create<User, CreateUserDTO> for UserRepository {
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        let user = User {
            id: new_id(),
            name: data.name.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            password: data.password.clone(),
            role: data.role,
            is_admin: data.is_admin,
            date: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, phone, password, role, is_admin, date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password)
        .bind(user.role)
        .bind(user.is_admin)
        .bind(user.date)
        .execute(&self.connection_pool)
        .await?;

        Ok(user)
    }
}

impl Read<User, str> for UserRepository {
    async fn read(&self, id: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}
