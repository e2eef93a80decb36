use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::config;
use crate::database::repositories::users;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::validation;

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
}

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub async fn new() -> Result<Self, ApiError> {
        let pool = DatabaseManager::pool().await?.clone();
        Ok(Self { pool })
    }

    pub async fn register(&self, request: RegisterUserRequest) -> Result<(), ApiError> {
        validation::validate_register(&request)?;
        let username = request.username.as_deref().unwrap_or_default();
        let password = request.password.as_deref().unwrap_or_default();
        let name = request.name.as_deref().unwrap_or_default();

        let mut tx = self.pool.begin().await?;

        if users::exists(&mut *tx, username).await? {
            return Err(ApiError::conflict("username already registered"));
        }

        let hash = bcrypt::hash(password, config::config().security.bcrypt_cost)?;
        users::insert(&mut *tx, username, name, &hash).await?;

        tx.commit().await?;

        tracing::info!(username = %username, "user registered");
        Ok(())
    }

    /// Profile of the authenticated user; the middleware re-reads the
    /// user row on every request, so this is already fresh.
    pub fn get(&self, current: &CurrentUser) -> UserResponse {
        UserResponse {
            username: current.username.clone(),
            name: current.name.clone(),
        }
    }

    /// PATCH semantics: a field is overwritten iff the request supplies
    /// it. A supplied password is re-hashed before storage.
    pub async fn update(
        &self,
        current: &CurrentUser,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, ApiError> {
        validation::validate_update_user(&request)?;

        let mut tx = self.pool.begin().await?;

        let mut user = users::find_by_username(&mut *tx, &current.username)
            .await?
            .ok_or_else(|| ApiError::unauthorized("unauthorized"))?;

        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(password) = request.password {
            user.password = bcrypt::hash(&password, config::config().security.bcrypt_cost)?;
        }

        users::update(&mut *tx, &user).await?;
        tx.commit().await?;

        tracing::info!(username = %user.username, "user profile updated");
        Ok(UserResponse {
            username: user.username,
            name: user.name,
        })
    }
}
