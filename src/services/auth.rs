use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config;
use crate::database::models::Session;
use crate::database::repositories::{sessions, users};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::validation;

#[derive(Debug, Deserialize)]
pub struct LoginUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    /// Epoch millis at which the token stops being accepted
    pub expired_at: i64,
}

pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub async fn new() -> Result<Self, ApiError> {
        let pool = DatabaseManager::pool().await?.clone();
        Ok(Self { pool })
    }

    /// Authenticate and mint a fresh opaque session token.
    ///
    /// Unknown usernames and wrong passwords produce the identical 401
    /// message; nothing distinguishes which credential was bad.
    pub async fn login(&self, request: LoginUserRequest) -> Result<TokenResponse, ApiError> {
        validation::validate_login(&request)?;
        let username = request.username.as_deref().unwrap_or_default();
        let password = request.password.as_deref().unwrap_or_default();

        let mut tx = self.pool.begin().await?;

        let user = users::find_by_username(&mut *tx, username)
            .await?
            .ok_or_else(|| ApiError::unauthorized("username and password doesn't match"))?;

        if !bcrypt::verify(password, &user.password)? {
            return Err(ApiError::unauthorized("username and password doesn't match"));
        }

        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4().to_string(),
            username: user.username.clone(),
            expires_at: now.timestamp_millis() + config::config().security.token_ttl_ms,
            created_at: now,
        };
        sessions::insert(&mut *tx, &session).await?;

        tx.commit().await?;

        tracing::info!(username = %user.username, "user logged in");
        Ok(TokenResponse {
            token: session.token,
            expired_at: session.expires_at,
        })
    }

    /// Remove exactly the session the caller presented; other sessions
    /// belonging to the same user stay valid.
    pub async fn logout(&self, current: &CurrentUser) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await?;
        sessions::delete(&mut *tx, &current.token).await?;
        tx.commit().await?;

        tracing::info!(username = %current.username, "user logged out");
        Ok(())
    }
}
