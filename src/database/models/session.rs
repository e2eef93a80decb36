use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One login session. Tokens are opaque UUID strings; expiry is epoch
/// millis so it round-trips unchanged through the login response.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub expires_at: i64,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_at <= now_ms
    }
}
