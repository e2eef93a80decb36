use sqlx::PgExecutor;

use crate::database::models::{Session, User};

pub async fn insert<'e>(ex: impl PgExecutor<'e>, session: &Session) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO \"sessions\" (\"token\", \"username\", \"expires_at\") VALUES ($1, $2, $3)",
    )
    .bind(&session.token)
    .bind(&session.username)
    .bind(session.expires_at)
    .execute(ex)
    .await?;
    Ok(())
}

/// Resolve a token to its user, requiring the expiry to be strictly in
/// the future. Expired and unknown tokens are indistinguishable.
pub async fn find_user_by_valid_token<'e>(
    ex: impl PgExecutor<'e>,
    token: &str,
    now_ms: i64,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        "SELECT u.* FROM \"users\" u \
         JOIN \"sessions\" s ON s.\"username\" = u.\"username\" \
         WHERE s.\"token\" = $1 AND s.\"expires_at\" > $2",
    )
    .bind(token)
    .bind(now_ms)
    .fetch_optional(ex)
    .await
}

pub async fn delete<'e>(ex: impl PgExecutor<'e>, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM \"sessions\" WHERE \"token\" = $1")
        .bind(token)
        .execute(ex)
        .await?;
    Ok(())
}
