use sqlx::PgExecutor;

use crate::database::models::User;

pub async fn exists<'e>(ex: impl PgExecutor<'e>, username: &str) -> Result<bool, sqlx::Error> {
    let (found,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM \"users\" WHERE \"username\" = $1)")
            .bind(username)
            .fetch_one(ex)
            .await?;
    Ok(found)
}

pub async fn find_by_username<'e>(
    ex: impl PgExecutor<'e>,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM \"users\" WHERE \"username\" = $1")
        .bind(username)
        .fetch_optional(ex)
        .await
}

pub async fn insert<'e>(
    ex: impl PgExecutor<'e>,
    username: &str,
    name: &str,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO \"users\" (\"username\", \"name\", \"password\") VALUES ($1, $2, $3)")
        .bind(username)
        .bind(name)
        .bind(password_hash)
        .execute(ex)
        .await?;
    Ok(())
}

pub async fn update<'e>(ex: impl PgExecutor<'e>, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE \"users\" SET \"name\" = $2, \"password\" = $3, \"updated_at\" = now() \
         WHERE \"username\" = $1",
    )
    .bind(&user.username)
    .bind(&user.name)
    .bind(&user.password)
    .execute(ex)
    .await?;
    Ok(())
}
