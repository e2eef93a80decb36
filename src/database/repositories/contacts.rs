use sqlx::{PgExecutor, PgPool};

use crate::database::models::Contact;
use crate::search::ContactSearch;

pub async fn insert<'e>(ex: impl PgExecutor<'e>, contact: &Contact) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO \"contacts\" (\"id\", \"first_name\", \"last_name\", \"phone\", \"email\", \"username\") \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&contact.id)
    .bind(&contact.first_name)
    .bind(&contact.last_name)
    .bind(&contact.phone)
    .bind(&contact.email)
    .bind(&contact.username)
    .execute(ex)
    .await?;
    Ok(())
}

/// Ownership-scoped lookup: the compound (owner, id) key is the only way
/// a contact row is ever fetched.
pub async fn find_first_by_user_and_id<'e>(
    ex: impl PgExecutor<'e>,
    username: &str,
    id: &str,
) -> Result<Option<Contact>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM \"contacts\" WHERE \"username\" = $1 AND \"id\" = $2")
        .bind(username)
        .bind(id)
        .fetch_optional(ex)
        .await
}

pub async fn update<'e>(ex: impl PgExecutor<'e>, contact: &Contact) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE \"contacts\" SET \"first_name\" = $2, \"last_name\" = $3, \"phone\" = $4, \
         \"email\" = $5, \"updated_at\" = now() WHERE \"id\" = $1",
    )
    .bind(&contact.id)
    .bind(&contact.first_name)
    .bind(&contact.last_name)
    .bind(&contact.phone)
    .bind(&contact.email)
    .execute(ex)
    .await?;
    Ok(())
}

/// Addresses go with the contact via the ON DELETE CASCADE constraint.
pub async fn delete_by_id<'e>(ex: impl PgExecutor<'e>, id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM \"contacts\" WHERE \"id\" = $1")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(())
}

/// Run a search twice: once for the page of rows, once for the total
/// count that drives the paging metadata.
pub async fn search(
    pool: &PgPool,
    search: &ContactSearch,
) -> Result<(Vec<Contact>, i64), sqlx::Error> {
    let sql = search.to_sql();
    let mut query = sqlx::query_as::<_, Contact>(&sql.query);
    for param in &sql.params {
        query = query.bind(param);
    }
    let rows = query.fetch_all(pool).await?;

    let count_sql = search.to_count_sql();
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql.query);
    for param in &count_sql.params {
        count_query = count_query.bind(param);
    }
    let total = count_query.fetch_one(pool).await?;

    Ok((rows, total))
}
