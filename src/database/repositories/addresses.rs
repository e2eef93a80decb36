use sqlx::PgExecutor;

use crate::database::models::Address;

pub async fn insert<'e>(ex: impl PgExecutor<'e>, address: &Address) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO \"addresses\" (\"id\", \"contact_id\", \"street\", \"city\", \"province\", \"country\", \"postal_code\") \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(&address.id)
    .bind(&address.contact_id)
    .bind(&address.street)
    .bind(&address.city)
    .bind(&address.province)
    .bind(&address.country)
    .bind(&address.postal_code)
    .execute(ex)
    .await?;
    Ok(())
}

/// Scoped by parent contact; callers must have resolved the contact
/// through its owner first.
pub async fn find_first_by_contact_and_id<'e>(
    ex: impl PgExecutor<'e>,
    contact_id: &str,
    id: &str,
) -> Result<Option<Address>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM \"addresses\" WHERE \"contact_id\" = $1 AND \"id\" = $2")
        .bind(contact_id)
        .bind(id)
        .fetch_optional(ex)
        .await
}

pub async fn find_all_by_contact<'e>(
    ex: impl PgExecutor<'e>,
    contact_id: &str,
) -> Result<Vec<Address>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM \"addresses\" WHERE \"contact_id\" = $1 ORDER BY \"created_at\", \"id\"",
    )
    .bind(contact_id)
    .fetch_all(ex)
    .await
}

pub async fn update<'e>(ex: impl PgExecutor<'e>, address: &Address) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE \"addresses\" SET \"street\" = $2, \"city\" = $3, \"province\" = $4, \
         \"country\" = $5, \"postal_code\" = $6, \"updated_at\" = now() WHERE \"id\" = $1",
    )
    .bind(&address.id)
    .bind(&address.street)
    .bind(&address.city)
    .bind(&address.province)
    .bind(&address.country)
    .bind(&address.postal_code)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn delete_by_id<'e>(ex: impl PgExecutor<'e>, id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM \"addresses\" WHERE \"id\" = $1")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(())
}
