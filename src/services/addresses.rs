use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Address;
use crate::database::repositories::{addresses, contacts};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::validation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
}

pub struct AddressService {
    pool: PgPool,
}

impl AddressService {
    pub async fn new() -> Result<Self, ApiError> {
        let pool = DatabaseManager::pool().await?.clone();
        Ok(Self { pool })
    }

    pub async fn create(
        &self,
        current: &CurrentUser,
        contact_id: &str,
        request: CreateAddressRequest,
    ) -> Result<AddressResponse, ApiError> {
        validation::validate_create_address(&request)?;

        let mut tx = self.pool.begin().await?;

        let contact = contacts::find_first_by_user_and_id(&mut *tx, &current.username, contact_id)
            .await?
            .ok_or_else(|| ApiError::not_found("contact not found"))?;

        let now = Utc::now();
        let address = Address {
            id: Uuid::new_v4().to_string(),
            contact_id: contact.id,
            street: request.street,
            city: request.city,
            province: request.province,
            country: request.country.unwrap_or_default(),
            postal_code: request.postal_code,
            created_at: now,
            updated_at: now,
        };

        addresses::insert(&mut *tx, &address).await?;
        tx.commit().await?;

        tracing::info!(
            username = %current.username,
            contact_id = %address.contact_id,
            address_id = %address.id,
            "address created"
        );
        Ok(to_address_response(address))
    }

    pub async fn get(
        &self,
        current: &CurrentUser,
        contact_id: &str,
        address_id: &str,
    ) -> Result<AddressResponse, ApiError> {
        let contact = contacts::find_first_by_user_and_id(&self.pool, &current.username, contact_id)
            .await?
            .ok_or_else(|| ApiError::not_found("contact not found"))?;

        let address = addresses::find_first_by_contact_and_id(&self.pool, &contact.id, address_id)
            .await?
            .ok_or_else(|| ApiError::not_found("address not found"))?;

        Ok(to_address_response(address))
    }

    /// Partial update, with one deliberate exception: `country` is a
    /// required request field and always overwrites the stored value.
    pub async fn update(
        &self,
        current: &CurrentUser,
        contact_id: &str,
        address_id: &str,
        request: UpdateAddressRequest,
    ) -> Result<AddressResponse, ApiError> {
        validation::validate_update_address(&request)?;

        let mut tx = self.pool.begin().await?;

        let contact = contacts::find_first_by_user_and_id(&mut *tx, &current.username, contact_id)
            .await?
            .ok_or_else(|| ApiError::not_found("contact not found"))?;

        let mut address =
            addresses::find_first_by_contact_and_id(&mut *tx, &contact.id, address_id)
                .await?
                .ok_or_else(|| ApiError::not_found("address not found"))?;

        if let Some(street) = request.street {
            address.street = Some(street);
        }
        if let Some(city) = request.city {
            address.city = Some(city);
        }

        address.country = request.country.unwrap_or_default();

        if let Some(postal_code) = request.postal_code {
            address.postal_code = Some(postal_code);
        }
        if let Some(province) = request.province {
            address.province = Some(province);
        }

        addresses::update(&mut *tx, &address).await?;
        tx.commit().await?;

        tracing::info!(
            username = %current.username,
            contact_id = %address.contact_id,
            address_id = %address.id,
            "address updated"
        );
        Ok(to_address_response(address))
    }

    pub async fn remove(
        &self,
        current: &CurrentUser,
        contact_id: &str,
        address_id: &str,
    ) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await?;

        let contact = contacts::find_first_by_user_and_id(&mut *tx, &current.username, contact_id)
            .await?
            .ok_or_else(|| ApiError::not_found("contact not found"))?;

        let address = addresses::find_first_by_contact_and_id(&mut *tx, &contact.id, address_id)
            .await?
            .ok_or_else(|| ApiError::not_found("address not found"))?;

        addresses::delete_by_id(&mut *tx, &address.id).await?;
        tx.commit().await?;

        tracing::info!(
            username = %current.username,
            contact_id = %address.contact_id,
            address_id = %address.id,
            "address deleted"
        );
        Ok(())
    }

    /// Every address of the contact, oldest first, unpaginated.
    pub async fn list(
        &self,
        current: &CurrentUser,
        contact_id: &str,
    ) -> Result<Vec<AddressResponse>, ApiError> {
        let contact = contacts::find_first_by_user_and_id(&self.pool, &current.username, contact_id)
            .await?
            .ok_or_else(|| ApiError::not_found("contact not found"))?;

        let rows = addresses::find_all_by_contact(&self.pool, &contact.id).await?;
        Ok(rows.into_iter().map(to_address_response).collect())
    }
}

fn to_address_response(address: Address) -> AddressResponse {
    AddressResponse {
        id: address.id,
        street: address.street,
        city: address.city,
        province: address.province,
        country: address.country,
        postal_code: address.postal_code,
    }
}
