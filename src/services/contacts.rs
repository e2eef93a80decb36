use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config;
use crate::database::models::Contact;
use crate::database::repositories::contacts;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{CurrentUser, PagingResponse};
use crate::search::ContactSearch;
use crate::validation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// One page of search results plus its paging metadata
#[derive(Debug)]
pub struct ContactPage {
    pub contacts: Vec<ContactResponse>,
    pub paging: PagingResponse,
}

pub struct ContactService {
    pool: PgPool,
}

impl ContactService {
    pub async fn new() -> Result<Self, ApiError> {
        let pool = DatabaseManager::pool().await?.clone();
        Ok(Self { pool })
    }

    pub async fn create(
        &self,
        current: &CurrentUser,
        request: CreateContactRequest,
    ) -> Result<ContactResponse, ApiError> {
        validation::validate_create_contact(&request)?;

        let now = Utc::now();
        let contact = Contact {
            id: Uuid::new_v4().to_string(),
            first_name: request.first_name.unwrap_or_default(),
            last_name: request.last_name,
            phone: request.phone,
            email: request.email,
            username: current.username.clone(),
            created_at: now,
            updated_at: now,
        };

        let mut tx = self.pool.begin().await?;
        contacts::insert(&mut *tx, &contact).await?;
        tx.commit().await?;

        tracing::info!(username = %current.username, contact_id = %contact.id, "contact created");
        Ok(to_contact_response(contact))
    }

    pub async fn get(&self, current: &CurrentUser, id: &str) -> Result<ContactResponse, ApiError> {
        let contact = contacts::find_first_by_user_and_id(&self.pool, &current.username, id)
            .await?
            .ok_or_else(|| ApiError::not_found("contact not found"))?;
        Ok(to_contact_response(contact))
    }

    /// Partial update: every field is overwritten iff the request
    /// supplies it, absent fields keep their stored value.
    pub async fn update(
        &self,
        current: &CurrentUser,
        id: &str,
        request: UpdateContactRequest,
    ) -> Result<ContactResponse, ApiError> {
        validation::validate_update_contact(&request)?;

        let mut tx = self.pool.begin().await?;

        let mut contact = contacts::find_first_by_user_and_id(&mut *tx, &current.username, id)
            .await?
            .ok_or_else(|| ApiError::not_found("contact not found"))?;

        if let Some(first_name) = request.first_name {
            contact.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            contact.last_name = Some(last_name);
        }
        if let Some(phone) = request.phone {
            contact.phone = Some(phone);
        }
        if let Some(email) = request.email {
            contact.email = Some(email);
        }

        contacts::update(&mut *tx, &contact).await?;
        tx.commit().await?;

        tracing::info!(username = %current.username, contact_id = %contact.id, "contact updated");
        Ok(to_contact_response(contact))
    }

    pub async fn delete(&self, current: &CurrentUser, id: &str) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await?;

        let contact = contacts::find_first_by_user_and_id(&mut *tx, &current.username, id)
            .await?
            .ok_or_else(|| ApiError::not_found("contact not found"))?;

        contacts::delete_by_id(&mut *tx, &contact.id).await?;
        tx.commit().await?;

        tracing::info!(username = %current.username, contact_id = %contact.id, "contact deleted");
        Ok(())
    }

    /// Paginated search over the caller's own contacts. Owner equality
    /// is always applied; the optional filters narrow it further.
    pub async fn search(
        &self,
        current: &CurrentUser,
        name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        page: i64,
        size: i64,
    ) -> Result<ContactPage, ApiError> {
        validation::validate_search_paging(page, size)?;
        let size = size.min(config::config().api.max_page_size);

        let search = ContactSearch {
            username: current.username.clone(),
            name,
            email,
            phone,
            page,
            size,
        };

        let (rows, total_elements) = contacts::search(&self.pool, &search).await?;
        let total_pages = search.total_pages(total_elements);

        Ok(ContactPage {
            contacts: rows.into_iter().map(to_contact_response).collect(),
            paging: PagingResponse {
                current_page: page,
                total_pages,
                size,
            },
        })
    }
}

fn to_contact_response(contact: Contact) -> ContactResponse {
    ContactResponse {
        id: contact.id,
        first_name: contact.first_name,
        last_name: contact.last_name,
        phone: contact.phone,
        email: contact.email,
    }
}
