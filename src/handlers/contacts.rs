use axum::extract::{Path, Query};
use axum::{Extension, Json};
use serde::{de, Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

use crate::config;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::contacts::{ContactResponse, CreateContactRequest, UpdateContactRequest};
use crate::services::ContactService;

#[derive(Debug, Deserialize)]
pub struct SearchContactParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub size: Option<i64>,
}

/// Treat `?page=` the same as an absent parameter so the defaults apply
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}

/// POST /api/contacts - Create a contact owned by the caller
pub async fn create(
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<CreateContactRequest>,
) -> ApiResult<ContactResponse> {
    let response = ContactService::new().await?.create(&current, request).await?;
    Ok(ApiResponse::success(response))
}

/// GET /api/contacts/:contactId - Fetch one of the caller's contacts
pub async fn get(
    Extension(current): Extension<CurrentUser>,
    Path(contact_id): Path<String>,
) -> ApiResult<ContactResponse> {
    let response = ContactService::new().await?.get(&current, &contact_id).await?;
    Ok(ApiResponse::success(response))
}

/// PUT /api/contacts/:contactId - Partial update of a contact
pub async fn update(
    Extension(current): Extension<CurrentUser>,
    Path(contact_id): Path<String>,
    Json(request): Json<UpdateContactRequest>,
) -> ApiResult<ContactResponse> {
    let response = ContactService::new()
        .await?
        .update(&current, &contact_id, request)
        .await?;
    Ok(ApiResponse::success(response))
}

/// DELETE /api/contacts/:contactId - Delete a contact and its addresses
pub async fn delete(
    Extension(current): Extension<CurrentUser>,
    Path(contact_id): Path<String>,
) -> ApiResult<&'static str> {
    ContactService::new()
        .await?
        .delete(&current, &contact_id)
        .await?;
    Ok(ApiResponse::success("Ok"))
}

/// GET /api/contacts?name=&email=&phone=&page=&size= - Paginated search
///
/// Expected Output (Success):
/// ```json
/// {
///   "data": [{ "id": "...", "firstName": "...", ... }],
///   "pagingResponse": { "currentPage": 0, "totalPages": 1, "size": 10 }
/// }
/// ```
pub async fn search(
    Extension(current): Extension<CurrentUser>,
    Query(params): Query<SearchContactParams>,
) -> ApiResult<Vec<ContactResponse>> {
    let page = params.page.unwrap_or(0);
    let size = params
        .size
        .unwrap_or_else(|| config::config().api.default_page_size);

    let result = ContactService::new()
        .await?
        .search(
            &current,
            params.name,
            params.email,
            params.phone,
            page,
            size,
        )
        .await?;

    Ok(ApiResponse::with_paging(result.contacts, result.paging))
}
