use axum::extract::Path;
use axum::{Extension, Json};

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::addresses::{AddressResponse, CreateAddressRequest, UpdateAddressRequest};
use crate::services::AddressService;

/// POST /api/contacts/:contactId/addresses - Add an address to a contact
pub async fn create(
    Extension(current): Extension<CurrentUser>,
    Path(contact_id): Path<String>,
    Json(request): Json<CreateAddressRequest>,
) -> ApiResult<AddressResponse> {
    let response = AddressService::new()
        .await?
        .create(&current, &contact_id, request)
        .await?;
    Ok(ApiResponse::success(response))
}

/// GET /api/contacts/:contactId/addresses/:addressId
pub async fn get(
    Extension(current): Extension<CurrentUser>,
    Path((contact_id, address_id)): Path<(String, String)>,
) -> ApiResult<AddressResponse> {
    let response = AddressService::new()
        .await?
        .get(&current, &contact_id, &address_id)
        .await?;
    Ok(ApiResponse::success(response))
}

/// PUT /api/contacts/:contactId/addresses/:addressId - Partial update
pub async fn update(
    Extension(current): Extension<CurrentUser>,
    Path((contact_id, address_id)): Path<(String, String)>,
    Json(request): Json<UpdateAddressRequest>,
) -> ApiResult<AddressResponse> {
    let response = AddressService::new()
        .await?
        .update(&current, &contact_id, &address_id, request)
        .await?;
    Ok(ApiResponse::success(response))
}

/// DELETE /api/contacts/:contactId/addresses/:addressId
pub async fn delete(
    Extension(current): Extension<CurrentUser>,
    Path((contact_id, address_id)): Path<(String, String)>,
) -> ApiResult<&'static str> {
    AddressService::new()
        .await?
        .remove(&current, &contact_id, &address_id)
        .await?;
    Ok(ApiResponse::success("Ok"))
}

/// GET /api/contacts/:contactId/addresses - List a contact's addresses
pub async fn list(
    Extension(current): Extension<CurrentUser>,
    Path(contact_id): Path<String>,
) -> ApiResult<Vec<AddressResponse>> {
    let response = AddressService::new().await?.list(&current, &contact_id).await?;
    Ok(ApiResponse::success(response))
}
