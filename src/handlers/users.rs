use axum::{Extension, Json};

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::users::{RegisterUserRequest, UpdateUserRequest, UserResponse};
use crate::services::UserService;

/// POST /api/users - Register a new user account
///
/// Public endpoint. Responds `{"data": "Ok"}` on success, 400 with the
/// first violated constraint or "username already registered" otherwise.
pub async fn register(Json(request): Json<RegisterUserRequest>) -> ApiResult<&'static str> {
    UserService::new().await?.register(request).await?;
    Ok(ApiResponse::success("Ok"))
}

/// GET /api/users/current - Profile of the authenticated user
pub async fn current_get(Extension(current): Extension<CurrentUser>) -> ApiResult<UserResponse> {
    let response = UserService::new().await?.get(&current);
    Ok(ApiResponse::success(response))
}

/// PATCH /api/users/current - Partial profile update (name and/or password)
pub async fn current_update(
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    let response = UserService::new().await?.update(&current, request).await?;
    Ok(ApiResponse::success(response))
}
