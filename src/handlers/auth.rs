use axum::{Extension, Json};

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::auth::{LoginUserRequest, TokenResponse};
use crate::services::AuthService;

/// POST /api/auth/login - Exchange credentials for a session token
///
/// Expected Output (Success):
/// ```json
/// { "data": { "token": "a2f1...", "expiredAt": 1754550000000 } }
/// ```
pub async fn login(Json(request): Json<LoginUserRequest>) -> ApiResult<TokenResponse> {
    let response = AuthService::new().await?.login(request).await?;
    Ok(ApiResponse::success(response))
}

/// DELETE /api/auth/logout - Invalidate the presented session token
pub async fn logout(Extension(current): Extension<CurrentUser>) -> ApiResult<&'static str> {
    AuthService::new().await?.logout(&current).await?;
    Ok(ApiResponse::success("Ok"))
}
