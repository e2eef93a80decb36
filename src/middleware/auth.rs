use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;

use crate::database::repositories::sessions;
use crate::database::DatabaseManager;
use crate::error::ApiError;

pub const TOKEN_HEADER: &str = "X-API-TOKEN";

/// Authenticated user context resolved from the session token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub username: String,
    pub name: String,
    /// The presented token, kept so logout can remove exactly this session
    pub token: String,
}

/// Session authentication middleware.
///
/// Resolves the `X-API-TOKEN` header against the sessions table and
/// injects `CurrentUser` into the request. A missing header, an unknown
/// token, and an expired token all produce the same generic 401 so the
/// response leaks nothing about which check failed.
pub async fn token_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, impl IntoResponse> {
    let token = match extract_token_from_headers(&headers) {
        Ok(token) => token,
        Err(_) => return Err(error_response(ApiError::unauthorized("unauthorized"))),
    };

    let user = match lookup_session_user(&token).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(error_response(ApiError::unauthorized("unauthorized"))),
        // Persistence failures are opaque 500s, not auth failures
        Err(err) => return Err(error_response(err)),
    };

    let current_user = CurrentUser {
        username: user.username,
        name: user.name,
        token,
    };
    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Extract the session token header value
fn extract_token_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let header = headers
        .get(TOKEN_HEADER)
        .ok_or_else(|| "Missing token header".to_string())?;

    let token = header
        .to_str()
        .map_err(|_| "Invalid token header format".to_string())?
        .trim();

    if token.is_empty() {
        return Err("Empty token".to_string());
    }
    Ok(token.to_string())
}

async fn lookup_session_user(
    token: &str,
) -> Result<Option<crate::database::models::User>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let now_ms = Utc::now().timestamp_millis();
    let user = sessions::find_user_by_valid_token(pool, token, now_ms).await?;
    Ok(user)
}

fn error_response(api_error: ApiError) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::from_u16(api_error.status_code()).unwrap_or(StatusCode::UNAUTHORIZED),
        Json(api_error.to_json()),
    )
}
