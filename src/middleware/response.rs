use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Paging metadata attached to search responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingResponse {
    pub current_page: i64,
    pub total_pages: i64,
    pub size: i64,
}

/// Wrapper for API responses that automatically adds the data envelope.
///
/// Success bodies look like `{"data": ...}` with an optional
/// `"pagingResponse"`; errors never pass through here (see
/// `ApiError::into_response`), so `errors` is simply absent.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub paging: Option<PagingResponse>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response
    pub fn success(data: T) -> Self {
        Self { data, paging: None }
    }

    /// Create a successful API response carrying paging metadata
    pub fn with_paging(data: T, paging: PagingResponse) -> Self {
        Self {
            data,
            paging: Some(paging),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        // Convert data to JSON Value for consistent envelope format
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "errors": "Failed to serialize response data" })),
                )
                    .into_response();
            }
        };

        let envelope = match self.paging {
            Some(paging) => json!({ "data": data_value, "pagingResponse": paging }),
            None => json!({ "data": data_value }),
        };

        (StatusCode::OK, Json(envelope)).into_response()
    }
}

/// Result alias used by every handler
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
