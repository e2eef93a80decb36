pub mod auth;
pub mod response;

pub use auth::{token_auth_middleware, CurrentUser, TOKEN_HEADER};
pub use response::{ApiResponse, ApiResult, PagingResponse};
