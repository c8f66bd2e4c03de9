pub mod auth;
pub mod response;

pub use auth::{admin_gate, bearer_token, client_gate, cookie_value, AccountKind, Principal};
pub use response::{ApiResponse, ApiResult};
