pub mod auth;
pub mod response;

pub use auth::{require_token, AuthGate};
pub use response::{ApiResponse, ApiResult, Envelope};
