//! Backend API access: error taxonomy and the authenticated HTTP client.

mod client;
mod error;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
