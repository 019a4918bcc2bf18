//! Request and response bodies for the HTTP API

pub mod ask;
pub mod error;
pub mod json;

pub use ask::{AskRequest, CollectionsResponse};
pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
