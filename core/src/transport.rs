//! The I/O seam between request building and response parsing.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one `HttpRequest` against the network.
///
/// Non-2xx statuses are returned as data; only a failed round-trip
/// (connect, DNS, I/O) is an `Err`, reported as `ApiError::Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}
