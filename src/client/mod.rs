//! Remote trigger service client.
//!
//! The [`TriggerApi`] trait defines the interface to the observation-trigger
//! service, allowing the real HTTP client and an in-memory mock to be
//! swapped via dependency injection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::models::TooRequest;

pub mod kowalski;
#[cfg(feature = "mock-client")]
pub mod mock;

pub use kowalski::KowalskiClient;
#[cfg(feature = "mock-client")]
pub use mock::MockTriggerApi;

/// Response envelope returned by every trigger endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<QueueEntry>>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Shorthand for a bare success envelope.
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data: None,
        }
    }
}

/// One queue entry as reported by a GET on the trigger resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub queue_name: String,
    #[serde(rename = "is_TOO")]
    pub is_too: bool,
    pub validity_window_mjd: [f64; 2],
    /// JSON-encoded target list; may be empty.
    #[serde(default)]
    pub queue: String,
}

/// Body of a DELETE on the trigger resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub user: String,
    pub queue_name: String,
}

/// A thing that can GET/PUT/DELETE against the trigger resource and ping.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust and allow
/// sharing across threads.
#[async_trait]
pub trait TriggerApi: Send + Sync {
    /// Liveness probe. `Ok(true)` means the service answered successfully.
    async fn ping(&self) -> ApiResult<bool>;

    /// GET the full queue listing.
    async fn get_triggers(&self) -> ApiResult<ApiResponse>;

    /// PUT one trigger onto the remote queue.
    async fn put_trigger(&self, request: &TooRequest) -> ApiResult<ApiResponse>;

    /// DELETE one trigger from the remote queue by name.
    async fn delete_trigger(&self, request: &DeleteRequest) -> ApiResult<ApiResponse>;
}
