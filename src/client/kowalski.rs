//! HTTP client for the Kowalski trigger API.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use super::{ApiResponse, DeleteRequest, TriggerApi};
use crate::config::QueueConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::TooRequest;

/// Fixed resource path for ZTF triggers.
const TRIGGER_ENDPOINT: &str = "/api/triggers/ztf";
/// Liveness probe endpoint.
const PING_ENDPOINT: &str = "/api/ping";

/// Bearer-token HTTP client bound to one Kowalski instance.
pub struct KowalskiClient {
    http: reqwest::Client,
    base_url: String,
}

impl KowalskiClient {
    /// Build a client from connection settings. The token is baked into the
    /// default headers; the underlying connection pool is released when the
    /// client is dropped.
    pub fn new(config: &QueueConfig) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(&format!("Bearer {}", config.api_token))
            .map_err(|e| ApiError::Config(format!("Invalid API token: {}", e)))?;
        headers.insert(AUTHORIZATION, token);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl TriggerApi for KowalskiClient {
    async fn ping(&self) -> ApiResult<bool> {
        let response = match self.http.get(self.url(PING_ENDPOINT)).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Ping transport failure: {}", e);
                return Ok(false);
            }
        };

        match response.json::<ApiResponse>().await {
            Ok(envelope) => Ok(envelope.is_success()),
            Err(_) => Ok(false),
        }
    }

    async fn get_triggers(&self) -> ApiResult<ApiResponse> {
        let response = self
            .http
            .get(self.url(TRIGGER_ENDPOINT))
            .send()
            .await?
            .json::<ApiResponse>()
            .await?;
        Ok(response)
    }

    async fn put_trigger(&self, request: &TooRequest) -> ApiResult<ApiResponse> {
        let response = self
            .http
            .put(self.url(TRIGGER_ENDPOINT))
            .json(request)
            .send()
            .await?
            .json::<ApiResponse>()
            .await?;
        Ok(response)
    }

    async fn delete_trigger(&self, request: &DeleteRequest) -> ApiResult<ApiResponse> {
        let response = self
            .http
            .delete(self.url(TRIGGER_ENDPOINT))
            .json(request)
            .send()
            .await?
            .json::<ApiResponse>()
            .await?;
        Ok(response)
    }
}
