//! In-memory trigger API for unit tests and local development.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{ApiResponse, DeleteRequest, QueueEntry, TriggerApi};
use crate::error::ApiResult;
use crate::models::TooRequest;

/// Scriptable in-memory implementation of [`TriggerApi`].
///
/// GET serves a configurable entry list, PUT/DELETE pop scripted responses
/// (defaulting to success once the script runs out), and every call is
/// counted so tests can assert how often the remote was hit.
#[derive(Clone, Default)]
pub struct MockTriggerApi {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    healthy: bool,
    entries: Vec<QueueEntry>,
    get_override: Option<ApiResponse>,
    put_script: VecDeque<ApiResponse>,
    delete_script: VecDeque<ApiResponse>,
    put_requests: Vec<TooRequest>,
    delete_requests: Vec<DeleteRequest>,
    ping_calls: usize,
    get_calls: usize,
}

impl MockTriggerApi {
    /// Create a healthy mock with no entries and all-success scripts.
    pub fn new() -> Self {
        let mock = Self::default();
        mock.state.lock().unwrap().healthy = true;
        mock
    }

    /// Set the ping health for testing construction failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.state.lock().unwrap().healthy = healthy;
    }

    /// Replace the entries served by GET.
    pub fn set_entries(&self, entries: Vec<QueueEntry>) {
        self.state.lock().unwrap().entries = entries;
    }

    /// Make GET return a fixed envelope instead of the entry list.
    pub fn set_get_response(&self, response: ApiResponse) {
        self.state.lock().unwrap().get_override = Some(response);
    }

    /// Queue up responses for subsequent PUT calls.
    pub fn script_put_responses(&self, responses: Vec<ApiResponse>) {
        self.state.lock().unwrap().put_script = responses.into();
    }

    /// Queue up responses for subsequent DELETE calls.
    pub fn script_delete_responses(&self, responses: Vec<ApiResponse>) {
        self.state.lock().unwrap().delete_script = responses.into();
    }

    /// Requests received via PUT, in call order.
    pub fn put_requests(&self) -> Vec<TooRequest> {
        self.state.lock().unwrap().put_requests.clone()
    }

    /// Requests received via DELETE, in call order.
    pub fn delete_requests(&self) -> Vec<DeleteRequest> {
        self.state.lock().unwrap().delete_requests.clone()
    }

    pub fn put_count(&self) -> usize {
        self.state.lock().unwrap().put_requests.len()
    }

    pub fn delete_count(&self) -> usize {
        self.state.lock().unwrap().delete_requests.len()
    }

    pub fn ping_count(&self) -> usize {
        self.state.lock().unwrap().ping_calls
    }

    pub fn get_count(&self) -> usize {
        self.state.lock().unwrap().get_calls
    }
}

#[async_trait]
impl TriggerApi for MockTriggerApi {
    async fn ping(&self) -> ApiResult<bool> {
        let mut state = self.state.lock().unwrap();
        state.ping_calls += 1;
        Ok(state.healthy)
    }

    async fn get_triggers(&self) -> ApiResult<ApiResponse> {
        let mut state = self.state.lock().unwrap();
        state.get_calls += 1;
        if let Some(response) = &state.get_override {
            return Ok(response.clone());
        }
        Ok(ApiResponse {
            status: "success".to_string(),
            message: None,
            data: Some(state.entries.clone()),
        })
    }

    async fn put_trigger(&self, request: &TooRequest) -> ApiResult<ApiResponse> {
        let mut state = self.state.lock().unwrap();
        state.put_requests.push(request.clone());
        Ok(state
            .put_script
            .pop_front()
            .unwrap_or_else(ApiResponse::success))
    }

    async fn delete_trigger(&self, request: &DeleteRequest) -> ApiResult<ApiResponse> {
        let mut state = self.state.lock().unwrap();
        state.delete_requests.push(request.clone());
        Ok(state
            .delete_script
            .pop_front()
            .unwrap_or_else(ApiResponse::success))
    }
}
