//! Local trigger queue fronting the remote trigger service.
//!
//! A [`TriggerQueue`] accumulates ToO triggers in memory and dispatches them
//! to the remote service: one PUT per trigger on submit, one DELETE per
//! trigger on queue deletion. Nothing is persisted; the queue lives only for
//! the lifetime of the object.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::client::{ApiResponse, DeleteRequest, KowalskiClient, QueueEntry, TriggerApi};
use crate::config::QueueConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{TargetOptions, TooRequest, TooTarget};
use crate::time::ModifiedJulianDate;

/// Required prefix for trigger names.
pub const TRIGGER_NAME_PREFIX: &str = "ToO_";

/// Placeholder used in summaries when a queue entry carries no target payload.
const NOT_AVAILABLE: &str = "*not available*";

/// Local queue of ToO triggers bound to one remote service and one user.
///
/// Ids are assigned as the queue size at insertion time, so iteration over
/// the id-ordered map reproduces insertion order. Re-adding an identical
/// trigger name deliberately produces a second entry with its own id.
///
/// Not safe for concurrent mutation; wrap in external locking if shared.
pub struct TriggerQueue {
    user: String,
    api: Arc<dyn TriggerApi>,
    queue: BTreeMap<u32, TooRequest>,
}

impl TriggerQueue {
    /// Connect to the remote service described by `config`.
    ///
    /// Performs a liveness check immediately; no queue is returned when the
    /// service is unreachable.
    pub async fn new(user: impl Into<String>, config: &QueueConfig) -> ApiResult<Self> {
        let client = KowalskiClient::new(config)?;
        Self::with_client(user, Arc::new(client)).await
    }

    /// Build a queue around an existing [`TriggerApi`] implementation.
    ///
    /// The same fail-fast liveness check applies.
    pub async fn with_client(
        user: impl Into<String>,
        api: Arc<dyn TriggerApi>,
    ) -> ApiResult<Self> {
        if !api.ping().await? {
            return Err(ApiError::Connection(
                "Ping of Kowalski failed. Are you sure the configured token is correct?"
                    .to_string(),
            ));
        }

        Ok(Self {
            user: user.into(),
            api,
            queue: BTreeMap::new(),
        })
    }

    /// The identity triggers are submitted under.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Add one trigger to the local queue. No network traffic.
    ///
    /// `trigger_name` must start with `"ToO_"`; the resulting remote queue
    /// name is `{trigger_name}_{id}` with the id assigned from the current
    /// queue size. The validity window is taken as-is, start/end ordering is
    /// not enforced. Returns the assigned id.
    pub fn add_trigger(
        &mut self,
        trigger_name: &str,
        validity_window_start_mjd: f64,
        validity_window_end_mjd: f64,
        field_ids: Vec<u32>,
        filter_ids: Vec<u8>,
        options: TargetOptions,
    ) -> ApiResult<u32> {
        if !trigger_name.starts_with(TRIGGER_NAME_PREFIX) {
            return Err(ApiError::Validation(format!(
                "Trigger names must begin with '{}', but you entered '{}'",
                TRIGGER_NAME_PREFIX, trigger_name
            )));
        }

        let target = TooTarget {
            request_id: options.request_id,
            field_id: field_ids,
            filter_id: filter_ids,
            subprogram_name: options.subprogram_name,
            program_pi: options.program_pi,
            program_id: options.program_id,
            exposure_time: options.exposure_time,
        };
        target.validate()?;

        self.push_trigger(
            trigger_name,
            [validity_window_start_mjd, validity_window_end_mjd],
            vec![target],
        )
    }

    /// Like [`add_trigger`](Self::add_trigger), but with prebuilt targets
    /// (one or more) instead of a single derived one.
    pub fn add_trigger_with_targets(
        &mut self,
        trigger_name: &str,
        validity_window_start_mjd: f64,
        validity_window_end_mjd: f64,
        targets: Vec<TooTarget>,
    ) -> ApiResult<u32> {
        if !trigger_name.starts_with(TRIGGER_NAME_PREFIX) {
            return Err(ApiError::Validation(format!(
                "Trigger names must begin with '{}', but you entered '{}'",
                TRIGGER_NAME_PREFIX, trigger_name
            )));
        }
        if targets.is_empty() {
            return Err(ApiError::Validation(
                "A trigger requires at least one target".to_string(),
            ));
        }
        for target in &targets {
            target.validate()?;
        }

        self.push_trigger(
            trigger_name,
            [validity_window_start_mjd, validity_window_end_mjd],
            targets,
        )
    }

    fn push_trigger(
        &mut self,
        trigger_name: &str,
        validity_window_mjd: [f64; 2],
        targets: Vec<TooTarget>,
    ) -> ApiResult<u32> {
        let trigger_id = self.queue.len() as u32;
        let request = TooRequest {
            user: self.user.clone(),
            queue_name: format!("{}_{}", trigger_name, trigger_id),
            queue_type: "list".to_string(),
            validity_window_mjd,
            targets,
        };
        self.queue.insert(trigger_id, request);

        Ok(trigger_id)
    }

    /// GET the full remote queue listing.
    pub async fn list_all_queues(&self) -> ApiResult<Vec<QueueEntry>> {
        let response = self.api.get_triggers().await?;
        log::debug!("{:?}", response);
        if !response.is_success() {
            return Err(ApiError::from_response(&response));
        }
        Ok(response.data.unwrap_or_default())
    }

    /// Names of all remote queues.
    pub async fn list_all_queue_names(&self) -> ApiResult<Vec<String>> {
        let entries = self.list_all_queues().await?;
        Ok(entries.into_iter().map(|e| e.queue_name).collect())
    }

    /// Remote queue entries flagged as ToO triggers.
    pub async fn list_too_queues(&self) -> ApiResult<Vec<QueueEntry>> {
        let entries = self.list_all_queues().await?;
        Ok(entries.into_iter().filter(|e| e.is_too).collect())
    }

    /// Names of the remote ToO queues.
    pub async fn list_too_queue_names(&self) -> ApiResult<Vec<String>> {
        let entries = self.list_too_queues().await?;
        Ok(entries.into_iter().map(|e| e.queue_name).collect())
    }

    /// One display line per remote ToO queue: start time, window length in
    /// minutes, and exposure/field of the first queued target.
    pub async fn list_too_queue_summaries(&self) -> ApiResult<Vec<String>> {
        let entries = self.list_too_queues().await?;
        Ok(entries.iter().map(summarize_entry).collect())
    }

    /// PUT every queued trigger, in insertion order, stopping at the first
    /// failure. Responses gathered before a failure travel inside the
    /// [`ApiError::PartialSubmit`] error; the local queue is unchanged either
    /// way.
    pub async fn submit_queue(&self) -> ApiResult<Vec<ApiResponse>> {
        let mut results = Vec::with_capacity(self.queue.len());

        for trigger in self.queue.values() {
            let response = self.api.put_trigger(trigger).await?;
            log::debug!("{:?}", response);

            if !response.is_success() {
                log::warn!("Trigger submission failed: {:?}", response);
                return Err(ApiError::PartialSubmit {
                    status: response.status,
                    message: response.message.unwrap_or_default(),
                    completed: results,
                });
            }

            results.push(response);
        }

        log::info!("Submitted {} triggers to Kowalski.", self.queue.len());

        Ok(results)
    }

    /// DELETE every queued trigger remotely. All deletions are attempted;
    /// if any failed, the first failure is reported afterwards. Queue
    /// membership is unchanged, deletion is remote-only.
    pub async fn delete_queue(&self) -> ApiResult<()> {
        let mut results = Vec::with_capacity(self.queue.len());

        for trigger in self.queue.values() {
            let request = DeleteRequest {
                user: self.user.clone(),
                queue_name: trigger.queue_name.clone(),
            };
            let response = self.api.delete_trigger(&request).await?;
            log::debug!("{:?}", response);
            results.push((trigger.queue_name.clone(), response));
        }

        for (queue_name, response) in results {
            if !response.is_success() {
                return Err(ApiError::RemoteApi {
                    status: response.status,
                    message: format!(
                        "something went wrong with deleting the trigger ({})",
                        queue_name
                    ),
                });
            }
        }

        Ok(())
    }

    /// DELETE a single submitted trigger by its remote queue name.
    pub async fn delete_trigger(&self, queue_name: &str) -> ApiResult<ApiResponse> {
        let request = DeleteRequest {
            user: self.user.clone(),
            queue_name: queue_name.to_string(),
        };
        let response = self.api.delete_trigger(&request).await?;
        log::debug!("{:?}", response);

        if !response.is_success() {
            return Err(ApiError::from_response(&response));
        }

        Ok(response)
    }

    /// Queued triggers in id order. No network traffic.
    pub fn triggers(&self) -> impl Iterator<Item = (u32, &TooRequest)> {
        self.queue.iter().map(|(id, trigger)| (*id, trigger))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Print the local queue content to stdout.
    pub fn print(&self) {
        for (id, trigger) in &self.queue {
            println!("{}: {:?}", id, trigger);
        }
    }
}

/// Format one queue entry for display.
fn summarize_entry(entry: &QueueEntry) -> String {
    let [start, end] = entry.validity_window_mjd;
    let date_short = ModifiedJulianDate::new(start)
        .to_utc()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| format!("MJD {}", start));
    let duration = ((end - start) * 1440.0) as i64;

    let first_target: Option<serde_json::Value> = serde_json::from_str::<Vec<serde_json::Value>>(
        &entry.queue,
    )
    .ok()
    .and_then(|targets| targets.into_iter().next());

    let (exposure_time, field) = match first_target {
        Some(target) => (
            format!("exp: {}s", target["exposure_time"]),
            format!("field: {}", target["field_id"]),
        ),
        None => (
            format!("exp: {}", NOT_AVAILABLE),
            format!("field: {}", NOT_AVAILABLE),
        ),
    };

    format!(
        "{}: {} UT / window length: {} min / {} / {})",
        entry.queue_name, date_short, duration, exposure_time, field
    )
}
