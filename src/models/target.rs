//! Wire payloads for ToO trigger submission.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// ZTF filter identifiers accepted by the scheduler (g, r, i).
pub const ZTF_FILTER_IDS: [u8; 3] = [1, 2, 3];
/// ZTF observing program identifiers.
pub const ZTF_PROGRAM_IDS: [u8; 3] = [1, 2, 3];

/// A single observation request within a trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooTarget {
    pub request_id: u32,
    pub field_id: Vec<u32>,
    pub filter_id: Vec<u8>,
    pub subprogram_name: String,
    pub program_pi: String,
    pub program_id: u8,
    /// Exposure time in seconds.
    pub exposure_time: u32,
}

impl TooTarget {
    /// Check filter and program ids against the ZTF whitelists.
    pub fn validate(&self) -> ApiResult<()> {
        for filter_id in &self.filter_id {
            if !ZTF_FILTER_IDS.contains(filter_id) {
                return Err(ApiError::Validation(format!(
                    "Filter id must be one of {:?}, but you entered {}",
                    ZTF_FILTER_IDS, filter_id
                )));
            }
        }
        if !ZTF_PROGRAM_IDS.contains(&self.program_id) {
            return Err(ApiError::Validation(format!(
                "Program id must be one of {:?}, but you entered {}",
                ZTF_PROGRAM_IDS, self.program_id
            )));
        }
        Ok(())
    }
}

/// Optional per-target settings for [`crate::queue::TriggerQueue::add_trigger`].
///
/// Defaults match the standard neutrino follow-up program.
#[derive(Debug, Clone)]
pub struct TargetOptions {
    pub request_id: u32,
    pub subprogram_name: String,
    pub program_pi: String,
    pub program_id: u8,
    /// Exposure time in seconds.
    pub exposure_time: u32,
}

impl Default for TargetOptions {
    fn default() -> Self {
        Self {
            request_id: 1,
            subprogram_name: "ToO_Neutrino".to_string(),
            program_pi: "Kulkarni".to_string(),
            program_id: 2,
            exposure_time: 30,
        }
    }
}

/// A queued trigger, in the shape the remote service expects for a PUT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooRequest {
    pub user: String,
    /// Unique on the remote service; formed as `{trigger_name}_{id}`.
    pub queue_name: String,
    pub queue_type: String,
    pub validity_window_mjd: [f64; 2],
    pub targets: Vec<TooTarget>,
}

impl TooRequest {
    /// Window length in minutes (end minus start, MJD days times 1440).
    pub fn window_minutes(&self) -> f64 {
        (self.validity_window_mjd[1] - self.validity_window_mjd[0]) * 1440.0
    }
}
