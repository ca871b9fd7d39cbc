//! ToO trigger queue backend for ZTF observation scheduling.
//!
//! Two independent pieces: [`queue::TriggerQueue`] accumulates
//! Target-of-Opportunity triggers locally and dispatches them to a remote
//! Kowalski-style scheduling service, and [`models::SkyPosition`] models an
//! on-sky position with asymmetric uncertainty for geometric reasoning.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod queue;
pub mod time;
pub mod utils;

pub use config::QueueConfig;
pub use error::{ApiError, ApiResult};
pub use models::{SkyPosition, TargetOptions, TooRequest, TooTarget};
pub use queue::TriggerQueue;
