//! Data models for ToO trigger requests and sky positions.

pub mod position;
pub mod target;

pub use position::SkyPosition;
pub use target::{TargetOptions, TooRequest, TooTarget};
