//! Error types for the hardware boundary (thiserror-based).
//!
//! These errors only travel between a GPU backend and the enumerator core.
//! The core's public API never raises them; every failure is converted into
//! a safe default (empty list, `false`, invalid snapshot) because a missing
//! or lost hardware processor is a routine condition, not a fault.

use thiserror::Error;

use crate::color::SurfaceFormat;

/// Failures reported by a GPU video device backend.
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("no GPU device available")]
    Unavailable,

    #[error("enumerator creation failed for {desc}: {reason}")]
    EnumeratorInit { desc: String, reason: String },

    #[error("surface format {0} not supported by the video processor")]
    UnsupportedFormat(SurfaceFormat),

    #[error("driver call failed: {0}")]
    Driver(String),
}
