//! Scale Server Access
//!
//! Wire types and HTTP client for the scale firmware's API:
//! - `GET /api/measurements`: current weight readings
//! - `GET /api/tare`: zero the scale
//! - `GET /api/reset_container`: clear the stored container weight

mod client;
mod types;

pub use client::{ScaleClient, ScaleConfig, ScaleError};
pub use types::{Measurement, FL_OZ_PER_GRAM};
