//! # fluidwatch
//!
//! Terminal dashboard and control CLI for an HX711 fluid-measurement scale.
//! Polls the scale server's JSON API once per second, tracks connectivity,
//! keeps a 30-sample rolling history of the fluid weight, and dispatches the
//! scale's control actions (tare, container reset, local container weight).
//!
//! ## Modules
//!
//! - [`scale`]: wire types and HTTP client for the scale server
//! - [`dashboard`]: controller state, rolling history, poll loop, rendering
//! - [`notify`]: transient notice channel (the toast replacement)
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use fluidwatch::dashboard::{Dashboard, DisplayUnit, Poller};
//! use fluidwatch::scale::{ScaleClient, ScaleConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ScaleClient::new(ScaleConfig::default());
//!     let dashboard = Dashboard::new(DisplayUnit::Oz, Duration::from_millis(2000));
//!
//!     Poller::new(client, dashboard, Duration::from_millis(1000))
//!         .run()
//!         .await;
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod notify;
pub mod scale;

// Re-export top-level types for convenience
pub use dashboard::{
    Dashboard, DisplayUnit, Poller, RollingHistory, Snapshot, WatchCommand,
    DEFAULT_DISCONNECT_NOTICE_AFTER, DEFAULT_POLL_INTERVAL, HISTORY_LEN,
};

pub use scale::{Measurement, ScaleClient, ScaleConfig, ScaleError, FL_OZ_PER_GRAM};

pub use notify::{Notice, NoticeHub, NoticeLevel};

pub use config::{Config, ConfigError};
