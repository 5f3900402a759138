//! Dashboard Controller
//!
//! The state and loop behind the live display:
//! - **Dashboard**: unit selection, rolling history, connection tracking
//! - **RollingHistory**: fixed 30-slot sample window for the chart
//! - **ConnectionTracker**: gated "connection lost" reporting
//! - **Poller**: the once-per-second fetch → observe → render loop

pub mod connection;
pub mod controller;
pub mod history;
pub mod poller;
pub mod render;
pub mod units;

pub use connection::{ConnectionTracker, DEFAULT_DISCONNECT_NOTICE_AFTER};
pub use controller::{Dashboard, Snapshot};
pub use history::{RollingHistory, HISTORY_LEN};
pub use poller::{Poller, WatchCommand, DEFAULT_POLL_INTERVAL};
pub use render::{render_frame, sparkline};
pub use units::DisplayUnit;
