//! Connection state tracking
//!
//! Tracks whether the poll loop is currently reaching the scale and decides
//! when a "connection lost" notice is warranted. Short blips are tolerated:
//! the notice fires only once per loss, and only after the grace period has
//! elapsed since the last successful fetch (or since startup, before the
//! first fetch ever succeeds).

use std::time::{Duration, Instant};

/// Grace period before a failed poll is reported as a lost connection
pub const DEFAULT_DISCONNECT_NOTICE_AFTER: Duration = Duration::from_millis(2000);

/// Tracks scale connectivity across poll cycles
#[derive(Debug, Clone)]
pub struct ConnectionTracker {
    connected: bool,
    /// Last successful poll, or construction time before the first success
    last_update: Instant,
    ever_succeeded: bool,
    /// Set once the loss notice fired; re-armed by the next success
    loss_reported: bool,
    notice_after: Duration,
}

impl ConnectionTracker {
    pub fn new(notice_after: Duration) -> Self {
        Self {
            connected: false,
            last_update: Instant::now(),
            ever_succeeded: false,
            loss_reported: false,
            notice_after,
        }
    }

    /// Whether the last poll reached the scale
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Instant of the last successful poll
    pub fn last_success(&self) -> Option<Instant> {
        self.ever_succeeded.then_some(self.last_update)
    }

    /// Record a successful poll
    pub fn record_success(&mut self, now: Instant) {
        self.connected = true;
        self.last_update = now;
        self.ever_succeeded = true;
        self.loss_reported = false;
    }

    /// Record a failed poll
    ///
    /// Returns `true` when a "connection lost" notice should be shown:
    /// at most once per loss, and only after the grace period has elapsed
    /// since the last success (or since startup).
    pub fn record_failure(&mut self, now: Instant) -> bool {
        self.connected = false;

        if self.loss_reported {
            return false;
        }

        // saturating: a `now` earlier than last_update counts as zero elapsed
        if now.saturating_duration_since(self.last_update) >= self.notice_after {
            self.loss_reported = true;
            true
        } else {
            false
        }
    }
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DISCONNECT_NOTICE_AFTER)
    }
}
