//! Transient Notices
//!
//! The dashboard's toast replacement: short-lived messages ("Scale tared
//! successfully", "Connection to scale lost") published on a broadcast
//! channel. The watch renderer shows the most recent notice for a few
//! seconds; other subscribers (tests, future surfaces) can listen too.
//! Publishing never blocks and is a no-op when nobody listens.

use serde::Serialize;
use tokio::sync::broadcast;

/// How long the renderer keeps a notice on screen
pub const NOTICE_DISPLAY: std::time::Duration = std::time::Duration::from_secs(3);

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient user-facing message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Fan-out channel for notices
pub struct NoticeHub {
    tx: broadcast::Sender<Notice>,
}

/// Configuration for the notice hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Capacity of the broadcast channel
    pub capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

impl NoticeHub {
    pub fn new(config: HubConfig) -> Self {
        let (tx, _) = broadcast::channel(config.capacity);
        Self { tx }
    }

    /// Subscribe to future notices
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    /// Publish a notice to all subscribers
    ///
    /// Every notice also lands in the log, so one-shot CLI runs and headless
    /// use still surface them.
    pub fn publish(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!(notice = %notice.message),
            NoticeLevel::Error => tracing::warn!(notice = %notice.message),
        }

        // send() errors only when there are no subscribers
        let _ = self.tx.send(notice);
    }
}

impl Default for NoticeHub {
    fn default() -> Self {
        Self::new(HubConfig::default())
    }
}
