//! Poll Loop
//!
//! Drives the once-per-second fetch → observe → render cycle and the
//! watch-mode controls. The loop is strictly sequential: a tick's fetch is
//! awaited before the next tick can start one, so poll cycles never overlap.

use std::io::Write;
use std::time::{Duration, Instant};

use tokio::io::AsyncBufReadExt;
use tokio::time::MissedTickBehavior;

use crate::dashboard::controller::{reset_container_notice, tare_notice, Dashboard};
use crate::dashboard::render::render_frame;
use crate::notify::{Notice, NoticeHub, NOTICE_DISPLAY};
use crate::scale::ScaleClient;

/// Default period between polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Interactive commands accepted in watch mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WatchCommand {
    /// `u`: toggle fl oz / grams
    ToggleUnit,
    /// `t`: tare the scale
    Tare,
    /// `r`: reset the container weight on the scale
    ResetContainer,
    /// `c <grams>`: set the local container weight
    SetContainer(f64),
    /// `q`: leave watch mode
    Quit,
}

impl WatchCommand {
    /// Parse one stdin line; `None` for empty or unrecognized input
    pub fn parse(line: &str) -> Option<WatchCommand> {
        let mut parts = line.split_whitespace();
        match parts.next()? {
            "u" | "unit" => Some(WatchCommand::ToggleUnit),
            "t" | "tare" => Some(WatchCommand::Tare),
            "r" | "reset" => Some(WatchCommand::ResetContainer),
            "c" | "container" => {
                let grams = parts.next()?.parse().ok()?;
                Some(WatchCommand::SetContainer(grams))
            }
            "q" | "quit" => Some(WatchCommand::Quit),
            _ => None,
        }
    }
}

/// Owns the dashboard for the lifetime of a watch session
pub struct Poller {
    client: ScaleClient,
    dashboard: Dashboard,
    hub: NoticeHub,
    poll_interval: Duration,
    /// Most recent notice and when it was raised, for the render line
    current_notice: Option<(Notice, Instant)>,
}

impl Poller {
    pub fn new(client: ScaleClient, dashboard: Dashboard, poll_interval: Duration) -> Self {
        Self {
            client,
            dashboard,
            hub: NoticeHub::default(),
            poll_interval,
            current_notice: None,
        }
    }

    /// The notice fan-out for this session
    pub fn hub(&self) -> &NoticeHub {
        &self.hub
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// One poll cycle: fetch and fold the result into the dashboard
    ///
    /// Failures degrade to the disconnected display state and are retried by
    /// the next tick; they never abort the loop.
    pub async fn poll_once(&mut self) {
        match self.client.measurements().await {
            Ok(measurement) => {
                self.dashboard.observe(&measurement, Instant::now());
            }
            Err(e) => {
                tracing::debug!(error = %e, "Poll failed");
                if let Some(notice) = self.dashboard.observe_failure(Instant::now()) {
                    self.notify(notice);
                }
            }
        }
    }

    /// Apply a watch-mode command; returns `false` on quit
    pub async fn handle_command(&mut self, command: WatchCommand) -> bool {
        match command {
            WatchCommand::ToggleUnit => {
                let notice = self.dashboard.toggle_unit();
                self.notify(notice);
            }
            WatchCommand::Tare => {
                let notice = tare_notice(&self.client.tare().await);
                self.notify(notice);
            }
            WatchCommand::ResetContainer => {
                let notice = reset_container_notice(&self.client.reset_container().await);
                self.notify(notice);
            }
            WatchCommand::SetContainer(grams) => {
                let notice = self.dashboard.set_container(grams);
                self.notify(notice);
            }
            WatchCommand::Quit => return false,
        }
        true
    }

    fn notify(&mut self, notice: Notice) {
        self.hub.publish(notice.clone());
        self.current_notice = Some((notice, Instant::now()));
    }

    /// Notice still within its display window, if any
    fn visible_notice(&self) -> Option<&Notice> {
        match &self.current_notice {
            Some((notice, at)) if at.elapsed() < NOTICE_DISPLAY => Some(notice),
            _ => None,
        }
    }

    fn draw(&self) {
        let frame = render_frame(
            self.dashboard.last_snapshot(),
            self.dashboard.is_connected(),
            self.dashboard.history(),
            self.visible_notice(),
        );

        // Redraw in place
        print!("\x1B[2J\x1B[1;1H{}", frame);
        println!("\n  controls: [u]nit  [t]are  [r]eset container  [c <grams>]  [q]uit");
        let _ = std::io::stdout().flush();
    }

    /// Run the watch session until `q` or stdin closes
    pub async fn run(mut self) {
        tracing::info!(
            url = %self.client.config().base_url,
            interval_ms = self.poll_interval.as_millis() as u64,
            "Starting watch session"
        );

        let mut ticker = tokio::time::interval(self.poll_interval);
        // A slow fetch delays later ticks instead of bursting to catch up
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        let mut stdin_open = true;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll_once().await;
                    self.draw();
                }
                line = lines.next_line(), if stdin_open => {
                    match line {
                        Ok(Some(line)) => {
                            if let Some(command) = WatchCommand::parse(&line) {
                                if !self.handle_command(command).await {
                                    break;
                                }
                                self.draw();
                            }
                        }
                        // stdin closed (piped input ran out): keep polling
                        Ok(None) => stdin_open = false,
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to read stdin");
                            stdin_open = false;
                        }
                    }
                }
            }
        }

        tracing::info!("Watch session ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::connection::DEFAULT_DISCONNECT_NOTICE_AFTER;
    use crate::dashboard::units::DisplayUnit;
    use crate::scale::ScaleConfig;

    fn poller() -> Poller {
        // Port 1 is never listening; polls fail fast
        let client = ScaleClient::new(ScaleConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout_ms: 1000,
        });
        let dashboard = Dashboard::new(DisplayUnit::Oz, DEFAULT_DISCONNECT_NOTICE_AFTER);
        Poller::new(client, dashboard, DEFAULT_POLL_INTERVAL)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(WatchCommand::parse("u"), Some(WatchCommand::ToggleUnit));
        assert_eq!(WatchCommand::parse("tare"), Some(WatchCommand::Tare));
        assert_eq!(WatchCommand::parse(" r "), Some(WatchCommand::ResetContainer));
        assert_eq!(
            WatchCommand::parse("c 150.5"),
            Some(WatchCommand::SetContainer(150.5))
        );
        assert_eq!(WatchCommand::parse("q"), Some(WatchCommand::Quit));

        assert_eq!(WatchCommand::parse(""), None);
        assert_eq!(WatchCommand::parse("c"), None);
        assert_eq!(WatchCommand::parse("c abc"), None);
        assert_eq!(WatchCommand::parse("x"), None);
    }

    #[tokio::test]
    async fn test_failed_poll_degrades_to_disconnected() {
        let mut poller = poller();
        poller.poll_once().await;

        assert!(!poller.dashboard().is_connected());
        // No successful poll yet, so nothing to display
        assert!(poller.dashboard().last_snapshot().is_none());
    }

    #[tokio::test]
    async fn test_quit_command_stops_session() {
        let mut poller = poller();
        assert!(!poller.handle_command(WatchCommand::Quit).await);
    }

    #[tokio::test]
    async fn test_toggle_command_publishes_notice() {
        let mut poller = poller();
        let mut rx = poller.hub().subscribe();

        assert!(poller.handle_command(WatchCommand::ToggleUnit).await);
        assert_eq!(poller.dashboard().unit(), DisplayUnit::G);

        let notice = rx.recv().await.unwrap();
        assert_eq!(notice.message, "Switched to grams");
    }

    #[tokio::test]
    async fn test_set_container_command_validates() {
        let mut poller = poller();
        let mut rx = poller.hub().subscribe();

        assert!(poller.handle_command(WatchCommand::SetContainer(-5.0)).await);
        assert!(rx.recv().await.unwrap().is_error());
    }

    #[tokio::test]
    async fn test_failed_tare_reports_but_does_not_quit() {
        let mut poller = poller();
        let mut rx = poller.hub().subscribe();

        assert!(poller.handle_command(WatchCommand::Tare).await);

        let notice = rx.recv().await.unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.message, "Failed to tare scale");
        // Control failures never mark the connection lost
        assert!(!poller.dashboard().is_connected());
    }
}
