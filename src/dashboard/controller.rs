//! Dashboard Controller
//!
//! Owns all dashboard state: display unit, rolling history, connection
//! tracking, and the presentation-only container override. Constructed once
//! at startup; the poll loop and watch-mode controls feed it.

use std::time::{Duration, Instant};

use crate::dashboard::connection::ConnectionTracker;
use crate::dashboard::history::RollingHistory;
use crate::dashboard::units::{format_weight, DisplayUnit};
use crate::notify::Notice;
use crate::scale::{Measurement, FL_OZ_PER_GRAM};

/// Dashboard state with a defined lifecycle
pub struct Dashboard {
    unit: DisplayUnit,
    history: RollingHistory,
    connection: ConnectionTracker,
    /// Locally configured container weight in grams. The scale has no
    /// set-container endpoint, so this never reaches the server; it is shown
    /// alongside the server-reported value.
    container_override_g: Option<f64>,
    last_snapshot: Option<Snapshot>,
}

/// What the renderer shows for one poll cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub unit: DisplayUnit,
    /// Net fluid weight in the display unit
    pub fluid: f64,
    /// Total platform weight in the display unit
    pub total: f64,
    /// Server-reported container weight in the display unit
    pub container: f64,
    /// Locally overridden container weight in the display unit, if set
    pub container_override: Option<f64>,
    /// Fluid weight below zero (tare drift or container heavier than load)
    pub negative: bool,
}

impl Snapshot {
    /// Fluid weight formatted for display ("8.82")
    pub fn fluid_text(&self) -> String {
        format_weight(self.fluid)
    }

    pub fn total_text(&self) -> String {
        format_weight(self.total)
    }

    pub fn container_text(&self) -> String {
        format_weight(self.container)
    }
}

impl Dashboard {
    pub fn new(unit: DisplayUnit, disconnect_notice_after: Duration) -> Self {
        Self {
            unit,
            history: RollingHistory::new(),
            connection: ConnectionTracker::new(disconnect_notice_after),
            container_override_g: None,
            last_snapshot: None,
        }
    }

    pub fn unit(&self) -> DisplayUnit {
        self.unit
    }

    pub fn history(&self) -> &RollingHistory {
        &self.history
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Last rendered snapshot; survives failed polls so the display holds
    /// its last values while disconnected
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    /// Fold a successful poll into the dashboard state
    ///
    /// Selects the field pair for the current unit, appends the fluid weight
    /// to the history, and flags negative fluid readings.
    pub fn observe(&mut self, measurement: &Measurement, now: Instant) -> Snapshot {
        self.connection.record_success(now);

        let fluid = measurement.fluid(self.unit);
        let snapshot = Snapshot {
            unit: self.unit,
            fluid,
            total: measurement.total(self.unit),
            container: measurement.container(self.unit),
            container_override: self.container_override_g.map(|g| self.from_grams(g)),
            negative: fluid < 0.0,
        };

        self.history.push(fluid);
        self.last_snapshot = Some(snapshot.clone());
        snapshot
    }

    /// Fold a failed poll into the dashboard state
    ///
    /// The last snapshot is kept as-is. Returns the "connection lost" notice
    /// when the grace period has elapsed, at most once per loss.
    pub fn observe_failure(&mut self, now: Instant) -> Option<Notice> {
        if self.connection.record_failure(now) {
            Some(Notice::error("Connection to scale lost"))
        } else {
            None
        }
    }

    /// Switch between fluid ounces and grams
    ///
    /// Presentation only: stored measurements and history are untouched.
    pub fn toggle_unit(&mut self) -> Notice {
        self.unit = self.unit.toggled();
        tracing::debug!(unit = %self.unit, "Display unit toggled");
        Notice::info(format!("Switched to {}", self.unit.name()))
    }

    /// Record a local container weight, in grams
    ///
    /// Validation mirrors the original dashboard input: finite, non-negative.
    pub fn set_container(&mut self, grams: f64) -> Notice {
        if !grams.is_finite() || grams < 0.0 {
            return Notice::error("Please enter a valid weight");
        }

        self.container_override_g = Some(grams);
        Notice::info(format!("Container weight set to {}g", format_weight(grams)))
    }

    fn from_grams(&self, grams: f64) -> f64 {
        match self.unit {
            DisplayUnit::G => grams,
            DisplayUnit::Oz => grams * FL_OZ_PER_GRAM,
        }
    }
}

/// Notices for the two fire-and-forget scale commands, shared by watch mode
/// and the one-shot CLI paths. A failed command never touches connection
/// tracking; only the poll loop does that.
pub fn tare_notice(result: &Result<(), crate::scale::ScaleError>) -> Notice {
    match result {
        Ok(()) => Notice::info("Scale tared successfully"),
        Err(e) => {
            tracing::warn!(error = %e, "Tare failed");
            Notice::error("Failed to tare scale")
        }
    }
}

pub fn reset_container_notice(result: &Result<(), crate::scale::ScaleError>) -> Notice {
    match result {
        Ok(()) => Notice::info("Container weight reset"),
        Err(e) => {
            tracing::warn!(error = %e, "Container reset failed");
            Notice::error("Failed to reset container weight")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::connection::DEFAULT_DISCONNECT_NOTICE_AFTER;
    use crate::scale::ScaleError;

    fn dashboard(unit: DisplayUnit) -> Dashboard {
        Dashboard::new(unit, DEFAULT_DISCONNECT_NOTICE_AFTER)
    }

    fn measurement(fluid_g: f64) -> Measurement {
        Measurement {
            fluid_weight_g: fluid_g,
            fluid_weight_oz: fluid_g * FL_OZ_PER_GRAM,
            measured_weight_g: fluid_g + 100.0,
            measured_weight_oz: (fluid_g + 100.0) * FL_OZ_PER_GRAM,
            container_weight_g: 100.0,
            container_weight_oz: 100.0 * FL_OZ_PER_GRAM,
        }
    }

    #[test]
    fn test_observe_selects_unit_fields() {
        let mut dash = dashboard(DisplayUnit::G);
        let snap = dash.observe(&measurement(250.0), Instant::now());

        assert_eq!(snap.unit, DisplayUnit::G);
        assert_eq!(snap.fluid, 250.0);
        assert_eq!(snap.total, 350.0);
        assert_eq!(snap.container, 100.0);
        assert!(!snap.negative);
        assert!(dash.is_connected());
    }

    #[test]
    fn test_observe_appends_history_in_display_unit() {
        let mut dash = dashboard(DisplayUnit::Oz);
        let m = measurement(250.0);
        dash.observe(&m, Instant::now());

        assert_eq!(dash.history().latest(), Some(m.fluid_weight_oz));
    }

    #[test]
    fn test_negative_fluid_sets_flag_and_clears() {
        let mut dash = dashboard(DisplayUnit::G);

        let snap = dash.observe(&measurement(-5.0), Instant::now());
        assert!(snap.negative);

        let snap = dash.observe(&measurement(5.0), Instant::now());
        assert!(!snap.negative);
    }

    #[test]
    fn test_toggle_unit_keeps_stored_values() {
        let mut dash = dashboard(DisplayUnit::G);
        dash.observe(&measurement(250.0), Instant::now());
        let before: Vec<_> = dash.history().samples().collect();

        let notice = dash.toggle_unit();
        assert_eq!(dash.unit(), DisplayUnit::Oz);
        assert_eq!(notice.message, "Switched to fluid ounces");

        // History is not rewritten on toggle
        let after: Vec<_> = dash.history().samples().collect();
        assert_eq!(before, after);

        // Next observation uses the new unit's field
        let m = measurement(250.0);
        let snap = dash.observe(&m, Instant::now());
        assert_eq!(snap.fluid, m.fluid_weight_oz);
    }

    #[test]
    fn test_failed_poll_keeps_last_snapshot() {
        let mut dash = dashboard(DisplayUnit::G);
        let t0 = Instant::now();
        let snap = dash.observe(&measurement(250.0), t0);

        let notice = dash.observe_failure(t0 + Duration::from_millis(1000));
        assert!(notice.is_none());
        assert!(!dash.is_connected());
        assert_eq!(dash.last_snapshot(), Some(&snap));
    }

    #[test]
    fn test_loss_notice_after_grace_period() {
        let mut dash = dashboard(DisplayUnit::G);
        let t0 = Instant::now();
        dash.observe(&measurement(250.0), t0);

        let notice = dash.observe_failure(t0 + Duration::from_secs(3)).unwrap();
        assert_eq!(notice.message, "Connection to scale lost");
        assert!(notice.is_error());

        // Once per loss
        assert!(dash.observe_failure(t0 + Duration::from_secs(4)).is_none());
    }

    #[test]
    fn test_set_container_validation() {
        let mut dash = dashboard(DisplayUnit::G);

        assert!(dash.set_container(-1.0).is_error());
        assert!(dash.set_container(f64::NAN).is_error());

        let notice = dash.set_container(150.0);
        assert!(!notice.is_error());
        assert_eq!(notice.message, "Container weight set to 150.00g");

        let snap = dash.observe(&measurement(250.0), Instant::now());
        assert_eq!(snap.container_override, Some(150.0));
    }

    #[test]
    fn test_container_override_follows_unit() {
        let mut dash = dashboard(DisplayUnit::Oz);
        dash.set_container(100.0);

        let snap = dash.observe(&measurement(250.0), Instant::now());
        let expected = 100.0 * FL_OZ_PER_GRAM;
        assert!((snap.container_override.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_command_notices_do_not_touch_connection() {
        let mut dash = dashboard(DisplayUnit::G);
        dash.observe(&measurement(250.0), Instant::now());

        let notice = tare_notice(&Err(ScaleError::Unreachable));
        assert!(notice.is_error());
        assert_eq!(notice.message, "Failed to tare scale");
        assert!(dash.is_connected());

        let notice = reset_container_notice(&Ok(()));
        assert!(!notice.is_error());
        assert_eq!(notice.message, "Container weight reset");
    }
}
