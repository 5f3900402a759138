//! Terminal frame rendering
//!
//! Plain-text stand-in for the original browser dashboard: three readings,
//! a sparkline over the rolling history, connection status, and the current
//! notice line. Chart internals and styling are deliberately minimal.

use crate::dashboard::controller::Snapshot;
use crate::dashboard::history::RollingHistory;
use crate::dashboard::units::format_weight;
use crate::notify::Notice;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
/// Slot that has not received a sample yet
const SPARK_EMPTY: char = '·';

/// Render one dashboard frame
///
/// `snapshot` is `None` until the first successful poll; the frame then shows
/// placeholders instead of stale zeros.
pub fn render_frame(
    snapshot: Option<&Snapshot>,
    connected: bool,
    history: &RollingHistory,
    notice: Option<&Notice>,
) -> String {
    let mut out = String::new();

    let status = if connected {
        "connected"
    } else {
        "disconnected"
    };
    out.push_str(&format!("Fluid Scale Dashboard            [{}]\n", status));
    out.push_str("----------------------------------------------\n");

    match snapshot {
        Some(snap) => {
            let unit = snap.unit.label();
            let marker = if snap.negative { "  << below zero" } else { "" };

            out.push_str(&format!(
                "  Fluid weight:     {:>10} {}{}\n",
                snap.fluid_text(),
                unit,
                marker
            ));
            out.push_str(&format!(
                "  Total weight:     {:>10} {}\n",
                snap.total_text(),
                unit
            ));
            match snap.container_override {
                Some(override_w) => out.push_str(&format!(
                    "  Container weight: {:>10} {}  (local: {} {})\n",
                    snap.container_text(),
                    unit,
                    format_weight(override_w),
                    unit
                )),
                None => out.push_str(&format!(
                    "  Container weight: {:>10} {}\n",
                    snap.container_text(),
                    unit
                )),
            }
        }
        None => {
            out.push_str("  Fluid weight:          --\n");
            out.push_str("  Total weight:          --\n");
            out.push_str("  Container weight:      --\n");
        }
    }

    out.push('\n');
    out.push_str(&format!("  History: {}\n", sparkline(history)));
    if let Some((min, max)) = history.bounds() {
        out.push_str(&format!(
            "           min {}  max {}\n",
            format_weight(min),
            format_weight(max)
        ));
    }

    if let Some(notice) = notice {
        let prefix = if notice.is_error() { "!" } else { "*" };
        out.push_str(&format!("\n  {} {}\n", prefix, notice.message));
    }

    out
}

/// Map the rolling history to one sparkline character per slot
pub fn sparkline(history: &RollingHistory) -> String {
    let (min, max) = match history.bounds() {
        Some(bounds) => bounds,
        None => return SPARK_EMPTY.to_string().repeat(history.len()),
    };
    let span = max - min;

    history
        .samples()
        .map(|slot| match slot {
            None => SPARK_EMPTY,
            Some(value) => {
                let norm = if span > 0.0 { (value - min) / span } else { 0.5 };
                let idx = (norm * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
                SPARK_LEVELS[idx.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::history::HISTORY_LEN;
    use crate::dashboard::units::DisplayUnit;

    fn snapshot(fluid: f64) -> Snapshot {
        Snapshot {
            unit: DisplayUnit::G,
            fluid,
            total: fluid + 100.0,
            container: 100.0,
            container_override: None,
            negative: fluid < 0.0,
        }
    }

    #[test]
    fn test_sparkline_empty_history() {
        let history = RollingHistory::new();
        let line = sparkline(&history);

        assert_eq!(line.chars().count(), HISTORY_LEN);
        assert!(line.chars().all(|c| c == '·'));
    }

    #[test]
    fn test_sparkline_scales_to_range() {
        let mut history = RollingHistory::new();
        history.push(0.0);
        history.push(10.0);

        let line: Vec<char> = sparkline(&history).chars().collect();
        assert_eq!(line[HISTORY_LEN - 2], '▁');
        assert_eq!(line[HISTORY_LEN - 1], '█');
    }

    #[test]
    fn test_sparkline_flat_values() {
        let mut history = RollingHistory::new();
        history.push(5.0);
        history.push(5.0);

        let line: Vec<char> = sparkline(&history).chars().collect();
        assert_eq!(line[HISTORY_LEN - 1], line[HISTORY_LEN - 2]);
        assert_ne!(line[HISTORY_LEN - 1], '·');
    }

    #[test]
    fn test_frame_shows_readings_and_status() {
        let mut history = RollingHistory::new();
        history.push(250.0);

        let snap = snapshot(250.0);
        let frame = render_frame(Some(&snap), true, &history, None);

        assert!(frame.contains("[connected]"));
        assert!(frame.contains("250.00 g"));
        assert!(frame.contains("350.00 g"));
        assert!(frame.contains("100.00 g"));
        assert!(!frame.contains("below zero"));
    }

    #[test]
    fn test_frame_negative_marker() {
        let history = RollingHistory::new();
        let snap = snapshot(-2.5);
        let frame = render_frame(Some(&snap), true, &history, None);

        assert!(frame.contains("-2.50 g"));
        assert!(frame.contains("below zero"));
    }

    #[test]
    fn test_frame_before_first_poll() {
        let history = RollingHistory::new();
        let frame = render_frame(None, false, &history, None);

        assert!(frame.contains("[disconnected]"));
        assert!(frame.contains("--"));
    }

    #[test]
    fn test_frame_notice_line() {
        let history = RollingHistory::new();
        let notice = Notice::error("Connection to scale lost");
        let frame = render_frame(None, false, &history, Some(&notice));

        assert!(frame.contains("! Connection to scale lost"));
    }
}
