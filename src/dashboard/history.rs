//! Rolling measurement history
//!
//! Fixed-width window of the most recent fluid-weight samples feeding the
//! chart. The window starts as empty placeholders so the chart spans its
//! full width from the first render; real samples fill in from the right.

use std::collections::VecDeque;

/// Number of samples the chart shows
pub const HISTORY_LEN: usize = 30;

/// Fixed-capacity rolling buffer of fluid-weight samples
///
/// Samples are stored in display-unit terms at the time of insertion; a unit
/// toggle does not rewrite past samples.
#[derive(Debug, Clone)]
pub struct RollingHistory {
    samples: VecDeque<Option<f64>>,
}

impl RollingHistory {
    /// Create a history pre-filled with empty placeholders
    pub fn new() -> Self {
        let mut samples = VecDeque::with_capacity(HISTORY_LEN);
        samples.extend(std::iter::repeat(None).take(HISTORY_LEN));
        Self { samples }
    }

    /// Append a sample, evicting the oldest entry
    pub fn push(&mut self, value: f64) {
        self.samples.push_back(Some(value));
        while self.samples.len() > HISTORY_LEN {
            self.samples.pop_front();
        }
    }

    /// Samples oldest-first, `None` where no reading has arrived yet
    pub fn samples(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.samples.iter().copied()
    }

    /// Number of slots (always `HISTORY_LEN`)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True until the first real sample arrives
    pub fn is_empty(&self) -> bool {
        self.samples.iter().all(Option::is_none)
    }

    /// Most recent real sample, if any
    pub fn latest(&self) -> Option<f64> {
        self.samples.iter().rev().find_map(|s| *s)
    }

    /// Min and max over the real samples, for chart scaling
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for value in self.samples.iter().flatten() {
            bounds = Some(match bounds {
                None => (*value, *value),
                Some((min, max)) => (min.min(*value), max.max(*value)),
            });
        }
        bounds
    }
}

impl Default for RollingHistory {
    fn default() -> Self {
        Self::new()
    }
}
