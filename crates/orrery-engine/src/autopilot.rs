//! Tick callback that plays the game headlessly.
//!
//! After each day the autopilot asks the engine for its hint and performs
//! the suggested action, if there is one. At most one action is issued per
//! day, so the pace follows the tick speed.

use orrery_core::{Engine, TickCallback, TickSummary};
use tracing::{debug, info, warn};

/// Commander that follows the engine's own hints.
#[derive(Debug, Default)]
pub struct Autopilot {
    accepted: u64,
    rejected: u64,
}

impl Autopilot {
    /// Create a fresh autopilot.
    pub const fn new() -> Self {
        Self {
            accepted: 0,
            rejected: 0,
        }
    }

    /// Actions the engine accepted so far.
    pub const fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Actions the engine rejected so far.
    pub const fn rejected(&self) -> u64 {
        self.rejected
    }
}

impl TickCallback for Autopilot {
    fn on_tick(&mut self, summary: &TickSummary, engine: &mut Engine) {
        for report in &summary.arrivals {
            info!(day = summary.day, world = %report.world, "{}", report.message);
        }
        for world in summary.colonies_in_deficit() {
            debug!(day = summary.day, world = %world, "Colony idle on power deficit");
        }

        let hint = engine.hint();
        let Some(action) = hint.action else {
            debug!(day = summary.day, hint = %hint.message, "Autopilot waiting");
            return;
        };
        match engine.perform(&action) {
            Ok(outcome) => {
                self.accepted = self.accepted.saturating_add(1);
                info!(day = summary.day, hint = %hint.message, "{}", outcome.message);
            }
            Err(err) => {
                self.rejected = self.rejected.saturating_add(1);
                warn!(
                    day = summary.day,
                    hint = %hint.message,
                    error = %err,
                    "Hinted action failed"
                );
            }
        }
    }
}
