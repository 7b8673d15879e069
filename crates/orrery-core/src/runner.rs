//! Simulation loop runner with speed control.
//!
//! [`run_simulation`] drives the tick loop with support for:
//!
//! - **Bounded runs**: stop after `max_days` or `max_real_time_seconds`
//! - **Variable speed**: the interval is `base / multiplier`, re-read
//!   before every sleep
//! - **Pause**: speed 0 parks the loop until the speed changes
//! - **Clean stop**: [`SpeedControl::request_stop`] ends the run between
//!   ticks
//!
//! The engine lock is held for exactly one tick plus its callback, so
//! player actions issued from other tasks interleave between days and
//! never observe a half-applied tick.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::engine::Engine;
use crate::speed::SpeedControl;
use crate::tick::{TickError, TickSummary};

/// Reason why the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationEndReason {
    /// Reached the configured `max_days` limit.
    MaxDaysReached,
    /// Reached the configured `max_real_time_seconds` limit.
    MaxRealTimeReached,
    /// A stop was requested.
    OperatorStop,
}

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed in this run.
    pub total_ticks: u64,
}

/// Callback invoked after each tick, while the engine is still locked.
///
/// Implementations may issue actions on the engine; they take effect
/// before the next tick.
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, engine: &mut Engine);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _engine: &mut Engine) {}
}

fn finish(
    reason: SimulationEndReason,
    final_summary: Option<TickSummary>,
    total_ticks: u64,
) -> SimulationResult {
    SimulationResult {
        end_reason: reason,
        final_summary,
        total_ticks,
    }
}

/// Run the simulation loop until a termination condition is met.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick fails. The engine keeps the state of
/// the last successful tick.
pub async fn run_simulation(
    engine: &Mutex<Engine>,
    control: &Arc<SpeedControl>,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_days = control.max_days(),
        max_real_time_seconds = control.max_real_time_seconds(),
        speed = %control.speed(),
        "Simulation starting"
    );

    loop {
        // --- Check pause ---
        if control.is_paused() {
            info!("Simulation paused, waiting for speed change...");
            control.wait_while_paused().await;
            if !control.is_stop_requested() {
                info!(speed = %control.speed(), "Simulation resumed");
            }
        }

        // --- Check stop request (before tick) ---
        if control.is_stop_requested() {
            info!("Stop requested");
            return Ok(finish(
                SimulationEndReason::OperatorStop,
                last_summary,
                total_ticks,
            ));
        }

        // --- Check time limit (before tick) ---
        if control.time_limit_reached() {
            info!(
                max_seconds = control.max_real_time_seconds(),
                elapsed = control.elapsed_seconds(),
                "Real-time limit reached"
            );
            return Ok(finish(
                SimulationEndReason::MaxRealTimeReached,
                last_summary,
                total_ticks,
            ));
        }

        // --- Check day limit (covers restored games already past it) ---
        {
            let day = engine.lock().await.day();
            if control.day_limit_reached(day) {
                info!(day, max_days = control.max_days(), "Day limit reached");
                return Ok(finish(
                    SimulationEndReason::MaxDaysReached,
                    last_summary,
                    total_ticks,
                ));
            }
        }

        // --- Execute tick and callback under one lock ---
        let summary = {
            let mut guard = engine.lock().await;
            let summary = guard.tick()?;
            callback.on_tick(&summary, &mut guard);
            summary
        };
        total_ticks = total_ticks.saturating_add(1);

        if control.day_limit_reached(summary.day) {
            info!(
                day = summary.day,
                max_days = control.max_days(),
                "Day limit reached"
            );
            return Ok(finish(
                SimulationEndReason::MaxDaysReached,
                Some(summary),
                total_ticks,
            ));
        }
        last_summary = Some(summary);

        // --- Sleep for tick interval ---
        if let Some(interval) = control.tick_interval().filter(|d| !d.is_zero()) {
            tokio::time::sleep(interval).await;
        }
    }
}

/// Log the end of a run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_day = result.final_summary.as_ref().map(|s| s.day),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            day = summary.day,
            colonies = summary.production.len(),
            ships_in_transit = summary.ships_in_transit,
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}
