//! Runtime time control shared between the tick loop and its callers.
//!
//! [`SpeedControl`] holds the player-selected [`TickSpeed`], a stop flag,
//! and the run bounds. All mutable fields are atomics so the controller can
//! be shared through an [`Arc`](std::sync::Arc) and changed from any task
//! while the loop is sleeping or waiting on a pause.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use orrery_types::TickSpeed;
use tokio::sync::Notify;
use tracing::info;

use crate::config::SimulationBoundsConfig;

/// Shared scheduler control state.
#[derive(Debug)]
pub struct SpeedControl {
    /// Current multiplier (always a valid [`TickSpeed`] value).
    speed: AtomicU32,

    /// Wakes the loop when it leaves pause or a stop is requested.
    wake: Notify,

    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Milliseconds between ticks at 1x.
    base_interval_ms: u64,

    /// Wall-clock time when the controller was created.
    started_at: DateTime<Utc>,

    /// Maximum day (0 = unlimited).
    max_days: u64,

    /// Maximum wall-clock seconds (0 = unlimited).
    max_real_time_seconds: u64,
}

impl SpeedControl {
    /// Create a controller.
    pub fn new(
        base_interval_ms: u64,
        initial: TickSpeed,
        bounds: &SimulationBoundsConfig,
    ) -> Self {
        Self {
            speed: AtomicU32::new(initial.multiplier()),
            wake: Notify::new(),
            stop_requested: AtomicBool::new(false),
            base_interval_ms,
            started_at: Utc::now(),
            max_days: bounds.max_days,
            max_real_time_seconds: bounds.max_real_time_seconds,
        }
    }

    // -----------------------------------------------------------------------
    // Speed
    // -----------------------------------------------------------------------

    /// The current speed.
    pub fn speed(&self) -> TickSpeed {
        TickSpeed::from_multiplier(self.speed.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Change speed. Returns the previous speed.
    pub fn set_speed(&self, speed: TickSpeed) -> TickSpeed {
        let prev = self.speed.swap(speed.multiplier(), Ordering::AcqRel);
        let prev = TickSpeed::from_multiplier(prev).unwrap_or_default();
        if prev != speed {
            info!(from = %prev, to = %speed, "Tick speed changed");
        }
        if !speed.is_paused() {
            self.wake.notify_one();
        }
        prev
    }

    /// Whether the speed is `Paused`.
    pub fn is_paused(&self) -> bool {
        self.speed().is_paused()
    }

    /// Interval between ticks at the current speed, `None` while paused.
    pub fn tick_interval(&self) -> Option<Duration> {
        let multiplier = u64::from(self.speed().multiplier());
        self.base_interval_ms
            .checked_div(multiplier)
            .map(Duration::from_millis)
    }

    /// Wait until the speed is no longer `Paused` or a stop is requested.
    pub async fn wait_while_paused(&self) {
        while self.is_paused() && !self.is_stop_requested() {
            self.wake.notified().await;
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean stop. Wakes a paused loop.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.wake.notify_one();
    }

    /// Whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    // -----------------------------------------------------------------------
    // Bounds
    // -----------------------------------------------------------------------

    /// Whether `day` has reached `max_days` (never, if unlimited).
    pub const fn day_limit_reached(&self, day: u64) -> bool {
        self.max_days > 0 && day >= self.max_days
    }

    /// Whether the wall-clock limit has elapsed (never, if unlimited).
    pub fn time_limit_reached(&self) -> bool {
        self.max_real_time_seconds > 0 && self.elapsed_seconds() >= self.max_real_time_seconds
    }

    /// Elapsed wall-clock seconds since creation.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        // Negative if the system clock moved backwards.
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }

    /// Configured day limit.
    pub const fn max_days(&self) -> u64 {
        self.max_days
    }

    /// Configured wall-clock limit in seconds.
    pub const fn max_real_time_seconds(&self) -> u64 {
        self.max_real_time_seconds
    }
}
