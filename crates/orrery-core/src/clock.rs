//! The day counter.
//!
//! The day is the only clock in the simulation: production and travel
//! both advance exactly once per day. It starts at 0 and only increases.

use serde::{Deserialize, Serialize};

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Day counter would overflow.
    #[error("day counter overflow: cannot advance beyond u64::MAX")]
    DayOverflow,
}

/// Monotonic day counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayClock {
    day: u64,
}

impl DayClock {
    /// A clock at day 0.
    pub const fn new() -> Self {
        Self { day: 0 }
    }

    /// A clock at an explicit day (state restoration).
    pub const fn from_day(day: u64) -> Self {
        Self { day }
    }

    /// Advance by one day. Returns the new day.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::DayOverflow`] if the counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.day = self.day.checked_add(1).ok_or(ClockError::DayOverflow)?;
        Ok(self.day)
    }

    /// The current day.
    pub const fn day(&self) -> u64 {
        self.day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_day_zero() {
        assert_eq!(DayClock::new().day(), 0);
    }

    #[test]
    fn clock_advances() {
        let mut clock = DayClock::new();
        assert_eq!(clock.advance().ok(), Some(1));
        assert_eq!(clock.advance().ok(), Some(2));
        assert_eq!(clock.day(), 2);
    }

    #[test]
    fn clock_refuses_to_overflow() {
        let mut clock = DayClock::from_day(u64::MAX);
        assert!(matches!(clock.advance(), Err(ClockError::DayOverflow)));
        assert_eq!(clock.day(), u64::MAX);
    }

    #[test]
    fn clock_serializes_as_bare_number() {
        let json = serde_json::to_string(&DayClock::from_day(42)).unwrap_or_default();
        assert_eq!(json, "42");
    }
}
