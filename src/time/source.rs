//! Time source abstraction for supporting both real and controlled time.
//!
//! The session never reads the wall clock directly; it asks a `TimeSource`.
//! Production uses `RealTimeSource`, tests drive a `ManualTimeSource` so that
//! timer expiry can be exercised without waiting.

use chrono::{DateTime, Duration as ChronoDuration, Local};
use std::sync::Mutex;

/// Trait for abstracting wall-clock reads.
pub trait TimeSource: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Local>;

    /// Check if this is a controlled (non-wall-clock) source
    fn is_simulated(&self) -> bool {
        false
    }
}

/// Real-time implementation that uses actual system time
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Manually advanced clock.
#[cfg(any(test, feature = "testing-support"))]
pub struct ManualTimeSource {
    current: Mutex<DateTime<Local>>,
}

#[cfg(any(test, feature = "testing-support"))]
impl ManualTimeSource {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: ChronoDuration) {
        let mut guard = self.current.lock().unwrap_or_else(|p| p.into_inner());
        *guard += by;
    }

    /// Jump to an absolute instant.
    pub fn set(&self, to: DateTime<Local>) {
        let mut guard = self.current.lock().unwrap_or_else(|p| p.into_inner());
        *guard = to;
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Local> {
        *self.current.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_source_advances() {
        let start = Local::now();
        let source = ManualTimeSource::new(start);
        assert_eq!(source.now(), start);

        source.advance(ChronoDuration::seconds(90));
        assert_eq!(source.now(), start + ChronoDuration::seconds(90));
        assert!(source.is_simulated());
    }

    #[test]
    fn test_real_source_is_not_simulated() {
        let source = RealTimeSource;
        assert!(!source.is_simulated());
        let before = Local::now();
        assert!(source.now() >= before);
    }
}
