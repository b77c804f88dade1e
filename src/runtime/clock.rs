//! Clock sources.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::types::Millis;

/// Supplies the current time in milliseconds since the Unix epoch.
///
/// Readings must never decrease within one process.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Wall-clock anchored at construction, advanced by a monotonic [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch_ms: Millis,
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        let epoch_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as Millis)
            .unwrap_or(0);
        Self {
            epoch_ms,
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        self.epoch_ms + self.started.elapsed().as_millis() as Millis
    }
}

/// Clock that only moves when told to, for tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    pub fn set(&self, now: Millis) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Millis) {
        self.now.fetch_add(by, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.load(Ordering::SeqCst)
    }
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn now(&self) -> Millis {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_non_decreasing() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert!(a > 1_600_000_000_000);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(1_000);
        assert_eq!(clock.now(), 1_000);

        clock.advance(3_000);
        assert_eq!(clock.now(), 4_000);

        clock.set(10);
        assert_eq!(clock.now(), 10);
    }
}
