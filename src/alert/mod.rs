//! Expiry alerts for the Pomodoro Timer.
//!
//! When a running timer expires the orchestrator switches to the next one
//! and hands an [`Expiry`] to an [`ExpiryAlert`]. What the alert does with
//! it (ring the terminal bell, record it, forward it) is up to the
//! implementation; the engine only signals.

use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

pub use crate::engine::Expiry;

/// Receives expiry signals.
pub trait ExpiryAlert {
    /// Signals that a timer expired and the next one took over.
    ///
    /// Must not block; failures are logged, never propagated.
    fn alert(&self, expiry: &Expiry);
}

impl<T: ExpiryAlert + ?Sized> ExpiryAlert for Arc<T> {
    fn alert(&self, expiry: &Expiry) {
        (**self).alert(expiry)
    }
}

// ============================================================================
// TerminalBell
// ============================================================================

/// Rings the terminal bell on stderr.
#[derive(Debug, Default)]
pub struct TerminalBell {
    disabled: bool,
}

impl TerminalBell {
    #[must_use]
    pub fn new(disabled: bool) -> Self {
        Self { disabled }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl ExpiryAlert for TerminalBell {
    fn alert(&self, expiry: &Expiry) {
        info!(
            expired = %expiry.expired_name,
            next = %expiry.next_name,
            "BEEP BEEP BEEP"
        );
        if self.is_disabled() {
            return;
        }
        let mut stderr = std::io::stderr();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|()| stderr.flush()) {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }
}

// ============================================================================
// MockAlert
// ============================================================================

/// Alert that records every expiry, for testing.
#[derive(Debug, Default)]
pub struct MockAlert {
    calls: Mutex<Vec<Expiry>>,
}

impl MockAlert {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Expiry> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ExpiryAlert for MockAlert {
    fn alert(&self, expiry: &Expiry) {
        self.calls.lock().unwrap().push(expiry.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expiry() -> Expiry {
        Expiry {
            expired_index: 0,
            expired_name: "Work".to_string(),
            next_index: 1,
            next_name: "Break".to_string(),
        }
    }

    #[test]
    fn test_mock_records_calls() {
        let alert = MockAlert::new();
        alert.alert(&expiry());
        alert.alert(&expiry());

        assert_eq!(alert.call_count(), 2);
        assert_eq!(alert.calls()[0].next_name, "Break");
    }

    #[test]
    fn test_shared_alert_records_through_arc() {
        let alert = Arc::new(MockAlert::new());
        let shared = Arc::clone(&alert);

        shared.alert(&expiry());

        assert_eq!(alert.call_count(), 1);
    }

    #[test]
    fn test_terminal_bell_disabled_flag() {
        assert!(TerminalBell::new(true).is_disabled());
        assert!(!TerminalBell::new(false).is_disabled());
        assert!(!TerminalBell::default().is_disabled());
    }

    #[test]
    fn test_disabled_bell_does_not_panic() {
        TerminalBell::new(true).alert(&expiry());
    }
}
