//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures used for:
//! - Individual countdown timers
//! - Session snapshots (the ordered timers plus the active index)
//! - Session configuration with validation

mod error;

use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// Milliseconds, either a duration or a timestamp since the Unix epoch.
pub type Millis = u64;

/// One minute in milliseconds.
pub const MINUTE_MS: Millis = 60_000;

// ============================================================================
// Timer
// ============================================================================

/// A single named countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    /// Display label
    pub(crate) name: String,
    /// Configured duration
    pub(crate) initial: Millis,
    /// Accumulated running time since the last reset
    pub(crate) elapsed: Millis,
    /// Whether this timer is currently counting
    pub(crate) active: bool,
    /// Timestamp of the last time accounting for this timer
    pub(crate) last_press: Millis,
}

impl Timer {
    /// Creates an inactive timer with nothing elapsed.
    pub fn new(name: impl Into<String>, initial: Millis, now: Millis) -> Self {
        Self {
            name: name.into(),
            initial,
            elapsed: 0,
            active: false,
            last_press: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial(&self) -> Millis {
        self.initial
    }

    pub fn elapsed(&self) -> Millis {
        self.elapsed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn last_press(&self) -> Millis {
        self.last_press
    }

    /// Returns `initial - elapsed`. Negative once the timer has overrun.
    ///
    /// Saturates at the bounds of `i64`.
    pub fn remaining(&self) -> i64 {
        if self.initial >= self.elapsed {
            i64::try_from(self.initial - self.elapsed).unwrap_or(i64::MAX)
        } else {
            i64::try_from(self.elapsed - self.initial).map_or(i64::MIN, |over| -over)
        }
    }

    /// Returns true once the elapsed time has reached the configured duration.
    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.initial
    }
}

// ============================================================================
// SubscriptionHandle
// ============================================================================

/// Opaque token for a live periodic-tick registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionHandle(pub u64);

// ============================================================================
// Session
// ============================================================================

/// Snapshot of the ordered timers and which one may currently run.
///
/// Sessions are never mutated in place by the engine: every transition
/// builds a new value and leaves its input untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub(crate) timers: Vec<Timer>,
    pub(crate) active_timer: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) update_handle: Option<SubscriptionHandle>,
}

impl Session {
    /// Creates the default session for a configuration: every timer at its
    /// configured duration, nothing elapsed, nothing running, index 0.
    pub fn new(config: &SessionConfig, now: Millis) -> Self {
        Self {
            timers: config
                .timers
                .iter()
                .map(|spec| Timer::new(spec.name.clone(), spec.initial_ms, now))
                .collect(),
            active_timer: 0,
            update_handle: None,
        }
    }

    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    /// Returns the timer at `idx`, if any.
    pub fn timer(&self, idx: usize) -> Option<&Timer> {
        self.timers.get(idx)
    }

    /// Index of the timer that may currently run.
    pub fn active_index(&self) -> usize {
        self.active_timer
    }

    /// The timer that may currently run.
    pub fn active_timer(&self) -> Option<&Timer> {
        self.timers.get(self.active_timer)
    }

    pub fn update_handle(&self) -> Option<SubscriptionHandle> {
        self.update_handle
    }

    /// Returns true if the active-indexed timer is counting.
    pub fn is_running(&self) -> bool {
        self.active_timer().is_some_and(Timer::is_active)
    }

    /// Number of timers flagged active. Zero or one in every valid session.
    pub fn running_count(&self) -> usize {
        self.timers.iter().filter(|t| t.active).count()
    }
}

// ============================================================================
// SessionConfig
// ============================================================================

/// Name and duration of one timer in a fresh session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSpec {
    pub name: String,
    pub initial_ms: Millis,
}

impl TimerSpec {
    pub fn new(name: impl Into<String>, initial_ms: Millis) -> Self {
        Self {
            name: name.into(),
            initial_ms,
        }
    }
}

/// Configuration for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Timers in rotation order
    pub timers: Vec<TimerSpec>,
    /// Cadence of the periodic tick while a timer runs
    pub tick_period_ms: Millis,
    /// Magnitude of one increment/decrement
    pub nudge_step_ms: Millis,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timers: vec![
                TimerSpec::new("Work", 25 * MINUTE_MS),
                TimerSpec::new("Break", 5 * MINUTE_MS),
            ],
            tick_period_ms: 100,
            nudge_step_ms: MINUTE_MS,
        }
    }
}

impl SessionConfig {
    /// Sets the duration of the first (work) timer.
    pub fn with_work_ms(mut self, ms: Millis) -> Self {
        if let Some(spec) = self.timers.get_mut(0) {
            spec.initial_ms = ms;
        }
        self
    }

    /// Sets the duration of the second (break) timer.
    pub fn with_break_ms(mut self, ms: Millis) -> Self {
        if let Some(spec) = self.timers.get_mut(1) {
            spec.initial_ms = ms;
        }
        self
    }

    pub fn with_tick_period_ms(mut self, ms: Millis) -> Self {
        self.tick_period_ms = ms;
        self
    }

    pub fn with_nudge_step_ms(mut self, ms: Millis) -> Self {
        self.nudge_step_ms = ms;
        self
    }

    /// Replaces the timer rotation.
    pub fn with_timers(mut self, timers: Vec<TimerSpec>) -> Self {
        self.timers = timers;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timers.is_empty() {
            return Err(ConfigError::NoTimers);
        }
        if let Some(idx) = self.timers.iter().position(|t| t.name.trim().is_empty()) {
            return Err(ConfigError::EmptyName(idx));
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
