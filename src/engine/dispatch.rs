//! Command dispatch.
//!
//! The [`Orchestrator`] routes each [`Command`] to the matching pure
//! transition and hands back the next session snapshot. It owns the
//! collaborators (tick scheduler, expiry alert) and the configuration,
//! but never the session itself: callers keep the current snapshot and
//! replace it with whatever `dispatch` returns.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::accounting::tick_timers;
use super::transition::{decrement_timer, increment_timer, reset, switch_timers, toggle};
use crate::alert::ExpiryAlert;
use crate::types::{ConfigError, Millis, Session, SessionConfig, SubscriptionHandle};

// ============================================================================
// Command
// ============================================================================

/// Commands accepted by [`Orchestrator::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Account time on every timer and switch over on expiry
    Tick,
    /// Start or pause the active timer
    Toggle,
    /// Stop everything and restore the configured session
    Reset,
    /// Lengthen a stopped timer by one nudge step
    Increment {
        /// Timer index
        idx: usize,
    },
    /// Shorten a stopped timer by one nudge step
    Decrement {
        /// Timer index
        idx: usize,
    },
    /// Anything unrecognized; dispatches as a no-op
    #[serde(other)]
    Unknown,
}

impl Command {
    /// Returns the string representation of the command tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Tick => "tick",
            Command::Toggle => "toggle",
            Command::Reset => "reset",
            Command::Increment { .. } => "increment",
            Command::Decrement { .. } => "decrement",
            Command::Unknown => "unknown",
        }
    }
}

// ============================================================================
// TickScheduler
// ============================================================================

/// Arranges for `Command::Tick` to be issued on a fixed cadence.
pub trait TickScheduler {
    /// Starts a recurring tick every `period_ms` and returns its handle.
    fn schedule_tick(&mut self, period_ms: Millis) -> SubscriptionHandle;

    /// Stops the recurring tick identified by `handle`.
    fn cancel_tick(&mut self, handle: SubscriptionHandle);
}

/// Scheduler that only records calls, for tests.
#[derive(Debug, Default)]
pub struct MockTickScheduler {
    next_id: u64,
    /// Every subscription handed out, with its period
    pub scheduled: Vec<(SubscriptionHandle, Millis)>,
    /// Every cancellation received
    pub cancelled: Vec<SubscriptionHandle>,
}

impl MockTickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles scheduled and not yet cancelled.
    pub fn live(&self) -> Vec<SubscriptionHandle> {
        self.scheduled
            .iter()
            .map(|(handle, _)| *handle)
            .filter(|handle| !self.cancelled.contains(handle))
            .collect()
    }
}

impl TickScheduler for MockTickScheduler {
    fn schedule_tick(&mut self, period_ms: Millis) -> SubscriptionHandle {
        self.next_id += 1;
        let handle = SubscriptionHandle(self.next_id);
        self.scheduled.push((handle, period_ms));
        handle
    }

    fn cancel_tick(&mut self, handle: SubscriptionHandle) {
        self.cancelled.push(handle);
    }
}

// ============================================================================
// Expiry
// ============================================================================

/// Describes an expiry-driven switch from one timer to the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expiry {
    pub expired_index: usize,
    pub expired_name: String,
    pub next_index: usize,
    pub next_name: String,
}

impl Expiry {
    fn between(before: &Session, after: &Session) -> Self {
        let name_of = |session: &Session| {
            session
                .active_timer()
                .map(|t| t.name().to_string())
                .unwrap_or_default()
        };
        Self {
            expired_index: before.active_index(),
            expired_name: name_of(before),
            next_index: after.active_index(),
            next_name: name_of(after),
        }
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Routes commands to the engine with the injected collaborators.
pub struct Orchestrator<S, A> {
    config: SessionConfig,
    scheduler: S,
    alert: A,
}

impl<S: TickScheduler, A: ExpiryAlert> Orchestrator<S, A> {
    /// Creates an orchestrator.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not validate.
    pub fn new(config: SessionConfig, scheduler: S, alert: A) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            scheduler,
            alert,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn alert(&self) -> &A {
        &self.alert
    }

    /// The default session for the configuration.
    pub fn initial_session(&self, now: Millis) -> Session {
        Session::new(&self.config, now)
    }

    /// Applies `command` to `session` and returns the next snapshot.
    ///
    /// A missing session is materialized as the default session whatever
    /// the command.
    pub fn dispatch(&mut self, session: Option<&Session>, command: Command, now: Millis) -> Session {
        let Some(current) = session else {
            debug!(command = command.as_str(), "no session yet, using defaults");
            return self.initial_session(now);
        };
        debug!(command = command.as_str(), now, "dispatching");

        match command {
            Command::Tick => self.tick(current, now),
            Command::Toggle => toggle(current, now, self.config.tick_period_ms, &mut self.scheduler),
            Command::Reset => reset(Some(current), true, &self.config, now, &mut self.scheduler),
            Command::Increment { idx } => increment_timer(current, idx, self.config.nudge_step_ms),
            Command::Decrement { idx } => decrement_timer(current, idx, self.config.nudge_step_ms),
            Command::Unknown => current.clone(),
        }
    }

    /// Ticks every timer, then switches over if the running timer expired.
    fn tick(&mut self, current: &Session, now: Millis) -> Session {
        let next = tick_timers(current, now);
        let expired = next
            .active_timer()
            .is_some_and(|t| t.is_active() && t.is_expired());
        if !expired {
            return next;
        }

        let switched = switch_timers(&next);
        let expiry = Expiry::between(&next, &switched);
        info!(
            expired = %expiry.expired_name,
            next = %expiry.next_name,
            "timer expired, switching"
        );
        self.alert.alert(&expiry);
        switched
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::MockAlert;

    fn orchestrator() -> Orchestrator<MockTickScheduler, MockAlert> {
        let config = SessionConfig::default()
            .with_work_ms(5000)
            .with_break_ms(300_000);
        Orchestrator::new(config, MockTickScheduler::new(), MockAlert::new()).unwrap()
    }

    // ------------------------------------------------------------------------
    // Command Tests
    // ------------------------------------------------------------------------

    mod command_tests {
        use super::*;

        #[test]
        fn test_serialize_tagged() {
            let json = serde_json::to_string(&Command::Increment { idx: 1 }).unwrap();
            assert_eq!(json, r#"{"type":"increment","idx":1}"#);

            let json = serde_json::to_string(&Command::Toggle).unwrap();
            assert_eq!(json, r#"{"type":"toggle"}"#);
        }

        #[test]
        fn test_deserialize_known() {
            let command: Command = serde_json::from_str(r#"{"type":"decrement","idx":0}"#).unwrap();
            assert_eq!(command, Command::Decrement { idx: 0 });
        }

        #[test]
        fn test_deserialize_unknown_tag() {
            let command: Command = serde_json::from_str(r#"{"type":"next"}"#).unwrap();
            assert_eq!(command, Command::Unknown);
        }

        #[test]
        fn test_as_str() {
            assert_eq!(Command::Tick.as_str(), "tick");
            assert_eq!(Command::Reset.as_str(), "reset");
            assert_eq!(Command::Decrement { idx: 3 }.as_str(), "decrement");
            assert_eq!(Command::Unknown.as_str(), "unknown");
        }
    }

    // ------------------------------------------------------------------------
    // MockTickScheduler Tests
    // ------------------------------------------------------------------------

    mod mock_scheduler_tests {
        use super::*;

        #[test]
        fn test_handles_are_distinct() {
            let mut scheduler = MockTickScheduler::new();
            let a = scheduler.schedule_tick(100);
            let b = scheduler.schedule_tick(900);
            assert_ne!(a, b);

            scheduler.cancel_tick(a);
            assert_eq!(scheduler.live(), vec![b]);
        }
    }

    // ------------------------------------------------------------------------
    // Orchestrator Tests
    // ------------------------------------------------------------------------

    mod orchestrator_tests {
        use super::*;

        #[test]
        fn test_new_rejects_invalid_config() {
            let config = SessionConfig::default().with_tick_period_ms(0);
            let result = Orchestrator::new(config, MockTickScheduler::new(), MockAlert::new());
            assert!(matches!(result, Err(ConfigError::ZeroTickPeriod)));
        }

        #[test]
        fn test_absent_session_is_materialized() {
            let mut orch = orchestrator();

            for command in [Command::Tick, Command::Toggle, Command::Increment { idx: 0 }] {
                let session = orch.dispatch(None, command, 50);
                assert_eq!(session, orch.initial_session(50));
            }
            assert!(orch.scheduler().scheduled.is_empty());
        }

        #[test]
        fn test_unknown_is_noop() {
            let mut orch = orchestrator();
            let session = orch.initial_session(0);

            let next = orch.dispatch(Some(&session), Command::Unknown, 10_000);

            assert_eq!(next, session);
        }

        #[test]
        fn test_toggle_uses_configured_period() {
            let config = SessionConfig::default().with_tick_period_ms(900);
            let mut orch =
                Orchestrator::new(config, MockTickScheduler::new(), MockAlert::new()).unwrap();
            let session = orch.initial_session(0);

            let _ = orch.dispatch(Some(&session), Command::Toggle, 0);

            assert_eq!(orch.scheduler().scheduled[0].1, 900);
        }

        #[test]
        fn test_nudge_uses_configured_step() {
            let config = SessionConfig::default().with_nudge_step_ms(30_000);
            let mut orch =
                Orchestrator::new(config, MockTickScheduler::new(), MockAlert::new()).unwrap();
            let session = orch.initial_session(0);

            let next = orch.dispatch(Some(&session), Command::Increment { idx: 0 }, 0);

            assert_eq!(next.timers()[0].initial(), 25 * 60_000 + 30_000);
        }

        #[test]
        fn test_tick_without_expiry_keeps_running() {
            let mut orch = orchestrator();
            let session = orch.initial_session(0);
            let running = orch.dispatch(Some(&session), Command::Toggle, 0);

            let next = orch.dispatch(Some(&running), Command::Tick, 3_000);

            assert_eq!(next.timers()[0].elapsed(), 3_000);
            assert!(next.is_running());
            assert!(orch.alert().calls().is_empty());
        }

        #[test]
        fn test_tick_on_expiry_switches_and_alerts() {
            let mut orch = orchestrator();
            let session = orch.initial_session(0);
            let running = orch.dispatch(Some(&session), Command::Toggle, 0);

            let next = orch.dispatch(Some(&running), Command::Tick, 5_000);

            assert_eq!(next.active_index(), 1);
            assert!(next.timers()[1].is_active());
            assert!(!next.timers()[0].is_active());
            assert_eq!(next.update_handle(), running.update_handle());

            let calls = orch.alert().calls();
            assert_eq!(calls.len(), 1);
            assert_eq!(
                calls[0],
                Expiry {
                    expired_index: 0,
                    expired_name: "Work".to_string(),
                    next_index: 1,
                    next_name: "Break".to_string(),
                }
            );
        }

        #[test]
        fn test_tick_on_paused_zero_timer_does_not_switch() {
            let config = SessionConfig::default().with_work_ms(0);
            let mut orch =
                Orchestrator::new(config, MockTickScheduler::new(), MockAlert::new()).unwrap();
            let session = orch.initial_session(0);

            let next = orch.dispatch(Some(&session), Command::Tick, 1_000);

            assert_eq!(next.active_index(), 0);
            assert_eq!(next.running_count(), 0);
            assert!(orch.alert().calls().is_empty());
        }

        #[test]
        fn test_reset_cancels_and_restores_defaults() {
            let mut orch = orchestrator();
            let session = orch.initial_session(0);
            let running = orch.dispatch(Some(&session), Command::Toggle, 0);
            let ticked = orch.dispatch(Some(&running), Command::Tick, 2_000);

            let next = orch.dispatch(Some(&ticked), Command::Reset, 2_500);

            assert_eq!(next, orch.initial_session(2_500));
            assert!(orch.scheduler().live().is_empty());
        }
    }
}
