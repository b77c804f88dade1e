//! Activation and transition functions.
//!
//! - `toggle`: start/pause the active-indexed timer and (de)register the tick
//! - `reset`: full stop back to the configured session, or elapsed-only clear
//! - `switch_timers`: advance to the next timer on expiry
//! - `nudge_timer`: adjust a stopped timer's configured duration

use tracing::{debug, info};

use super::accounting::tick_timers;
use super::dispatch::TickScheduler;
use crate::types::{Millis, Session, SessionConfig};

// ============================================================================
// Toggle
// ============================================================================

/// Starts or pauses the active-indexed timer.
///
/// Time is flushed up to `now` first. The tick subscription follows the
/// handle: a live one is cancelled, otherwise a new one is scheduled with
/// `period_ms`. Exactly one of start or pause happens per call.
pub fn toggle<S>(session: &Session, now: Millis, period_ms: Millis, scheduler: &mut S) -> Session
where
    S: TickScheduler + ?Sized,
{
    let mut next = tick_timers(session, now);
    let idx = next.active_timer;
    if idx >= next.timers.len() {
        return next;
    }
    let timer = &mut next.timers[idx];
    timer.active = !timer.active;
    let started = timer.active;

    match next.update_handle.take() {
        Some(handle) => {
            scheduler.cancel_tick(handle);
            debug!(?handle, "tick subscription cancelled");
        }
        None => {
            let handle = scheduler.schedule_tick(period_ms);
            debug!(?handle, period_ms, "tick subscription scheduled");
            next.update_handle = Some(handle);
        }
    }

    info!(
        timer = %next.timers[idx].name,
        started,
        elapsed = next.timers[idx].elapsed,
        "timer toggled"
    );
    next
}

// ============================================================================
// Reset
// ============================================================================

/// Resets a session.
///
/// - No session yet: the default session for `config`.
/// - `stop`: cancels any live tick subscription and returns the default
///   session, discarding nudged durations and the active index.
/// - otherwise: see [`reset_elapsed`].
pub fn reset<S>(
    session: Option<&Session>,
    stop: bool,
    config: &SessionConfig,
    now: Millis,
    scheduler: &mut S,
) -> Session
where
    S: TickScheduler + ?Sized,
{
    let Some(old) = session else {
        return Session::new(config, now);
    };
    if !stop {
        return reset_elapsed(old);
    }

    if let Some(handle) = old.update_handle {
        scheduler.cancel_tick(handle);
        debug!(?handle, "tick subscription cancelled by reset");
    }
    info!("session reset");
    Session::new(config, now)
}

/// Zeroes `elapsed` on every timer.
///
/// Names, configured durations (nudges included), `active` flags, the
/// active index and the subscription handle are all preserved.
pub fn reset_elapsed(session: &Session) -> Session {
    let mut next = session.clone();
    for timer in &mut next.timers {
        timer.elapsed = 0;
    }
    next
}

// ============================================================================
// Switch
// ============================================================================

/// Advances to the next timer after the active one expired.
///
/// Elapsed time is cleared everywhere, the index moves cyclically and only
/// the newly selected timer is flagged active. The subscription handle is
/// carried over so the next timer keeps ticking.
pub fn switch_timers(session: &Session) -> Session {
    let mut next = reset_elapsed(session);
    let count = next.timers.len();
    if count == 0 {
        return next;
    }

    next.active_timer = (next.active_timer + 1) % count;
    let selected = next.active_timer;
    for (i, timer) in next.timers.iter_mut().enumerate() {
        timer.active = i == selected;
    }
    next
}

// ============================================================================
// Nudge
// ============================================================================

/// Adjusts the configured duration of timer `idx` by `delta` milliseconds,
/// floored at zero.
///
/// Running timers and out-of-range indices are left alone.
pub fn nudge_timer(session: &Session, idx: usize, delta: i64) -> Session {
    let mut next = session.clone();
    match next.timers.get_mut(idx) {
        Some(timer) if !timer.active => {
            timer.initial = timer.initial.saturating_add_signed(delta);
            debug!(timer = %timer.name, initial = timer.initial, "duration nudged");
        }
        Some(timer) => {
            debug!(timer = %timer.name, "nudge ignored while running");
        }
        None => {
            debug!(idx, "nudge ignored for unknown timer");
        }
    }
    next
}

/// Lengthens timer `idx` by `step` milliseconds.
pub fn increment_timer(session: &Session, idx: usize, step: Millis) -> Session {
    nudge_timer(session, idx, i64::try_from(step).unwrap_or(i64::MAX))
}

/// Shortens timer `idx` by `step` milliseconds.
pub fn decrement_timer(session: &Session, idx: usize, step: Millis) -> Session {
    nudge_timer(session, idx, i64::try_from(step).map_or(i64::MIN, |s| -s))
}

// ============================================================================
// Tests
// ============================================================================
