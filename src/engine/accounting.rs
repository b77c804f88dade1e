//! Time accounting.
//!
//! Elapsed time is charged from real clock reads: each tick adds the delta
//! since a timer's `last_press` when it is running and then moves the
//! baseline to `now`. Idle timers only get their baseline refreshed, so
//! starting them later never charges the time they spent paused.

use crate::types::{Millis, Session, Timer};

/// Accounts time for a single timer up to `now`.
///
/// A clock reading earlier than `last_press` contributes nothing.
pub fn tick(timer: &Timer, now: Millis) -> Timer {
    let mut next = timer.clone();
    if next.active {
        let delta = now.saturating_sub(next.last_press);
        next.elapsed = next.elapsed.saturating_add(delta);
    }
    next.last_press = now;
    next
}

/// Ticks every timer in the session with the same `now`.
///
/// The active index and subscription handle pass through unchanged.
pub fn tick_timers(session: &Session, now: Millis) -> Session {
    Session {
        timers: session.timers.iter().map(|timer| tick(timer, now)).collect(),
        active_timer: session.active_timer,
        update_handle: session.update_handle,
    }
}

// ============================================================================
// Tests
// ============================================================================
