//! Timer engine for the Pomodoro Timer.
//!
//! Pure state transitions over [`Session`](crate::types::Session) snapshots:
//! - `accounting`: elapsed-time accumulation from clock reads
//! - `transition`: toggle, reset, switch-over and duration nudges
//! - `dispatch`: command routing with injected collaborators

pub mod accounting;
pub mod dispatch;
pub mod transition;

pub use accounting::{tick, tick_timers};
pub use dispatch::{Command, Expiry, MockTickScheduler, Orchestrator, TickScheduler};
pub use transition::{
    decrement_timer, increment_timer, nudge_timer, reset, reset_elapsed, switch_timers, toggle,
};
