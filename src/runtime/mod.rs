//! Runtime for the Pomodoro Timer.
//!
//! This module wires the pure engine to real collaborators:
//! - `clock`: monotonic millisecond clock
//! - `scheduler`: tokio interval tasks that issue ticks
//! - `runner`: command loop that owns the current session snapshot

pub mod clock;
pub mod runner;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use runner::{ForwardingAlert, RuntimeEvent, SessionRuntime};
pub use scheduler::TokioScheduler;
