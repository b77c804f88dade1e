//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the Pomodoro Timer CLI.
//! It includes:
//! - Type definitions for timers, sessions and configuration
//! - A pure timer engine: time accounting, toggle/reset/switch/nudge
//!   transitions and command dispatch
//! - Expiry alerts
//! - A tokio runtime that schedules ticks and owns the current session
//! - CLI command parsing, keyboard input and display utilities

pub mod alert;
pub mod cli;
pub mod engine;
pub mod runtime;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    ConfigError, Millis, Session, SessionConfig, SubscriptionHandle, Timer, TimerSpec, MINUTE_MS,
};

// Re-export engine types
pub use engine::{Command, Expiry, MockTickScheduler, Orchestrator, TickScheduler};

// Re-export alert types
pub use alert::{ExpiryAlert, MockAlert, TerminalBell};

// Re-export runtime types
pub use runtime::{Clock, ManualClock, RuntimeEvent, SessionRuntime, SystemClock, TokioScheduler};
