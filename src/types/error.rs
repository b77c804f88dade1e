//! Session configuration error types.

use thiserror::Error;

/// Errors reported by [`SessionConfig::validate`](super::SessionConfig::validate).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No timers configured
    #[error("タイマーが1つも設定されていません")]
    NoTimers,

    /// A timer has a blank name
    #[error("タイマー #{0} の名前が空です")]
    EmptyName(usize),

    /// Tick cadence of zero
    #[error("ティック間隔は0より大きくしてください")]
    ZeroTickPeriod,
}
