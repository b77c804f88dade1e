//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::types::{Millis, SessionConfig, MINUTE_MS};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer CLI - work/break interval timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro",
    version,
    about = "ターミナル用ポモドーロタイマーCLI",
    long_about = "作業タイマーと休憩タイマーを交互に切り替えるシンプルなポモドーロタイマー。\n\
                  実行中にキーボードから開始・一時停止、リセット、時間の調整ができます。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive timer session
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Work duration in minutes (0-1440)
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u64).range(0..=1440)
    )]
    pub work: u64,

    /// Break duration in minutes (0-1440)
    #[arg(
        short,
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u64).range(0..=1440)
    )]
    pub break_time: u64,

    /// Tick cadence in milliseconds while a timer runs (10-60000)
    #[arg(
        long,
        default_value = "100",
        value_parser = clap::value_parser!(u64).range(10..=60_000)
    )]
    pub tick_ms: u64,

    /// Minutes added or removed per increment/decrement (1-60)
    #[arg(
        short,
        long,
        default_value = "1",
        value_parser = clap::value_parser!(u64).range(1..=60)
    )]
    pub nudge_minutes: u64,

    /// Do not ring the terminal bell on expiry
    #[arg(long)]
    pub no_bell: bool,

    /// Print every snapshot as a JSON line
    #[arg(long)]
    pub json: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            work: 25,
            break_time: 5,
            tick_ms: 100,
            nudge_minutes: 1,
            no_bell: false,
            json: false,
        }
    }
}

impl RunArgs {
    /// Builds the session configuration for these arguments.
    pub fn to_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_work_ms(minutes(self.work))
            .with_break_ms(minutes(self.break_time))
            .with_tick_period_ms(self.tick_ms)
            .with_nudge_step_ms(minutes(self.nudge_minutes))
    }
}

fn minutes(m: u64) -> Millis {
    m.saturating_mul(MINUTE_MS)
}

// ============================================================================
// Tests
// ============================================================================
