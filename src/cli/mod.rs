//! CLI module for the Pomodoro Timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Parsing of keyboard lines into engine commands
//! - `display`: Output formatting and display logic
//! - `interactive`: The `run` loop tying stdin, runtime and display together

pub mod commands;
pub mod display;
pub mod input;
pub mod interactive;

pub use commands::{Cli, Commands, RunArgs};
pub use display::{format_clock, format_duration, render_status, Display};
pub use input::{parse_input, Input};
pub use interactive::run_interactive;
