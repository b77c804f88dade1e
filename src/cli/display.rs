//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides formatted output for:
//! - Remaining time per timer
//! - The live status line
//! - Expiry announcements
//! - Error messages

use std::io::Write;

use crate::engine::Expiry;
use crate::runtime::RuntimeEvent;
use crate::types::{Session, Timer};

// ============================================================================
// Formatting
// ============================================================================

/// Formats milliseconds as `"1h 2m 3s"`, leaving out zero leading units.
///
/// Rounds to the nearest second. Negative values get a `-` sign, or render
/// as `"0s"` when `negative_ok` is false.
pub fn format_duration(ms: i64, negative_ok: bool) -> String {
    let negative = ms < 0;
    if negative && !negative_ok {
        return "0s".to_string();
    }
    let sign = if negative { "-" } else { "" };
    let abs = ms.unsigned_abs();
    // Halves round towards positive infinity.
    let total = if negative { (abs + 499) / 1000 } else { (abs + 500) / 1000 };

    let (hours, minutes, seconds) = (total / 3600, (total / 60) % 60, total % 60);
    if hours > 0 {
        format!("{sign}{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m {seconds}s")
    } else {
        format!("{sign}{seconds}s")
    }
}

/// Formats milliseconds as `m:ss`, or `h:mm:ss` past the hour.
///
/// Negative values are shown as `0:00`.
pub fn format_clock(ms: i64) -> String {
    let total = (ms.max(0) as u64 + 500) / 1000;
    let (hours, minutes, seconds) = (total / 3600, (total / 60) % 60, total % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

fn render_timer(timer: &Timer) -> String {
    format!("{}: {}", timer.name(), format_duration(timer.remaining(), false))
}

/// Renders the status line for a session.
///
/// The active-indexed timer is marked `>` while running and `=` while paused.
pub fn render_status(session: &Session) -> String {
    session
        .timers()
        .iter()
        .enumerate()
        .map(|(i, timer)| {
            let marker = match (i == session.active_index(), timer.is_active()) {
                (true, true) => ">",
                (true, false) => "=",
                _ => " ",
            };
            format!("{}[{}] {}", marker, i, render_timer(timer))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the key bindings.
    pub fn show_controls() {
        println!("操作: t = 開始/一時停止, r = リセット, +N / -N = タイマーNの時間を調整, q = 終了");
    }

    /// Shows a runtime event as text or as one JSON line.
    pub fn show_event(event: &RuntimeEvent, json: bool) {
        if json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(e) => Self::show_error(&format!("イベントのエンコードに失敗しました: {}", e)),
            }
            return;
        }
        match event {
            RuntimeEvent::Snapshot(session) => Self::show_status(session),
            RuntimeEvent::Expired(expiry) => Self::show_expiry(expiry),
        }
    }

    /// Rewrites the current terminal line with the session status.
    pub fn show_status(session: &Session) {
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "\r\x1b[2K{}", render_status(session));
        let _ = stdout.flush();
    }

    /// Announces an expiry on its own line.
    pub fn show_expiry(expiry: &Expiry) {
        println!();
        println!("* {}が終了しました。{}を開始します", expiry.expired_name, expiry.next_name);
    }

    /// Shows the remaining time of every timer when the session ends.
    pub fn show_summary(session: &Session) {
        println!();
        for timer in session.timers() {
            println!("  {:<10} 残り時間: {}", timer.name(), format_clock(timer.remaining()));
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================
