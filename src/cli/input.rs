//! Line-oriented keyboard input.
//!
//! Each line typed during `pomodoro run` maps to one [`Input`]:
//!
//! | line                       | input                     |
//! |----------------------------|---------------------------|
//! | `t`, `toggle`, `start`, `pause`, ` ` | `Toggle`       |
//! | `r`, `reset`               | `Reset`                   |
//! | `tick`                     | `Tick`                    |
//! | `+N`, `inc N`, `increment N` | `Increment { idx: N }` |
//! | `-N`, `dec N`, `decrement N` | `Decrement { idx: N }` |
//! | `q`, `quit`, `exit`        | quit                      |
//! | `{"type": ...}`            | JSON-encoded command      |
//!
//! A line made only of spaces toggles, like tapping the space bar. Empty
//! lines and other whitespace are ignored. Anything else becomes
//! `Command::Unknown`.

use crate::engine::Command;

/// One parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A command to dispatch
    Command(Command),
    /// Leave the session
    Quit,
}

/// Parses one input line. Returns `None` for blank lines.
pub fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    if !line.is_empty() && line.chars().all(|c| c == ' ') {
        return Some(Input::Command(Command::Toggle));
    }

    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if line.starts_with('{') {
        let command = serde_json::from_str(line).unwrap_or(Command::Unknown);
        return Some(Input::Command(command));
    }

    let mut words = line.split_whitespace();
    let head = words.next()?.to_ascii_lowercase();
    let arg = words.next();

    let command = match head.as_str() {
        "q" | "quit" | "exit" => return Some(Input::Quit),
        "t" | "toggle" | "start" | "pause" => Command::Toggle,
        "r" | "reset" => Command::Reset,
        "tick" => Command::Tick,
        "inc" | "increment" => index(arg).map_or(Command::Unknown, |idx| Command::Increment { idx }),
        "dec" | "decrement" => index(arg).map_or(Command::Unknown, |idx| Command::Decrement { idx }),
        other => {
            if let Some(rest) = other.strip_prefix('+') {
                index(Some(rest)).map_or(Command::Unknown, |idx| Command::Increment { idx })
            } else if let Some(rest) = other.strip_prefix('-') {
                index(Some(rest)).map_or(Command::Unknown, |idx| Command::Decrement { idx })
            } else {
                Command::Unknown
            }
        }
    };
    Some(Input::Command(command))
}

fn index(arg: Option<&str>) -> Option<usize> {
    arg?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> Command {
        match parse_input(line) {
            Some(Input::Command(command)) => command,
            other => panic!("Expected command for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        assert_eq!(parse_input(""), None);
        assert_eq!(parse_input("\r\n"), None);
        assert_eq!(parse_input("   \t"), None);
    }

    #[test]
    fn test_space_line_toggles() {
        assert_eq!(command(" "), Command::Toggle);
        assert_eq!(command("   "), Command::Toggle);
        assert_eq!(command(" \r\n"), Command::Toggle);
    }

    #[test]
    fn test_quit_aliases() {
        for line in ["q", "quit", "EXIT"] {
            assert_eq!(parse_input(line), Some(Input::Quit));
        }
    }

    #[test]
    fn test_toggle_aliases() {
        for line in ["t", "toggle", "start", "Pause", "  t  "] {
            assert_eq!(command(line), Command::Toggle);
        }
    }

    #[test]
    fn test_reset_and_tick() {
        assert_eq!(command("r"), Command::Reset);
        assert_eq!(command("reset"), Command::Reset);
        assert_eq!(command("tick"), Command::Tick);
    }

    #[test]
    fn test_nudge_words() {
        assert_eq!(command("inc 1"), Command::Increment { idx: 1 });
        assert_eq!(command("increment 0"), Command::Increment { idx: 0 });
        assert_eq!(command("dec 1"), Command::Decrement { idx: 1 });
        assert_eq!(command("decrement 0"), Command::Decrement { idx: 0 });
    }

    #[test]
    fn test_nudge_symbols() {
        assert_eq!(command("+1"), Command::Increment { idx: 1 });
        assert_eq!(command("-0"), Command::Decrement { idx: 0 });
    }

    #[test]
    fn test_nudge_without_index_is_unknown() {
        assert_eq!(command("inc"), Command::Unknown);
        assert_eq!(command("dec x"), Command::Unknown);
        assert_eq!(command("+"), Command::Unknown);
    }

    #[test]
    fn test_json_commands() {
        assert_eq!(command(r#"{"type":"toggle"}"#), Command::Toggle);
        assert_eq!(
            command(r#"{"type":"increment","idx":1}"#),
            Command::Increment { idx: 1 }
        );
        assert_eq!(command(r#"{"type":"switch"}"#), Command::Unknown);
        assert_eq!(command("{not json"), Command::Unknown);
    }

    #[test]
    fn test_unknown_words() {
        assert_eq!(command("next"), Command::Unknown);
        assert_eq!(command("über"), Command::Unknown);
    }
}
