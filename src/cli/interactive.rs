//! Interactive terminal session.
//!
//! Wires stdin, the session runtime and the display together:
//!
//! ```text
//! stdin lines ──▶ parse_input ──▶ command channel ──▶ SessionRuntime
//!                                        ▲                  │
//!                               tick subscriptions          ▼
//!                                                    RuntimeEvent ──▶ Display
//! ```

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::commands::RunArgs;
use super::display::Display;
use super::input::{parse_input, Input};
use crate::alert::TerminalBell;
use crate::engine::Command;
use crate::runtime::{SessionRuntime, SystemClock};

/// Runs a session until the user quits, stdin closes or Ctrl-C arrives.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the runtime fails.
pub async fn run_interactive(args: &RunArgs) -> Result<()> {
    let config = args.to_config();
    let (mut runtime, mut events) =
        SessionRuntime::new(config, TerminalBell::new(args.no_bell), SystemClock::new())
            .context("セッションの開始に失敗しました")?;

    let json = args.json;
    if !json {
        Display::show_controls();
    }

    let (quit_tx, quit_rx) = oneshot::channel();
    let reader = tokio::spawn(read_commands(runtime.command_sender(), quit_tx));
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            Display::show_event(&event, json);
        }
    });

    let shutdown = async {
        tokio::select! {
            _ = quit_rx => debug!("input finished"),
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    warn!("Failed to listen for Ctrl-C: {}", e);
                }
            }
        }
    };
    runtime.run(shutdown).await?;
    reader.abort();

    let last = runtime.session().clone();
    // Dropping the runtime closes the event channel so the printer drains.
    drop(runtime);
    printer.await.context("Display task failed")?;

    if !json {
        Display::show_summary(&last);
    }
    Ok(())
}

/// Forwards parsed stdin lines as commands until quit or EOF.
async fn read_commands(commands: mpsc::UnboundedSender<Command>, quit: oneshot::Sender<()>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_input(&line) {
                Some(Input::Quit) => break,
                Some(Input::Command(command)) => {
                    if commands.send(command).is_err() {
                        break;
                    }
                }
                None => {}
            },
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        }
    }
    let _ = quit.send(());
}
