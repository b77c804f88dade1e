//! Pomodoro Timer CLI
//!
//! Alternates between a work timer and a break timer:
//! - start/pause the current timer
//! - automatic switch to the next timer when one runs out
//! - adjust a stopped timer's duration a minute at a time

use anyhow::Result;
use clap::{CommandFactory, Parser};

use pomodoro::cli::{run_interactive, Cli, Commands, Display};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    let code = match execute(cli).await {
        Ok(()) => 0,
        Err(e) => {
            Display::show_error(&format!("{:#}", e));
            1
        }
    };
    // Exit explicitly: a pending stdin read would otherwise hold the runtime open.
    std::process::exit(code);
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            run_interactive(&args).await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
