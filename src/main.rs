//! Study Timer CLI - a Pomodoro timer that records focus minutes
//!
//! The daemon owns the timer and the study records; every other command
//! talks to it over a Unix socket:
//! - 25 minutes of focused study, counted minute by minute
//! - 5 minutes of short break
//! - 15 minutes of long break after 4 focus phases

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use studylog::cli::{Cli, Commands, Display, IpcClient};
use studylog::config::{self, AppPaths};
use studylog::daemon;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(&cli);

    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins; otherwise the daemon logs at info, the client at warn
/// and `--verbose` raises both to debug.
fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if cli.verbose {
        "debug"
    } else if matches!(cli.command, Some(Commands::Daemon(_))) {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    let home = cli.home;

    match cli.command {
        Some(Commands::Start) => Display::show_timer_result(&client(home)?.start().await?),
        Some(Commands::Pause) => Display::show_timer_result(&client(home)?.pause().await?),
        Some(Commands::Toggle) => Display::show_timer_result(&client(home)?.toggle().await?),
        Some(Commands::Reset) => Display::show_timer_result(&client(home)?.reset().await?),
        Some(Commands::Status) => Display::show_status(&client(home)?.status().await?),
        Some(Commands::Settings(args)) => {
            let response = client(home)?.settings(args.to_params()).await?;
            Display::show_settings(&response);
        }
        Some(Commands::Stats) => Display::show_stats(&client(home)?.stats().await?),
        Some(Commands::Purge { yes }) => {
            if !yes {
                anyhow::bail!(
                    "すべての学習記録が削除されます。実行するには --yes を指定してください"
                );
            }
            Display::show_timer_result(&client(home)?.purge().await?);
        }
        Some(Commands::Daemon(args)) => {
            let paths = AppPaths::resolve(home)?;
            let user = config::resolve_user(args.user.as_deref());
            tracing::info!(root = %paths.root().display(), user = ?user, "starting daemon");
            daemon::run(&paths, user).await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Creates a client for the daemon socket under the data directory.
fn client(home: Option<PathBuf>) -> Result<IpcClient> {
    let paths = AppPaths::resolve(home)?;
    Ok(IpcClient::new(paths.socket_path()))
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
