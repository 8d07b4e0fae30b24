//! Command definitions for the study timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{HOME_ENV, USER_ENV};
use crate::types::SettingsParams;

// ============================================================================
// CLI Structure
// ============================================================================

/// Study timer CLI - Pomodoro timer that records focus minutes
#[derive(Parser, Debug)]
#[command(
    name = "studylog",
    version,
    about = "学習時間を記録するポモドーロタイマーCLI",
    long_about = "集中時間を1分単位で記録するポモドーロタイマー。\n\
                  'studylog daemon' を起動してから各コマンドを実行してください。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Data directory (default: ~/.studylog)
    #[arg(long, global = true, env = HOME_ENV, value_name = "DIR")]
    pub home: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start or resume the timer
    Start,

    /// Pause the timer
    Pause,

    /// Start the timer if paused, pause it if running
    Toggle,

    /// Reset the timer to a fresh focus phase
    Reset,

    /// Show current timer status
    Status,

    /// Show or edit timer settings
    Settings(SettingsArgs),

    /// Show study statistics
    Stats,

    /// Delete every recorded study session
    Purge {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Run the timer daemon in the foreground
    Daemon(DaemonArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Settings Command Arguments
// ============================================================================

/// Arguments for the settings command.
///
/// Values are passed through unchanged; the daemon clamps them into range
/// and ignores values below 1.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Focus duration in minutes (1-60)
    #[arg(short, long, allow_negative_numbers = true)]
    pub work: Option<i64>,

    /// Short break duration in minutes (1-30)
    #[arg(short, long = "break", allow_negative_numbers = true)]
    pub break_time: Option<i64>,

    /// Long break duration in minutes (1-60)
    #[arg(short, long, allow_negative_numbers = true)]
    pub long_break: Option<i64>,

    /// Focus phases before a long break (2-10)
    #[arg(short, long, allow_negative_numbers = true)]
    pub sessions: Option<i64>,
}

impl SettingsArgs {
    /// Converts the arguments into IPC parameters.
    pub fn to_params(&self) -> SettingsParams {
        SettingsParams {
            work_minutes: self.work,
            break_minutes: self.break_time,
            long_break_minutes: self.long_break,
            sessions_until_long_break: self.sessions,
        }
    }
}

// ============================================================================
// Daemon Command Arguments
// ============================================================================

/// Arguments for the daemon command
#[derive(Args, Debug, Clone, Default)]
pub struct DaemonArgs {
    /// Signed-in user; without one no sessions are recorded
    #[arg(short, long, env = USER_ENV)]
    pub user: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================
