//! Client half of `studylog`.
//!
//! [`commands`] parses the command line, [`client`] forwards a command to
//! the daemon and [`display`] prints what came back.

pub mod client;
pub mod commands;
pub mod display;

pub use client::IpcClient;
pub use commands::{Cli, Commands, DaemonArgs, SettingsArgs};
pub use display::Display;
