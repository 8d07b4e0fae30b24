//! Study Timer Library
//!
//! This library provides the core functionality for the study timer CLI.
//! It includes:
//! - Timer engine, tick source and controller for Pomodoro phases
//! - Session accounting that records every focus minute
//! - Settings persistence with editing bounds
//! - IPC server/client for daemon-CLI communication
//! - CLI command parsing and display utilities
//! - Type definitions for settings, state and sessions

pub mod accounting;
pub mod cli;
pub mod config;
pub mod daemon;
pub mod settings;
pub mod stats;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    IpcRequest, IpcResponse, ResponseData, SessionId, SessionPhase, SettingsField,
    SettingsParams, StudySession, TimerSettings, TimerState, UserId, ValidationError,
};

pub use accounting::{
    AccountingBridge, AccountingSnapshot, InMemorySessionStore, JsonFileSessionStore, Notice,
    NoticeLevel, RunningTotal, SessionStore, StoreError,
};

pub use settings::{SettingsError, SettingsStore};

pub use stats::StudyStats;
