//! Application paths and user context.
//!
//! Everything lives under one data directory, `~/.studylog` unless
//! overridden with `--home` or `STUDYLOG_HOME`:
//! - `studylog.sock`: daemon socket
//! - `settings.json`: timer settings
//! - `sessions.json`: study sessions

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::accounting::SESSIONS_FILE_NAME;
use crate::settings::SETTINGS_FILE_NAME;
use crate::types::UserId;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "STUDYLOG_HOME";

/// Environment variable naming the signed-in user.
pub const USER_ENV: &str = "STUDYLOG_USER";

/// Data directory name under the user's home.
const DEFAULT_DIR_NAME: &str = ".studylog";

/// Socket file name.
pub const SOCKET_FILE_NAME: &str = "studylog.sock";

/// Resolved file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    /// Uses `root` as the data directory.
    pub fn in_dir(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the data directory from an explicit override or the home
    /// directory.
    pub fn resolve(home_override: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = home_override {
            return Ok(Self::in_dir(root));
        }

        let home = dirs::home_dir().context("ホームディレクトリが見つかりません")?;
        Ok(Self::in_dir(home.join(DEFAULT_DIR_NAME)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn socket_path(&self) -> PathBuf {
        self.root.join(SOCKET_FILE_NAME)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE_NAME)
    }

    pub fn sessions_path(&self) -> PathBuf {
        self.root.join(SESSIONS_FILE_NAME)
    }
}

/// Turns a raw `--user` value into a user id; blank means signed out.
pub fn resolve_user(raw: Option<&str>) -> Option<UserId> {
    raw.map(str::trim)
        .filter(|id| !id.is_empty())
        .map(UserId::new)
}
