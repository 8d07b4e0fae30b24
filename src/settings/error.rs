//! Settings store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while persisting timer settings.
///
/// Loading never fails: a missing or malformed blob falls back to defaults.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file or its directory could not be written.
    #[error("設定ファイルの書き込みに失敗しました ({path}): {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings record could not be serialized.
    #[error("設定のシリアライズに失敗しました: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SettingsError {
    /// Returns true if the error came from the filesystem.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}
