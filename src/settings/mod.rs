//! Durable timer settings.
//!
//! The settings live in a single JSON blob. The blob is read once at
//! startup and rewritten on every change. A missing or malformed blob
//! yields the defaults; edits outside the allowed range are clamped or
//! rejected so that no duration can ever reach zero.

mod error;

use std::fs;
use std::path::{Path, PathBuf};

pub use error::SettingsError;

use crate::types::{SettingsField, TimerSettings};

/// File name of the settings blob.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Key-value persistence of [`TimerSettings`].
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: TimerSettings,
}

impl SettingsStore {
    /// Loads the settings stored at `path`, falling back to defaults.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = Self::read(&path);
        tracing::debug!(path = %path.display(), ?settings, "settings loaded");
        Self { path, settings }
    }

    fn read(path: &Path) -> TimerSettings {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return TimerSettings::default();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to read settings, using defaults: {}", e);
                return TimerSettings::default();
            }
        };

        match serde_json::from_str::<TimerSettings>(&contents) {
            Ok(stored) => match stored.validate() {
                Ok(()) => stored,
                Err(e) => {
                    let repaired = stored.sanitized();
                    tracing::warn!(?repaired, "stored settings repaired: {}", e);
                    repaired
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), "malformed settings, using defaults: {}", e);
                TimerSettings::default()
            }
        }
    }

    /// Returns the current settings.
    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    /// Returns the path of the settings blob.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies raw field edits and persists the result.
    ///
    /// A rejected edit keeps that field's prior value and is not an error;
    /// only a failed write is. Nothing is written when no value changed.
    pub fn edit(
        &mut self,
        edits: &[(SettingsField, i64)],
    ) -> Result<TimerSettings, SettingsError> {
        let mut updated = self.settings;
        for &(field, raw) in edits {
            match updated.with_edit(field, raw) {
                Ok(next) => updated = next,
                Err(e) => tracing::debug!("settings edit rejected, keeping prior value: {}", e),
            }
        }

        if updated == self.settings {
            return Ok(self.settings);
        }
        self.replace(updated)
    }

    /// Replaces every field at once and persists the result.
    ///
    /// The in-memory settings change only once the write succeeded.
    pub fn replace(&mut self, settings: TimerSettings) -> Result<TimerSettings, SettingsError> {
        let candidate = settings.sanitized();
        self.persist(&candidate)?;
        self.settings = candidate;
        Ok(candidate)
    }

    fn persist(&self, settings: &TimerSettings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        if let Err(source) = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(SettingsError::Write {
                path: self.path.clone(),
                source,
            });
        }

        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
