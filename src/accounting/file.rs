//! JSON-file session store.
//!
//! All sessions live in one `sessions.json` array. Each mutation is
//! applied to a copy, written to a temporary file and renamed into place;
//! the in-memory list only changes once the write succeeded.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::sync::Mutex;

use super::error::StoreError;
use super::store::SessionStore;
use crate::types::{SessionId, SessionPhase, StudySession, UserId};

/// File name of the session list.
pub const SESSIONS_FILE_NAME: &str = "sessions.json";

/// Durable session store backed by a JSON file.
#[derive(Debug)]
pub struct JsonFileSessionStore {
    path: PathBuf,
    sessions: Mutex<Vec<StudySession>>,
}

impl JsonFileSessionStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let sessions = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::persistence(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(StoreError::persistence(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        };

        tracing::debug!(path = %path.display(), count = sessions.len(), "session store opened");
        Ok(Self {
            path,
            sessions: Mutex::new(sessions),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, sessions: &[StudySession]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(sessions).map_err(StoreError::persistence)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(StoreError::persistence)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(StoreError::persistence)?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(StoreError::persistence)?;
        Ok(())
    }
}

impl SessionStore for JsonFileSessionStore {
    async fn create_session(
        &self,
        user: Option<UserId>,
        start_time: DateTime<Utc>,
        kind: SessionPhase,
    ) -> Result<SessionId, StoreError> {
        if user.is_none() {
            return Err(StoreError::Unauthenticated);
        }

        let mut sessions = self.sessions.lock().await;
        let session = StudySession::open(user, start_time, kind);
        let id = session.id;

        let mut next = sessions.clone();
        next.push(session);
        self.persist(&next).await?;
        *sessions = next;

        Ok(id)
    }

    async fn increment_session(&self, id: SessionId) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().await;

        let mut next = sessions.clone();
        next.iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))?
            .record_minute();
        self.persist(&next).await?;
        *sessions = next;

        Ok(())
    }

    async fn get_total_minutes(&self, user: &UserId) -> Result<u64, StoreError> {
        let sessions = self.sessions.lock().await;
        Ok(sessions
            .iter()
            .filter(|s| s.is_owned_by(user))
            .map(|s| u64::from(s.duration_min))
            .sum())
    }

    async fn purge_all_sessions(&self, user: &UserId) -> Result<u64, StoreError> {
        let mut sessions = self.sessions.lock().await;

        let next: Vec<StudySession> = sessions
            .iter()
            .filter(|s| !s.is_owned_by(user))
            .cloned()
            .collect();
        let removed = (sessions.len() - next.len()) as u64;
        self.persist(&next).await?;
        *sessions = next;

        Ok(removed)
    }
}

// ============================================================================
// Tests
// ============================================================================
