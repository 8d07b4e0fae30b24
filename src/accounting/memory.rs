//! In-memory session store.
//!
//! Used by tests and for ephemeral daemon runs. Failures and latency can
//! be injected to exercise the bridge's error paths.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tokio::time::Duration;

use super::error::StoreError;
use super::store::SessionStore;
use crate::types::{SessionId, SessionPhase, StudySession, UserId};

/// Session store backed by a vector.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<Vec<StudySession>>,
    should_fail: AtomicBool,
    latency_ms: AtomicU64,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `sessions`.
    #[must_use]
    pub fn with_sessions(sessions: Vec<StudySession>) -> Self {
        Self {
            sessions: Mutex::new(sessions),
            ..Self::default()
        }
    }

    /// Makes every subsequent call fail with a persistence error.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Delays every subsequent call.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    /// Returns a copy of the stored sessions.
    #[must_use]
    pub fn sessions(&self) -> Vec<StudySession> {
        self.lock().clone()
    }

    /// Removes a session, leaving any handle to it stale.
    pub fn remove(&self, id: SessionId) {
        self.lock().retain(|s| s.id != id);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<StudySession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn before_call(&self) -> Result<(), StoreError> {
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(StoreError::persistence("injected failure"));
        }
        Ok(())
    }
}

impl SessionStore for InMemorySessionStore {
    async fn create_session(
        &self,
        user: Option<UserId>,
        start_time: DateTime<Utc>,
        kind: SessionPhase,
    ) -> Result<SessionId, StoreError> {
        self.before_call().await?;
        if user.is_none() {
            return Err(StoreError::Unauthenticated);
        }

        let session = StudySession::open(user, start_time, kind);
        let id = session.id;
        self.lock().push(session);
        Ok(id)
    }

    async fn increment_session(&self, id: SessionId) -> Result<(), StoreError> {
        self.before_call().await?;

        let mut sessions = self.lock();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))?;
        session.record_minute();
        Ok(())
    }

    async fn get_total_minutes(&self, user: &UserId) -> Result<u64, StoreError> {
        self.before_call().await?;

        Ok(self
            .lock()
            .iter()
            .filter(|s| s.is_owned_by(user))
            .map(|s| u64::from(s.duration_min))
            .sum())
    }

    async fn purge_all_sessions(&self, user: &UserId) -> Result<u64, StoreError> {
        self.before_call().await?;

        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|s| !s.is_owned_by(user));
        Ok((before - sessions.len()) as u64)
    }
}
