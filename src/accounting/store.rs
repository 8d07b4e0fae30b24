//! Session store contract.

use std::future::Future;

use chrono::{DateTime, Utc};

use super::error::StoreError;
use crate::types::{SessionId, SessionPhase, UserId};

/// Persistence service holding a user's study sessions.
///
/// Implementations must make `increment_session` a pure "+1 and bump
/// `end_time`" so that reordered or lost calls only shift the total by
/// the calls affected.
pub trait SessionStore: Send + Sync + 'static {
    /// Creates an empty session and returns its id.
    ///
    /// Fails with [`StoreError::Unauthenticated`] when `user` is `None`.
    fn create_session(
        &self,
        user: Option<UserId>,
        start_time: DateTime<Utc>,
        kind: SessionPhase,
    ) -> impl Future<Output = Result<SessionId, StoreError>> + Send;

    /// Adds one minute to a session.
    ///
    /// Not idempotent: every call adds a minute.
    fn increment_session(
        &self,
        id: SessionId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Sum of `duration_min` over every session of `user`; 0 if none.
    fn get_total_minutes(
        &self,
        user: &UserId,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Deletes every session of `user` and returns how many were removed.
    fn purge_all_sessions(
        &self,
        user: &UserId,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;
}
