//! Session accounting error and notice types.
//!
//! Store failures never reach the timer. The bridge turns them into
//! notices: a blocking notice when there is no signed-in user, a
//! transient toast for everything else.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::SessionId;

/// Errors reported by a session store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No user context is available.
    #[error("ログインしていません。ユーザーを指定してください")]
    Unauthenticated,

    /// The session no longer exists.
    #[error("学習セッション {0} が見つかりません")]
    NotFound(SessionId),

    /// Transient or permanent storage failure.
    #[error("学習記録の保存に失敗しました: {0}")]
    Persistence(String),
}

impl StoreError {
    /// Creates a persistence error from any displayable cause.
    pub fn persistence(cause: impl std::fmt::Display) -> Self {
        Self::Persistence(cause.to_string())
    }

    /// Returns true if the error is due to a missing user context.
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Returns true if the session handle has gone stale.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if the user must act before retrying.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.is_unauthenticated()
    }
}

/// How a notice is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Operation aborted until the user acts
    Blocking,
    /// Transient, non-blocking message
    Toast,
}

/// User-facing report of a failed persistence call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// Builds a notice for a failed operation.
    pub fn from_error(action: &str, error: &StoreError) -> Self {
        let level = if error.is_blocking() {
            NoticeLevel::Blocking
        } else {
            NoticeLevel::Toast
        };
        Self {
            level,
            message: format!("{}: {}", action, error),
        }
    }

    /// Returns true for a blocking notice.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.level == NoticeLevel::Blocking
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
