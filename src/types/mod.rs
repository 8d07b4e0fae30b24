//! Core data types for the study timer.
//!
//! This module defines the data structures used for:
//! - Timer phase and state management
//! - Timer settings with editing bounds and validation
//! - Study session records kept by the session store
//! - IPC request/response serialization

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::stats::StudyStats;

// ============================================================================
// SessionPhase
// ============================================================================

/// Represents the phase of the Pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Countable study interval
    #[default]
    Focus,
    /// Short rest interval
    Break,
    /// Long rest interval (every N-th completed focus phase)
    LongBreak,
}

impl SessionPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Focus => "focus",
            SessionPhase::Break => "break",
            SessionPhase::LongBreak => "long_break",
        }
    }

    /// Returns true if time spent in this phase counts as study time.
    pub fn counts_toward_study(&self) -> bool {
        matches!(self, SessionPhase::Focus)
    }

    /// Returns true for either break phase.
    pub fn is_break(&self) -> bool {
        !self.counts_toward_study()
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ValidationError
// ============================================================================

/// Rejected settings input.
///
/// Never shown to the user: the store keeps the prior value and logs it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Zero or negative value for a duration or cycle length.
    #[error("{field} は1以上で指定してください (入力値: {value})")]
    NotPositive {
        /// Edited field
        field: SettingsField,
        /// Rejected raw value
        value: i64,
    },

    /// A loaded settings record violates the invariants.
    #[error("{field} の値が不正です: {value}")]
    OutOfRange {
        /// Offending field
        field: SettingsField,
        /// Stored value
        value: u32,
    },
}

// ============================================================================
// TimerSettings
// ============================================================================

/// Names one editable field of [`TimerSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsField {
    WorkMinutes,
    BreakMinutes,
    LongBreakMinutes,
    SessionsUntilLongBreak,
}

impl SettingsField {
    /// All fields, in display order.
    pub const ALL: [SettingsField; 4] = [
        SettingsField::WorkMinutes,
        SettingsField::BreakMinutes,
        SettingsField::LongBreakMinutes,
        SettingsField::SessionsUntilLongBreak,
    ];

    /// Inclusive bounds accepted by the editing surface.
    pub fn bounds(&self) -> (u32, u32) {
        match self {
            SettingsField::WorkMinutes => (1, 60),
            SettingsField::BreakMinutes => (1, 30),
            SettingsField::LongBreakMinutes => (1, 60),
            SettingsField::SessionsUntilLongBreak => (2, 10),
        }
    }

    /// Returns the string representation of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsField::WorkMinutes => "work_minutes",
            SettingsField::BreakMinutes => "break_minutes",
            SettingsField::LongBreakMinutes => "long_break_minutes",
            SettingsField::SessionsUntilLongBreak => "sessions_until_long_break",
        }
    }
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User preferences consumed by the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Focus duration in minutes (1-60)
    pub work_minutes: u32,
    /// Short break duration in minutes (1-30)
    pub break_minutes: u32,
    /// Long break duration in minutes (1-60)
    pub long_break_minutes: u32,
    /// Completed focus phases between long breaks (2-10)
    pub sessions_until_long_break: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
            long_break_minutes: 15,
            sessions_until_long_break: 4,
        }
    }
}

impl TimerSettings {
    /// Creates a new configuration with the specified focus duration.
    pub fn with_work_minutes(mut self, minutes: u32) -> Self {
        self.work_minutes = minutes;
        self
    }

    /// Creates a new configuration with the specified break duration.
    pub fn with_break_minutes(mut self, minutes: u32) -> Self {
        self.break_minutes = minutes;
        self
    }

    /// Creates a new configuration with the specified long break duration.
    pub fn with_long_break_minutes(mut self, minutes: u32) -> Self {
        self.long_break_minutes = minutes;
        self
    }

    /// Creates a new configuration with the specified cycle length.
    pub fn with_sessions_until_long_break(mut self, sessions: u32) -> Self {
        self.sessions_until_long_break = sessions;
        self
    }

    /// Returns the value of a single field.
    pub fn get(&self, field: SettingsField) -> u32 {
        match field {
            SettingsField::WorkMinutes => self.work_minutes,
            SettingsField::BreakMinutes => self.break_minutes,
            SettingsField::LongBreakMinutes => self.long_break_minutes,
            SettingsField::SessionsUntilLongBreak => self.sessions_until_long_break,
        }
    }

    fn set(&mut self, field: SettingsField, value: u32) {
        match field {
            SettingsField::WorkMinutes => self.work_minutes = value,
            SettingsField::BreakMinutes => self.break_minutes = value,
            SettingsField::LongBreakMinutes => self.long_break_minutes = value,
            SettingsField::SessionsUntilLongBreak => self.sessions_until_long_break = value,
        }
    }

    /// Configured duration of a phase in minutes.
    pub fn phase_minutes(&self, phase: SessionPhase) -> u32 {
        match phase {
            SessionPhase::Focus => self.work_minutes,
            SessionPhase::Break => self.break_minutes,
            SessionPhase::LongBreak => self.long_break_minutes,
        }
    }

    /// Configured duration of a phase in seconds.
    pub fn phase_seconds(&self, phase: SessionPhase) -> u32 {
        self.phase_minutes(phase) * 60
    }

    /// Checks every field against its editing bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for field in SettingsField::ALL {
            let value = self.get(field);
            let (min, max) = field.bounds();
            if value < min || value > max {
                return Err(ValidationError::OutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Replaces every field that violates the invariants with its default.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        for field in SettingsField::ALL {
            let (min, max) = field.bounds();
            let value = self.get(field);
            if value < min {
                self.set(field, defaults.get(field));
            } else if value > max {
                self.set(field, max);
            }
        }
        self
    }

    /// Applies a raw edit from the editing surface.
    ///
    /// Values above the field maximum are clamped down and values between
    /// 1 and the minimum are clamped up. Zero and negative input is
    /// rejected; the caller keeps its prior settings.
    pub fn with_edit(mut self, field: SettingsField, raw: i64) -> Result<Self, ValidationError> {
        if raw <= 0 {
            return Err(ValidationError::NotPositive { field, value: raw });
        }
        let (min, max) = field.bounds();
        let clamped = raw.clamp(i64::from(min), i64::from(max)) as u32;
        self.set(field, clamped);
        Ok(self)
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Represents the current state of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current phase of the cycle
    pub phase: SessionPhase,
    /// Remaining seconds in the current phase
    pub remaining_seconds: u32,
    /// Whether the countdown is running
    pub is_active: bool,
    /// Number of focus phases that ran to zero
    pub completed_focus_count: u32,
}

impl TimerState {
    /// Creates the initial state: focus, full duration, inactive.
    pub fn new(settings: &TimerSettings) -> Self {
        Self {
            phase: SessionPhase::Focus,
            remaining_seconds: settings.phase_seconds(SessionPhase::Focus),
            is_active: false,
            completed_focus_count: 0,
        }
    }

    /// Percentage of the current phase already elapsed (0-100).
    pub fn progress_percent(&self, settings: &TimerSettings) -> f64 {
        let total = settings.phase_seconds(self.phase);
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.remaining_seconds);
        f64::from(elapsed) / f64::from(total) * 100.0
    }

    /// Number of started long-break cycles.
    pub fn cycles(&self, settings: &TimerSettings) -> u32 {
        self.completed_focus_count
            .div_ceil(settings.sessions_until_long_break.max(1))
    }
}

// ============================================================================
// Study Sessions
// ============================================================================

/// Identifier of a stored study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generates a fresh random identifier.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque user identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A study session record held by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: SessionId,
    pub user_id: Option<UserId>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Minutes accumulated; never decreases while the session is open
    pub duration_min: u32,
    #[serde(rename = "type")]
    pub kind: SessionPhase,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudySession {
    /// Creates an empty session starting at `start_time`.
    pub fn open(user_id: Option<UserId>, start_time: DateTime<Utc>, kind: SessionPhase) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new_v4(),
            user_id,
            start_time,
            end_time: None,
            duration_min: 0,
            kind,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Adds one minute and moves `end_time` to now.
    pub fn record_minute(&mut self) {
        let now = Utc::now();
        self.duration_min += 1;
        self.end_time = Some(now);
        self.updated_at = now;
    }

    /// Returns true if the session belongs to `user`.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.user_id.as_ref() == Some(user)
    }
}

// ============================================================================
// IPC Types
// ============================================================================

/// Optional field edits for the settings command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsParams {
    #[serde(rename = "workMinutes", skip_serializing_if = "Option::is_none")]
    pub work_minutes: Option<i64>,
    #[serde(rename = "breakMinutes", skip_serializing_if = "Option::is_none")]
    pub break_minutes: Option<i64>,
    #[serde(rename = "longBreakMinutes", skip_serializing_if = "Option::is_none")]
    pub long_break_minutes: Option<i64>,
    #[serde(
        rename = "sessionsUntilLongBreak",
        skip_serializing_if = "Option::is_none"
    )]
    pub sessions_until_long_break: Option<i64>,
}

impl SettingsParams {
    /// Returns the requested edits in field order.
    pub fn edits(&self) -> Vec<(SettingsField, i64)> {
        [
            (SettingsField::WorkMinutes, self.work_minutes),
            (SettingsField::BreakMinutes, self.break_minutes),
            (SettingsField::LongBreakMinutes, self.long_break_minutes),
            (
                SettingsField::SessionsUntilLongBreak,
                self.sessions_until_long_break,
            ),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }

    /// Returns true if no field is edited.
    pub fn is_empty(&self) -> bool {
        self.edits().is_empty()
    }
}

/// IPC request from client to daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum IpcRequest {
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Start if inactive, pause if active
    Toggle,
    /// Reset the countdown to a fresh focus phase
    Reset,
    /// Query the current status
    Status,
    /// Show or edit the timer settings
    Settings {
        #[serde(flatten)]
        params: SettingsParams,
    },
    /// Query study statistics
    Stats,
    /// Delete every stored session of the user
    Purge,
}

/// Response data for IPC responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseData {
    /// Current phase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Remaining seconds
    #[serde(rename = "remainingSeconds", skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u32>,
    /// Whether the countdown is running
    #[serde(rename = "isActive", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Completed focus phases
    #[serde(
        rename = "completedFocusCount",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_focus_count: Option<u32>,
    /// Started long-break cycles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles: Option<u32>,
    /// Elapsed share of the current phase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Active timer settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<TimerSettings>,
    /// Running study total; absent while loading or unavailable
    #[serde(rename = "totalMinutes", skip_serializing_if = "Option::is_none")]
    pub total_minutes: Option<u64>,
    /// True until the first total has been fetched
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub loading: bool,
    /// Study statistics, for the stats command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StudyStats>,
    /// Latest persistence notice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl ResponseData {
    /// Creates response data from timer state.
    pub fn from_timer_state(state: &TimerState, settings: &TimerSettings) -> Self {
        Self {
            phase: Some(state.phase.as_str().to_string()),
            remaining_seconds: Some(state.remaining_seconds),
            is_active: Some(state.is_active),
            completed_focus_count: Some(state.completed_focus_count),
            cycles: Some(state.cycles(settings)),
            progress: Some(state.progress_percent(settings)),
            settings: Some(*settings),
            ..Self::default()
        }
    }
}

/// IPC response from daemon to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcResponse {
    /// Response status ("success" or "error")
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Optional response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(message: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }

    /// Returns true for an error response.
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // SessionPhase Tests
    // ------------------------------------------------------------------------

    mod session_phase_tests {
        use super::*;

        #[test]
        fn test_default_is_focus() {
            assert_eq!(SessionPhase::default(), SessionPhase::Focus);
        }

        #[test]
        fn test_as_str() {
            assert_eq!(SessionPhase::Focus.as_str(), "focus");
            assert_eq!(SessionPhase::Break.as_str(), "break");
            assert_eq!(SessionPhase::LongBreak.as_str(), "long_break");
        }

        #[test]
        fn test_only_focus_counts() {
            assert!(SessionPhase::Focus.counts_toward_study());
            assert!(!SessionPhase::Break.counts_toward_study());
            assert!(!SessionPhase::LongBreak.counts_toward_study());
            assert!(SessionPhase::LongBreak.is_break());
        }

        #[test]
        fn test_serialize_deserialize() {
            let json = serde_json::to_string(&SessionPhase::LongBreak).unwrap();
            assert_eq!(json, "\"long_break\"");

            let deserialized: SessionPhase = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, SessionPhase::LongBreak);
        }
    }

    // ------------------------------------------------------------------------
    // TimerSettings Tests
    // ------------------------------------------------------------------------

    mod timer_settings_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let settings = TimerSettings::default();
            assert_eq!(settings.work_minutes, 25);
            assert_eq!(settings.break_minutes, 5);
            assert_eq!(settings.long_break_minutes, 15);
            assert_eq!(settings.sessions_until_long_break, 4);
            assert!(settings.validate().is_ok());
        }

        #[test]
        fn test_builder_pattern() {
            let settings = TimerSettings::default()
                .with_work_minutes(30)
                .with_break_minutes(10)
                .with_long_break_minutes(20)
                .with_sessions_until_long_break(3);

            assert_eq!(settings.work_minutes, 30);
            assert_eq!(settings.break_minutes, 10);
            assert_eq!(settings.long_break_minutes, 20);
            assert_eq!(settings.sessions_until_long_break, 3);
        }

        #[test]
        fn test_phase_seconds() {
            let settings = TimerSettings::default();
            assert_eq!(settings.phase_seconds(SessionPhase::Focus), 1500);
            assert_eq!(settings.phase_seconds(SessionPhase::Break), 300);
            assert_eq!(settings.phase_seconds(SessionPhase::LongBreak), 900);
        }

        #[test]
        fn test_validate_rejects_zero_duration() {
            let settings = TimerSettings::default().with_work_minutes(0);
            assert_eq!(
                settings.validate(),
                Err(ValidationError::OutOfRange {
                    field: SettingsField::WorkMinutes,
                    value: 0
                })
            );
        }

        #[test]
        fn test_validate_rejects_single_session_cycle() {
            let settings = TimerSettings::default().with_sessions_until_long_break(1);
            assert!(settings.validate().is_err());
        }

        #[test]
        fn test_validate_rejects_above_maximum() {
            let settings = TimerSettings::default().with_break_minutes(31);
            assert_eq!(
                settings.validate(),
                Err(ValidationError::OutOfRange {
                    field: SettingsField::BreakMinutes,
                    value: 31
                })
            );
        }

        #[test]
        fn test_edit_within_bounds() {
            let settings = TimerSettings::default()
                .with_edit(SettingsField::WorkMinutes, 45)
                .unwrap();
            assert_eq!(settings.work_minutes, 45);
        }

        #[test]
        fn test_edit_clamps_above_max() {
            let settings = TimerSettings::default()
                .with_edit(SettingsField::BreakMinutes, 500)
                .unwrap();
            assert_eq!(settings.break_minutes, 30);
        }

        #[test]
        fn test_edit_clamps_cycle_length_up() {
            let settings = TimerSettings::default()
                .with_edit(SettingsField::SessionsUntilLongBreak, 1)
                .unwrap();
            assert_eq!(settings.sessions_until_long_break, 2);
        }

        #[test]
        fn test_edit_rejects_zero_and_negative() {
            for raw in [0, -1, -60] {
                let result = TimerSettings::default().with_edit(SettingsField::WorkMinutes, raw);
                assert_eq!(
                    result,
                    Err(ValidationError::NotPositive {
                        field: SettingsField::WorkMinutes,
                        value: raw
                    })
                );
            }
        }

        #[test]
        fn test_sanitized_restores_defaults() {
            let broken = TimerSettings {
                work_minutes: 0,
                break_minutes: 100,
                long_break_minutes: 10,
                sessions_until_long_break: 0,
            };
            let fixed = broken.sanitized();
            assert_eq!(fixed.work_minutes, 25);
            assert_eq!(fixed.break_minutes, 30);
            assert_eq!(fixed.long_break_minutes, 10);
            assert_eq!(fixed.sessions_until_long_break, 4);
            assert!(fixed.validate().is_ok());
        }

        #[test]
        fn test_serialize_deserialize() {
            let settings = TimerSettings::default().with_work_minutes(50);
            let json = serde_json::to_string(&settings).unwrap();
            assert!(json.contains("\"work_minutes\":50"));

            let deserialized: TimerSettings = serde_json::from_str(&json).unwrap();
            assert_eq!(settings, deserialized);
        }
    }

    // ------------------------------------------------------------------------
    // TimerState Tests
    // ------------------------------------------------------------------------

    mod timer_state_tests {
        use super::*;

        #[test]
        fn test_new_state() {
            let settings = TimerSettings::default();
            let state = TimerState::new(&settings);

            assert_eq!(state.phase, SessionPhase::Focus);
            assert_eq!(state.remaining_seconds, 25 * 60);
            assert!(!state.is_active);
            assert_eq!(state.completed_focus_count, 0);
        }

        #[test]
        fn test_progress_percent() {
            let settings = TimerSettings::default().with_work_minutes(10);
            let mut state = TimerState::new(&settings);
            assert_eq!(state.progress_percent(&settings), 0.0);

            state.remaining_seconds = 300;
            assert_eq!(state.progress_percent(&settings), 50.0);

            state.remaining_seconds = 0;
            assert_eq!(state.progress_percent(&settings), 100.0);
        }

        #[test]
        fn test_cycles_round_up() {
            let settings = TimerSettings::default();
            let mut state = TimerState::new(&settings);
            assert_eq!(state.cycles(&settings), 0);

            state.completed_focus_count = 1;
            assert_eq!(state.cycles(&settings), 1);

            state.completed_focus_count = 4;
            assert_eq!(state.cycles(&settings), 1);

            state.completed_focus_count = 5;
            assert_eq!(state.cycles(&settings), 2);
        }
    }

    // ------------------------------------------------------------------------
    // StudySession Tests
    // ------------------------------------------------------------------------

    mod study_session_tests {
        use super::*;

        #[test]
        fn test_open_session() {
            let user = UserId::new("user_1");
            let session = StudySession::open(Some(user.clone()), Utc::now(), SessionPhase::Focus);

            assert_eq!(session.duration_min, 0);
            assert!(session.end_time.is_none());
            assert!(!session.completed);
            assert!(session.is_owned_by(&user));
            assert!(!session.is_owned_by(&UserId::new("someone_else")));
        }

        #[test]
        fn test_record_minute() {
            let mut session = StudySession::open(None, Utc::now(), SessionPhase::Focus);
            session.record_minute();
            session.record_minute();

            assert_eq!(session.duration_min, 2);
            assert!(session.end_time.is_some());
        }

        #[test]
        fn test_serialize_uses_record_names() {
            let session = StudySession::open(None, Utc::now(), SessionPhase::Focus);
            let json = serde_json::to_string(&session).unwrap();

            assert!(json.contains("\"durationMin\":0"));
            assert!(json.contains("\"type\":\"focus\""));
            assert!(json.contains("\"userId\":null"));
        }
    }

    // ------------------------------------------------------------------------
    // IPC Types Tests
    // ------------------------------------------------------------------------

    mod ipc_tests {
        use super::*;

        #[test]
        fn test_settings_params_edits() {
            let params = SettingsParams {
                work_minutes: Some(30),
                sessions_until_long_break: Some(3),
                ..Default::default()
            };
            assert_eq!(
                params.edits(),
                vec![
                    (SettingsField::WorkMinutes, 30),
                    (SettingsField::SessionsUntilLongBreak, 3)
                ]
            );
            assert!(!params.is_empty());
            assert!(SettingsParams::default().is_empty());
        }

        #[test]
        fn test_ipc_request_settings_serialize() {
            let request = IpcRequest::Settings {
                params: SettingsParams {
                    work_minutes: Some(30),
                    ..Default::default()
                },
            };

            let json = serde_json::to_string(&request).unwrap();
            assert!(json.contains("\"command\":\"settings\""));
            assert!(json.contains("\"workMinutes\":30"));
            assert!(!json.contains("breakMinutes"));
        }

        #[test]
        fn test_ipc_request_settings_deserialize() {
            let json = r#"{"command":"settings","breakMinutes":-3}"#;
            let request: IpcRequest = serde_json::from_str(json).unwrap();

            match request {
                IpcRequest::Settings { params } => {
                    assert_eq!(params.break_minutes, Some(-3));
                    assert!(params.work_minutes.is_none());
                }
                _ => panic!("Expected Settings request"),
            }
        }

        #[test]
        fn test_ipc_request_all_commands() {
            let commands = vec![
                r#"{"command":"start"}"#,
                r#"{"command":"pause"}"#,
                r#"{"command":"toggle"}"#,
                r#"{"command":"reset"}"#,
                r#"{"command":"status"}"#,
                r#"{"command":"settings"}"#,
                r#"{"command":"stats"}"#,
                r#"{"command":"purge"}"#,
            ];

            for json in commands {
                let request: Result<IpcRequest, _> = serde_json::from_str(json);
                assert!(request.is_ok(), "Failed to parse {}", json);
            }
        }

        #[test]
        fn test_response_data_from_timer_state() {
            let settings = TimerSettings::default();
            let mut state = TimerState::new(&settings);
            state.remaining_seconds = 1200;
            state.completed_focus_count = 3;
            state.is_active = true;

            let data = ResponseData::from_timer_state(&state, &settings);

            assert_eq!(data.phase, Some("focus".to_string()));
            assert_eq!(data.remaining_seconds, Some(1200));
            assert_eq!(data.is_active, Some(true));
            assert_eq!(data.completed_focus_count, Some(3));
            assert_eq!(data.cycles, Some(1));
            assert_eq!(data.settings, Some(settings));
            assert!(data.total_minutes.is_none());
        }

        #[test]
        fn test_ipc_response_success() {
            let response = IpcResponse::success("OK", None);
            assert_eq!(response.status, "success");
            assert!(!response.is_error());
        }

        #[test]
        fn test_ipc_response_error() {
            let response = IpcResponse::error("failure");
            assert_eq!(response.status, "error");
            assert_eq!(response.message, "failure");
            assert!(response.is_error());
            assert!(response.data.is_none());
        }

        #[test]
        fn test_ipc_response_serialize_skips_empty_fields() {
            let response = IpcResponse::success(
                "OK",
                Some(ResponseData {
                    total_minutes: Some(42),
                    ..Default::default()
                }),
            );

            let json = serde_json::to_string(&response).unwrap();
            assert!(json.contains("\"totalMinutes\":42"));
            assert!(!json.contains("loading"));
            assert!(!json.contains("notice"));
        }

        #[test]
        fn test_ipc_response_deserialize() {
            let json = r#"{"status":"success","message":"OK","data":{"phase":"break","remainingSeconds":300,"loading":true}}"#;
            let response: IpcResponse = serde_json::from_str(json).unwrap();

            let data = response.data.unwrap();
            assert_eq!(data.phase, Some("break".to_string()));
            assert_eq!(data.remaining_seconds, Some(300));
            assert!(data.loading);
        }
    }
}
