//! Timer engine for the study timer.
//!
//! This module provides the Pomodoro state machine:
//! - Phase transitions (Focus → Break/LongBreak → Focus)
//! - One-second countdown steps driven by an external tick source
//! - Minute-boundary detection during focus phases
//! - Event firing for session accounting and logging
//!
//! The engine never chains phases: when a phase runs out it switches to
//! the next phase and pauses, so every phase begins with an explicit start.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::types::{SessionPhase, TimerSettings, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for session accounting and external integrations.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// Countdown started or resumed
    Started {
        /// Phase being counted down
        phase: SessionPhase,
        /// Remaining seconds at start
        remaining_seconds: u32,
        /// Wall-clock start instant
        started_at: DateTime<Utc>,
    },
    /// Countdown paused by the user
    Paused {
        /// Remaining seconds at pause
        remaining_seconds: u32,
    },
    /// Timer reset to a fresh focus phase
    Reset,
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// A whole focus minute elapsed
    MinuteCompleted {
        /// Remaining seconds in the focus phase
        remaining_seconds: u32,
    },
    /// A phase ran to zero; the timer is now paused in `next`
    PhaseCompleted {
        /// Phase that expired
        completed: SessionPhase,
        /// Phase entered
        next: SessionPhase,
        /// Completed focus phases so far
        completed_focus_count: u32,
    },
    /// Settings were replaced
    SettingsChanged {
        /// New settings
        settings: TimerSettings,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Pomodoro state machine.
///
/// Every input (start, pause, reset, tick, settings change) is applied
/// synchronously; side effects leave through the event channel.
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// Active settings
    settings: TimerSettings,
    /// Start instant of the current run
    started_at: Option<DateTime<Utc>>,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a new engine in its initial state.
    pub fn new(settings: TimerSettings, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            state: TimerState::new(&settings),
            settings,
            started_at: None,
            event_tx,
        }
    }

    /// Starts the countdown. Does nothing if already active.
    pub fn start(&mut self) -> Result<()> {
        if self.state.is_active {
            tracing::debug!("start ignored: timer already active");
            return Ok(());
        }

        let started_at = Utc::now();
        self.state.is_active = true;
        self.started_at = Some(started_at);
        tracing::info!(
            phase = %self.state.phase,
            remaining = self.state.remaining_seconds,
            "timer started"
        );

        self.send(
            TimerEvent::Started {
                phase: self.state.phase,
                remaining_seconds: self.state.remaining_seconds,
                started_at,
            },
            "Failed to send started event",
        )
    }

    /// Pauses the countdown, keeping the remaining time.
    pub fn pause(&mut self) -> Result<()> {
        if !self.state.is_active {
            tracing::debug!("pause ignored: timer not active");
            return Ok(());
        }

        self.state.is_active = false;
        tracing::info!(remaining = self.state.remaining_seconds, "timer paused");

        self.send(
            TimerEvent::Paused {
                remaining_seconds: self.state.remaining_seconds,
            },
            "Failed to send paused event",
        )
    }

    /// Starts when inactive, pauses when active.
    pub fn toggle(&mut self) -> Result<()> {
        if self.state.is_active {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Returns to an inactive, full-length focus phase.
    ///
    /// The completed focus count survives a reset.
    pub fn reset(&mut self) -> Result<()> {
        self.state.is_active = false;
        self.state.phase = SessionPhase::Focus;
        self.state.remaining_seconds = self.settings.phase_seconds(SessionPhase::Focus);
        self.started_at = None;
        tracing::info!(remaining = self.state.remaining_seconds, "timer reset");

        self.send(TimerEvent::Reset, "Failed to send reset event")
    }

    /// Advances the countdown by one second.
    ///
    /// Ignored while inactive or at zero.
    pub fn tick(&mut self) -> Result<()> {
        if !self.state.is_active || self.state.remaining_seconds == 0 {
            return Ok(());
        }

        let previous = self.state.remaining_seconds;
        self.state.remaining_seconds -= 1;
        let remaining = self.state.remaining_seconds;
        let minute_completed =
            self.state.phase.counts_toward_study() && crosses_minute_boundary(previous, remaining);

        // State first: a closed channel must not leave the engine active at zero.
        let phase_completed = (remaining == 0).then(|| self.complete_phase());

        self.send(
            TimerEvent::Tick {
                remaining_seconds: remaining,
            },
            "Failed to send tick event",
        )?;

        if minute_completed {
            tracing::debug!(remaining, "focus minute completed");
            self.send(
                TimerEvent::MinuteCompleted {
                    remaining_seconds: remaining,
                },
                "Failed to send minute completed event",
            )?;
        }

        if let Some(event) = phase_completed {
            self.send(event, "Failed to send phase completed event")?;
        }

        Ok(())
    }

    /// Phase expiry: transition, then auto-pause. Returns the event to publish.
    fn complete_phase(&mut self) -> TimerEvent {
        let completed = self.state.phase;
        let next = match completed {
            SessionPhase::Focus => {
                self.state.completed_focus_count += 1;
                if self.state.completed_focus_count % self.settings.sessions_until_long_break == 0
                {
                    SessionPhase::LongBreak
                } else {
                    SessionPhase::Break
                }
            }
            SessionPhase::Break | SessionPhase::LongBreak => SessionPhase::Focus,
        };

        self.state.phase = next;
        self.state.remaining_seconds = self.settings.phase_seconds(next);
        self.state.is_active = false;
        self.started_at = None;
        tracing::info!(
            %completed,
            %next,
            completed_focus_count = self.state.completed_focus_count,
            "phase completed"
        );

        TimerEvent::PhaseCompleted {
            completed,
            next,
            completed_focus_count: self.state.completed_focus_count,
        }
    }

    /// Replaces the settings.
    ///
    /// While inactive the countdown returns to a full focus phase with the
    /// new duration; while active the running countdown is untouched and the
    /// new durations apply from the next phase entry.
    pub fn apply_settings(&mut self, settings: TimerSettings) -> Result<()> {
        self.settings = settings;
        if !self.state.is_active {
            self.state.phase = SessionPhase::Focus;
            self.state.remaining_seconds = settings.phase_seconds(SessionPhase::Focus);
        }

        self.send(
            TimerEvent::SettingsChanged { settings },
            "Failed to send settings changed event",
        )
    }

    /// Returns a reference to the current timer state.
    pub fn get_state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the active settings.
    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// Returns true if the countdown is running.
    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    /// Start instant of the current run, if running.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub fn get_state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }

    fn send(&self, event: TimerEvent, context: &'static str) -> Result<()> {
        self.event_tx.send(event).context(context)
    }
}

/// True when a one-second step lands on a whole minute.
///
/// Counting completed minutes (60 → 0, 120 → 60, ...) rather than started
/// ones keeps the number of events equal to `floor(elapsed / 60)`.
fn crosses_minute_boundary(previous: u32, remaining: u32) -> bool {
    previous.div_ceil(60) > remaining.div_ceil(60)
}

// ============================================================================
// Tests
// ============================================================================
