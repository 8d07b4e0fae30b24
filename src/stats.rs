//! Study statistics derived from the running total.

use serde::{Deserialize, Serialize};

/// Weekly study goal in minutes (10 hours).
pub const WEEKLY_GOAL_MINUTES: u64 = 600;

/// Minutes credited per pomodoro.
pub const POMODORO_MINUTES: u64 = 25;

/// Progress figures for the study statistics view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    pub total_minutes: u64,
    pub hours: u64,
    pub minutes: u64,
    pub weekly_goal_minutes: u64,
    /// Share of the weekly goal, capped at 100
    pub weekly_progress: f64,
    pub pomodoros: u64,
}

impl StudyStats {
    pub fn from_total_minutes(total_minutes: u64) -> Self {
        let weekly_progress =
            (total_minutes as f64 / WEEKLY_GOAL_MINUTES as f64 * 100.0).min(100.0);

        Self {
            total_minutes,
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
            weekly_goal_minutes: WEEKLY_GOAL_MINUTES,
            weekly_progress,
            pomodoros: total_minutes / POMODORO_MINUTES,
        }
    }

    /// Total formatted as "1h 5m", or "5m" under an hour.
    pub fn format_total(&self) -> String {
        if self.hours > 0 {
            format!("{}h {}m", self.hours, self.minutes)
        } else {
            format!("{}m", self.minutes)
        }
    }
}
