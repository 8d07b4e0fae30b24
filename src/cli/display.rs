//! Display utilities for the study timer CLI.
//!
//! This module provides formatted output for:
//! - Timer control results
//! - Status, settings and statistics views
//! - Error messages and persistence notices

use std::fmt::Write as _;

use crate::types::{IpcResponse, ResponseData};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the result of start, pause, toggle or reset.
    pub fn show_timer_result(response: &IpcResponse) {
        print!("{}", Self::render_timer_result(response));
    }

    /// Shows the current timer status.
    pub fn show_status(response: &IpcResponse) {
        print!("{}", Self::render_status(response));
    }

    /// Shows the timer settings.
    pub fn show_settings(response: &IpcResponse) {
        print!("{}", Self::render_settings(response));
    }

    /// Shows the study statistics.
    pub fn show_stats(response: &IpcResponse) {
        print!("{}", Self::render_stats(response));
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    fn render_timer_result(response: &IpcResponse) -> String {
        let mut out = String::new();
        if !response.message.is_empty() {
            let _ = writeln!(out, "* {}", response.message);
        }

        if let Some(data) = &response.data {
            if let Some(phase) = &data.phase {
                let _ = writeln!(out, "  フェーズ: {}", Self::phase_label(phase));
            }
            if let Some(remaining) = data.remaining_seconds {
                let (minutes, seconds) = Self::format_time(remaining);
                let _ = writeln!(out, "  残り時間: {}:{:02}", minutes, seconds);
            }
            Self::render_notice(&mut out, data);
        }
        out
    }

    fn render_status(response: &IpcResponse) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "ポモドーロタイマー ステータス");
        let _ = writeln!(out, "─────────────────────────────");

        let Some(data) = &response.data else {
            let _ = writeln!(out, "タイマーは起動していません");
            return out;
        };

        let active = data.is_active.unwrap_or(false);
        let _ = writeln!(out, "状態: {}", if active { "実行中" } else { "一時停止中" });
        if let Some(phase) = &data.phase {
            let _ = writeln!(out, "フェーズ: {}", Self::phase_label(phase));
        }
        if let Some(remaining) = data.remaining_seconds {
            let (minutes, seconds) = Self::format_time(remaining);
            let _ = writeln!(out, "残り時間: {}:{:02}", minutes, seconds);
        }
        if let Some(progress) = data.progress {
            let _ = writeln!(out, "進捗: {:.0}%", progress);
        }
        if let Some(count) = data.completed_focus_count {
            let cycles = data.cycles.unwrap_or(0);
            let _ = writeln!(out, "完了ポモドーロ: {} (サイクル {})", count, cycles);
        }
        let _ = writeln!(out, "総学習時間: {}", Self::total_label(data));
        Self::render_notice(&mut out, data);
        out
    }

    fn render_settings(response: &IpcResponse) -> String {
        let mut out = String::new();
        if !response.message.is_empty() {
            let _ = writeln!(out, "* {}", response.message);
        }

        if let Some(settings) = response.data.as_ref().and_then(|d| d.settings) {
            let _ = writeln!(out, "作業時間: {}分", settings.work_minutes);
            let _ = writeln!(out, "休憩時間: {}分", settings.break_minutes);
            let _ = writeln!(out, "長い休憩: {}分", settings.long_break_minutes);
            let _ = writeln!(
                out,
                "長い休憩までのポモドーロ数: {}",
                settings.sessions_until_long_break
            );
        }
        out
    }

    fn render_stats(response: &IpcResponse) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "学習統計");
        let _ = writeln!(out, "─────────────────────────────");

        let Some(data) = &response.data else {
            return out;
        };

        match &data.stats {
            Some(stats) => {
                let _ = writeln!(out, "総学習時間: {}", stats.format_total());
                let _ = writeln!(
                    out,
                    "週間目標: {}h / {}h ({:.0}%)",
                    stats.hours,
                    stats.weekly_goal_minutes / 60,
                    stats.weekly_progress
                );
                let _ = writeln!(out, "ポモドーロ: {}", stats.pomodoros);
            }
            None => {
                let _ = writeln!(out, "総学習時間: {}", Self::total_label(data));
            }
        }
        Self::render_notice(&mut out, data);
        out
    }

    fn render_notice(out: &mut String, data: &ResponseData) {
        if let Some(notice) = &data.notice {
            let _ = writeln!(out, "! {}", notice);
        }
    }

    fn total_label(data: &ResponseData) -> String {
        match data.total_minutes {
            Some(minutes) => format!("{}分", minutes),
            None if data.loading => "読み込み中...".to_string(),
            None => "取得できません".to_string(),
        }
    }

    fn phase_label(phase: &str) -> &str {
        match phase {
            "focus" => "集中",
            "break" => "休憩",
            "long_break" => "長い休憩",
            other => other,
        }
    }

    /// Formats remaining seconds as (minutes, seconds).
    fn format_time(total_seconds: u32) -> (u32, u32) {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        (minutes, seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================
