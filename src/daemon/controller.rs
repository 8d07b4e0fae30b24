//! Timer controller.
//!
//! Couples the timer engine with its tick source and the settings store.
//! The controller is the only writer of timer state: the tick loop and
//! the IPC handler both reach it through one `tokio::sync::Mutex`.

use anyhow::Result;
use tokio::sync::mpsc;

use crate::settings::SettingsStore;
use crate::types::{SettingsParams, TimerSettings, TimerState};

use super::ticker::{Tick, TickSource};
use super::timer::{TimerEngine, TimerEvent};

/// Owns the engine, the tick source and the settings store.
pub struct TimerController {
    engine: TimerEngine,
    ticker: TickSource,
    settings: SettingsStore,
}

impl TimerController {
    /// Creates a controller using the stored settings.
    pub fn new(
        settings: SettingsStore,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
        tick_tx: mpsc::UnboundedSender<Tick>,
    ) -> Self {
        Self::with_ticker(settings, event_tx, TickSource::new(tick_tx))
    }

    /// Creates a controller driven by a custom tick source.
    pub fn with_ticker(
        settings: SettingsStore,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
        ticker: TickSource,
    ) -> Self {
        Self {
            engine: TimerEngine::new(settings.settings(), event_tx),
            ticker,
            settings,
        }
    }

    /// Starts the countdown and the tick source.
    pub fn start(&mut self) -> Result<()> {
        self.engine.start()?;
        if self.engine.is_active() {
            self.ticker.start();
        }
        Ok(())
    }

    /// Pauses the countdown. No tick is applied after this returns.
    pub fn pause(&mut self) -> Result<()> {
        self.ticker.stop();
        self.engine.pause()
    }

    /// Start/Pause button.
    pub fn toggle(&mut self) -> Result<()> {
        if self.engine.is_active() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Returns to a fresh focus phase.
    pub fn reset(&mut self) -> Result<()> {
        self.ticker.stop();
        self.engine.reset()
    }

    /// Applies a tick from the tick source.
    ///
    /// Ticks from a stopped run are ignored. When the tick ends a phase
    /// the engine pauses itself and the tick source is stopped.
    pub fn on_tick(&mut self, tick: Tick) -> Result<()> {
        if !self.ticker.accepts(&tick) {
            tracing::debug!(?tick, current = self.ticker.generation(), "stale tick ignored");
            return Ok(());
        }

        self.engine.tick()?;
        if !self.engine.is_active() {
            self.ticker.stop();
        }
        Ok(())
    }

    /// Applies settings edits, persists them and hands them to the engine.
    pub fn update_settings(&mut self, params: &SettingsParams) -> Result<TimerSettings> {
        let updated = self.settings.edit(&params.edits())?;
        if updated != *self.engine.settings() {
            self.engine.apply_settings(updated)?;
        }
        Ok(updated)
    }

    pub fn state(&self) -> &TimerState {
        self.engine.get_state()
    }

    pub fn settings(&self) -> &TimerSettings {
        self.engine.settings()
    }

    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }

    /// Returns true while the tick source is delivering ticks.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }
}

// ============================================================================
// Tests
// ============================================================================
