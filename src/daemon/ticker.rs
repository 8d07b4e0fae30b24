//! One-second tick source.
//!
//! A cancelable repeating timer driving the countdown. At most one tick
//! task exists at a time; `start` on a running source is a no-op and
//! `stop` cancels delivery immediately. Every run carries a generation
//! number so ticks already queued when the source stopped can be told
//! apart from live ones.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

/// Default tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A single tick delivered by [`TickSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Run that produced this tick
    pub generation: u64,
}

/// Cancelable, single-flight repeating timer.
pub struct TickSource {
    period: Duration,
    tick_tx: mpsc::UnboundedSender<Tick>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl TickSource {
    /// Creates a stopped tick source with a one-second period.
    pub fn new(tick_tx: mpsc::UnboundedSender<Tick>) -> Self {
        Self::with_period(tick_tx, TICK_PERIOD)
    }

    /// Creates a stopped tick source with a custom period.
    pub fn with_period(tick_tx: mpsc::UnboundedSender<Tick>, period: Duration) -> Self {
        Self {
            period,
            tick_tx,
            handle: None,
            generation: 0,
        }
    }

    /// Starts delivering ticks, one period from now.
    ///
    /// Must be called inside a tokio runtime. Does nothing if running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let period = self.period;
        let tick_tx = self.tick_tx.clone();

        self.handle = Some(tokio::spawn(async move {
            // The tokio clock is monotonic; bursting missed ticks keeps the
            // countdown in step with real time after a scheduler stall.
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

            loop {
                ticker.tick().await;
                if tick_tx.send(Tick { generation }).is_err() {
                    tracing::debug!(generation, "tick receiver dropped; stopping tick source");
                    break;
                }
            }
        }));
        tracing::debug!(generation, "tick source started");
    }

    /// Stops delivering ticks. Queued ticks from the stopped run are
    /// rejected by [`TickSource::accepts`].
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(generation = self.generation, "tick source stopped");
        }
        self.generation += 1;
    }

    /// Returns true while a tick task is alive.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Returns true if `tick` belongs to the current run.
    pub fn accepts(&self, tick: &Tick) -> bool {
        self.is_running() && tick.generation == self.generation
    }

    /// Current generation number.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TickSource {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
