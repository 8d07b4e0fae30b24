//! Session accounting bridge.
//!
//! Translates timer events into session-store calls. The calls run on a
//! dedicated worker task fed by an ordered queue:
//! - Increments are issued in minute-boundary order
//! - The tick path never waits on the store
//! - A handle cleared by a later command cannot be brought back by the
//!   result of an earlier one
//!
//! The worker owns the session handle and the running total and publishes
//! both through a watch channel.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use super::error::{Notice, StoreError};
use super::store::SessionStore;
use crate::daemon::timer::TimerEvent;
use crate::types::{SessionId, SessionPhase, UserId};

// ============================================================================
// Snapshot
// ============================================================================

/// Lifetime study total as known to the bridge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunningTotal {
    /// Initial fetch pending
    #[default]
    Loading,
    /// Authoritative total in minutes
    Loaded(u64),
    /// Fetch failed or no user; never shown as a number
    Unavailable,
}

impl RunningTotal {
    /// Minutes, when known.
    pub fn minutes(&self) -> Option<u64> {
        match self {
            Self::Loaded(minutes) => Some(*minutes),
            Self::Loading | Self::Unavailable => None,
        }
    }

    /// True until the first fetch finished.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    fn advance(&mut self) {
        if let Self::Loaded(minutes) = self {
            *minutes += 1;
        }
    }
}

/// State published by the accounting worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountingSnapshot {
    /// Running total
    pub total: RunningTotal,
    /// Open session, if any
    pub session: Option<SessionId>,
    /// Latest unacknowledged notice
    pub notice: Option<Notice>,
    /// Minutes that could not be recorded
    pub dropped_increments: u64,
}

// ============================================================================
// Commands
// ============================================================================

#[derive(Debug)]
enum AccountingCommand {
    Load,
    OpenSession { started_at: DateTime<Utc> },
    MinuteCompleted,
    CloseSession,
    Purge {
        reply: Option<oneshot::Sender<Result<(), Notice>>>,
    },
    AcknowledgeNotice(Notice),
    Settle(oneshot::Sender<()>),
}

// ============================================================================
// AccountingBridge
// ============================================================================

/// Handle to the accounting worker.
///
/// Every method only enqueues; only [`AccountingBridge::settle`] and
/// [`AccountingBridge::purge_and_wait`] wait on the worker.
#[derive(Debug, Clone)]
pub struct AccountingBridge {
    command_tx: mpsc::UnboundedSender<AccountingCommand>,
    snapshot_rx: watch::Receiver<AccountingSnapshot>,
}

impl AccountingBridge {
    /// Spawns the worker and queues the initial total fetch.
    pub fn spawn<S: SessionStore>(store: Arc<S>, user: Option<UserId>) -> (Self, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(AccountingSnapshot::default());

        let worker = AccountingWorker {
            store,
            user,
            session: None,
            snapshot: AccountingSnapshot::default(),
            snapshot_tx,
        };
        let handle = tokio::spawn(worker.run(command_rx));

        let bridge = Self {
            command_tx,
            snapshot_rx,
        };
        bridge.enqueue(AccountingCommand::Load);
        (bridge, handle)
    }

    /// Maps a timer event onto accounting commands.
    pub fn handle_event(&self, event: &TimerEvent) {
        match event {
            TimerEvent::Started {
                phase: SessionPhase::Focus,
                started_at,
                ..
            } => self.open_session(*started_at),
            TimerEvent::MinuteCompleted { .. } => self.minute_completed(),
            TimerEvent::Paused { .. } | TimerEvent::Reset | TimerEvent::PhaseCompleted { .. } => {
                self.close_session()
            }
            TimerEvent::Started { .. }
            | TimerEvent::Tick { .. }
            | TimerEvent::SettingsChanged { .. } => {}
        }
    }

    /// Opens a session for a focus run started at `started_at`.
    pub fn open_session(&self, started_at: DateTime<Utc>) {
        self.enqueue(AccountingCommand::OpenSession { started_at });
    }

    /// Records one focus minute.
    pub fn minute_completed(&self) {
        self.enqueue(AccountingCommand::MinuteCompleted);
    }

    /// Discards the session handle without closing it server-side.
    pub fn close_session(&self) {
        self.enqueue(AccountingCommand::CloseSession);
    }

    /// Deletes every session of the user and reloads the total.
    ///
    /// A failure is published as the snapshot notice.
    pub fn purge(&self) {
        self.enqueue(AccountingCommand::Purge { reply: None });
    }

    /// Like [`AccountingBridge::purge`], but waits for the reloaded total and
    /// returns a failure to the caller instead of publishing it. Notices
    /// raised by other commands stay in the snapshot.
    pub async fn purge_and_wait(&self) -> Result<(), Notice> {
        let (tx, rx) = oneshot::channel();
        self.enqueue(AccountingCommand::Purge { reply: Some(tx) });
        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(Notice::from_error(
                PURGE_ACTION,
                &StoreError::persistence("accounting worker stopped"),
            )),
        }
    }

    /// Re-fetches the running total.
    pub fn reload(&self) {
        self.enqueue(AccountingCommand::Load);
    }

    /// Clears `notice` once it has been shown, unless a newer one
    /// replaced it meanwhile.
    pub fn acknowledge_notice(&self, notice: &Notice) {
        self.enqueue(AccountingCommand::AcknowledgeNotice(notice.clone()));
    }

    /// Waits until every command queued so far has been applied.
    pub async fn settle(&self) {
        let (tx, rx) = oneshot::channel();
        self.enqueue(AccountingCommand::Settle(tx));
        let _ = rx.await;
    }

    /// Latest published state.
    pub fn snapshot(&self) -> AccountingSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AccountingSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Feeds every event from `events` into the bridge until the channel
    /// closes.
    pub async fn forward_events(self, mut events: mpsc::UnboundedReceiver<TimerEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(&event);
        }
        tracing::debug!("timer event channel closed; accounting forwarder stopped");
    }

    fn enqueue(&self, command: AccountingCommand) {
        tracing::debug!(?command, "accounting command queued");
        if self.command_tx.send(command).is_err() {
            tracing::warn!("accounting worker stopped; command dropped");
        }
    }
}

// ============================================================================
// AccountingWorker
// ============================================================================

const PURGE_ACTION: &str = "学習記録の削除";

fn log_notice(action: &str, error: &StoreError) -> Notice {
    let notice = Notice::from_error(action, error);
    if notice.is_blocking() {
        tracing::warn!("{}", notice);
    } else {
        tracing::error!("{}", notice);
    }
    notice
}

struct AccountingWorker<S> {
    store: Arc<S>,
    user: Option<UserId>,
    session: Option<SessionId>,
    snapshot: AccountingSnapshot,
    snapshot_tx: watch::Sender<AccountingSnapshot>,
}

impl<S: SessionStore> AccountingWorker<S> {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<AccountingCommand>) {
        while let Some(command) = commands.recv().await {
            match command {
                AccountingCommand::Load => self.load().await,
                AccountingCommand::OpenSession { started_at } => {
                    self.open_session(started_at).await
                }
                AccountingCommand::MinuteCompleted => self.record_minute().await,
                AccountingCommand::CloseSession => self.close_session(),
                AccountingCommand::Purge { reply } => self.purge(reply).await,
                AccountingCommand::AcknowledgeNotice(notice) => {
                    if self.snapshot.notice.as_ref() == Some(&notice) {
                        self.snapshot.notice = None;
                    }
                }
                AccountingCommand::Settle(done) => {
                    let _ = done.send(());
                    continue;
                }
            }
            self.publish();
        }
        if let Some(id) = self.session.take() {
            tracing::info!(%id, "session handle discarded on shutdown");
        }
    }

    async fn load(&mut self) {
        let Some(user) = self.user.clone() else {
            self.snapshot.total = RunningTotal::Unavailable;
            self.report("学習時間の取得", &StoreError::Unauthenticated);
            return;
        };

        match self.store.get_total_minutes(&user).await {
            Ok(minutes) => {
                tracing::info!(%user, minutes, "study total loaded");
                self.snapshot.total = RunningTotal::Loaded(minutes);
            }
            Err(e) => {
                self.snapshot.total = RunningTotal::Unavailable;
                self.report("学習時間の取得", &e);
            }
        }
    }

    async fn open_session(&mut self, started_at: DateTime<Utc>) {
        if let Some(id) = self.session {
            tracing::debug!(%id, "session already open");
            return;
        }

        match self
            .store
            .create_session(self.user.clone(), started_at, SessionPhase::Focus)
            .await
        {
            Ok(id) => {
                tracing::info!(%id, %started_at, "study session opened");
                self.session = Some(id);
            }
            Err(e) => self.report("学習セッションの作成", &e),
        }
    }

    async fn record_minute(&mut self) {
        let Some(id) = self.session else {
            self.snapshot.dropped_increments += 1;
            tracing::warn!("no open session; focus minute dropped");
            return;
        };

        match self.store.increment_session(id).await {
            Ok(()) => {
                self.snapshot.total.advance();
                tracing::debug!(%id, total = ?self.snapshot.total, "focus minute recorded");
            }
            Err(StoreError::NotFound(_)) => {
                self.session = None;
                self.snapshot.dropped_increments += 1;
                tracing::warn!(%id, "session vanished; handle dropped and focus minute lost");
            }
            Err(e) => {
                self.snapshot.dropped_increments += 1;
                tracing::error!(%id, "failed to record focus minute: {}", e);
            }
        }
    }

    fn close_session(&mut self) {
        if let Some(id) = self.session.take() {
            tracing::info!(%id, "study session closed");
        }
    }

    async fn purge(&mut self, reply: Option<oneshot::Sender<Result<(), Notice>>>) {
        let purged = match self.user.clone() {
            Some(user) => self
                .store
                .purge_all_sessions(&user)
                .await
                .map(|removed| tracing::info!(%user, removed, "study sessions purged")),
            None => Err(StoreError::Unauthenticated),
        };

        let outcome = match purged {
            Ok(()) => {
                self.session = None;
                self.snapshot.total = RunningTotal::Loading;
                self.publish();
                self.load().await;
                Ok(())
            }
            Err(e) => Err(log_notice(PURGE_ACTION, &e)),
        };

        match reply {
            Some(reply) => {
                self.publish();
                let _ = reply.send(outcome);
            }
            None => {
                if let Err(notice) = outcome {
                    self.snapshot.notice = Some(notice);
                }
            }
        }
    }

    fn report(&mut self, action: &str, error: &StoreError) {
        self.snapshot.notice = Some(log_notice(action, error));
    }

    fn publish(&mut self) {
        self.snapshot.session = self.session;
        self.snapshot_tx.send_replace(self.snapshot.clone());
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::InMemorySessionStore;
    use crate::accounting::NoticeLevel;

    fn user() -> UserId {
        UserId::new("user_1")
    }

    fn spawn_bridge(
        user: Option<UserId>,
    ) -> (AccountingBridge, Arc<InMemorySessionStore>, JoinHandle<()>) {
        let store = Arc::new(InMemorySessionStore::new());
        let (bridge, handle) = AccountingBridge::spawn(store.clone(), user);
        (bridge, store, handle)
    }

    fn focus_started() -> TimerEvent {
        TimerEvent::Started {
            phase: SessionPhase::Focus,
            remaining_seconds: 1500,
            started_at: Utc::now(),
        }
    }

    fn minute() -> TimerEvent {
        TimerEvent::MinuteCompleted {
            remaining_seconds: 1440,
        }
    }

    mod running_total_tests {
        use super::*;

        #[test]
        fn test_minutes_only_when_loaded() {
            assert_eq!(RunningTotal::Loading.minutes(), None);
            assert_eq!(RunningTotal::Unavailable.minutes(), None);
            assert_eq!(RunningTotal::Loaded(42).minutes(), Some(42));
        }

        #[test]
        fn test_advance_only_when_loaded() {
            let mut total = RunningTotal::Loaded(1);
            total.advance();
            assert_eq!(total, RunningTotal::Loaded(2));

            let mut total = RunningTotal::Loading;
            total.advance();
            assert_eq!(total, RunningTotal::Loading);
        }
    }

    mod load_tests {
        use super::*;

        #[tokio::test]
        async fn test_initial_total_loaded() {
            let (bridge, _store, _handle) = spawn_bridge(Some(user()));

            bridge.settle().await;

            assert_eq!(bridge.snapshot().total, RunningTotal::Loaded(0));
        }

        #[tokio::test]
        async fn test_total_loading_until_fetched() {
            let store = Arc::new(InMemorySessionStore::new());
            store.set_latency(tokio::time::Duration::from_millis(200));
            let (bridge, _handle) = AccountingBridge::spawn(store, Some(user()));

            assert!(bridge.snapshot().total.is_loading());

            bridge.settle().await;
            assert_eq!(bridge.snapshot().total, RunningTotal::Loaded(0));
        }

        #[tokio::test]
        async fn test_load_failure_leaves_total_unavailable() {
            let store = Arc::new(InMemorySessionStore::new());
            store.set_should_fail(true);
            let (bridge, _handle) = AccountingBridge::spawn(store, Some(user()));

            bridge.settle().await;

            let snapshot = bridge.snapshot();
            assert_eq!(snapshot.total, RunningTotal::Unavailable);
            assert_eq!(snapshot.notice.unwrap().level, NoticeLevel::Toast);
        }

        #[tokio::test]
        async fn test_reload_picks_up_external_changes() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));
            bridge.settle().await;

            let id = store
                .create_session(Some(user()), Utc::now(), SessionPhase::Focus)
                .await
                .unwrap();
            store.increment_session(id).await.unwrap();
            bridge.reload();
            bridge.settle().await;

            assert_eq!(bridge.snapshot().total, RunningTotal::Loaded(1));
        }
    }

    mod session_tests {
        use super::*;

        #[tokio::test]
        async fn test_minutes_advance_total() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));

            bridge.handle_event(&focus_started());
            for _ in 0..5 {
                bridge.handle_event(&minute());
            }
            bridge.settle().await;

            assert_eq!(bridge.snapshot().total, RunningTotal::Loaded(5));
            assert_eq!(store.get_total_minutes(&user()).await.unwrap(), 5);
        }

        #[tokio::test]
        async fn test_one_session_per_focus_run() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));

            bridge.handle_event(&focus_started());
            bridge.handle_event(&minute());
            bridge.handle_event(&TimerEvent::Paused {
                remaining_seconds: 1440,
            });
            bridge.handle_event(&focus_started());
            bridge.handle_event(&minute());
            bridge.settle().await;

            let sessions = store.sessions();
            assert_eq!(sessions.len(), 2);
            assert!(sessions.iter().all(|s| s.duration_min == 1));
        }

        #[tokio::test]
        async fn test_break_start_opens_no_session() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));

            bridge.handle_event(&TimerEvent::Started {
                phase: SessionPhase::Break,
                remaining_seconds: 300,
                started_at: Utc::now(),
            });
            bridge.settle().await;

            assert!(store.sessions().is_empty());
            assert_eq!(bridge.snapshot().session, None);
        }

        #[tokio::test]
        async fn test_duplicate_start_keeps_one_session() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));

            bridge.handle_event(&focus_started());
            bridge.handle_event(&focus_started());
            bridge.settle().await;

            assert_eq!(store.sessions().len(), 1);
        }

        #[tokio::test]
        async fn test_phase_completed_discards_handle() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));

            bridge.handle_event(&focus_started());
            bridge.handle_event(&TimerEvent::PhaseCompleted {
                completed: SessionPhase::Focus,
                next: SessionPhase::Break,
                completed_focus_count: 1,
            });
            bridge.handle_event(&minute());
            bridge.settle().await;

            let snapshot = bridge.snapshot();
            assert_eq!(snapshot.session, None);
            assert_eq!(snapshot.dropped_increments, 1);
            assert_eq!(store.sessions()[0].duration_min, 0);
        }

        #[tokio::test]
        async fn test_reset_discards_handle() {
            let (bridge, _store, _handle) = spawn_bridge(Some(user()));

            bridge.handle_event(&focus_started());
            bridge.settle().await;
            assert!(bridge.snapshot().session.is_some());

            bridge.handle_event(&TimerEvent::Reset);
            bridge.settle().await;
            assert_eq!(bridge.snapshot().session, None);
        }

        #[tokio::test]
        async fn test_minute_without_session_is_dropped() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));

            bridge.handle_event(&minute());
            bridge.settle().await;

            let snapshot = bridge.snapshot();
            assert_eq!(snapshot.total, RunningTotal::Loaded(0));
            assert_eq!(snapshot.dropped_increments, 1);
            assert!(store.sessions().is_empty());
        }

        #[tokio::test]
        async fn test_vanished_session_drops_handle() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));

            bridge.handle_event(&focus_started());
            bridge.settle().await;
            let id = bridge.snapshot().session.unwrap();
            store.remove(id);

            bridge.handle_event(&minute());
            bridge.settle().await;

            let snapshot = bridge.snapshot();
            assert_eq!(snapshot.session, None);
            assert_eq!(snapshot.dropped_increments, 1);
            assert_eq!(snapshot.total, RunningTotal::Loaded(0));
        }

        #[tokio::test]
        async fn test_increment_failure_keeps_handle() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));

            bridge.handle_event(&focus_started());
            bridge.settle().await;
            store.set_should_fail(true);
            bridge.handle_event(&minute());
            bridge.settle().await;
            store.set_should_fail(false);
            bridge.handle_event(&minute());
            bridge.settle().await;

            let snapshot = bridge.snapshot();
            assert!(snapshot.session.is_some());
            assert_eq!(snapshot.dropped_increments, 1);
            assert_eq!(snapshot.total, RunningTotal::Loaded(1));
        }
    }

    mod notice_tests {
        use super::*;

        #[tokio::test]
        async fn test_create_without_user_is_blocking() {
            let (bridge, store, _handle) = spawn_bridge(None);
            bridge.settle().await;
            bridge.acknowledge_notice(&bridge.snapshot().notice.unwrap());

            bridge.handle_event(&focus_started());
            bridge.settle().await;

            let snapshot = bridge.snapshot();
            let notice = snapshot.notice.unwrap();
            assert!(notice.is_blocking());
            assert!(notice.message.contains("学習セッションの作成"));
            assert_eq!(snapshot.session, None);
            assert!(store.sessions().is_empty());
        }

        #[tokio::test]
        async fn test_create_failure_is_toast() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));
            bridge.settle().await;
            store.set_should_fail(true);

            bridge.handle_event(&focus_started());
            bridge.settle().await;

            let notice = bridge.snapshot().notice.unwrap();
            assert_eq!(notice.level, NoticeLevel::Toast);
        }

        #[tokio::test]
        async fn test_acknowledge_clears_notice() {
            let (bridge, _store, _handle) = spawn_bridge(None);
            bridge.settle().await;
            let notice = bridge.snapshot().notice.unwrap();

            bridge.acknowledge_notice(&notice);
            bridge.settle().await;

            assert!(bridge.snapshot().notice.is_none());
        }

        #[tokio::test]
        async fn test_acknowledge_keeps_newer_notice() {
            let (bridge, _store, _handle) = spawn_bridge(None);
            bridge.settle().await;
            let shown = bridge.snapshot().notice.unwrap();

            bridge.handle_event(&focus_started());
            bridge.acknowledge_notice(&shown);
            bridge.settle().await;

            let notice = bridge.snapshot().notice.unwrap();
            assert!(notice.message.contains("学習セッションの作成"));
        }
    }

    mod purge_tests {
        use super::*;

        #[tokio::test]
        async fn test_purge_resets_total() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));
            bridge.handle_event(&focus_started());
            bridge.handle_event(&minute());
            bridge.handle_event(&minute());
            bridge.settle().await;
            assert_eq!(bridge.snapshot().total, RunningTotal::Loaded(2));

            bridge.purge();
            bridge.settle().await;

            let snapshot = bridge.snapshot();
            assert_eq!(snapshot.total, RunningTotal::Loaded(0));
            assert_eq!(snapshot.session, None);
            assert!(store.sessions().is_empty());
        }

        #[tokio::test]
        async fn test_purge_without_user_is_blocking() {
            let (bridge, _store, _handle) = spawn_bridge(None);
            bridge.settle().await;
            bridge.acknowledge_notice(&bridge.snapshot().notice.unwrap());

            bridge.purge();
            bridge.settle().await;

            assert!(bridge.snapshot().notice.unwrap().is_blocking());
        }

        #[tokio::test]
        async fn test_purge_failure_keeps_total() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));
            bridge.settle().await;
            store.set_should_fail(true);

            bridge.purge();
            bridge.settle().await;

            let snapshot = bridge.snapshot();
            assert_eq!(snapshot.total, RunningTotal::Loaded(0));
            assert_eq!(snapshot.notice.unwrap().level, NoticeLevel::Toast);
        }

        #[tokio::test]
        async fn test_purge_and_wait_returns_reloaded_total() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));
            bridge.handle_event(&focus_started());
            bridge.handle_event(&minute());

            bridge.purge_and_wait().await.unwrap();

            let snapshot = bridge.snapshot();
            assert_eq!(snapshot.total, RunningTotal::Loaded(0));
            assert_eq!(snapshot.session, None);
            assert!(store.sessions().is_empty());
        }

        #[tokio::test]
        async fn test_purge_and_wait_failure_is_returned_not_published() {
            let (bridge, _store, _handle) = spawn_bridge(None);
            bridge.settle().await;
            let load_notice = bridge.snapshot().notice.unwrap();

            let notice = bridge.purge_and_wait().await.unwrap_err();

            assert!(notice.is_blocking());
            assert!(notice.message.starts_with("学習記録の削除"));
            // The earlier notice is still pending for the next response.
            assert_eq!(bridge.snapshot().notice, Some(load_notice));
        }

        #[tokio::test]
        async fn test_purge_and_wait_keeps_other_notices() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));
            bridge.settle().await;
            store.set_should_fail(true);
            bridge.handle_event(&focus_started());
            bridge.settle().await;
            store.set_should_fail(false);

            bridge.purge_and_wait().await.unwrap();

            let notice = bridge.snapshot().notice.unwrap();
            assert!(notice.message.contains("学習セッションの作成"));
        }
    }

    mod forward_tests {
        use super::*;

        #[tokio::test]
        async fn test_forward_events_until_closed() {
            let (bridge, store, _handle) = spawn_bridge(Some(user()));
            let (tx, rx) = mpsc::unbounded_channel();

            let forwarder = tokio::spawn(bridge.clone().forward_events(rx));
            tx.send(focus_started()).unwrap();
            tx.send(minute()).unwrap();
            drop(tx);
            forwarder.await.unwrap();
            bridge.settle().await;

            assert_eq!(store.get_total_minutes(&user()).await.unwrap(), 1);
        }

        #[tokio::test]
        async fn test_subscribe_sees_updates() {
            let (bridge, _store, _handle) = spawn_bridge(Some(user()));
            let mut rx = bridge.subscribe();

            rx.wait_for(|s| !s.total.is_loading()).await.unwrap();

            assert_eq!(rx.borrow().total, RunningTotal::Loaded(0));
        }
    }
}
