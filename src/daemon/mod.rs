//! Daemon module for the study timer.
//!
//! This module contains the core daemon functionality:
//! - `timer`: Timer engine with state transitions and countdown logic
//! - `ticker`: Cancelable one-second tick source
//! - `controller`: Single writer of timer state
//! - `ipc`: Unix socket server and request handling
//!
//! [`serve`] wires them together with the accounting bridge.

pub mod controller;
pub mod ipc;
pub mod ticker;
pub mod timer;

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::UnixStream;
use tokio::sync::{mpsc, Mutex};

use crate::accounting::{AccountingBridge, JsonFileSessionStore, SessionStore};
use crate::config::AppPaths;
use crate::settings::SettingsStore;
use crate::types::{IpcResponse, UserId};

pub use controller::TimerController;
pub use ipc::{IpcServer, RequestHandler};
pub use ticker::{Tick, TickSource};
pub use timer::{TimerEngine, TimerEvent};

/// Runs the daemon with the file-backed stores under `paths` until
/// SIGINT or SIGTERM.
pub async fn run(paths: &AppPaths, user: Option<UserId>) -> Result<()> {
    let settings = SettingsStore::load(paths.settings_path());
    let store = JsonFileSessionStore::open(paths.sessions_path())
        .await
        .context("学習記録を読み込めませんでした")?;

    if user.is_none() {
        tracing::warn!("no user given; study sessions will not be recorded");
    }

    serve(
        settings,
        Arc::new(store),
        user,
        &paths.socket_path(),
        shutdown_signal(),
    )
    .await
}

/// Serves IPC requests on `socket_path` until `shutdown` completes.
pub async fn serve<S, F>(
    settings: SettingsStore,
    store: Arc<S>,
    user: Option<UserId>,
    socket_path: &Path,
    shutdown: F,
) -> Result<()>
where
    S: SessionStore,
    F: Future<Output = ()>,
{
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();

    let controller = Arc::new(Mutex::new(TimerController::new(
        settings, event_tx, tick_tx,
    )));
    let (accounting, _worker) = AccountingBridge::spawn(store, user);
    tokio::spawn(accounting.clone().forward_events(event_rx));

    let tick_controller = controller.clone();
    let tick_loop = tokio::spawn(async move {
        while let Some(tick) = tick_rx.recv().await {
            let mut controller = tick_controller.lock().await;
            if let Err(e) = controller.on_tick(tick) {
                tracing::error!("failed to apply tick: {:#}", e);
            }
        }
    });

    let server = IpcServer::new(socket_path)?;
    let handler = RequestHandler::new(controller.clone(), accounting.clone());

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            () = &mut shutdown => break,
            accepted = server.accept() => match accepted {
                Ok(stream) => {
                    tokio::spawn(handle_connection(stream, handler.clone()));
                }
                Err(e) => tracing::error!("{:#}", e),
            },
        }
    }

    tracing::info!("daemon shutting down");
    tick_loop.abort();
    if let Err(e) = controller.lock().await.pause() {
        tracing::warn!("failed to pause timer on shutdown: {:#}", e);
    }
    accounting.close_session();
    accounting.settle().await;

    Ok(())
}

async fn handle_connection(mut stream: UnixStream, handler: RequestHandler) {
    let response = match IpcServer::receive_request(&mut stream).await {
        Ok(request) => handler.handle(request).await,
        Err(e) => {
            tracing::warn!("invalid IPC request: {:#}", e);
            IpcResponse::error(format!("不正なリクエストです: {}", e))
        }
    };

    if let Err(e) = IpcServer::send_response(&mut stream, &response).await {
        tracing::warn!("{:#}", e);
    }
}

/// Completes on SIGINT or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(terminate) => terminate,
        Err(e) => {
            tracing::warn!("failed to install SIGTERM handler: {}", e);
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => tracing::info!("received SIGINT"),
        _ = terminate.recv() => tracing::info!("received SIGTERM"),
    }
}
