//! Daemon side of the Unix socket.
//!
//! Each connection carries one JSON request and one JSON response.
//! [`IpcServer`] owns the socket file; [`RequestHandler`] turns requests
//! into controller and accounting calls.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};

use crate::accounting::{AccountingBridge, AccountingSnapshot};
use crate::stats::StudyStats;
use crate::types::{IpcRequest, IpcResponse, ResponseData, SettingsParams};

use super::controller::TimerController;

// ============================================================================
// Constants
// ============================================================================

/// Requests are a few hundred bytes; anything past this is refused.
const MAX_REQUEST_SIZE: usize = 4096;

const READ_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// IpcError
// ============================================================================

/// Failures while reading a request off a connection.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Failed to read request: {0}")]
    ReadError(String),

    /// Client closed the connection without sending a request
    #[error("Connection closed by client")]
    ConnectionClosed,

    #[error("Timed out waiting for the request")]
    Timeout,

    #[error("Request too large (max {MAX_REQUEST_SIZE} bytes)")]
    RequestTooLarge,
}

// ============================================================================
// IpcServer
// ============================================================================

/// Listener bound to the daemon socket. The socket file is removed on drop.
pub struct IpcServer {
    listener: UnixListener,
    socket_path: PathBuf,
}

impl IpcServer {
    /// Binds `socket_path`, replacing a stale socket file left by an
    /// earlier daemon and creating the data directory if needed.
    pub fn new(socket_path: &Path) -> Result<Self> {
        if socket_path.exists() {
            std::fs::remove_file(socket_path)
                .with_context(|| format!("Failed to remove existing socket: {:?}", socket_path))?;
        }

        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create socket directory: {:?}", parent))?;
        }

        let listener = UnixListener::bind(socket_path)
            .with_context(|| format!("Failed to bind Unix socket: {:?}", socket_path))?;
        tracing::info!(path = ?socket_path, "IPC server listening");

        Ok(Self {
            listener,
            socket_path: socket_path.to_path_buf(),
        })
    }

    /// Waits for the next client.
    pub async fn accept(&self) -> Result<UnixStream> {
        let (stream, _addr) = self
            .listener
            .accept()
            .await
            .context("Failed to accept connection")?;
        Ok(stream)
    }

    /// Reads and parses the request of one connection.
    ///
    /// Fails with [`IpcError`] on timeout, an empty connection or a
    /// request over `MAX_REQUEST_SIZE` bytes.
    pub async fn receive_request(stream: &mut UnixStream) -> Result<IpcRequest> {
        let mut buffer = Vec::with_capacity(512);
        let mut limited = stream.take(MAX_REQUEST_SIZE as u64 + 1);

        let read_result = timeout(
            Duration::from_secs(READ_TIMEOUT_SECS),
            read_request(&mut limited, &mut buffer),
        )
        .await;

        match read_result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(IpcError::ReadError(e.to_string()).into()),
            Err(_) => return Err(IpcError::Timeout.into()),
        }

        if buffer.is_empty() {
            return Err(IpcError::ConnectionClosed.into());
        }
        if buffer.len() > MAX_REQUEST_SIZE {
            return Err(IpcError::RequestTooLarge.into());
        }

        let request: IpcRequest = serde_json::from_slice(&buffer)
            .with_context(|| "Failed to deserialize IPC request")?;

        Ok(request)
    }

    /// Writes `response` as JSON.
    pub async fn send_response(stream: &mut UnixStream, response: &IpcResponse) -> Result<()> {
        let json = serde_json::to_vec(response).context("Failed to serialize IPC response")?;

        stream
            .write_all(&json)
            .await
            .context("Failed to write response")?;
        stream.flush().await.context("Failed to flush response")?;

        Ok(())
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

/// Reads one request: either until the client shuts down its write half
/// or until the bytes read so far form a complete JSON value.
async fn read_request<R>(reader: &mut R, buffer: &mut Vec<u8>) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut chunk = [0u8; 512];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buffer.extend_from_slice(&chunk[..n]);
        if serde_json::from_slice::<serde::de::IgnoredAny>(buffer.as_slice()).is_ok() {
            return Ok(());
        }
    }
}

// ============================================================================
// RequestHandler
// ============================================================================

/// Handles IPC requests by dispatching to the timer controller and the
/// accounting bridge.
#[derive(Clone)]
pub struct RequestHandler {
    /// Shared reference to the timer controller
    controller: Arc<Mutex<TimerController>>,
    /// Session accounting
    accounting: AccountingBridge,
}

impl RequestHandler {
    /// Creates a new request handler.
    pub fn new(controller: Arc<Mutex<TimerController>>, accounting: AccountingBridge) -> Self {
        Self {
            controller,
            accounting,
        }
    }

    /// Handles an IPC request and returns the appropriate response.
    pub async fn handle(&self, request: IpcRequest) -> IpcResponse {
        tracing::debug!(?request, "handling IPC request");
        match request {
            IpcRequest::Start => self.handle_start().await,
            IpcRequest::Pause => self.handle_pause().await,
            IpcRequest::Toggle => self.handle_toggle().await,
            IpcRequest::Reset => self.handle_reset().await,
            IpcRequest::Status => self.handle_status().await,
            IpcRequest::Settings { params } => self.handle_settings(params).await,
            IpcRequest::Stats => self.handle_stats().await,
            IpcRequest::Purge => self.handle_purge().await,
        }
    }

    /// Handles the start command.
    async fn handle_start(&self) -> IpcResponse {
        let mut controller = self.controller.lock().await;
        if controller.is_active() {
            return self.respond(&controller, "タイマーは既に実行中です");
        }

        match controller.start() {
            Ok(()) => self.respond(&controller, "タイマーを開始しました"),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the pause command.
    async fn handle_pause(&self) -> IpcResponse {
        let mut controller = self.controller.lock().await;
        if !controller.is_active() {
            return self.respond(&controller, "タイマーは実行されていません");
        }

        match controller.pause() {
            Ok(()) => self.respond(&controller, "タイマーを一時停止しました"),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the toggle command.
    async fn handle_toggle(&self) -> IpcResponse {
        let mut controller = self.controller.lock().await;

        match controller.toggle() {
            Ok(()) if controller.is_active() => {
                self.respond(&controller, "タイマーを開始しました")
            }
            Ok(()) => self.respond(&controller, "タイマーを一時停止しました"),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the reset command.
    async fn handle_reset(&self) -> IpcResponse {
        let mut controller = self.controller.lock().await;

        match controller.reset() {
            Ok(()) => self.respond(&controller, "タイマーをリセットしました"),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the status command.
    async fn handle_status(&self) -> IpcResponse {
        let controller = self.controller.lock().await;
        self.respond(&controller, "")
    }

    /// Handles the settings command.
    async fn handle_settings(&self, params: SettingsParams) -> IpcResponse {
        let mut controller = self.controller.lock().await;
        if params.is_empty() {
            return self.respond(&controller, "");
        }

        match controller.update_settings(&params) {
            Ok(_) => self.respond(&controller, "設定を更新しました"),
            Err(e) => IpcResponse::error(format!("設定の保存に失敗しました: {:#}", e)),
        }
    }

    /// Handles the stats command.
    async fn handle_stats(&self) -> IpcResponse {
        let mut response = {
            let controller = self.controller.lock().await;
            self.respond(&controller, "")
        };

        if let Some(data) = response.data.as_mut() {
            data.stats = data.total_minutes.map(StudyStats::from_total_minutes);
        }
        response
    }

    /// Handles the purge command.
    ///
    /// Waits for the purge and the reload of the total, so the response
    /// carries the new total.
    async fn handle_purge(&self) -> IpcResponse {
        if let Err(notice) = self.accounting.purge_and_wait().await {
            return IpcResponse::error(notice.message);
        }

        let controller = self.controller.lock().await;
        self.respond(&controller, "学習記録を削除しました")
    }

    /// Builds a success response with timer and accounting data.
    ///
    /// A notice included in the response is acknowledged, so each notice
    /// is delivered once.
    fn respond(&self, controller: &TimerController, message: &str) -> IpcResponse {
        let mut data = ResponseData::from_timer_state(controller.state(), controller.settings());
        let snapshot = self.accounting.snapshot();
        fill_accounting(&mut data, &snapshot);
        if let Some(notice) = &snapshot.notice {
            self.accounting.acknowledge_notice(notice);
        }

        IpcResponse::success(message, Some(data))
    }
}

fn fill_accounting(data: &mut ResponseData, snapshot: &AccountingSnapshot) {
    data.total_minutes = snapshot.total.minutes();
    data.loading = snapshot.total.is_loading();
    data.notice = snapshot.notice.as_ref().map(|n| n.message.clone());
}

// ============================================================================
// Tests
// ============================================================================
