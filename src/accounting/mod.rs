//! Session accounting.
//!
//! This module turns focus minutes into stored study sessions:
//! - `SessionStore` contract and its in-memory and JSON-file backends
//! - `AccountingBridge`, the worker that owns the open session handle and
//!   the running study total
//! - Notices for failed persistence calls

mod bridge;
mod error;
mod file;
mod memory;
mod store;

pub use bridge::{AccountingBridge, AccountingSnapshot, RunningTotal};
pub use error::{Notice, NoticeLevel, StoreError};
pub use file::{JsonFileSessionStore, SESSIONS_FILE_NAME};
pub use memory::InMemorySessionStore;
pub use store::SessionStore;
