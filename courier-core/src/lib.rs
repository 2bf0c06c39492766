//! # courier-core
//!
//! Core library for a two-port text/file courier over TCP.
//!
//! This crate contains:
//! - **Outcome** (`Outcome`): the OK/FAIL value returned at every I/O boundary
//! - **Codec**: the 15-byte extension field, `FileFrameCodec` for
//!   length-prefixed frames, and the legacy read-until-quiet payload reader
//! - **Storage** (`StorageNamer`): dated directories and the file sequence counter
//! - **State** (`ListenerPhase`): validated lifecycle of an accept loop
//! - **Client** (`Client`): one connection per message or file, plus a probe
//! - **Server** (`Server`): the message and file listener pair
//! - **Error** (`CourierError`): typed, `thiserror`-based error hierarchy

pub mod client;
pub mod codec;
pub mod error;
pub mod network;
pub mod outcome;
pub mod protocol;
pub mod server;
pub mod state;
pub mod storage;

// ── Re-exports for ergonomic usage ───────────────────────────────

pub use client::{Client, ClientOptions, can_connect};
pub use codec::{EXTENSION_FIELD_LEN, FileFrame, FileFrameCodec, Framing};
pub use error::CourierError;
pub use network::{Endpoint, FILE_PORT, MESSAGE_PORT};
pub use outcome::{Outcome, OutcomeKind};
pub use protocol::{FILE_RECEIVED, failure_reply, message_reply};
pub use server::{Server, ServerOptions};
pub use state::ListenerPhase;
pub use storage::{StorageNamer, StoredFile};
