//! Wire framing for the file endpoint.
//!
//! Every file transfer starts with a fixed 15-byte extension field
//! (UTF-8, left-packed, zero-padded). What follows depends on the
//! [`Framing`] both peers are configured with:
//!
//! ```text
//! LengthPrefixed (default)
//!   extension:  [u8; 15]   zero-padded UTF-8, e.g. ".txt\0\0\0…"
//!   length:     u64        little-endian payload length
//!   payload:    [u8]       exactly `length` bytes
//!
//! Legacy
//!   extension:  [u8; 15]
//!   payload:    [u8]       until the socket has nothing buffered
//! ```
//!
//! The legacy layout infers the end of the payload from transport
//! quiescence and can stop early on bursty delivery; see
//! [`payload::read_available_payload`].

pub mod extension;
pub mod frame;
pub mod payload;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use extension::{EXTENSION_FIELD_LEN, ExtensionField, decode_extension, encode_extension};
pub use frame::{FILE_HEADER_LEN, FileFrame, FileFrameCodec, FileHeader};
pub use payload::{READ_CHUNK_SIZE, read_available_payload};

/// How the end of a file payload is determined on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framing {
    /// Extension field plus an explicit `u64` payload length.
    #[default]
    LengthPrefixed,
    /// Extension field only; the payload ends when no more bytes are buffered.
    Legacy,
}

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framing::LengthPrefixed => write!(f, "length-prefixed"),
            Framing::Legacy => write!(f, "legacy"),
        }
    }
}
