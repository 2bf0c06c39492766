//! Domain-specific error types for the courier protocol.
//!
//! Internal fallible operations return `Result<T, CourierError>`.
//! Nothing here crosses a connection boundary as a raised fault: the
//! client connector and the listeners turn every error into an
//! [`Outcome`](crate::Outcome) carrying its display text.

use thiserror::Error;
use tokio_util::codec::LinesCodecError;

/// The canonical error type for the courier protocol.
#[derive(Debug, Error)]
pub enum CourierError {
    // ── Transport Errors ─────────────────────────────────────────
    /// The TCP/IO layer reported an error.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The line codec failed (over-long line, invalid UTF-8, I/O).
    #[error("{0}")]
    Line(#[from] LinesCodecError),

    /// The peer closed the connection before a full request or reply arrived.
    #[error("connection closed before {0} was received")]
    ConnectionClosed(&'static str),

    // ── Framing Errors ───────────────────────────────────────────
    /// The extension does not fit the fixed-size header field.
    #[error("extension too long: {len} bytes (max {max})")]
    ExtensionTooLong { len: usize, max: usize },

    /// The extension would escape the storage directory.
    #[error("invalid extension: {0:?}")]
    InvalidExtension(String),

    /// The payload exceeds the configured maximum size.
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: u64, max: u64 },

    // ── Request Errors ───────────────────────────────────────────
    /// A text message contained a line delimiter.
    #[error("message must be a single line")]
    MultiLineMessage,

    /// Catch-all for errors that do not fit another variant.
    #[error("{0}")]
    Other(String),
}

// ── Convenient From implementations ──────────────────────────────

impl From<String> for CourierError {
    fn from(s: String) -> Self {
        CourierError::Other(s)
    }
}

impl From<&str> for CourierError {
    fn from(s: &str) -> Self {
        CourierError::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = CourierError::ExtensionTooLong { len: 20, max: 15 };
        assert!(e.to_string().contains("20"));
        assert!(e.to_string().contains("15"));

        let e = CourierError::ConnectionClosed("a reply");
        assert_eq!(e.to_string(), "connection closed before a reply was received");
    }

    #[test]
    fn io_error_keeps_its_description() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let e: CourierError = io_err.into();
        assert!(matches!(e, CourierError::Io(_)));
        assert_eq!(e.to_string(), "refused");
    }

    #[test]
    fn from_string() {
        let e: CourierError = "something broke".into();
        assert!(matches!(e, CourierError::Other(_)));
    }
}
