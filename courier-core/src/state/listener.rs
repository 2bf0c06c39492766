//! Lifecycle of one accept loop.
//!
//! Transitions are validated and return `Result` instead of panicking.

use std::fmt;

use crate::error::CourierError;

// ── ListenerPhase ────────────────────────────────────────────────

/// The current phase of a listener loop.
///
/// ```text
///  Stopped ──► Listening ──► Accepting ◄─► Serving
///     ▲            │             │            │
///     └────────────┴─────────────┴────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenerPhase {
    /// Not bound, or finished. Initial / terminal state.
    #[default]
    Stopped,

    /// Socket bound; the loop has not started waiting yet.
    Listening,

    /// Blocked waiting for the next connection.
    Accepting,

    /// Handling exactly one connection.
    Serving,
}

impl fmt::Display for ListenerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "Stopped"),
            Self::Listening => write!(f, "Listening"),
            Self::Accepting => write!(f, "Accepting"),
            Self::Serving => write!(f, "Serving"),
        }
    }
}

impl ListenerPhase {
    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }

    pub fn is_serving(&self) -> bool {
        matches!(self, Self::Serving)
    }

    // ── Transitions ──────────────────────────────────────────────

    /// Valid from: `Stopped`.
    pub fn begin_listening(&mut self) -> Result<(), CourierError> {
        match self {
            Self::Stopped => {
                *self = Self::Listening;
                Ok(())
            }
            _ => Err("cannot listen: not in Stopped state".into()),
        }
    }

    /// Valid from: `Listening`, `Serving`, and `Accepting` (retry after a failed accept).
    pub fn begin_accepting(&mut self) -> Result<(), CourierError> {
        match self {
            Self::Listening | Self::Accepting | Self::Serving => {
                *self = Self::Accepting;
                Ok(())
            }
            Self::Stopped => Err("cannot accept: listener is Stopped".into()),
        }
    }

    /// Valid from: `Accepting`.
    pub fn begin_serving(&mut self) -> Result<(), CourierError> {
        match self {
            Self::Accepting => {
                *self = Self::Serving;
                Ok(())
            }
            _ => Err("cannot serve: not in Accepting state".into()),
        }
    }

    /// Valid from: `Listening`, `Accepting`, `Serving`.
    pub fn stop(&mut self) -> Result<(), CourierError> {
        match self {
            Self::Stopped => Err("cannot stop: already Stopped".into()),
            _ => {
                *self = Self::Stopped;
                Ok(())
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_lifecycle() {
        let mut phase = ListenerPhase::default();
        assert!(phase.is_stopped());

        phase.begin_listening().unwrap();
        assert_eq!(phase, ListenerPhase::Listening);

        phase.begin_accepting().unwrap();
        phase.begin_serving().unwrap();
        assert!(phase.is_serving());

        phase.begin_accepting().unwrap();
        assert_eq!(phase, ListenerPhase::Accepting);

        phase.stop().unwrap();
        assert!(phase.is_stopped());
    }

    #[test]
    fn cannot_serve_without_accepting() {
        let mut phase = ListenerPhase::Listening;
        assert!(phase.begin_serving().is_err());
        assert_eq!(phase, ListenerPhase::Listening);
    }

    #[test]
    fn accept_retry_stays_accepting() {
        let mut phase = ListenerPhase::Accepting;
        phase.begin_accepting().unwrap();
        assert_eq!(phase, ListenerPhase::Accepting);
    }

    #[test]
    fn cannot_accept_when_stopped() {
        let mut phase = ListenerPhase::Stopped;
        assert!(phase.begin_accepting().is_err());
    }

    #[test]
    fn cannot_listen_twice() {
        let mut phase = ListenerPhase::Accepting;
        assert!(phase.begin_listening().is_err());
    }

    #[test]
    fn stop_from_stopped_is_rejected() {
        let mut phase = ListenerPhase::Stopped;
        assert!(phase.stop().is_err());
    }

    #[test]
    fn display_format() {
        assert_eq!(ListenerPhase::Stopped.to_string(), "Stopped");
        assert_eq!(ListenerPhase::Listening.to_string(), "Listening");
        assert_eq!(ListenerPhase::Accepting.to_string(), "Accepting");
        assert_eq!(ListenerPhase::Serving.to_string(), "Serving");
    }
}
