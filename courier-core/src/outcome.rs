//! The uniform success/failure value returned at every I/O boundary.

use std::fmt;

use crate::error::CourierError;

/// Whether an operation succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Ok,
    Fail,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeKind::Ok => write!(f, "OK"),
            OutcomeKind::Fail => write!(f, "FAIL"),
        }
    }
}

/// Immutable result of one I/O operation.
///
/// `Ok` carries the peer's response text (or an empty string), `Fail`
/// carries the description of the fault that was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    kind: OutcomeKind,
    message: String,
}

impl Outcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Ok,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Fail,
            message: message.into(),
        }
    }

    /// Collapse an internal result into an outcome, keeping the error text verbatim.
    pub fn from_result(result: Result<String, CourierError>) -> Self {
        match result {
            Ok(message) => Self::ok(message),
            Err(e) => Self::fail(e.to_string()),
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        self.kind
    }

    pub fn is_ok(&self) -> bool {
        self.kind == OutcomeKind::Ok
    }

    pub fn is_fail(&self) -> bool {
        self.kind == OutcomeKind::Fail
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl From<Result<String, CourierError>> for Outcome {
    fn from(result: Result<String, CourierError>) -> Self {
        Self::from_result(result)
    }
}
