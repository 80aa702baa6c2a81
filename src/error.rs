//! Error and result types shared by the engine and its callers.

use std::fmt;

use thiserror::Error;

/// Machine-readable reason an operation was rejected.
///
/// Callers branch on this, never on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The engine found its own state inconsistent. Indicates a bug.
    InternalError,
    /// The named tile is not part of the registry.
    TileDoesNotExist,
    /// A required argument was absent or empty.
    MissingParameter,
    /// An argument was present but could not be parsed.
    UnprocessableParameter,
    /// Someone else holds the claim on the tile.
    TileIsClaimedByAnotherUser,
    /// The tile has no active claim.
    TileIsNotClaimed,
}

impl ErrorKind {
    /// Stable identifier for logs and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InternalError => "InternalError",
            Self::TileDoesNotExist => "TileDoesNotExist",
            Self::MissingParameter => "MissingParameter",
            Self::UnprocessableParameter => "UnprocessableParameter",
            Self::TileIsClaimedByAnotherUser => "TileIsClaimedByAnotherUser",
            Self::TileIsNotClaimed => "TileIsNotClaimed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected operation: the error kind plus the text to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Rejection {
    /// Why the operation was rejected.
    pub kind: ErrorKind,
    /// Human-readable explanation.
    pub message: String,
}

impl Rejection {
    /// Create a new rejection.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Outcome of an engine operation, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Text to show the acting user.
    pub message: String,
    /// Set when the operation was rejected.
    pub error: Option<ErrorKind>,
}

impl CommandResult {
    /// A successful result.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    /// Whether the operation was applied.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl From<Rejection> for CommandResult {
    fn from(rejection: Rejection) -> Self {
        Self {
            message: rejection.message,
            error: Some(rejection.kind),
        }
    }
}

impl From<Result<String, Rejection>> for CommandResult {
    fn from(result: Result<String, Rejection>) -> Self {
        match result {
            Ok(message) => Self::ok(message),
            Err(rejection) => rejection.into(),
        }
    }
}
