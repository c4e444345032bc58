//! Shared error type across menuPrism crates.

use thiserror::Error;

/// Stable error codes used in logs and by hosts (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Store or sidecar file absent.
    NotFound,
    /// Record layout inconsistent with the file.
    Malformed,
    /// An authorization predicate failed.
    AccessDenied,
    /// Password challenge answered incorrectly.
    PasswordMismatch,
    /// Numeric entry requested but no area is selected.
    NumericModeUnavailable,
    /// Caller disconnected.
    Hangup,
    /// Underlying I/O failure.
    Io,
    /// Invalid configuration.
    Config,
    /// Unsupported record version.
    UnsupportedVersion,
}

impl ErrorKind {
    /// String representation used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Malformed => "MALFORMED",
            ErrorKind::AccessDenied => "ACCESS_DENIED",
            ErrorKind::PasswordMismatch => "PASSWORD_MISMATCH",
            ErrorKind::NumericModeUnavailable => "NUMERIC_MODE_UNAVAILABLE",
            ErrorKind::Hangup => "HANGUP",
            ErrorKind::Io => "IO",
            ErrorKind::Config => "CONFIG",
            ErrorKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MenuError>;

/// Unified error type used by core and engine.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("malformed: {0}")]
    Malformed(String),
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("password mismatch")]
    PasswordMismatch,
    #[error("numeric entry unavailable: no area selected")]
    NumericModeUnavailable,
    #[error("caller hung up")]
    Hangup,
    #[error("io: {0}")]
    Io(String),
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported record version {0}")]
    UnsupportedVersion(u16),
}

impl MenuError {
    /// Map to a stable code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MenuError::NotFound(_) => ErrorKind::NotFound,
            MenuError::Malformed(_) => ErrorKind::Malformed,
            MenuError::AccessDenied(_) => ErrorKind::AccessDenied,
            MenuError::PasswordMismatch => ErrorKind::PasswordMismatch,
            MenuError::NumericModeUnavailable => ErrorKind::NumericModeUnavailable,
            MenuError::Hangup => ErrorKind::Hangup,
            MenuError::Io(_) => ErrorKind::Io,
            MenuError::Config(_) => ErrorKind::Config,
            MenuError::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
        }
    }

    /// True for any authorization failure, including a wrong password.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, MenuError::AccessDenied(_) | MenuError::PasswordMismatch)
    }
}

impl From<std::io::Error> for MenuError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => MenuError::NotFound(e.to_string()),
            _ => MenuError::Io(e.to_string()),
        }
    }
}
