//! Failure vocabulary of the storage backends.
//!
//! Repositories classify what went wrong with a [`BackendErrorKind`]; the
//! normalizer turns that classification into an [`OperationError`].

use std::error::Error as StdError;
use std::fmt;
use std::io;

use thiserror::Error;

use crate::error::OperationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendErrorKind {
    /// The backend could not be reached or the connection dropped.
    Connectivity,
    Timeout,
    Interrupted,
    /// The backend node is recovering and not accepting requests yet.
    NodeRecovering,
    /// The backend rejected the credentials it was given.
    Authentication,
    /// The backend refused the operation for security reasons.
    Security,
    Other,
}

impl fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Connectivity => "connectivity",
            Self::Timeout => "timeout",
            Self::Interrupted => "interrupted",
            Self::NodeRecovering => "node recovering",
            Self::Authentication => "authentication",
            Self::Security => "security",
            Self::Other => "backend",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Error)]
#[error("{kind} error: {message}")]
pub struct BackendError {
    kind: BackendErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl BackendError {
    #[must_use]
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Other, message)
    }

    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    #[must_use]
    pub fn kind(&self) -> BackendErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<io::Error> for BackendError {
    fn from(err: io::Error) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::AddrNotAvailable => BackendErrorKind::Connectivity,
            io::ErrorKind::TimedOut => BackendErrorKind::Timeout,
            io::ErrorKind::Interrupted => BackendErrorKind::Interrupted,
            io::ErrorKind::PermissionDenied => BackendErrorKind::Security,
            _ => BackendErrorKind::Other,
        };
        Self::new(kind, err.to_string()).with_source(err)
    }
}

/// Error returned by repository ports.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A domain error raised by the repository itself; passed through as is.
    #[error(transparent)]
    Domain(Box<OperationError>),
}

impl From<OperationError> for StorageError {
    fn from(err: OperationError) -> Self {
        Self::Domain(Box::new(err))
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        Self::Backend(err.into())
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
