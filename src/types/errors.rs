/*!
 * Filesystem Error Types
 * Dispatch, registration and pass-through operation errors
 */

use std::error::Error as StdError;
use std::io;

use thiserror::Error;

/// Filesystem operation result
pub type FsResult<T> = Result<T, FsError>;

/// Errors surfaced by the registry, the providers and the filesystem handles
///
/// Backend and OS failures are carried verbatim: `Backend` and `Io` are
/// transparent, so their `Display` and `source()` are those of the wrapped error.
#[derive(Error, Debug)]
pub enum FsError {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no filesystem registered for scheme {0:?}")]
    UnsupportedScheme(String),

    #[error("scheme {0:?} is already registered")]
    SchemeConflict(String),

    #[error("invalid provider: {0}")]
    InvalidProvider(String),

    #[error(transparent)]
    Backend(Box<dyn StdError + Send + Sync + 'static>),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid glob pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl FsError {
    /// Wrap a backend-specific construction failure without reinterpreting it
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self::Backend(err.into())
    }

    /// OS error kind, when this error came straight from the host filesystem
    #[inline]
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// Check if the error means the target does not exist
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::NotFound)
    }
}
