//! Error types for location resolution.

use std::path::PathBuf;
use thiserror::Error;

use crate::location::Location;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while resolving a standard location.
#[derive(Debug, Error)]
pub enum Error {
    /// The symbolic name is not part of the location catalog.
    #[error("unknown location '{0}'")]
    UnknownLocation(String),

    /// The platform could not resolve a path for the location.
    ///
    /// `code` carries the native status code when one is available.
    #[error("could not resolve {location}: {message}")]
    Location {
        location: Location,
        message: String,
        code: Option<i64>,
    },

    /// No home directory could be determined for the current user.
    #[error("cannot determine home directory")]
    NoHomeDir,

    /// A filesystem operation failed during resolution.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn location(location: Location, message: impl Into<String>) -> Self {
        Error::Location {
            location,
            message: message.into(),
            code: None,
        }
    }

    pub(crate) fn native(location: Location, native: crate::sys::NativeError) -> Self {
        Error::Location {
            location,
            message: native.message,
            code: Some(native.code),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// The location this error is about, if any.
    pub fn location_kind(&self) -> Option<Location> {
        match self {
            Error::Location { location, .. } => Some(*location),
            _ => None,
        }
    }
}
