//! Native folder lookups for the platforms that have them.
//!
//! Only the adapter for the target OS is compiled; resolvers talk to these
//! through the `MacFolderApi` and `WinFolderApi` traits.

use std::fmt;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(windows)]
mod windows;

#[cfg(target_os = "macos")]
pub use macos::CoreServicesFolders;
#[cfg(windows)]
pub use windows::ShellFolders;

/// A failed native lookup: the platform status code and a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeError {
    pub code: i64,
    pub message: String,
}

impl NativeError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for NativeError {}
