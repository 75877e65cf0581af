//! Per-platform resolution rules behind a shared [`Resolver`] trait.
//!
//! The resolver for the running OS is picked once, on first use, and kept
//! for the rest of the process. Resolvers hold no mutable state: every call
//! re-reads the environment and the OS.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::error::Result;
use crate::identity::Identity;
use crate::location::Location;

pub mod macos;
pub mod windows;
#[cfg(unix)]
pub mod xdg;

#[cfg(unix)]
mod runtime;
#[cfg(unix)]
mod user_dirs;

pub use macos::{MacDomain, MacFolder, MacFolderApi, MacResolver};
pub use windows::{WinFolder, WinFolderApi, WindowsResolver};
#[cfg(unix)]
pub use xdg::XdgResolver;

pub trait Resolver: Send + Sync {
    /// The single highest-priority directory for `location`.
    fn writable_path(&self, location: Location, identity: &Identity) -> Result<PathBuf>;

    /// Every directory for `location`, highest priority first.
    fn standard_paths(&self, location: Location, identity: &Identity) -> Result<Vec<PathBuf>>;
}

/// The resolver for the operating system this process runs on.
pub fn current() -> &'static dyn Resolver {
    static RESOLVER: OnceLock<Box<dyn Resolver>> = OnceLock::new();
    RESOLVER.get_or_init(platform_resolver).as_ref()
}

#[cfg(target_os = "macos")]
fn platform_resolver() -> Box<dyn Resolver> {
    tracing::debug!("using macOS folder resolver");
    Box::new(MacResolver::new(
        crate::env::SystemEnvironment,
        crate::sys::CoreServicesFolders,
    ))
}

#[cfg(windows)]
fn platform_resolver() -> Box<dyn Resolver> {
    tracing::debug!("using Windows shell folder resolver");
    Box::new(WindowsResolver::new(
        crate::env::SystemEnvironment,
        crate::sys::ShellFolders,
    ))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn platform_resolver() -> Box<dyn Resolver> {
    tracing::debug!("using XDG base directory resolver");
    Box::new(XdgResolver::new(crate::env::SystemEnvironment))
}

/// Drops repeated paths, keeping the first occurrence of each.
pub(crate) fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut unique: Vec<PathBuf> = Vec::with_capacity(paths.len());
    for path in paths {
        if !unique.contains(&path) {
            unique.push(path);
        }
    }
    unique
}
