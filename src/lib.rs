//! Standard directory locations for an application.
//!
//! [`get_writable_path`] returns the directory new files of a given
//! [`Location`] should be written to; [`get_standard_paths`] returns every
//! directory searched for that location, highest priority first. Locations
//! that are not generic are namespaced by an [`Identity`], either passed per
//! call or set process-wide with [`configure`].
//!
//! Nothing is cached: each call resolves against the current environment.
//! Returned directories may not exist yet, except for the runtime directory
//! on Unix, which is created and permission-checked on demand.
//!
//! ```no_run
//! use standard_paths::{configure, get_writable_path, Location};
//!
//! configure("Yksom", "uranusjr");
//! let cache = get_writable_path(Location::Cache, None)?;
//! # Ok::<(), standard_paths::Error>(())
//! ```

use std::path::PathBuf;
use tracing::debug;

pub mod config;
pub mod env;
pub mod error;
pub mod identity;
pub mod location;
pub mod resolver;
pub mod sys;

pub use env::{Environment, FixedEnvironment, SystemEnvironment};
pub use error::{Error, Result};
pub use identity::{configure, get_config, Identity};
pub use location::{IntoLocation, Location};
pub use resolver::Resolver;

/// The directory where files of `location` should be written.
///
/// Uses the process-wide identity unless `identity` is given.
pub fn get_writable_path(
    location: impl IntoLocation,
    identity: Option<&Identity>,
) -> Result<PathBuf> {
    resolve_writable_path(resolver::current(), location, identity)
}

/// Every directory for `location`, starting with [`get_writable_path`].
pub fn get_standard_paths(
    location: impl IntoLocation,
    identity: Option<&Identity>,
) -> Result<Vec<PathBuf>> {
    resolve_standard_paths(resolver::current(), location, identity)
}

/// [`get_writable_path`] against a specific resolver.
pub fn resolve_writable_path(
    resolver: &dyn Resolver,
    location: impl IntoLocation,
    identity: Option<&Identity>,
) -> Result<PathBuf> {
    let location = location.into_location()?;
    let path = with_identity(identity, |identity| {
        resolver.writable_path(location, identity)
    })?;

    if path.as_os_str().is_empty() && !location.can_be_empty() {
        return Err(Error::location(location, "resolved to an empty path"));
    }
    debug!(%location, path = %path.display(), "resolved writable path");
    Ok(path)
}

/// [`get_standard_paths`] against a specific resolver.
///
/// Empty entries are dropped, so an unresolvable writable path is omitted
/// rather than listed.
pub fn resolve_standard_paths(
    resolver: &dyn Resolver,
    location: impl IntoLocation,
    identity: Option<&Identity>,
) -> Result<Vec<PathBuf>> {
    let location = location.into_location()?;
    let paths = with_identity(identity, |identity| {
        resolver.standard_paths(location, identity)
    })?;

    if paths.first().is_some_and(|path| path.as_os_str().is_empty()) && !location.can_be_empty() {
        return Err(Error::location(location, "resolved to an empty path"));
    }
    let paths: Vec<PathBuf> = paths
        .into_iter()
        .filter(|path| !path.as_os_str().is_empty())
        .collect();
    debug!(%location, count = paths.len(), "resolved standard paths");
    Ok(paths)
}

fn with_identity<T>(identity: Option<&Identity>, f: impl FnOnce(&Identity) -> T) -> T {
    match identity {
        Some(identity) => f(identity),
        None => f(&get_config()),
    }
}
