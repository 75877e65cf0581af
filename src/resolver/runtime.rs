//! The XDG runtime directory.

use nix::unistd::{geteuid, Uid, User};
use std::fs::{self, Permissions};
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::env::{expand_tilde, Environment};
use crate::error::{Error, Result};
use crate::location::Location;

const RUNTIME_MODE: u32 = 0o700;

/// Resolves `$XDG_RUNTIME_DIR`, falling back to `<temp>/runtime-<user>`.
///
/// The directory must belong to the effective user; its mode is forced to
/// `0700` when it differs.
pub(crate) fn resolve(env: &impl Environment) -> Result<PathBuf> {
    let uid = geteuid();
    let path = match env.var("XDG_RUNTIME_DIR") {
        Some(value) => expand_tilde(&value, env.home_dir().as_deref()),
        None => {
            let path = env.temp_dir().join(format!("runtime-{}", user_name(uid)));
            if !path.exists() {
                if let Err(error) = fs::create_dir(&path) {
                    debug!(path = %path.display(), %error, "could not create runtime directory");
                }
            }
            warn!("XDG_RUNTIME_DIR not set, defaulting to '{}'", path.display());
            path
        }
    };

    validate(&path, uid)?;
    Ok(path)
}

pub(crate) fn validate(path: &Path, uid: Uid) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|error| Error::io(path, error))?;
    if metadata.uid() != uid.as_raw() {
        return Err(Error::location(
            Location::Runtime,
            format!(
                "wrong ownership on runtime directory '{}', {} instead of {}",
                path.display(),
                user_name(Uid::from_raw(metadata.uid())),
                user_name(uid),
            ),
        ));
    }

    let mode = metadata.permissions().mode() & 0o777;
    if mode != RUNTIME_MODE {
        debug!(path = %path.display(), "fixing runtime directory mode {mode:o}");
        fs::set_permissions(path, Permissions::from_mode(RUNTIME_MODE))
            .map_err(|error| Error::io(path, error))?;
    }
    Ok(())
}

fn user_name(uid: Uid) -> String {
    match User::from_uid(uid) {
        Ok(Some(user)) => user.name,
        _ => uid.to_string(),
    }
}
