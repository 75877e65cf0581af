//! The settings file of the `standard-paths` binary.
//!
//! It only stores the identity used when none is given on the command line.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::identity::Identity;
use crate::location::Location;
use crate::resolver::Resolver;

pub const CONFIG_FILE_NAME: &str = "config.toml";
const SETTINGS_DIR_NAME: &str = "standard-paths";

/// Settings read by the `standard-paths` binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub identity: Identity,
}

/// `<generic config>/standard-paths/config.toml` for the running platform.
pub fn default_path() -> crate::Result<PathBuf> {
    settings_file(crate::resolver::current())
}

fn settings_file(resolver: &dyn Resolver) -> crate::Result<PathBuf> {
    // Config ignores the identity on XDG and macOS, so the segment is added here.
    let config = crate::resolve_writable_path(resolver, Location::GenericConfig, None)?;
    Ok(config.join(SETTINGS_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Reads the settings file. A missing or blank file means default settings.
pub fn load(path: &Path) -> Result<Settings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read settings file {}", path.display()))
        }
    };

    if raw.trim().is_empty() {
        return Ok(Settings::default());
    }
    toml::from_str(&raw)
        .with_context(|| format!("invalid settings file {}", path.display()))
}

/// Writes `settings`, creating the settings directory on first use.
pub fn save(path: &Path, settings: &Settings) -> Result<()> {
    let dir = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create settings directory {}", dir.display()))?;
    }

    let mut raw = toml::to_string_pretty(settings).context("failed to encode settings")?;
    if !raw.ends_with('\n') {
        raw.push('\n');
    }
    fs::write(path, raw)
        .with_context(|| format!("failed to write settings file {}", path.display()))?;
    debug!(path = %path.display(), identity = ?settings.identity, "saved settings");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert_eq!(load(&path).unwrap(), Settings::default());

        fs::write(&path, "  \n").unwrap();
        assert_eq!(load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn save_then_load_preserves_identity() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let settings = Settings {
            identity: Identity::new("Yksom", "uranusjr"),
        };

        save(&path, &settings).unwrap();
        assert_eq!(load(&path).unwrap(), settings);
        assert!(fs::read_to_string(&path).unwrap().ends_with('\n'));
    }

    #[test]
    fn invalid_toml_names_the_settings_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[identity\n").unwrap();

        let message = format!("{:#}", load(&path).unwrap_err());
        assert!(message.contains("invalid settings file"));
        assert!(message.contains(&path.display().to_string()));
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let message = format!("{:#}", load(dir.path()).unwrap_err());
        assert!(message.contains("failed to read settings file"));
    }

    #[cfg(unix)]
    #[test]
    fn settings_live_in_their_own_config_directory() {
        use crate::env::FixedEnvironment;
        use crate::resolver::XdgResolver;

        let resolver = XdgResolver::new(FixedEnvironment::new("/home/user", "/tmp"));
        assert_eq!(
            settings_file(&resolver).unwrap(),
            PathBuf::from("/home/user/.config/standard-paths/config.toml")
        );
    }

    #[test]
    fn settings_on_macos_get_their_own_preferences_directory() {
        use crate::env::FixedEnvironment;
        use crate::resolver::{MacDomain, MacFolder, MacFolderApi, MacResolver};
        use crate::sys::NativeError;

        struct Library;
        impl MacFolderApi for Library {
            fn find_folder(
                &self,
                folder: MacFolder,
                _domain: MacDomain,
            ) -> Result<PathBuf, NativeError> {
                Ok(PathBuf::from("/Users/me/Library").join(format!("{folder:?}")))
            }

            fn downloads_folder(&self) -> Result<PathBuf, NativeError> {
                Ok(PathBuf::from("/Users/me/Downloads"))
            }
        }

        let resolver = MacResolver::new(FixedEnvironment::new("/Users/me", "/tmp"), Library);
        assert_eq!(
            settings_file(&resolver).unwrap(),
            PathBuf::from("/Users/me/Library/Preferences/standard-paths/config.toml")
        );
    }
}
