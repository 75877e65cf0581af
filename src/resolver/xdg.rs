//! Free Desktop base directory rules, used on Unix systems other than macOS.

use std::ffi::OsString;
use std::path::PathBuf;

use super::{dedup_paths, runtime, user_dirs, Resolver};
use crate::env::{expand_tilde, Environment, SystemEnvironment};
use crate::error::{Error, Result};
use crate::identity::Identity;
use crate::location::Location;

const DEFAULT_CONFIG_DIRS: &str = "/etc/xdg";
const DEFAULT_DATA_DIRS: [&str; 2] = ["/usr/local/share", "/usr/share"];

#[derive(Debug, Clone, Default)]
pub struct XdgResolver<E = SystemEnvironment> {
    env: E,
}

impl<E: Environment> XdgResolver<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    fn home(&self) -> Result<PathBuf> {
        self.env.home_dir().ok_or(Error::NoHomeDir)
    }

    /// `$var` when set, otherwise `~/<fallback>`.
    fn base_dir(&self, var: &str, fallback: &str) -> Result<PathBuf> {
        match self.env.var(var) {
            Some(value) => Ok(expand_tilde(&value, self.env.home_dir().as_deref())),
            None => Ok(self.home()?.join(fallback)),
        }
    }

    fn generic_cache(&self) -> Result<PathBuf> {
        self.base_dir("XDG_CACHE_HOME", ".cache")
    }

    fn generic_data(&self) -> Result<PathBuf> {
        self.base_dir("XDG_DATA_HOME", ".local/share")
    }

    fn config(&self) -> Result<PathBuf> {
        self.base_dir("XDG_CONFIG_HOME", ".config")
    }

    fn user_dir(&self, location: Location) -> Result<PathBuf> {
        let (key, fallback) = match location {
            Location::Desktop => ("DESKTOP", "Desktop"),
            Location::Documents => ("DOCUMENTS", "Documents"),
            Location::Pictures => ("PICTURES", "Pictures"),
            Location::Music => ("MUSIC", "Music"),
            Location::Movies => ("VIDEOS", "Videos"),
            Location::Download => ("DOWNLOAD", "Downloads"),
            _ => return Ok(PathBuf::new()),
        };

        match user_dirs::lookup(&self.config()?, key, &self.env)? {
            Some(path) => Ok(path),
            None => Ok(self.home()?.join(fallback)),
        }
    }

    /// Absolute entries of `$XDG_DATA_DIRS`, deduplicated.
    fn data_dirs(&self) -> Vec<PathBuf> {
        match self.env.var("XDG_DATA_DIRS") {
            Some(value) => dedup_paths(
                std::env::split_paths(&value)
                    .filter(|path| path.is_absolute())
                    .collect(),
            ),
            None => DEFAULT_DATA_DIRS.iter().map(PathBuf::from).collect(),
        }
    }

    /// Entries of `$XDG_CONFIG_DIRS`. Empty entries are skipped; repeats are
    /// removed later together with the writable path.
    fn config_dirs(&self) -> Vec<PathBuf> {
        let value = self
            .env
            .var("XDG_CONFIG_DIRS")
            .unwrap_or_else(|| OsString::from(DEFAULT_CONFIG_DIRS));
        std::env::split_paths(&value)
            .filter(|path| !path.as_os_str().is_empty())
            .collect()
    }
}

impl<E: Environment> Resolver for XdgResolver<E> {
    fn writable_path(&self, location: Location, identity: &Identity) -> Result<PathBuf> {
        match location {
            Location::Home => self.home(),
            Location::Temp => Ok(self.env.temp_dir()),
            Location::GenericCache => self.generic_cache(),
            Location::Cache => Ok(identity.join(self.generic_cache()?)),
            Location::GenericData => self.generic_data(),
            Location::AppData | Location::AppLocalData => Ok(identity.join(self.generic_data()?)),
            Location::Config | Location::GenericConfig => self.config(),
            // No convention exists for logs; keep them next to the cache.
            Location::Log => Ok(identity.join(self.generic_cache()?).join("log")),
            Location::Runtime => runtime::resolve(&self.env),
            Location::Desktop
            | Location::Documents
            | Location::Pictures
            | Location::Music
            | Location::Movies
            | Location::Download => self.user_dir(location),
            Location::Fonts => Ok(self.home()?.join(".fonts")),
            Location::Applications => Ok(self.generic_data()?.join("applications")),
        }
    }

    fn standard_paths(&self, location: Location, identity: &Identity) -> Result<Vec<PathBuf>> {
        let mut paths = vec![self.writable_path(location, identity)?];
        match location {
            // Not verbatim: the aggregated list drops repeats, including a
            // config dir equal to the writable path.
            Location::Config | Location::GenericConfig => paths.extend(self.config_dirs()),
            Location::GenericData => paths.extend(self.data_dirs()),
            Location::Applications => paths.extend(
                self.data_dirs()
                    .into_iter()
                    .map(|dir| dir.join("applications")),
            ),
            Location::AppData | Location::AppLocalData => paths.extend(
                self.data_dirs()
                    .into_iter()
                    .map(|dir| identity.join(dir)),
            ),
            _ => return Ok(paths),
        }
        Ok(dedup_paths(paths))
    }
}
