//! Access to the process environment.
//!
//! Resolvers read everything they need through [`Environment`], so the same
//! resolution rules can run against the live process or a fixed snapshot.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

pub trait Environment: Send + Sync {
    /// Returns the value of `key`, treating an empty value as unset.
    ///
    /// Values are raw OS strings; a path that is not valid UTF-8 is still a path.
    fn var(&self, key: &str) -> Option<OsString>;

    fn home_dir(&self) -> Option<PathBuf>;

    fn temp_dir(&self) -> PathBuf;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key).filter(|value| !value.is_empty())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir().filter(|home| !home.as_os_str().is_empty())
    }

    fn temp_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }
}

/// An in-memory environment with a fixed home, temp directory and variables.
#[derive(Debug, Clone)]
pub struct FixedEnvironment {
    home: Option<PathBuf>,
    temp: PathBuf,
    vars: BTreeMap<String, OsString>,
}

impl FixedEnvironment {
    pub fn new(home: impl Into<PathBuf>, temp: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
            temp: temp.into(),
            vars: BTreeMap::new(),
        }
    }

    /// An environment in which no home directory can be determined.
    pub fn homeless(temp: impl Into<PathBuf>) -> Self {
        Self {
            home: None,
            temp: temp.into(),
            vars: BTreeMap::new(),
        }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl Environment for FixedEnvironment {
    fn var(&self, key: &str) -> Option<OsString> {
        self.vars.get(key).filter(|value| !value.is_empty()).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn temp_dir(&self) -> PathBuf {
        self.temp.clone()
    }
}

/// Expands a leading `~` component to the home directory.
#[cfg_attr(not(unix), allow(dead_code))]
pub(crate) fn expand_tilde(value: impl AsRef<OsStr>, home: Option<&Path>) -> PathBuf {
    let path = Path::new(value.as_ref());
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) if rest.as_os_str().is_empty() => home.to_path_buf(),
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
