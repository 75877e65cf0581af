//! Application identity used to namespace application-specific locations.
//!
//! Resolvers take an explicit [`Identity`]. The process-wide slot behind
//! [`configure`] and [`get_config`] exists for callers that prefer ambient
//! configuration; it is a single-writer slot and does not make a
//! `configure` racing against a resolution call atomic.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

static CURRENT: RwLock<Identity> = RwLock::new(Identity::empty());

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub application_name: String,
    #[serde(default)]
    pub organization_name: String,
}

impl Identity {
    pub fn new(application_name: impl Into<String>, organization_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            organization_name: organization_name.into(),
        }
    }

    pub const fn empty() -> Self {
        Self {
            application_name: String::new(),
            organization_name: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.application_name.is_empty() && self.organization_name.is_empty()
    }

    /// Appends the organization and then the application name to `base`,
    /// skipping whichever is empty.
    pub fn join(&self, base: impl AsRef<Path>) -> PathBuf {
        let mut path = base.as_ref().to_path_buf();
        if !self.organization_name.is_empty() {
            path.push(&self.organization_name);
        }
        if !self.application_name.is_empty() {
            path.push(&self.application_name);
        }
        path
    }
}

/// Replaces the process-wide identity.
pub fn configure(application_name: impl Into<String>, organization_name: impl Into<String>) {
    let identity = Identity::new(application_name, organization_name);
    *CURRENT.write().unwrap_or_else(PoisonError::into_inner) = identity;
}

/// Returns a copy of the process-wide identity.
pub fn get_config() -> Identity {
    CURRENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
