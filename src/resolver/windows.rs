//! Windows rules, resolved through shell folder IDs.

use std::path::PathBuf;

use super::Resolver;
use crate::env::Environment;
use crate::error::{Error, Result};
use crate::identity::Identity;
use crate::location::Location;
use crate::sys::NativeError;

/// Shell special folders (CSIDL values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WinFolder {
    Programs,
    Personal,
    MyMusic,
    MyVideo,
    DesktopDirectory,
    Fonts,
    /// The roaming application data folder.
    AppData,
    LocalAppData,
    MyPictures,
}

impl WinFolder {
    pub const fn csidl(self) -> i32 {
        match self {
            WinFolder::Programs => 0x0002,
            WinFolder::Personal => 0x0005,
            WinFolder::MyMusic => 0x000d,
            WinFolder::MyVideo => 0x000e,
            WinFolder::DesktopDirectory => 0x0010,
            WinFolder::Fonts => 0x0014,
            WinFolder::AppData => 0x001a,
            WinFolder::LocalAppData => 0x001c,
            WinFolder::MyPictures => 0x0027,
        }
    }

    pub fn for_location(location: Location) -> Self {
        match location {
            Location::Applications => WinFolder::Programs,
            Location::Desktop => WinFolder::DesktopDirectory,
            Location::Documents => WinFolder::Personal,
            Location::Fonts => WinFolder::Fonts,
            Location::Music => WinFolder::MyMusic,
            Location::Movies => WinFolder::MyVideo,
            Location::Pictures => WinFolder::MyPictures,
            _ => WinFolder::DesktopDirectory,
        }
    }
}

pub trait WinFolderApi: Send + Sync {
    fn folder_path(&self, folder: WinFolder) -> Result<PathBuf, NativeError>;

    /// The Downloads known folder.
    fn downloads_folder(&self) -> Result<PathBuf, NativeError>;
}

#[derive(Debug, Clone, Default)]
pub struct WindowsResolver<E, F> {
    env: E,
    folders: F,
}

impl<E: Environment, F: WinFolderApi> WindowsResolver<E, F> {
    pub fn new(env: E, folders: F) -> Self {
        Self { env, folders }
    }

    fn folder(&self, location: Location, folder: WinFolder) -> Result<PathBuf> {
        self.folders
            .folder_path(folder)
            .map_err(|native| Error::native(location, native))
    }

    /// Roaming or local app data, joined with `identity`.
    fn data_config_path(&self, location: Location, identity: &Identity) -> Result<PathBuf> {
        let folder = match location {
            Location::AppData | Location::GenericData | Location::GenericConfig => {
                WinFolder::AppData
            }
            _ => WinFolder::LocalAppData,
        };
        Ok(identity.join(self.folder(location, folder)?))
    }
}

impl<E: Environment, F: WinFolderApi> Resolver for WindowsResolver<E, F> {
    fn writable_path(&self, location: Location, identity: &Identity) -> Result<PathBuf> {
        match location {
            Location::Home | Location::Runtime => self.env.home_dir().ok_or(Error::NoHomeDir),
            Location::Temp => Ok(self.env.temp_dir()),
            Location::GenericCache => Ok(self
                .writable_path(Location::GenericData, identity)?
                .join("cache")),
            Location::Cache => Ok(self
                .writable_path(Location::AppLocalData, identity)?
                .join("cache")),
            Location::Log => Ok(self
                .writable_path(Location::AppLocalData, identity)?
                .join("log")),
            Location::Download => match self.folders.downloads_folder() {
                Ok(path) => Ok(path),
                Err(error) => {
                    tracing::debug!(%error, "Downloads known folder unavailable, using documents");
                    self.folder(location, WinFolder::Personal)
                }
            },
            Location::GenericData | Location::GenericConfig => {
                self.data_config_path(location, &Identity::empty())
            }
            Location::AppLocalData | Location::AppData | Location::Config => {
                self.data_config_path(location, identity)
            }
            _ => self.folder(location, WinFolder::for_location(location)),
        }
    }

    fn standard_paths(&self, location: Location, identity: &Identity) -> Result<Vec<PathBuf>> {
        let mut paths = vec![self.writable_path(location, identity)?];
        match location {
            Location::GenericData | Location::GenericConfig => {
                paths.push(self.data_config_path(location, &Identity::empty())?);
            }
            Location::AppLocalData | Location::AppData | Location::Config => {
                paths.push(self.data_config_path(location, identity)?);
            }
            _ => {}
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedEnvironment;
    use std::collections::HashMap;

    struct FakeShell {
        folders: HashMap<WinFolder, PathBuf>,
        downloads: Option<PathBuf>,
    }

    impl FakeShell {
        fn profile() -> Self {
            let user = |name: &str| PathBuf::from(r"C:\Users\me").join(name);
            let folders = HashMap::from([
                (WinFolder::Personal, user("Documents")),
                (WinFolder::DesktopDirectory, user("Desktop")),
                (WinFolder::AppData, user(r"AppData\Roaming")),
                (WinFolder::LocalAppData, user(r"AppData\Local")),
                (WinFolder::MyMusic, user("Music")),
            ]);
            Self {
                folders,
                downloads: Some(user("Downloads")),
            }
        }
    }

    impl WinFolderApi for FakeShell {
        fn folder_path(&self, folder: WinFolder) -> Result<PathBuf, NativeError> {
            self.folders
                .get(&folder)
                .cloned()
                .ok_or_else(|| NativeError::new(0x8007_0002, "file not found"))
        }

        fn downloads_folder(&self) -> Result<PathBuf, NativeError> {
            self.downloads
                .clone()
                .ok_or_else(|| NativeError::new(0x8000_4005, "unspecified failure"))
        }
    }

    fn resolver(shell: FakeShell) -> WindowsResolver<FixedEnvironment, FakeShell> {
        WindowsResolver::new(FixedEnvironment::new(r"C:\Users\me", r"C:\Temp"), shell)
    }

    fn user(name: &str) -> PathBuf {
        PathBuf::from(r"C:\Users\me").join(name)
    }

    #[test]
    fn generic_locations_ignore_identity() {
        let id = Identity::new("Yksom", "uranusjr");
        let resolver = resolver(FakeShell::profile());
        assert_eq!(
            resolver.writable_path(Location::GenericData, &id).unwrap(),
            user(r"AppData\Roaming")
        );
        assert_eq!(
            resolver.writable_path(Location::GenericConfig, &id).unwrap(),
            user(r"AppData\Roaming")
        );
        assert_eq!(
            resolver.writable_path(Location::GenericCache, &id).unwrap(),
            user(r"AppData\Roaming").join("cache")
        );
    }

    #[test]
    fn app_specific_locations_use_roaming_or_local() {
        let id = Identity::new("Yksom", "uranusjr");
        let resolver = resolver(FakeShell::profile());
        let local = user(r"AppData\Local").join("uranusjr").join("Yksom");
        assert_eq!(
            resolver.writable_path(Location::AppData, &id).unwrap(),
            user(r"AppData\Roaming").join("uranusjr").join("Yksom")
        );
        assert_eq!(resolver.writable_path(Location::AppLocalData, &id).unwrap(), local);
        assert_eq!(resolver.writable_path(Location::Config, &id).unwrap(), local);
        assert_eq!(
            resolver.writable_path(Location::Cache, &id).unwrap(),
            local.join("cache")
        );
        assert_eq!(
            resolver.writable_path(Location::Log, &id).unwrap(),
            local.join("log")
        );
    }

    #[test]
    fn runtime_is_the_home_directory() {
        let resolver = resolver(FakeShell::profile());
        let id = Identity::empty();
        assert_eq!(
            resolver.writable_path(Location::Runtime, &id).unwrap(),
            PathBuf::from(r"C:\Users\me")
        );
        assert_eq!(
            resolver.writable_path(Location::Temp, &id).unwrap(),
            PathBuf::from(r"C:\Temp")
        );
    }

    #[test]
    fn download_falls_back_to_documents() {
        let id = Identity::empty();
        assert_eq!(
            resolver(FakeShell::profile())
                .writable_path(Location::Download, &id)
                .unwrap(),
            user("Downloads")
        );

        let mut shell = FakeShell::profile();
        shell.downloads = None;
        assert_eq!(
            resolver(shell).writable_path(Location::Download, &id).unwrap(),
            user("Documents")
        );
    }

    #[test]
    fn folder_failure_carries_location_and_code() {
        let error = resolver(FakeShell::profile())
            .writable_path(Location::Pictures, &Identity::empty())
            .unwrap_err();
        assert!(matches!(
            error,
            Error::Location { location: Location::Pictures, code: Some(0x8007_0002), .. }
        ));
    }

    #[test]
    fn standard_paths_repeat_the_data_folder() {
        let id = Identity::new("Yksom", "uranusjr");
        let resolver = resolver(FakeShell::profile());
        let roaming = user(r"AppData\Roaming");
        assert_eq!(
            resolver.standard_paths(Location::GenericData, &id).unwrap(),
            vec![roaming.clone(), roaming.clone()]
        );
        let app = roaming.join("uranusjr").join("Yksom");
        assert_eq!(
            resolver.standard_paths(Location::AppData, &id).unwrap(),
            vec![app.clone(), app]
        );
        assert_eq!(
            resolver.standard_paths(Location::Music, &id).unwrap(),
            vec![user("Music")]
        );
    }
}
