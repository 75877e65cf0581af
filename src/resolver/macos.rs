//! macOS rules, resolved through the folder manager.

use std::path::PathBuf;

use super::Resolver;
use crate::env::Environment;
use crate::error::{Error, Result};
use crate::identity::Identity;
use crate::location::Location;
use crate::sys::NativeError;

/// Folder manager folder types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacFolder {
    Applications,
    ApplicationSupport,
    CachedData,
    Desktop,
    Documents,
    Fonts,
    Logs,
    MovieDocuments,
    MusicDocuments,
    PictureDocuments,
    Preferences,
    Temporary,
}

impl MacFolder {
    /// The four-character type code passed to the folder manager.
    pub const fn type_code(self) -> u32 {
        match self {
            MacFolder::Applications => four_cc(b"apps"),
            MacFolder::ApplicationSupport => four_cc(b"asup"),
            MacFolder::CachedData => four_cc(b"cach"),
            MacFolder::Desktop => four_cc(b"desk"),
            MacFolder::Documents => four_cc(b"docs"),
            MacFolder::Fonts => four_cc(b"font"),
            MacFolder::Logs => four_cc(b"logs"),
            MacFolder::MovieDocuments => four_cc(b"mdoc"),
            // 'µdoc' in Mac Roman.
            MacFolder::MusicDocuments => 0xb564_6f63,
            MacFolder::PictureDocuments => four_cc(b"pdoc"),
            MacFolder::Preferences => four_cc(b"pref"),
            MacFolder::Temporary => four_cc(b"temp"),
        }
    }

    pub fn for_location(location: Location) -> Self {
        match location {
            Location::Config | Location::GenericConfig => MacFolder::Preferences,
            Location::Desktop => MacFolder::Desktop,
            Location::Documents => MacFolder::Documents,
            Location::Fonts => MacFolder::Fonts,
            Location::Applications => MacFolder::Applications,
            Location::Music => MacFolder::MusicDocuments,
            Location::Movies => MacFolder::MovieDocuments,
            Location::Pictures => MacFolder::PictureDocuments,
            Location::Temp => MacFolder::Temporary,
            Location::GenericData
            | Location::Runtime
            | Location::AppData
            | Location::AppLocalData => MacFolder::ApplicationSupport,
            Location::GenericCache | Location::Cache => MacFolder::CachedData,
            Location::Log => MacFolder::Logs,
            _ => MacFolder::Desktop,
        }
    }
}

const fn four_cc(code: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*code)
}

/// Folder manager search domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacDomain {
    User,
    AppropriateDisk,
}

impl MacDomain {
    pub const fn code(self) -> i16 {
        match self {
            MacDomain::User => -32763,
            MacDomain::AppropriateDisk => -32767,
        }
    }

    pub fn for_location(location: Location) -> Self {
        match location {
            Location::GenericData
            | Location::AppData
            | Location::AppLocalData
            | Location::GenericCache
            | Location::Cache
            | Location::Runtime
            | Location::Log => MacDomain::User,
            _ => MacDomain::AppropriateDisk,
        }
    }
}

pub trait MacFolderApi: Send + Sync {
    fn find_folder(&self, folder: MacFolder, domain: MacDomain) -> Result<PathBuf, NativeError>;

    fn downloads_folder(&self) -> Result<PathBuf, NativeError>;
}

#[derive(Debug, Clone, Default)]
pub struct MacResolver<E, F> {
    env: E,
    folders: F,
}

impl<E: Environment, F: MacFolderApi> MacResolver<E, F> {
    pub fn new(env: E, folders: F) -> Self {
        Self { env, folders }
    }

    fn native_path(
        &self,
        location: Location,
        domain: MacDomain,
        identity: &Identity,
    ) -> Result<PathBuf> {
        if location == Location::Download {
            return self
                .folders
                .downloads_folder()
                .map_err(|native| Error::native(location, native));
        }

        let path = self
            .folders
            .find_folder(MacFolder::for_location(location), domain)
            .map_err(|native| Error::native(location, native))?;

        match location {
            Location::AppData | Location::AppLocalData | Location::Cache | Location::Log => {
                Ok(identity.join(path))
            }
            _ => Ok(path),
        }
    }
}

impl<E: Environment, F: MacFolderApi> Resolver for MacResolver<E, F> {
    fn writable_path(&self, location: Location, identity: &Identity) -> Result<PathBuf> {
        match location {
            Location::Home => self.env.home_dir().ok_or(Error::NoHomeDir),
            Location::Temp => Ok(self.env.temp_dir()),
            _ => self.native_path(location, MacDomain::for_location(location), identity),
        }
    }

    fn standard_paths(&self, location: Location, identity: &Identity) -> Result<Vec<PathBuf>> {
        let mut paths = vec![self.writable_path(location, identity)?];
        if matches!(
            location,
            Location::GenericData
                | Location::AppData
                | Location::AppLocalData
                | Location::GenericCache
                | Location::Cache
        ) {
            match self.native_path(location, MacDomain::AppropriateDisk, identity) {
                Ok(path) if !paths.contains(&path) => paths.push(path),
                Ok(_) => {}
                Err(error) => tracing::debug!(%error, "skipping appropriate-disk lookup"),
            }
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedEnvironment;
    use std::collections::HashMap;

    /// Folder table keyed by (folder, domain), like a small Library layout.
    struct FakeFolders {
        folders: HashMap<(MacFolder, MacDomain), PathBuf>,
        downloads: Option<PathBuf>,
    }

    impl FakeFolders {
        fn library() -> Self {
            let user = |name: &str| PathBuf::from("/Users/me").join(name);
            let mut folders = HashMap::new();
            for domain in [MacDomain::User, MacDomain::AppropriateDisk] {
                folders.insert((MacFolder::Desktop, domain), user("Desktop"));
                folders.insert((MacFolder::Documents, domain), user("Documents"));
                folders.insert((MacFolder::Preferences, domain), user("Library/Preferences"));
            }
            folders.insert(
                (MacFolder::ApplicationSupport, MacDomain::User),
                user("Library/Application Support"),
            );
            folders.insert(
                (MacFolder::ApplicationSupport, MacDomain::AppropriateDisk),
                PathBuf::from("/Library/Application Support"),
            );
            folders.insert((MacFolder::CachedData, MacDomain::User), user("Library/Caches"));
            folders.insert(
                (MacFolder::CachedData, MacDomain::AppropriateDisk),
                user("Library/Caches"),
            );
            folders.insert((MacFolder::Logs, MacDomain::User), user("Library/Logs"));
            Self {
                folders,
                downloads: Some(user("Downloads")),
            }
        }
    }

    impl MacFolderApi for FakeFolders {
        fn find_folder(&self, folder: MacFolder, domain: MacDomain) -> Result<PathBuf, NativeError> {
            self.folders
                .get(&(folder, domain))
                .cloned()
                .ok_or_else(|| NativeError::new(-43, "folder not found"))
        }

        fn downloads_folder(&self) -> Result<PathBuf, NativeError> {
            self.downloads
                .clone()
                .ok_or_else(|| NativeError::new(-1, "no downloads folder"))
        }
    }

    fn resolver() -> MacResolver<FixedEnvironment, FakeFolders> {
        MacResolver::new(
            FixedEnvironment::new("/Users/me", "/private/tmp"),
            FakeFolders::library(),
        )
    }

    #[test]
    fn type_codes_match_the_folder_manager() {
        assert_eq!(MacFolder::Desktop.type_code(), 0x6465_736b);
        assert_eq!(MacFolder::ApplicationSupport.type_code(), 0x6173_7570);
        assert_eq!(MacDomain::User.code(), -32763);
    }

    #[test]
    fn app_specific_locations_append_identity() {
        let id = Identity::new("Yksom", "uranusjr");
        let resolver = resolver();
        assert_eq!(
            resolver.writable_path(Location::AppData, &id).unwrap(),
            PathBuf::from("/Users/me/Library/Application Support/uranusjr/Yksom")
        );
        assert_eq!(
            resolver.writable_path(Location::Cache, &id).unwrap(),
            PathBuf::from("/Users/me/Library/Caches/uranusjr/Yksom")
        );
        assert_eq!(
            resolver.writable_path(Location::Log, &id).unwrap(),
            PathBuf::from("/Users/me/Library/Logs/uranusjr/Yksom")
        );
        assert_eq!(
            resolver.writable_path(Location::Config, &id).unwrap(),
            PathBuf::from("/Users/me/Library/Preferences")
        );
        assert_eq!(
            resolver.writable_path(Location::GenericData, &id).unwrap(),
            PathBuf::from("/Users/me/Library/Application Support")
        );
    }

    #[test]
    fn home_and_temp_bypass_the_folder_manager() {
        let id = Identity::empty();
        let resolver = resolver();
        assert_eq!(
            resolver.writable_path(Location::Home, &id).unwrap(),
            PathBuf::from("/Users/me")
        );
        assert_eq!(
            resolver.writable_path(Location::Temp, &id).unwrap(),
            PathBuf::from("/private/tmp")
        );
    }

    #[test]
    fn unsupported_folder_reports_native_code() {
        let error = resolver()
            .writable_path(Location::Fonts, &Identity::empty())
            .unwrap_err();
        assert!(matches!(
            error,
            Error::Location { location: Location::Fonts, code: Some(-43), .. }
        ));
    }

    #[test]
    fn download_failure_is_an_error() {
        let mut folders = FakeFolders::library();
        folders.downloads = None;
        let resolver = MacResolver::new(FixedEnvironment::new("/Users/me", "/tmp"), folders);
        let error = resolver
            .writable_path(Location::Download, &Identity::empty())
            .unwrap_err();
        assert_eq!(error.location_kind(), Some(Location::Download));
    }

    #[test]
    fn standard_paths_add_the_appropriate_disk_domain() {
        let id = Identity::new("Yksom", "uranusjr");
        let resolver = resolver();
        assert_eq!(
            resolver.standard_paths(Location::AppData, &id).unwrap(),
            vec![
                PathBuf::from("/Users/me/Library/Application Support/uranusjr/Yksom"),
                PathBuf::from("/Library/Application Support/uranusjr/Yksom"),
            ]
        );
        // Same folder in both domains is listed once.
        assert_eq!(
            resolver.standard_paths(Location::Cache, &id).unwrap(),
            vec![PathBuf::from("/Users/me/Library/Caches/uranusjr/Yksom")]
        );
        assert_eq!(
            resolver.standard_paths(Location::Desktop, &id).unwrap(),
            vec![PathBuf::from("/Users/me/Desktop")]
        );
    }

    #[test]
    fn missing_appropriate_disk_folder_is_skipped() {
        let mut folders = FakeFolders::library();
        folders
            .folders
            .remove(&(MacFolder::CachedData, MacDomain::AppropriateDisk));
        let resolver = MacResolver::new(FixedEnvironment::new("/Users/me", "/tmp"), folders);
        assert_eq!(
            resolver
                .standard_paths(Location::GenericCache, &Identity::empty())
                .unwrap(),
            vec![PathBuf::from("/Users/me/Library/Caches")]
        );
    }
}
