//! The catalog of standard locations.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A semantic directory role that can be resolved to filesystem paths.
///
/// Generic locations are shared by every application of the same user;
/// the others are namespaced by the [`Identity`](crate::Identity) in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[value(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Desktop,
    Documents,
    Fonts,
    Applications,
    Music,
    Movies,
    Pictures,
    Temp,
    Home,
    Cache,
    GenericData,
    Runtime,
    Config,
    Download,
    GenericCache,
    GenericConfig,
    AppData,
    /// The local (non-roaming) application data directory. Also known as `data`.
    #[value(alias = "data")]
    #[serde(alias = "data")]
    AppLocalData,
    Log,
}

impl Location {
    /// Legacy name for [`Location::AppLocalData`].
    pub const DATA: Location = Location::AppLocalData;

    /// Every distinct location, in catalog order.
    pub const ALL: [Location; 19] = [
        Location::Desktop,
        Location::Documents,
        Location::Fonts,
        Location::Applications,
        Location::Music,
        Location::Movies,
        Location::Pictures,
        Location::Temp,
        Location::Home,
        Location::Cache,
        Location::GenericData,
        Location::Runtime,
        Location::Config,
        Location::Download,
        Location::GenericCache,
        Location::GenericConfig,
        Location::AppData,
        Location::AppLocalData,
        Location::Log,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Location::Desktop => "desktop",
            Location::Documents => "documents",
            Location::Fonts => "fonts",
            Location::Applications => "applications",
            Location::Music => "music",
            Location::Movies => "movies",
            Location::Pictures => "pictures",
            Location::Temp => "temp",
            Location::Home => "home",
            Location::Cache => "cache",
            Location::GenericData => "generic_data",
            Location::Runtime => "runtime",
            Location::Config => "config",
            Location::Download => "download",
            Location::GenericCache => "generic_cache",
            Location::GenericConfig => "generic_config",
            Location::AppData => "app_data",
            Location::AppLocalData => "app_local_data",
            Location::Log => "log",
        }
    }

    /// Whether the location is shared across applications.
    pub fn is_generic(self) -> bool {
        !matches!(
            self,
            Location::Cache
                | Location::Config
                | Location::AppData
                | Location::AppLocalData
                | Location::Log
        )
    }

    /// Whether an empty path is an acceptable resolution result.
    pub fn can_be_empty(self) -> bool {
        matches!(
            self,
            Location::Desktop
                | Location::Fonts
                | Location::Applications
                | Location::Music
                | Location::Movies
                | Location::Pictures
                | Location::Runtime
                | Location::Download
                | Location::GenericCache
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name == "data" {
            return Ok(Location::DATA);
        }
        Location::ALL
            .into_iter()
            .find(|location| location.as_str() == name)
            .ok_or_else(|| Error::UnknownLocation(name.to_string()))
    }
}

/// Anything the resolution entry points accept as a location.
pub trait IntoLocation {
    fn into_location(self) -> Result<Location, Error>;
}

impl IntoLocation for Location {
    fn into_location(self) -> Result<Location, Error> {
        Ok(self)
    }
}

impl IntoLocation for &str {
    fn into_location(self) -> Result<Location, Error> {
        self.parse()
    }
}

impl IntoLocation for &String {
    fn into_location(self) -> Result<Location, Error> {
        self.parse()
    }
}

impl IntoLocation for String {
    fn into_location(self) -> Result<Location, Error> {
        self.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_the_catalog() {
        for location in Location::ALL {
            assert_eq!(location.as_str().parse::<Location>().unwrap(), location);
        }
    }

    #[test]
    fn data_is_an_alias_for_app_local_data() {
        assert_eq!("data".parse::<Location>().unwrap(), Location::AppLocalData);
        assert_eq!(Location::DATA, Location::AppLocalData);
        assert_eq!(Location::DATA.as_str(), "app_local_data");
    }

    #[test]
    fn unknown_name_is_rejected() {
        let error = "bogus".parse::<Location>().unwrap_err();
        assert!(matches!(error, Error::UnknownLocation(name) if name == "bogus"));
    }

    #[test]
    fn application_specific_locations_are_never_empty() {
        for location in Location::ALL {
            if !location.is_generic() {
                assert!(!location.can_be_empty(), "{location} may be empty");
            }
        }
    }

    #[test]
    fn serde_accepts_the_legacy_name() {
        let parsed: Location = serde_json::from_str("\"data\"").unwrap();
        assert_eq!(parsed, Location::AppLocalData);
        assert_eq!(
            serde_json::to_string(&Location::GenericConfig).unwrap(),
            "\"generic_config\""
        );
    }
}
