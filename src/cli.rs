use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use standard_paths::Location;

#[derive(Debug, Parser)]
#[command(
    name = "standard-paths",
    version,
    about = "Print standard directory locations for an application"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,
    /// Settings file holding the default identity.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the directory files of a location should be written to.
    Writable {
        #[arg(value_enum)]
        location: Location,
        #[command(flatten)]
        identity: IdentityArgs,
    },
    /// Print every directory of a location, highest priority first.
    Standard {
        #[arg(value_enum)]
        location: Location,
        #[command(flatten)]
        identity: IdentityArgs,
    },
    /// List the known locations.
    Locations,
    Completions {
        #[arg(long, value_enum)]
        shell: Option<ShellArg>,
    },
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct IdentityArgs {
    /// Application name, overriding the settings file.
    #[arg(long = "app")]
    pub application_name: Option<String>,
    /// Organization name, overriding the settings file.
    #[arg(long = "org")]
    pub organization_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum ShellArg {
    Bash,
    Zsh,
    Fish,
    Elvish,
    Powershell,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the settings file location.
    Path,
    /// Print the identity stored in the settings file.
    Get,
    /// Store a default identity in the settings file.
    Set {
        #[command(flatten)]
        identity: IdentityArgs,
    },
    /// Remove the stored identity.
    Reset,
}
