mod cli;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use standard_paths::config::{self, Settings};
use standard_paths::{Identity, Location};

use crate::cli::{Cli, Commands, ConfigCommand, IdentityArgs, ShellArg};

#[derive(Debug, Serialize)]
struct WritableOutput<'a> {
    location: Location,
    identity: &'a Identity,
    path: &'a Path,
}

#[derive(Debug, Serialize)]
struct StandardOutput<'a> {
    location: Location,
    identity: &'a Identity,
    paths: &'a [PathBuf],
}

#[derive(Debug, Serialize)]
struct CatalogEntry {
    name: &'static str,
    generic: bool,
    can_be_empty: bool,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Writable { location, identity } => {
            let identity = load_identity(cli.config.as_deref(), &identity)?;
            writable(location, &identity, cli.json)
        }
        Commands::Standard { location, identity } => {
            let identity = load_identity(cli.config.as_deref(), &identity)?;
            standard(location, &identity, cli.json)
        }
        Commands::Locations => locations(cli.json),
        Commands::Completions { shell } => completions(shell),
        Commands::Config { command } => config_command(cli.config.as_deref(), command, cli.json),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok();
}

fn settings_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config::default_path().context("failed to resolve settings location"),
    }
}

/// Settings-file identity with command-line overrides applied, installed as
/// the process-wide identity.
fn load_identity(explicit: Option<&Path>, overrides: &IdentityArgs) -> Result<Identity> {
    let settings = config::load(&settings_path(explicit)?)?;
    let mut identity = settings.identity;
    if let Some(name) = &overrides.application_name {
        identity.application_name = name.clone();
    }
    if let Some(name) = &overrides.organization_name {
        identity.organization_name = name.clone();
    }

    standard_paths::configure(
        identity.application_name.clone(),
        identity.organization_name.clone(),
    );
    Ok(identity)
}

fn writable(location: Location, identity: &Identity, json: bool) -> Result<()> {
    let path = standard_paths::get_writable_path(location, None)
        .with_context(|| format!("failed to resolve {location}"))?;

    if json {
        let output = WritableOutput {
            location,
            identity,
            path: &path,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

fn standard(location: Location, identity: &Identity, json: bool) -> Result<()> {
    let paths = standard_paths::get_standard_paths(location, None)
        .with_context(|| format!("failed to resolve {location}"))?;

    if json {
        let output = StandardOutput {
            location,
            identity,
            paths: &paths,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for path in &paths {
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn locations(json: bool) -> Result<()> {
    let entries: Vec<CatalogEntry> = Location::ALL
        .into_iter()
        .map(|location| CatalogEntry {
            name: location.as_str(),
            generic: location.is_generic(),
            can_be_empty: location.can_be_empty(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        let scope = if entry.generic { "generic" } else { "application" };
        let empty = if entry.can_be_empty {
            "may be empty"
        } else {
            "never empty"
        };
        println!("{:<16} {:<12} {}", entry.name, scope, empty);
    }
    Ok(())
}

fn completions(shell: Option<ShellArg>) -> Result<()> {
    let shell = match shell {
        Some(ShellArg::Bash) => Shell::Bash,
        Some(ShellArg::Zsh) => Shell::Zsh,
        Some(ShellArg::Fish) => Shell::Fish,
        Some(ShellArg::Elvish) => Shell::Elvish,
        Some(ShellArg::Powershell) => Shell::PowerShell,
        None => Shell::from_env().unwrap_or(Shell::Bash),
    };

    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "standard-paths", &mut std::io::stdout());
    Ok(())
}

fn config_command(explicit: Option<&Path>, command: ConfigCommand, json: bool) -> Result<()> {
    let path = settings_path(explicit)?;
    match command {
        ConfigCommand::Path => println!("{}", path.display()),
        ConfigCommand::Get => {
            let settings = config::load(&path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&settings.identity)?);
            } else {
                println!("application_name = {:?}", settings.identity.application_name);
                println!("organization_name = {:?}", settings.identity.organization_name);
            }
        }
        ConfigCommand::Set { identity } => {
            let mut settings = config::load(&path)?;
            if let Some(name) = identity.application_name {
                settings.identity.application_name = name;
            }
            if let Some(name) = identity.organization_name {
                settings.identity.organization_name = name;
            }
            config::save(&path, &settings)?;
            println!("Saved identity to {}", path.display());
        }
        ConfigCommand::Reset => {
            config::save(&path, &Settings::default())?;
            println!("Reset identity in {}", path.display());
        }
    }
    Ok(())
}
