//! Lookups in the xdg-user-dirs `user-dirs.dirs` file.
//!
//! Lines look like `XDG_DESKTOP_DIR="$HOME/Desktop"`. Values may reference
//! environment variables as `$NAME` or `${NAME}`; unknown references are
//! left as written.

use regex::Regex;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::env::Environment;
use crate::error::{Error, Result};

pub(crate) const FILE_NAME: &str = "user-dirs.dirs";

static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^XDG_([A-Z0-9_]+?)_DIR=(.*)$").expect("user-dirs entry pattern is valid")
});

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("variable pattern is valid")
});

/// Looks up `key` (e.g. `DESKTOP`) in `<config_dir>/user-dirs.dirs`.
///
/// A missing file, missing key or empty value yields `Ok(None)`.
pub(crate) fn lookup(
    config_dir: &Path,
    key: &str,
    env: &impl Environment,
) -> Result<Option<PathBuf>> {
    let file = config_dir.join(FILE_NAME);
    let raw = match fs::read_to_string(&file) {
        Ok(raw) => raw,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(Error::io(file, error)),
    };

    Ok(parse(&raw)
        .remove(key)
        .filter(|value| !value.is_empty())
        .map(|value| PathBuf::from(expand_vars(&value, env))))
}

/// Parses every `XDG_<KEY>_DIR=` entry. Later entries win.
pub(crate) fn parse(raw: &str) -> HashMap<String, String> {
    raw.lines()
        .filter_map(|line| ENTRY.captures(line.trim_end()))
        .map(|captures| {
            let value = captures[2].trim().trim_matches('"').to_string();
            (captures[1].to_string(), value)
        })
        .collect()
}

/// Substitutes `$NAME` and `${NAME}` references. Values are spliced in as OS
/// strings, so a non-UTF-8 variable survives expansion.
pub(crate) fn expand_vars(value: &str, env: &impl Environment) -> OsString {
    let mut expanded = OsString::with_capacity(value.len());
    let mut last = 0;
    for captures in VARIABLE.captures_iter(value) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let name = captures
            .get(1)
            .or_else(|| captures.get(2))
            .map_or("", |name| name.as_str());

        expanded.push(&value[last..whole.start()]);
        match lookup_var(name, env) {
            Some(replacement) => expanded.push(replacement),
            None => expanded.push(whole.as_str()),
        }
        last = whole.end();
    }
    expanded.push(&value[last..]);
    expanded
}

fn lookup_var(name: &str, env: &impl Environment) -> Option<OsString> {
    env.var(name).or_else(|| {
        (name == "HOME")
            .then(|| env.home_dir())
            .flatten()
            .map(PathBuf::into_os_string)
    })
}
