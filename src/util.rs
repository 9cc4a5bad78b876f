use crate::config::Config;
use colored::*;
use glob::{MatchOptions, Pattern};
use std::io::{Error, ErrorKind, Result};
use std::path::{Path, PathBuf};

/// Print a diagnostic note on stderr when running verbosely.
pub fn note(verbose: bool, msg: &str) {
    if verbose {
        eprintln!("{} {}", "note".cyan(), msg);
    }
}

/// Resolve the directory to scan as an absolute path. `None` means the
/// current working directory.
pub fn working_directory(dir: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match dir {
        Some(d) if d.is_absolute() => d.to_owned(),
        Some(d) => cwd.join(d),
        None => cwd,
    })
}

/// Find the base names of all entries directly in `dir` whose name matches
/// the glob `pattern`. Directories are skipped. Names are returned in
/// directory enumeration order.
pub fn find_headers(
    dir: &Path,
    pattern: &str,
    verbose: bool,
) -> Result<Vec<String>> {
    let pat = Pattern::new(pattern).map_err(|e| {
        Error::new(ErrorKind::InvalidInput, format!("{}: {}", pattern, e))
    })?;
    let opts = MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };

    let mut result = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let e = entry?;
        let name = match e.file_name().into_string() {
            Ok(name) => name,
            Err(name) => {
                note(verbose, &format!("{:?}: skipping non-utf8 name", name));
                continue;
            }
        };
        if !pat.matches_with(&name, opts) {
            continue;
        }
        if e.path().is_dir() {
            note(verbose, &format!("{}: skipping directory", name));
            continue;
        }
        note(verbose, &format!("{}: matched", name));
        result.push(name);
    }

    Ok(result)
}

/// Read the given file into a config.
pub fn read_config(path: &Path) -> Result<Config> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| Error::new(e.kind(), format!("{}: {}", path.display(), e)))?;
    match toml::from_str(&data) {
        Ok(config) => Ok(config),
        Err(e) => Err(Error::new(
            ErrorKind::Other,
            format!("{}: {}", path.display(), e),
        )),
    }
}
