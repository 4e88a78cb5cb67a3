use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::ShellError;

/// Session state shared by the builtins and the launcher.
///
/// `current_dir` is the directory `pwd` reports and children start in. It
/// only changes through [`Environment::change_dir`]. Variable lookups
/// consult `overrides` first and fall back to the live process environment,
/// so a value such as `PATH` is re-read on every call.
#[derive(Debug, Clone)]
pub struct Environment {
    current_dir: PathBuf,
    overrides: HashMap<String, Option<OsString>>,
}

impl Environment {
    /// Captures the process's working directory. If it cannot be read the
    /// session starts in `$PWD` when that is still a directory, else `/`,
    /// and the error is handed back for the caller to report.
    pub fn from_process() -> (Self, Option<ShellError>) {
        let (dir, err) = start_dir(stdenv::current_dir(), stdenv::var_os("PWD"));
        (Environment::with_current_dir(dir), err)
    }

    pub fn with_current_dir(current_dir: impl Into<PathBuf>) -> Self {
        Environment {
            current_dir: current_dir.into(),
            overrides: HashMap::new(),
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn get_var(&self, key: &str) -> Option<OsString> {
        match self.overrides.get(key) {
            Some(value) => value.clone(),
            None => stdenv::var_os(key),
        }
    }

    /// Overrides a variable for lookups made through this environment. The
    /// process environment is left untouched.
    pub fn set_var(&mut self, key: impl Into<String>, value: impl AsRef<OsStr>) {
        self.overrides
            .insert(key.into(), Some(value.as_ref().to_os_string()));
    }

    /// Hides a variable from lookups made through this environment.
    pub fn remove_var(&mut self, key: impl Into<String>) {
        self.overrides.insert(key.into(), None);
    }

    /// Joins a relative path onto the current directory.
    pub fn absolute(&self, path: impl AsRef<Path>) -> PathBuf {
        self.current_dir.join(path)
    }

    /// Moves to `target` if it names an existing directory. The stored path
    /// is canonicalized so `..` and symlinks do not accumulate.
    pub fn change_dir(&mut self, target: impl AsRef<Path>) -> io::Result<()> {
        let candidate = self.absolute(target);
        let resolved = fs::canonicalize(&candidate)?;
        if !resolved.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", resolved.display()),
            ));
        }
        // stat through the directory needs search permission on it
        fs::metadata(resolved.join("."))?;
        debug!("changing directory to {}", resolved.display());
        self.current_dir = resolved;
        Ok(())
    }
}

fn start_dir(
    current: io::Result<PathBuf>,
    pwd: Option<OsString>,
) -> (PathBuf, Option<ShellError>) {
    match current {
        Ok(dir) => (dir, None),
        Err(err) => {
            let fallback = pwd
                .map(PathBuf::from)
                .filter(|dir| dir.is_absolute() && dir.is_dir())
                .unwrap_or_else(|| PathBuf::from("/"));
            warn!(
                "cannot read working directory ({err}), starting in {}",
                fallback.display()
            );
            (fallback, Some(ShellError::CurrentDir(err)))
        }
    }
}
