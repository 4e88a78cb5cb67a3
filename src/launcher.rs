use std::fmt;
use std::path::Path;
use std::process;

use log::debug;

use crate::error::{Result, ShellError};

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Code(i32),
    Signal(i32),
    Unknown,
}

impl ExitStatus {
    pub fn success(&self) -> bool {
        matches!(self, ExitStatus::Code(0))
    }
}

impl From<process::ExitStatus> for ExitStatus {
    fn from(status: process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ExitStatus::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ExitStatus::Signal(signal);
            }
        }
        ExitStatus::Unknown
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Code(code) => write!(f, "exit code {code}"),
            ExitStatus::Signal(signal) => write!(f, "terminated by signal {signal}"),
            ExitStatus::Unknown => write!(f, "unknown status"),
        }
    }
}

/// Runs an external program to completion.
pub trait Launcher {
    /// Starts the program at `path` with `name` as its zeroth argument,
    /// then blocks until it exits. `cwd` becomes the child's working
    /// directory; standard streams are inherited.
    fn launch(
        &mut self,
        path: &Path,
        name: &str,
        arguments: &[String],
        cwd: &Path,
    ) -> Result<ExitStatus>;
}

/// Spawns real child processes.
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(
        &mut self,
        path: &Path,
        name: &str,
        arguments: &[String],
        cwd: &Path,
    ) -> Result<ExitStatus> {
        let mut command = process::Command::new(path);
        command.args(arguments).current_dir(cwd);
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.arg0(name);
        }

        let mut child = command.spawn().map_err(|source| ShellError::Spawn {
            name: name.to_string(),
            path: path.to_path_buf(),
            source,
        })?;
        debug!("spawned {} as pid {}", path.display(), child.id());

        // wait() reaps the child, so no zombie outlives this call.
        let status = child.wait().map_err(|source| ShellError::Wait {
            name: name.to_string(),
            source,
        })?;
        let status = ExitStatus::from(status);
        if status.success() {
            debug!("{name} finished successfully");
        } else {
            debug!("{name} finished with {status}");
        }
        Ok(status)
    }
}
