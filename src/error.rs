use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{name}: failed to execute {}: {source}", path.display())]
    Spawn {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{name}: failed to wait for child process: {source}")]
    Wait {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("error retrieving current directory: {0}")]
    CurrentDir(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, ShellError>;
