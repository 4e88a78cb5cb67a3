//! Command resolution and execution core of a small interactive shell.
//!
//! A [`Shell`] reads one line at a time, splits it on whitespace, runs
//! builtins (`echo`, `pwd`, `cd`, `type`, `exit`) in-process and resolves
//! everything else against `PATH` before spawning it as a child process.

pub mod builtins;
pub mod env;
pub mod error;
pub mod io_helpers;
pub mod launcher;
pub mod parser;
pub mod path;
pub mod shell;

pub use crate::error::ShellError;
pub use crate::shell::Shell;
