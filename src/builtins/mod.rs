use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use log::debug;

use crate::env::Environment;
use crate::error::ShellError;
use crate::io_helpers::write_line;
use crate::path::find_executable;

/// Exit status used when `exit` gets an argument that is not a number.
pub const INVALID_EXIT_ARGUMENT: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFlow {
    Continue,
    Exit(i32),
}

/// Signature shared by every builtin: the registry (for `type`), the
/// session state, the arguments after the command name, then stdout and
/// stderr.
pub type BuiltinFn = fn(
    &Builtins,
    &mut Environment,
    &[String],
    &mut dyn Write,
    &mut dyn Write,
) -> io::Result<BuiltinFlow>;

pub struct Builtins {
    registry: HashMap<&'static str, BuiltinFn>,
}

impl Builtins {
    pub fn new() -> Self {
        let mut registry: HashMap<&'static str, BuiltinFn> = HashMap::new();
        registry.insert("exit", Builtins::builtin_exit);
        registry.insert("echo", Builtins::builtin_echo);
        registry.insert("type", Builtins::builtin_type);
        registry.insert("pwd", Builtins::builtin_pwd);
        registry.insert("cd", Builtins::builtin_cd);
        Builtins { registry }
    }

    pub fn get(&self, name: &str) -> Option<BuiltinFn> {
        self.registry.get(name).copied()
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    fn builtin_exit(
        &self,
        _env: &mut Environment,
        args: &[String],
        stdout_writer: &mut dyn Write,
        _stderr_writer: &mut dyn Write,
    ) -> io::Result<BuiltinFlow> {
        let Some(arg) = args.first() else {
            return Ok(BuiltinFlow::Exit(0));
        };

        match arg.parse::<i32>() {
            Ok(code) => Ok(BuiltinFlow::Exit(code)),
            Err(_) => {
                write_line(
                    stdout_writer,
                    &format!("exit: {arg}: numeric argument required"),
                )?;
                Ok(BuiltinFlow::Exit(INVALID_EXIT_ARGUMENT))
            }
        }
    }

    fn builtin_echo(
        &self,
        _env: &mut Environment,
        args: &[String],
        stdout_writer: &mut dyn Write,
        _stderr_writer: &mut dyn Write,
    ) -> io::Result<BuiltinFlow> {
        write_line(stdout_writer, &args.join(" "))?;
        Ok(BuiltinFlow::Continue)
    }

    fn builtin_type(
        &self,
        env: &mut Environment,
        args: &[String],
        stdout_writer: &mut dyn Write,
        _stderr_writer: &mut dyn Write,
    ) -> io::Result<BuiltinFlow> {
        if args.is_empty() {
            write_line(stdout_writer, "type: missing argument")?;
            return Ok(BuiltinFlow::Continue);
        }

        for target in args {
            if self.is_builtin(target) {
                write_line(stdout_writer, &format!("{target} is a shell builtin"))?;
            } else if let Some(path) = find_executable(env, target) {
                write_line(stdout_writer, &format!("{target} is {}", path.display()))?;
            } else {
                write_line(stdout_writer, &format!("{target}: not found"))?;
            }
        }

        Ok(BuiltinFlow::Continue)
    }

    fn builtin_pwd(
        &self,
        env: &mut Environment,
        _args: &[String],
        stdout_writer: &mut dyn Write,
        stderr_writer: &mut dyn Write,
    ) -> io::Result<BuiltinFlow> {
        match fs::metadata(env.current_dir()) {
            Ok(_) => {
                write_line(stdout_writer, &env.current_dir().to_string_lossy())?;
            }
            Err(err) => {
                write_line(
                    stderr_writer,
                    &format!("pwd: {}", ShellError::CurrentDir(err)),
                )?;
            }
        }

        Ok(BuiltinFlow::Continue)
    }

    fn builtin_cd(
        &self,
        env: &mut Environment,
        args: &[String],
        stdout_writer: &mut dyn Write,
        _stderr_writer: &mut dyn Write,
    ) -> io::Result<BuiltinFlow> {
        let target = match args {
            [] => match env.get_var("HOME") {
                Some(home) => PathBuf::from(home),
                None => {
                    write_line(stdout_writer, "cd: HOME not set")?;
                    return Ok(BuiltinFlow::Continue);
                }
            },
            [arg] => expand_home(env, arg),
            _ => {
                write_line(stdout_writer, "cd: too many arguments")?;
                return Ok(BuiltinFlow::Continue);
            }
        };

        if let Err(err) = env.change_dir(&target) {
            debug!("cd to {} failed: {err}", target.display());
            let shown = args.first().map_or_else(
                || target.to_string_lossy().into_owned(),
                |arg| arg.clone(),
            );
            write_line(
                stdout_writer,
                &format!("cd: {shown}: No such file or directory"),
            )?;
        }

        Ok(BuiltinFlow::Continue)
    }
}

/// Replaces a leading `~` with `$HOME`. Left as-is when `HOME` is unset.
fn expand_home(env: &Environment, arg: &str) -> PathBuf {
    let Some(remainder) = arg.strip_prefix('~') else {
        return PathBuf::from(arg);
    };
    if !remainder.is_empty() && !remainder.starts_with('/') {
        // ~user is not supported
        return PathBuf::from(arg);
    }
    match env.get_var("HOME") {
        Some(home) => {
            let mut home = PathBuf::from(home);
            let rest = remainder.trim_start_matches('/');
            if !rest.is_empty() {
                home.push(rest);
            }
            home
        }
        None => PathBuf::from(arg),
    }
}
