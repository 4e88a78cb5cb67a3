use std::io::{self, BufRead, Write};

use log::{debug, warn};

use crate::builtins::{BuiltinFlow, Builtins};
use crate::env::Environment;
use crate::io_helpers::{write_line, write_prompt, LineReader};
use crate::launcher::{Launcher, ProcessLauncher};
use crate::parser::{parse, ParsedCommand};
use crate::path::find_executable;

pub const PROMPT: &str = "$ ";

pub struct Shell<L = ProcessLauncher> {
    builtins: Builtins,
    env: Environment,
    launcher: L,
}

impl Shell<ProcessLauncher> {
    /// Starts in the process's working directory. A failure to read it is
    /// reported on `stderr` and the session starts elsewhere.
    pub fn new(stderr: &mut dyn Write) -> io::Result<Self> {
        let (env, err) = Environment::from_process();
        if let Some(err) = err {
            write_line(stderr, &format!("rsh: {err}"))?;
        }
        Ok(Shell::with_launcher(env, ProcessLauncher))
    }
}

impl<L: Launcher> Shell<L> {
    pub fn with_launcher(env: Environment, launcher: L) -> Self {
        Shell {
            builtins: Builtins::new(),
            env,
            launcher,
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Runs the read-dispatch loop until `exit` or end of input and returns
    /// the session's exit code. Only failures on the session's own streams
    /// end the loop early.
    pub fn run<R: BufRead>(
        &mut self,
        input: R,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> io::Result<i32> {
        let mut reader = LineReader::new(input);
        loop {
            write_prompt(stdout, PROMPT)?;

            let Some(line) = reader.next_line()? else {
                write_line(stdout, "")?;
                debug!("end of input");
                return Ok(0);
            };

            if let BuiltinFlow::Exit(code) = self.execute_line(&line, stdout, stderr)? {
                debug!("exit requested with status {code}");
                return Ok(code);
            }
        }
    }

    pub fn execute_line(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> io::Result<BuiltinFlow> {
        match parse(line) {
            Some(command) => self.execute(&command, stdout, stderr),
            None => Ok(BuiltinFlow::Continue),
        }
    }

    pub fn execute(
        &mut self,
        command: &ParsedCommand,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> io::Result<BuiltinFlow> {
        let name = command.name.as_str();

        if let Some(builtin) = self.builtins.get(name) {
            debug!("running builtin {name}");
            return builtin(
                &self.builtins,
                &mut self.env,
                &command.arguments,
                stdout,
                stderr,
            );
        }

        let Some(path) = find_executable(&self.env, name) else {
            write_line(stdout, &format!("{name}: command not found"))?;
            return Ok(BuiltinFlow::Continue);
        };

        stdout.flush()?;
        if let Err(err) = self.launcher.launch(
            &path,
            name,
            &command.arguments,
            self.env.current_dir(),
        ) {
            warn!("{err}");
            write_line(stderr, &err.to_string())?;
        }
        Ok(BuiltinFlow::Continue)
    }
}
