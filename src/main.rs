use std::io;
use std::process;

use anyhow::Context;

use rsh::Shell;

fn run() -> anyhow::Result<i32> {
    let mut shell = Shell::new(&mut io::stderr()).context("failed to start session")?;
    let stdin = io::stdin();
    let code = shell
        .run(stdin.lock(), &mut io::stdout(), &mut io::stderr())
        .context("session aborted")?;
    Ok(code)
}

fn main() {
    env_logger::init();
    match run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("rsh: {err:#}");
            process::exit(1);
        }
    }
}
