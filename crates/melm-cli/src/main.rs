//! CLI entrypoint for the `melm` Elm scaffolding tool.
//!
//! The binary delegates to [`melm_cli::run`], which loads configuration,
//! installs telemetry and dispatches the requested command.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    melm_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
