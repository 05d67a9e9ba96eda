//! Runtime tests driven through [`crate::run_with_loader`].

use std::cell::RefCell;
use std::ffi::OsString;
use std::process::ExitCode;

use melm_config::Config;

use crate::IoStreams;
use crate::config::ConfigLoader;
use crate::errors::AppError;

mod unit;

/// Hands out a fixed configuration and records the arguments it was given.
struct StaticConfigLoader {
    config: Config,
    seen: RefCell<Vec<OsString>>,
}

impl StaticConfigLoader {
    fn new(config: Config) -> Self {
        Self {
            config,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        self.seen.borrow_mut().extend(args.iter().cloned());
        Ok(self.config.clone())
    }
}

/// Captured result of one CLI invocation.
struct Outcome {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

fn run_cli(loader: &StaticConfigLoader, args: &[&str]) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let argv = std::iter::once("melm")
        .chain(args.iter().copied())
        .map(OsString::from);
    let exit = {
        let mut io = IoStreams::new(&mut stdout, &mut stderr);
        crate::run_with_loader(argv, &mut io, loader)
    };
    Outcome {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}
