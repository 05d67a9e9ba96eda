//! Command-line runtime for `melm`.
//!
//! The runtime splits leading configuration flags from the command, loads
//! [`melm_config::Config`] through `ortho_config`, installs telemetry, and
//! dispatches to the scaffold, push, script and translation commands. It can
//! be driven from the binary entrypoint or from tests with substitute IO
//! streams and configuration loaders.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use melm_config::Config;

mod cli;
mod config;
mod errors;
mod fs;
mod i18n;
mod push;
mod scaffold;
mod telemetry;

use cli::{Cli, CliCommand};
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use errors::AppError;
use push::PushRequest;

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

struct CliRunner<'a, 'io, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'io, W, E>,
    loader: &'a L,
}

impl<'a, 'io, W, E, L> CliRunner<'a, 'io, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    const fn new(io: &'a mut IoStreams<'io, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);

        let result = Cli::try_parse_from(split.command_arguments)
            .map_err(AppError::CliUsage)
            .and_then(|cli| {
                self.loader
                    .load(&split.config_arguments)
                    .map(|config| (cli, config))
            })
            .and_then(|(cli, config)| {
                telemetry::initialise(&config)?;
                self.dispatch(&cli.command, &config)
            });

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                let _ = writeln!(self.io.stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }

    fn dispatch(&mut self, command: &CliCommand, config: &Config) -> Result<(), AppError> {
        match command {
            CliCommand::Add { module, template } => {
                scaffold::add(config, module, template.as_deref(), &mut *self.io.stdout)?;
                Ok(())
            }
            CliCommand::Push {
                source,
                target,
                commit,
                top_level,
                scripts,
            } => {
                let request = PushRequest {
                    source,
                    target,
                    commit: *commit,
                    variant: push::update_variant(*top_level),
                    scripts: scripts.as_deref(),
                };
                push::push(config, &request, &mut *self.io.stdout, &mut *self.io.stderr)
            }
            CliCommand::Scripts { top_level } => {
                let json = push::built_in_scripts(*top_level).to_json_pretty()?;
                writeln!(self.io.stdout, "{json}").map_err(AppError::Output)
            }
            CliCommand::I18n { action } => i18n::run(config, action, &mut *self.io.stdout),
        }
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}

#[cfg(test)]
mod tests;
