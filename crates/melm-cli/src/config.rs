//! Configuration loading helpers for the `melm` CLI.
//!
//! Configuration flags are accepted only before the command word. The
//! splitter hands those flags to `ortho_config` and leaves the rest for the
//! command parser.

use std::ffi::{OsStr, OsString};

use melm_config::Config;
use ortho_config::OrthoConfig;

use crate::errors::AppError;

/// CLI flags recognised by the configuration loader.
///
/// Keep in sync with the fields of [`Config`].
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--source-dir",
    "--template",
    "--templates-dir",
    "--i18n-table",
    "--i18n-source",
    "--i18n-output-dir",
    "--default-language",
    "--log-filter",
    "--log-format",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration from the filtered configuration arguments.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

fn classify(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    let Some(flag) = text.split('=').next().filter(|flag| flag.starts_with("--")) else {
        return FlagAction::Skip;
    };
    if CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !text.contains('='),
        }
    } else {
        FlagAction::Skip
    }
}

pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_arguments: Vec<OsString>,
}

/// Splits `args` into the leading configuration flags (with the program
/// name) and the command tokens (also prefixed with the program name).
pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_arguments: Vec::new(),
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut remaining = rest.iter().peekable();
    while let Some(argument) = remaining.peek() {
        let FlagAction::Include { needs_value } = classify(argument.as_os_str()) else {
            break;
        };
        config_arguments.extend(remaining.next().cloned());
        if needs_value {
            config_arguments.extend(remaining.next().cloned());
        }
    }

    let mut command_arguments = vec![program.clone()];
    command_arguments.extend(remaining.cloned());
    ConfigArgumentSplit {
        config_arguments,
        command_arguments,
    }
}
