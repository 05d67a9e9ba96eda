//! Command-line interface definition for `melm`.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Scaffolds Elm components and wires them into composite modules.
#[derive(Parser, Debug)]
#[command(name = "melm", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// The command to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Generates a new component module from a template.
    Add {
        /// Dotted module name, for example `Components.LoginForm`.
        #[arg(value_name = "MODULE")]
        module: String,
        /// Template to render; overrides the configured template.
        #[arg(long, value_name = "NAME")]
        template: Option<String>,
    },
    /// Wires module SOURCE into the composite module TARGET.
    Push {
        /// Module to wire in.
        #[arg(value_name = "SOURCE")]
        source: String,
        /// Composite module receiving the wiring.
        #[arg(value_name = "TARGET")]
        target: String,
        /// Writes the result back to TARGET instead of printing it.
        #[arg(long)]
        commit: bool,
        /// Treats TARGET as the application root when wiring `update`.
        #[arg(long)]
        top_level: bool,
        /// Loads weave scripts from a JSON file instead of the built-in table.
        #[arg(long, value_name = "FILE")]
        scripts: Option<Utf8PathBuf>,
    },
    /// Prints the built-in weave script table as JSON.
    Scripts {
        /// Prints the application-root variant of the `update` script.
        #[arg(long)]
        top_level: bool,
    },
    /// Manages the translation table.
    I18n {
        /// The translation action to perform.
        #[command(subcommand)]
        action: I18nAction,
    },
}

/// Translation table actions.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum I18nAction {
    /// Prints the number of entries in the table.
    Ls,
    /// Seeds the table from the configured Elm source.
    Bootstrap {
        /// Writes the table instead of printing it.
        #[arg(short, long)]
        write: bool,
    },
    /// Generates the `I18n.<Lang>` module for LANG.
    Generate {
        /// Language code, for example `fr`.
        #[arg(value_name = "LANG")]
        language: String,
        /// Writes the module instead of printing it.
        #[arg(short, long)]
        write: bool,
    },
}
