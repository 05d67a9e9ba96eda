//! Layered configuration for the `melm` tool.
//!
//! Values are merged from built-in defaults, a `melm.toml` file (located via
//! `--config-path` or `MELM_CONFIG_PATH`), `MELM_*` environment variables and
//! command-line flags, in increasing order of precedence. Every field is
//! optional; accessors fall back to the values in [`defaults`].

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub mod defaults;
mod logging;

pub use defaults::{default_log_filter, default_log_format};
pub use logging::{LogFormat, LogFormatParseError};

use defaults::{
    DEFAULT_I18N_OUTPUT_DIR, DEFAULT_I18N_SOURCE, DEFAULT_I18N_TABLE, DEFAULT_LANGUAGE,
    DEFAULT_SOURCE_DIR, DEFAULT_TEMPLATE,
};

/// Resolved `melm` configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "MELM",
    discovery(
        app_name = "melm",
        env_var = "MELM_CONFIG_PATH",
        config_file_name = "melm.toml",
        dotfile_name = ".melm.toml",
        project_file_name = "melm.toml",
        config_cli_long = "config-path",
        config_cli_visible = true,
    )
)]
pub struct Config {
    /// Directory holding the application's Elm modules.
    #[serde(default)]
    pub source_dir: Option<Utf8PathBuf>,
    /// Scaffold template name used by `melm add`.
    #[serde(default)]
    pub template: Option<String>,
    /// Directory whose `<name>.elm` files override the built-in templates.
    #[serde(default)]
    pub templates_dir: Option<Utf8PathBuf>,
    /// Translation table path.
    #[serde(default)]
    pub i18n_table: Option<Utf8PathBuf>,
    /// Elm module scanned when bootstrapping the translation table.
    #[serde(default)]
    pub i18n_source: Option<Utf8PathBuf>,
    /// Directory receiving generated language modules.
    #[serde(default)]
    pub i18n_output_dir: Option<Utf8PathBuf>,
    /// Language used when a key lacks a translation.
    #[serde(default)]
    pub default_language: Option<String>,
    /// `tracing` filter expression.
    #[serde(default)]
    pub log_filter: Option<String>,
    /// Log output format.
    #[serde(default)]
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Returns the Elm source directory.
    #[must_use]
    pub fn source_dir(&self) -> &Utf8Path {
        self.source_dir
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_SOURCE_DIR))
    }

    /// Returns the scaffold template name.
    #[must_use]
    pub fn template(&self) -> &str {
        self.template.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }

    /// Returns the template override directory, if configured.
    #[must_use]
    pub fn templates_dir(&self) -> Option<&Utf8Path> {
        self.templates_dir.as_deref()
    }

    /// Returns the translation table path.
    #[must_use]
    pub fn i18n_table(&self) -> &Utf8Path {
        self.i18n_table
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_I18N_TABLE))
    }

    /// Returns the Elm module scanned by the bootstrap command.
    #[must_use]
    pub fn i18n_source(&self) -> &Utf8Path {
        self.i18n_source
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_I18N_SOURCE))
    }

    /// Returns the directory for generated language modules.
    #[must_use]
    pub fn i18n_output_dir(&self) -> &Utf8Path {
        self.i18n_output_dir
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_I18N_OUTPUT_DIR))
    }

    /// Returns the fallback language.
    #[must_use]
    pub fn default_language(&self) -> &str {
        self.default_language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Returns the log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter
            .as_deref()
            .unwrap_or_else(|| default_log_filter())
    }

    /// Returns the log format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }
}
