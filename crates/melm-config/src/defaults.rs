//! Built-in configuration values used when no layer sets a field.

use crate::logging::LogFormat;

/// Directory holding the application's Elm modules.
pub const DEFAULT_SOURCE_DIR: &str = "src";

/// Scaffold template used by `melm add`.
pub const DEFAULT_TEMPLATE: &str = "modal";

/// Translation table read and written by the i18n commands.
pub const DEFAULT_I18N_TABLE: &str = "i18n/i18n.toml";

/// Elm module scanned by `melm i18n bootstrap`.
pub const DEFAULT_I18N_SOURCE: &str = "src/temp.elm";

/// Directory receiving generated `I18n.<Lang>` modules.
pub const DEFAULT_I18N_OUTPUT_DIR: &str = "src/I18n";

/// Language used when a key has no translation.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}
