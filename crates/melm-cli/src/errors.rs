//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

use melm_i18n::I18nError;
use melm_weave::WeaveError;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("unknown template `{name}` (expected one of: {expected})")]
    UnknownTemplate { name: String, expected: String },
    #[error("module `{module}` not found at {path}")]
    MissingModule { module: String, path: Utf8PathBuf },
    #[error("refusing to overwrite existing file {path}")]
    AlreadyExists { path: Utf8PathBuf },
    #[error("path {path} has no file name")]
    InvalidPath { path: Utf8PathBuf },
    #[error("failed to read {path}: {source}")]
    Read { path: Utf8PathBuf, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: Utf8PathBuf, source: io::Error },
    #[error(transparent)]
    Weave(#[from] WeaveError),
    #[error("{path}: {source}")]
    Table { path: Utf8PathBuf, source: I18nError },
    #[error(transparent)]
    I18n(#[from] I18nError),
    #[error("failed to write output: {0}")]
    Output(io::Error),
}
