//! `melm i18n`: translation table commands.

use std::io::Write;

use camino::Utf8Path;
use tracing::warn;

use melm_config::Config;
use melm_i18n::{TranslationTable, bootstrap, generate};

use crate::cli::I18nAction;
use crate::errors::AppError;
use crate::fs;

const I18N_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::i18n");

fn load_table(config: &Config) -> Result<TranslationTable, AppError> {
    let path = config.i18n_table();
    TranslationTable::parse(&fs::read(path)?).map_err(|source| AppError::Table {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs one translation `action`.
pub(crate) fn run<W: Write>(
    config: &Config,
    action: &I18nAction,
    stdout: &mut W,
) -> Result<(), AppError> {
    match action {
        I18nAction::Ls => {
            let table = load_table(config)?;
            writeln!(stdout, "Number of entries: {}", table.entry_count())
                .map_err(AppError::Output)
        }
        I18nAction::Bootstrap { write } => {
            let source = fs::read(config.i18n_source())?;
            let table = bootstrap(&source, config.default_language())?;
            emit(*write, config.i18n_table(), &table.render(), stdout)
        }
        I18nAction::Generate { language, write } => {
            let table = load_table(config)?;
            let module = generate(&table, language, config.default_language())?;
            for key in module.missing() {
                warn!(
                    target: I18N_TARGET,
                    key = %key,
                    language = %language,
                    "no translation or default; key left out"
                );
            }
            let path = config
                .i18n_output_dir()
                .join(format!("{}.elm", module.file_stem()));
            emit(*write, &path, module.source(), stdout)
        }
    }
}

fn emit<W: Write>(
    write: bool,
    path: &Utf8Path,
    contents: &str,
    stdout: &mut W,
) -> Result<(), AppError> {
    if write {
        fs::write(path, contents)?;
        writeln!(stdout, "file {path} written").map_err(AppError::Output)
    } else {
        stdout
            .write_all(contents.as_bytes())
            .map_err(AppError::Output)
    }
}
