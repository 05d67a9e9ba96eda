//! `melm push`: wires one module into a composite module.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

use melm_config::Config;
use melm_weave::{
    ModuleName, ScriptTable, SkippedScript, SubstitutionMap, UpdateVariant, Weaver,
    composite_scripts,
};

use crate::errors::AppError;
use crate::fs;

const PUSH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::push");

/// Options accepted by `melm push`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PushRequest<'a> {
    pub(crate) source: &'a str,
    pub(crate) target: &'a str,
    pub(crate) commit: bool,
    pub(crate) variant: UpdateVariant,
    pub(crate) scripts: Option<&'a Utf8Path>,
}

/// Returns the built-in table for `top_level`.
pub(crate) fn built_in_scripts(top_level: bool) -> ScriptTable {
    composite_scripts(update_variant(top_level))
}

/// Maps the `--top-level` flag onto the update script variant.
pub(crate) const fn update_variant(top_level: bool) -> UpdateVariant {
    if top_level {
        UpdateVariant::TopLevel
    } else {
        UpdateVariant::Nested
    }
}

fn load_scripts(request: &PushRequest<'_>) -> Result<ScriptTable, AppError> {
    match request.scripts {
        Some(path) => Ok(ScriptTable::from_json(&fs::read(path)?)?),
        None => Ok(composite_scripts(request.variant)),
    }
}

fn existing_module(config: &Config, name: &str) -> Result<(ModuleName, Utf8PathBuf), AppError> {
    let module = ModuleName::parse(name)?;
    let path = fs::module_path(config.source_dir(), &module);
    if !fs::is_file(&path)? {
        return Err(AppError::MissingModule {
            module: module.to_string(),
            path,
        });
    }
    Ok((module, path))
}

/// Weaves `request.source` into `request.target`.
///
/// Without `commit` the woven document goes to `stdout`; with it the target
/// file is rewritten when anything changed. Skipped scripts are summarised on
/// `stderr` in one line.
pub(crate) fn push<W: Write, E: Write>(
    config: &Config,
    request: &PushRequest<'_>,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<(), AppError> {
    let (source, _) = existing_module(config, request.source)?;
    let (_, target_path) = existing_module(config, request.target)?;
    let table = load_scripts(request)?;

    let document = fs::read(&target_path)?;
    let report = Weaver::new(table).weave(&document, &SubstitutionMap::for_module(&source))?;
    info!(
        target: PUSH_TARGET,
        source = %source,
        target_path = %target_path,
        applied = report.applied().len(),
        skipped = report.skipped().len(),
        lines_added = report.lines_added(),
        "push woven"
    );

    if !report.skipped().is_empty() {
        let names: Vec<&str> = report.skipped().iter().map(SkippedScript::name).collect();
        writeln!(stderr, "skipped scripts: {}", names.join(", ")).map_err(AppError::Output)?;
    }

    if !request.commit {
        return stdout
            .write_all(report.output().as_bytes())
            .map_err(AppError::Output);
    }

    if report.has_changes() {
        fs::write(&target_path, report.output())?;
        writeln!(stdout, "file {target_path} written").map_err(AppError::Output)
    } else {
        writeln!(stdout, "file {target_path} unchanged").map_err(AppError::Output)
    }
}
