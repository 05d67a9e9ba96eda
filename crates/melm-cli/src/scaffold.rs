//! `melm add`: renders a component module from a template.

use std::io::Write;
use std::str::FromStr;

use camino::Utf8PathBuf;
use strum::{Display, EnumString, VariantNames};
use tracing::debug;

use melm_config::Config;
use melm_weave::{ModuleName, SubstitutionMap, render};

use crate::errors::AppError;
use crate::fs;

const SCAFFOLD_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::scaffold");

const MODAL_TEMPLATE: &str = include_str!("../templates/modal.elm");
const SIMPLE_TEMPLATE: &str = include_str!("../templates/simple.elm");

/// Templates known to `melm add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum TemplateName {
    Modal,
    Simple,
}

impl TemplateName {
    /// Resolves a configured template name.
    pub(crate) fn resolve(name: &str) -> Result<Self, AppError> {
        Self::from_str(name).map_err(|_| AppError::UnknownTemplate {
            name: name.to_owned(),
            expected: Self::VARIANTS.join(", "),
        })
    }

    const fn built_in(self) -> &'static str {
        match self {
            Self::Modal => MODAL_TEMPLATE,
            Self::Simple => SIMPLE_TEMPLATE,
        }
    }

    /// Loads the template text, preferring `<templates_dir>/<name>.elm` when
    /// a template directory is configured and holds that file.
    fn load(self, config: &Config) -> Result<String, AppError> {
        let Some(dir) = config.templates_dir() else {
            return Ok(self.built_in().to_owned());
        };
        let path = dir.join(format!("{self}.elm"));
        let text = fs::read_optional(&path)?;
        debug!(
            target: SCAFFOLD_TARGET,
            template = %self,
            path = %path,
            overridden = text.is_some(),
            "template resolved"
        );
        Ok(text.unwrap_or_else(|| self.built_in().to_owned()))
    }
}

/// Scaffolds `module` and returns the path written.
pub(crate) fn add<W: Write>(
    config: &Config,
    module: &str,
    template: Option<&str>,
    stdout: &mut W,
) -> Result<Utf8PathBuf, AppError> {
    let template = TemplateName::resolve(template.unwrap_or_else(|| config.template()))?;
    let module = ModuleName::parse(module)?;
    let path = fs::module_path(config.source_dir(), &module);

    let source = render(&template.load(config)?, &SubstitutionMap::for_module(&module))?;
    fs::create_new(&path, &source)?;

    writeln!(stdout, "file {path} written").map_err(AppError::Output)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn config_in(dir: &TempDir) -> Config {
        Config {
            source_dir: Some(
                Utf8PathBuf::from_path_buf(dir.path().join("src")).expect("utf8 temp dir"),
            ),
            ..Config::default()
        }
    }

    #[rstest]
    #[case("modal", TemplateName::Modal)]
    #[case("simple", TemplateName::Simple)]
    fn resolves_known_templates(#[case] name: &str, #[case] expected: TemplateName) {
        assert_eq!(TemplateName::resolve(name).expect("known"), expected);
    }

    #[test]
    fn unknown_template_lists_the_alternatives() {
        let error = TemplateName::resolve("fancy").expect_err("unknown");
        assert_eq!(
            error.to_string(),
            "unknown template `fancy` (expected one of: modal, simple)"
        );
    }

    #[test]
    fn unknown_template_writes_nothing() {
        let dir = TempDir::new().expect("temp dir");
        let config = config_in(&dir);
        let mut stdout = Vec::new();
        let result = add(&config, "Components.Foo", Some("fancy"), &mut stdout);
        assert!(matches!(result, Err(AppError::UnknownTemplate { .. })));
        assert!(!dir.path().join("src").exists());
    }

    #[test]
    fn add_renders_the_modal_template() {
        let dir = TempDir::new().expect("temp dir");
        let config = config_in(&dir);
        let mut stdout = Vec::new();

        let path = add(&config, "Components.Foo", None, &mut stdout).expect("scaffold");

        let written = fs::read(&path).expect("read back");
        assert!(written.starts_with("module Components.Foo exposing"));
        assert!(written.contains("[ p [] [ text \"Foo\" ]"));
        assert!(path.ends_with("Components/Foo.elm"));
        assert_eq!(
            String::from_utf8(stdout).expect("utf8"),
            format!("file {path} written\n")
        );
    }

    #[test]
    fn add_refuses_an_existing_module() {
        let dir = TempDir::new().expect("temp dir");
        let config = config_in(&dir);
        let mut stdout = Vec::new();
        add(&config, "Foo", Some("simple"), &mut stdout).expect("first");
        let error = add(&config, "Foo", None, &mut stdout).expect_err("second");
        assert!(matches!(error, AppError::AlreadyExists { .. }));
    }

    #[test]
    fn templates_dir_overrides_built_ins() {
        let dir = TempDir::new().expect("temp dir");
        let templates = Utf8PathBuf::from_path_buf(dir.path().join("templates"))
            .expect("utf8 temp dir");
        fs::write(&templates.join("simple.elm"), "module ${module_name} exposing (..)\n")
            .expect("write template");
        let config = Config {
            templates_dir: Some(templates),
            ..config_in(&dir)
        };
        let mut stdout = Vec::new();

        let path = add(&config, "Pages.Home", Some("simple"), &mut stdout).expect("scaffold");

        assert_eq!(
            fs::read(&path).expect("read back"),
            "module Pages.Home exposing (..)\n"
        );
    }
}
