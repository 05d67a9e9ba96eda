//! Precedence of configuration layers: defaults, file, environment, CLI.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard};

use camino::Utf8Path;
use once_cell::sync::Lazy;
use ortho_config::OrthoConfig;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use melm_config::{Config, LogFormat, default_log_filter, default_log_format};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct Harness {
    temp_dir: TempDir,
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
    _env_guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let env_guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        Self {
            temp_dir,
            cli_args: RefCell::new(vec![OsString::from("melm")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
            _env_guard: env_guard,
        }
    }

    fn write_config(&self, contents: &str) {
        let path = self.temp_dir.path().join("melm.toml");
        if let Err(error) = fs::write(&path, contents) {
            panic!("failed to write configuration: {error}");
        }
        let mut args = self.cli_args.borrow_mut();
        args.push(OsString::from("--config-path"));
        args.push(path.into_os_string());
    }

    fn set_env(&self, key: &str, value: &str) {
        let previous = std::env::var_os(key);
        // Environment mutation is `unsafe` on edition 2024; the harness holds
        // ENV_MUTEX and restores every override in `Drop`.
        unsafe { std::env::set_var(key, value) };
        self.env_overrides
            .borrow_mut()
            .push((key.to_owned(), previous));
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }
        let args = self.cli_args.borrow().clone();
        match Config::load_from_iter(args) {
            Ok(config) => *self.loaded.borrow_mut() = Some(config),
            Err(error) => *self.error.borrow_mut() = Some(error.to_string()),
        }
    }

    fn with_config<T>(&self, check: impl FnOnce(&Config) -> T) -> T {
        self.load();
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        let loaded = self.loaded.borrow();
        match loaded.as_ref() {
            Some(config) => check(config),
            None => panic!("configuration was not loaded"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            match value {
                Some(os_value) => unsafe { std::env::set_var(&key, os_value) },
                None => unsafe { std::env::remove_var(&key) },
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the source directory to \"{dir}\"")]
fn given_configuration_file(harness: &Harness, dir: String) {
    harness.write_config(&format!("source_dir = \"{dir}\"\nlog_format = \"json\"\n"));
}

#[given("the environment sets the source directory to \"{dir}\"")]
fn given_environment_override(harness: &Harness, dir: String) {
    harness.set_env("MELM_SOURCE_DIR", &dir);
}

#[when("the CLI sets the source directory to \"{dir}\"")]
fn when_cli_override(harness: &Harness, dir: String) {
    harness.push_cli_arg("--source-dir");
    harness.push_cli_arg(dir);
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[then("the source directory resolves to \"{dir}\"")]
fn then_resolved_source_dir(harness: &Harness, dir: String) {
    harness.with_config(|config| assert_eq!(config.source_dir(), Utf8Path::new(&dir)));
}

#[then("the log format comes from the file")]
fn then_log_format_from_file(harness: &Harness) {
    harness.with_config(|config| assert_eq!(config.log_format(), LogFormat::Json));
}

#[then("loading the configuration applies the built-in defaults")]
fn then_defaults_applied(harness: &Harness) {
    harness.with_config(|config| {
        assert_eq!(config.source_dir(), Utf8Path::new("src"));
        assert_eq!(config.template(), "modal");
        assert_eq!(config.log_filter(), default_log_filter());
        assert_eq!(config.log_format(), default_log_format());
    });
}

#[scenario(path = "tests/features/configuration_precedence.feature")]
fn configuration_precedence(#[from(harness)] harness: Harness) {
    drop(harness);
}
