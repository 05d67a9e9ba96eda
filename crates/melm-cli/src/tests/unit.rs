//! Unit tests for argument handling and command dispatch.

use std::ffi::OsString;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use tempfile::TempDir;

use melm_config::Config;
use melm_weave::{SCRIPT_ORDER, ScriptTable, WeaveScript};

use super::{StaticConfigLoader, run_cli};

fn project() -> (TempDir, StaticConfigLoader) {
    let dir = TempDir::new().expect("temp dir");
    let source_dir = Utf8PathBuf::from_path_buf(dir.path().join("src")).expect("utf8 temp dir");
    let loader = StaticConfigLoader::new(Config {
        source_dir: Some(source_dir),
        ..Config::default()
    });
    (dir, loader)
}

#[test]
fn scripts_prints_the_built_in_table() {
    let (_dir, loader) = project();
    let outcome = run_cli(&loader, &["scripts"]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    let table = ScriptTable::from_json(&outcome.stdout).expect("valid table");
    let names: Vec<&str> = table.scripts().iter().map(WeaveScript::name).collect();
    assert_eq!(names, SCRIPT_ORDER);
}

#[test]
fn top_level_scripts_batch_global_commands() {
    let (_dir, loader) = project();
    let outcome = run_cli(&loader, &["scripts", "--top-level"]);
    assert!(outcome.stdout.contains("Cmd.map GlobalMsg globalCmd"));
}

#[test]
fn leading_flags_reach_the_loader_only() {
    let (_dir, loader) = project();
    let outcome = run_cli(&loader, &["--log-filter", "debug", "scripts"]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(
        *loader.seen.borrow(),
        ["melm", "--log-filter", "debug"]
            .map(OsString::from)
            .to_vec()
    );
}

#[test]
fn unknown_command_is_a_usage_error() {
    let (_dir, loader) = project();
    let outcome = run_cli(&loader, &["frobnicate"]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("frobnicate"), "{}", outcome.stderr);
    assert!(loader.seen.borrow().is_empty());
}

#[test]
fn push_without_modules_fails_before_writing() {
    let (dir, loader) = project();
    let outcome = run_cli(&loader, &["push", "Components.Foo", "Main", "--commit"]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("module `Components.Foo` not found"));
    assert!(!dir.path().join("src").exists());
}

#[test]
fn invalid_module_names_are_reported() {
    let (_dir, loader) = project();
    let outcome = run_cli(&loader, &["add", "components.foo"]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("components.foo"), "{}", outcome.stderr);
}

#[test]
fn add_then_push_round_trip() {
    let (_dir, loader) = project();
    assert_eq!(run_cli(&loader, &["add", "Components.Foo"]).exit, ExitCode::SUCCESS);
    assert_eq!(
        run_cli(&loader, &["add", "Components.Bar", "--template", "simple"]).exit,
        ExitCode::SUCCESS
    );

    let preview = run_cli(&loader, &["push", "Components.Foo", "Components.Bar"]);

    assert_eq!(preview.exit, ExitCode::SUCCESS);
    assert!(preview.stdout.contains("import Components.Foo as Foo\n"));
    assert!(preview.stdout.contains("        FooMsg subMsg ->\n"));
    assert!(preview.stdout.contains("    , Html.map FooMsg (Foo.view global model.foo)\n"));
    assert!(preview.stderr.is_empty(), "{}", preview.stderr);
}
