//! Behaviour-driven step definitions for weaving scenarios.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::{
    MatchSpec, ModuleName, Placement, ScriptTable, SubstitutionMap, UpdateVariant, WeaveReport,
    WeaveScript, Weaver, composite_scripts,
};

// =============================================================================
// Test World
// =============================================================================

/// State shared across BDD steps.
#[derive(Default)]
struct TestWorld {
    /// Document being woven.
    document: String,
    /// Module wired into the document.
    module: Option<ModuleName>,
    /// Specs of the ad hoc script under construction.
    specs: Vec<MatchSpec>,
    /// Table used instead of the ad hoc script, when set.
    table: Option<ScriptTable>,
    /// Report from the first pass.
    first: Option<WeaveReport>,
    /// Report from the second pass.
    second: Option<WeaveReport>,
}

impl TestWorld {
    fn weaver(&self) -> Weaver {
        let table = self.table.clone().unwrap_or_else(|| {
            ScriptTable::new(vec![WeaveScript::new("scenario", self.specs.clone())])
        });
        Weaver::new(table)
    }

    fn substitutions(&self) -> SubstitutionMap {
        SubstitutionMap::for_module(self.module.as_ref().expect("module should be set"))
    }

    fn latest(&self) -> &WeaveReport {
        self.second
            .as_ref()
            .or(self.first.as_ref())
            .expect("document should have been woven")
    }
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

/// Strips surrounding double quotes from a string if present.
fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"')
}

/// Expands `\n` escapes written in feature files.
fn unescape(s: &str) -> String {
    strip_quotes(s).replace("\\n", "\n")
}

// =============================================================================
// Given Steps
// =============================================================================

#[given("a document {content}")]
fn given_document(world: &RefCell<TestWorld>, content: String) {
    world.borrow_mut().document = unescape(&content);
}

#[given("the module {name}")]
fn given_module(world: &RefCell<TestWorld>, name: String) {
    let module = ModuleName::parse(strip_quotes(&name)).expect("module name");
    world.borrow_mut().module = Some(module);
}

#[given("a narrowing step {pattern} selecting {selector}")]
fn given_narrowing_step(world: &RefCell<TestWorld>, pattern: String, selector: i64) {
    world
        .borrow_mut()
        .specs
        .push(MatchSpec::new(strip_quotes(&pattern), selector));
}

#[given("an insertion {template} after {pattern} selecting {selector}")]
fn given_insertion_after(
    world: &RefCell<TestWorld>,
    template: String,
    pattern: String,
    selector: i64,
) {
    world.borrow_mut().specs.push(
        MatchSpec::new(strip_quotes(&pattern), selector).with_template(strip_quotes(&template)),
    );
}

#[given("an insertion {template} before {pattern} selecting {selector}")]
fn given_insertion_before(
    world: &RefCell<TestWorld>,
    template: String,
    pattern: String,
    selector: i64,
) {
    world.borrow_mut().specs.push(
        MatchSpec::new(strip_quotes(&pattern), selector)
            .placed(Placement::Before)
            .with_template(strip_quotes(&template)),
    );
}

#[given("the nested composite scripts")]
fn given_nested_scripts(world: &RefCell<TestWorld>) {
    world.borrow_mut().table = Some(composite_scripts(UpdateVariant::Nested));
}

// =============================================================================
// When Steps
// =============================================================================

#[when("the document is woven")]
fn when_woven(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let report = w
        .weaver()
        .weave(&w.document, &w.substitutions())
        .expect("weave");
    w.first = Some(report);
}

#[when("the output is woven again")]
fn when_woven_again(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let output = w
        .first
        .as_ref()
        .map(|report| report.output().to_owned())
        .expect("first pass should have run");
    let report = w.weaver().weave(&output, &w.substitutions()).expect("weave");
    w.second = Some(report);
}

// =============================================================================
// Then Steps
// =============================================================================

#[then("the output equals {content}")]
fn then_output_is(world: &RefCell<TestWorld>, content: String) {
    let w = world.borrow();
    assert_eq!(w.latest().output(), unescape(&content));
}

#[then("the output contains {content}")]
fn then_output_contains(world: &RefCell<TestWorld>, content: String) {
    let w = world.borrow();
    let expected = unescape(&content);
    assert!(
        w.latest().output().contains(&expected),
        "expected {expected:?} in:\n{}",
        w.latest().output()
    );
}

#[then("the document is left unchanged")]
fn then_output_unchanged(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    assert_eq!(w.latest().output(), w.document);
}

#[then("the second pass adds no lines")]
fn then_second_pass_idle(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    let second = w.second.as_ref().expect("second pass should have run");
    let first = w.first.as_ref().expect("first pass should have run");
    assert!(!second.has_changes());
    assert_eq!(second.output(), first.output());
}

#[then("script {name} is skipped at spec {index}")]
fn then_script_skipped(world: &RefCell<TestWorld>, name: String, index: usize) {
    let w = world.borrow();
    let wanted = strip_quotes(&name);
    let skipped = w
        .latest()
        .skipped()
        .iter()
        .find(|script| script.name() == wanted)
        .unwrap_or_else(|| panic!("{wanted} was not skipped"));
    assert_eq!(skipped.spec_index(), index);
}

// =============================================================================
// Scenarios
// =============================================================================

#[scenario(
    path = "tests/features/weave.feature",
    name = "Variant lands above the trailing blank lines"
)]
fn variant_before_blank_lines(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/weave.feature",
    name = "Variant lands after a newline counted from the end"
)]
fn variant_after_newline(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/weave.feature",
    name = "Narrowed insertion ignores matches outside the block"
)]
fn narrowed_insertion(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/weave.feature",
    name = "Missing anchor skips the script"
)]
fn missing_anchor(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/weave.feature",
    name = "Composite scripts wire a module into a list and a union"
)]
fn composite_wiring(world: RefCell<TestWorld>) {
    drop(world);
}
