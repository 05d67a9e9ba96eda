//! Regex-driven structural patching for Elm composite modules.
//!
//! This crate wires a generated sub-component into an existing host module
//! without parsing Elm. Each kind of wiring is described by a
//! [`WeaveScript`]: an ordered list of [`MatchSpec`] steps that narrow the
//! document to a structural block before inserting a templated fragment.
//!
//! - **Match selection** via [`CompiledPattern`] picks the k-th match of a
//!   pattern inside the current span (negative ordinals count from the end)
//! - **Indentation resolution** via [`resolve_indent`] derives the indentation
//!   of inserted text from the nearest non-blank line
//! - **Idempotent insertion** via [`insert`] splices a fragment unless it is
//!   already present at the insertion point
//! - **Weaving** via [`Weaver`] runs a [`ScriptTable`] against a document,
//!   skipping scripts whose anchors are missing
//!
//! # Templates
//!
//! Fragments reference the [`SubstitutionMap`] with `$name` or `${name}`;
//! `$$` produces a literal dollar sign. The map always provides
//! `module_name`, `module_basename` and `module_basename_lower1`.
//!
//! # Example
//!
//! ```
//! use melm_weave::{MatchSpec, ModuleName, ScriptTable, SubstitutionMap, WeaveScript, Weaver};
//!
//! let script = WeaveScript::new(
//!     "msg",
//!     vec![
//!         MatchSpec::new(r"^type Msg\b.*?\n\n", 0),
//!         MatchSpec::new(r"^[ \t]+[=|][^\n]*$", -1)
//!             .with_template("| ${module_basename}Msg ${module_basename}.Msg"),
//!     ],
//! );
//! let weaver = Weaver::new(ScriptTable::new(vec![script]));
//! let module = ModuleName::parse("Components.Foo")?;
//! let substitutions = SubstitutionMap::for_module(&module);
//!
//! let report = weaver.weave("type Msg\n    = A\n\n\nview = 1\n", &substitutions)?;
//! assert!(report.output().contains("    | FooMsg Foo.Msg"));
//! # Ok::<(), melm_weave::WeaveError>(())
//! ```

mod error;
mod indent;
mod inserter;
mod library;
mod pattern;
mod placeholder;
mod recursor;
mod script;
mod span;
mod substitution;
mod weaver;

pub use error::WeaveError;
pub use indent::{Indent, resolve_indent};
pub use inserter::{Insertion, Placement, insert};
pub use library::{SCRIPT_ORDER, UpdateVariant, composite_scripts};
pub use pattern::{CompiledPattern, SpanMatch};
pub use placeholder::render;
pub use script::{MatchSpec, ScriptTable, WeaveScript};
pub use span::WorkingSpan;
pub use substitution::{
    MODULE_BASENAME, MODULE_BASENAME_LOWER1, MODULE_NAME, ModuleName, SubstitutionMap,
};
pub use weaver::{AppliedScript, SkippedScript, WeaveReport, Weaver};

#[cfg(test)]
mod tests;
