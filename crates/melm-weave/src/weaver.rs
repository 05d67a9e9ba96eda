//! Runs a script table against a document.

use tracing::{debug, warn};

use crate::error::WeaveError;
use crate::recursor::{Descent, descend};
use crate::script::{PreparedScript, ScriptTable};
use crate::span::WorkingSpan;
use crate::substitution::SubstitutionMap;

const WEAVE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::weave");

/// Applies every script of a [`ScriptTable`], in order, to one document.
#[derive(Debug, Clone, Default)]
pub struct Weaver {
    table: ScriptTable,
}

impl Weaver {
    /// Creates a weaver for `table`.
    #[must_use]
    pub const fn new(table: ScriptTable) -> Self {
        Self { table }
    }

    /// Returns the script table.
    #[must_use]
    pub const fn table(&self) -> &ScriptTable {
        &self.table
    }

    /// Weaves `document`, feeding each script's output into the next.
    ///
    /// All patterns are compiled and all templates rendered before the
    /// document is touched. A script whose anchor is missing is skipped and
    /// the document carries on as it stood before that script.
    ///
    /// # Errors
    ///
    /// Returns [`WeaveError::InvalidPattern`],
    /// [`WeaveError::UnresolvedPlaceholder`] or
    /// [`WeaveError::MalformedPlaceholder`] when a script cannot be prepared.
    pub fn weave(
        &self,
        document: &str,
        substitutions: &SubstitutionMap,
    ) -> Result<WeaveReport, WeaveError> {
        let prepared = self
            .table
            .scripts()
            .iter()
            .map(|script| script.prepare(substitutions))
            .collect::<Result<Vec<_>, _>>()?;

        let mut span = WorkingSpan::from_document(document);
        let mut applied = Vec::new();
        let mut skipped = Vec::new();
        for script in &prepared {
            match descend(&span, script.specs(), 0) {
                Descent::Woven {
                    span: woven,
                    delta,
                } => {
                    debug!(
                        target: WEAVE_TARGET,
                        script = script.name(),
                        delta,
                        "script applied"
                    );
                    applied.push(AppliedScript {
                        name: script.name().to_owned(),
                        lines_added: delta,
                    });
                    span = woven;
                }
                Descent::Abort { spec_index } => {
                    skipped.push(skip(script, spec_index));
                }
            }
        }

        Ok(WeaveReport {
            output: span.text(),
            applied,
            skipped,
        })
    }
}

fn skip(script: &PreparedScript<'_>, spec_index: usize) -> SkippedScript {
    let (pattern, selector) = script
        .source_spec(spec_index)
        .map_or((String::new(), 0), |spec| {
            (spec.pattern().to_owned(), spec.selector())
        });
    warn!(
        target: WEAVE_TARGET,
        script = script.name(),
        spec = spec_index,
        pattern = %pattern,
        selector,
        "anchor not found; script skipped"
    );
    SkippedScript {
        name: script.name().to_owned(),
        spec_index,
        pattern,
        selector,
    }
}

/// A script that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedScript {
    name: String,
    lines_added: usize,
}

impl AppliedScript {
    /// Returns the script name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns how many lines the script added; zero if its fragment was
    /// already present.
    #[must_use]
    pub const fn lines_added(&self) -> usize {
        self.lines_added
    }
}

/// A script abandoned because one of its anchors was not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedScript {
    name: String,
    spec_index: usize,
    pattern: String,
    selector: i64,
}

impl SkippedScript {
    /// Returns the script name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the index of the spec that failed to match.
    #[must_use]
    pub const fn spec_index(&self) -> usize {
        self.spec_index
    }

    /// Returns the pattern of the failing spec.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the selector of the failing spec.
    #[must_use]
    pub const fn selector(&self) -> i64 {
        self.selector
    }
}

/// Outcome of [`Weaver::weave`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaveReport {
    output: String,
    applied: Vec<AppliedScript>,
    skipped: Vec<SkippedScript>,
}

impl WeaveReport {
    /// Returns the rewritten document.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consumes the report and returns the rewritten document.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    /// Returns the scripts that ran, in order.
    #[must_use]
    pub fn applied(&self) -> &[AppliedScript] {
        &self.applied
    }

    /// Returns the scripts that were skipped, in order.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedScript] {
        &self.skipped
    }

    /// Returns the total number of lines added.
    #[must_use]
    pub fn lines_added(&self) -> usize {
        self.applied.iter().map(AppliedScript::lines_added).sum()
    }

    /// Returns whether any script changed the document.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.lines_added() > 0
    }
}
