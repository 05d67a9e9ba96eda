//! Declarative weave scripts.
//!
//! Scripts are plain data so new wiring points can be added, or a whole table
//! loaded from JSON, without touching the recursion engine.

use serde::{Deserialize, Serialize};

use crate::error::WeaveError;
use crate::inserter::Placement;
use crate::pattern::CompiledPattern;
use crate::placeholder::render;
use crate::substitution::SubstitutionMap;

/// One step of a weave script.
///
/// A spec without a template only narrows the working span; a spec with a
/// template also inserts the rendered fragment next to its match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpec {
    pattern: String,
    #[serde(default)]
    selector: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    template: Option<String>,
    #[serde(default)]
    placement: Placement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    indent_offset: Option<usize>,
}

impl MatchSpec {
    /// Creates a narrowing spec selecting match `selector` of `pattern`.
    #[must_use]
    pub fn new(pattern: impl Into<String>, selector: i64) -> Self {
        Self {
            pattern: pattern.into(),
            selector,
            template: None,
            placement: Placement::After,
            indent_offset: None,
        }
    }

    /// Attaches a fragment template to insert next to the match.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Sets where the fragment lands relative to the anchor line.
    #[must_use]
    pub const fn placed(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Reduces the inferred indentation by `offset` columns.
    #[must_use]
    pub const fn with_indent_offset(mut self, offset: usize) -> Self {
        self.indent_offset = Some(offset);
        self
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the match ordinal.
    #[must_use]
    pub const fn selector(&self) -> i64 {
        self.selector
    }

    /// Returns the fragment template, if any.
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Returns the fragment placement.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Returns the indentation offset, if any.
    #[must_use]
    pub const fn indent_offset(&self) -> Option<usize> {
        self.indent_offset
    }

    fn prepare(&self, substitutions: &SubstitutionMap) -> Result<PreparedSpec, WeaveError> {
        let fragment = self
            .template
            .as_deref()
            .map(|template| render(template, substitutions))
            .transpose()?;
        Ok(PreparedSpec {
            pattern: CompiledPattern::compile(&self.pattern)?,
            selector: self.selector,
            fragment,
            placement: self.placement,
            indent_offset: self.indent_offset,
        })
    }
}

/// A named, ordered sequence of match specs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaveScript {
    name: String,
    specs: Vec<MatchSpec>,
}

impl WeaveScript {
    /// Creates a script.
    #[must_use]
    pub fn new(name: impl Into<String>, specs: Vec<MatchSpec>) -> Self {
        Self {
            name: name.into(),
            specs,
        }
    }

    /// Returns the script name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the specs in order.
    #[must_use]
    pub fn specs(&self) -> &[MatchSpec] {
        &self.specs
    }

    /// Compiles patterns and renders templates against `substitutions`.
    pub(crate) fn prepare(
        &self,
        substitutions: &SubstitutionMap,
    ) -> Result<PreparedScript<'_>, WeaveError> {
        let specs = self
            .specs
            .iter()
            .map(|spec| spec.prepare(substitutions))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PreparedScript {
            source: self,
            specs,
        })
    }
}

/// An ordered table of weave scripts; order is invocation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTable {
    scripts: Vec<WeaveScript>,
}

impl ScriptTable {
    /// Creates a table from scripts in invocation order.
    #[must_use]
    pub const fn new(scripts: Vec<WeaveScript>) -> Self {
        Self { scripts }
    }

    /// Returns the scripts in invocation order.
    #[must_use]
    pub fn scripts(&self) -> &[WeaveScript] {
        &self.scripts
    }

    /// Looks up a script by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WeaveScript> {
        self.scripts.iter().find(|script| script.name == name)
    }

    /// Parses a table from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`WeaveError::InvalidScriptTable`] if the JSON does not
    /// describe a table.
    pub fn from_json(json: &str) -> Result<Self, WeaveError> {
        serde_json::from_str(json).map_err(|error| WeaveError::invalid_script_table(error.to_string()))
    }

    /// Serialises the table as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`WeaveError::InvalidScriptTable`] if serialisation fails.
    pub fn to_json_pretty(&self) -> Result<String, WeaveError> {
        serde_json::to_string_pretty(self)
            .map_err(|error| WeaveError::invalid_script_table(error.to_string()))
    }
}

/// A spec with its pattern compiled and its template rendered.
#[derive(Debug)]
pub(crate) struct PreparedSpec {
    pattern: CompiledPattern,
    selector: i64,
    fragment: Option<String>,
    placement: Placement,
    indent_offset: Option<usize>,
}

impl PreparedSpec {
    pub(crate) const fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub(crate) const fn selector(&self) -> i64 {
        self.selector
    }

    pub(crate) fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub(crate) const fn placement(&self) -> Placement {
        self.placement
    }

    pub(crate) const fn indent_offset(&self) -> Option<usize> {
        self.indent_offset
    }
}

/// A script whose specs are ready to run.
#[derive(Debug)]
pub(crate) struct PreparedScript<'a> {
    source: &'a WeaveScript,
    specs: Vec<PreparedSpec>,
}

impl PreparedScript<'_> {
    pub(crate) fn name(&self) -> &str {
        self.source.name()
    }

    pub(crate) fn specs(&self) -> &[PreparedSpec] {
        &self.specs
    }

    pub(crate) fn source_spec(&self, index: usize) -> Option<&MatchSpec> {
        self.source.specs().get(index)
    }
}
