//! Module identifiers and the placeholder map derived from them.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::WeaveError;

/// Placeholder holding the fully qualified dotted module name.
pub const MODULE_NAME: &str = "module_name";
/// Placeholder holding the last segment of the module name.
pub const MODULE_BASENAME: &str = "module_basename";
/// Placeholder holding the basename with its first character lower-cased.
pub const MODULE_BASENAME_LOWER1: &str = "module_basename_lower1";

/// A validated Elm module name such as `Components.Foo`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleName {
    segments: Vec<String>,
}

impl ModuleName {
    /// Parses a dotted module name.
    ///
    /// Every segment must start with an ASCII uppercase letter and continue
    /// with ASCII letters, digits or `_`.
    ///
    /// # Errors
    ///
    /// Returns [`WeaveError::InvalidModuleName`] for empty names, empty
    /// segments, or segments with invalid characters.
    pub fn parse(name: &str) -> Result<Self, WeaveError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(WeaveError::invalid_module_name(name, "name is empty"));
        }

        let mut segments = Vec::new();
        for segment in trimmed.split('.') {
            let mut chars = segment.chars();
            let Some(first) = chars.next() else {
                return Err(WeaveError::invalid_module_name(name, "empty segment"));
            };
            if !first.is_ascii_uppercase() {
                return Err(WeaveError::invalid_module_name(
                    name,
                    format!("segment `{segment}` must start with an uppercase letter"),
                ));
            }
            if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(WeaveError::invalid_module_name(
                    name,
                    format!("segment `{segment}` contains invalid characters"),
                ));
            }
            segments.push(segment.to_owned());
        }

        Ok(Self { segments })
    }

    /// Returns the dotted segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the last segment.
    #[must_use]
    pub fn basename(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Placeholder values for weave and scaffold templates.
///
/// Keys are fixed; values are always computed from a [`ModuleName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionMap {
    values: BTreeMap<&'static str, String>,
}

impl SubstitutionMap {
    /// Derives the map for `module`.
    #[must_use]
    pub fn for_module(module: &ModuleName) -> Self {
        let basename = module.basename();
        let values = BTreeMap::from([
            (MODULE_NAME, module.to_string()),
            (MODULE_BASENAME, basename.to_owned()),
            (MODULE_BASENAME_LOWER1, lower_first(basename)),
        ]);
        Self { values }
    }

    /// Looks up a placeholder value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Iterates over placeholder names and values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }
}

fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
