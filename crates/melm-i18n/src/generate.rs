//! Per-language Elm module generation with default-language fallback.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::I18nError;
use crate::table::TranslationTable;

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static ELM_VALUE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// A generated Elm module holding one string constant per key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageModule {
    name: String,
    source: String,
    missing: Vec<String>,
}

impl LanguageModule {
    /// Returns the module name, for example `I18n.Fr`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the module's last segment, for example `Fr`.
    #[must_use]
    pub fn file_stem(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Returns the Elm source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns keys with neither a translation nor a default, in table order.
    #[must_use]
    pub fn missing(&self) -> &[String] {
        &self.missing
    }
}

/// Returns the module segment for `language`: its first letter upper-cased.
///
/// # Errors
///
/// Returns [`I18nError::InvalidLanguage`] unless `language` starts with an
/// ASCII letter and continues with ASCII letters, digits or `_`.
pub fn module_suffix(language: &str) -> Result<String, I18nError> {
    let mut chars = language.chars();
    match chars.next() {
        Some(first)
            if first.is_ascii_alphabetic()
                && chars.clone().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
        {
            Ok(first.to_ascii_uppercase().to_string() + chars.as_str())
        }
        _ => Err(I18nError::InvalidLanguage {
            language: language.to_owned(),
        }),
    }
}

struct Resolved<'a> {
    key: &'a str,
    value: Option<&'a str>,
    from_default: bool,
}

/// Generates `module I18n.<Lang>` for `language`.
///
/// Sections are walked in order, considering only entries for `language` and
/// `default_language`. The first such entry fills a key; a later entry for
/// `language` replaces a value that came from the default, keeping the key's
/// position. Keys with no usable entry are reported through
/// [`LanguageModule::missing`] and left out of the source.
///
/// # Errors
///
/// Returns [`I18nError::InvalidLanguage`] for a language that cannot name a
/// module and [`I18nError::InvalidKey`] for a key that cannot name an Elm
/// value.
pub fn generate(
    table: &TranslationTable,
    language: &str,
    default_language: &str,
) -> Result<LanguageModule, I18nError> {
    let name = format!("I18n.{}", module_suffix(language)?);
    let mut resolved: Vec<Resolved<'_>> = Vec::new();

    for section in table.sections() {
        let key = section.key();
        if !ELM_VALUE_NAME.is_match(key) {
            return Err(I18nError::InvalidKey {
                key: key.to_owned(),
            });
        }
        let existing = resolved.iter().position(|slot| slot.key == key);
        let position = existing.unwrap_or_else(|| {
            resolved.push(Resolved {
                key,
                value: None,
                from_default: false,
            });
            resolved.len() - 1
        });
        let Some(slot) = resolved.get_mut(position) else {
            continue;
        };

        for entry in section.entries() {
            let is_target = entry.language() == language;
            if !is_target && entry.language() != default_language {
                continue;
            }
            if slot.value.is_none() || (slot.from_default && is_target) {
                slot.value = Some(entry.value());
                slot.from_default = !is_target;
            }
        }
    }

    let mut source = format!("module {name} exposing (..)\n");
    let mut missing = Vec::new();
    for slot in resolved {
        match slot.value {
            Some(value) => {
                source.push_str(&format!(
                    "\n\n{key} : String\n{key} =\n    {value}\n",
                    key = slot.key
                ));
            }
            None => missing.push(slot.key.to_owned()),
        }
    }

    Ok(LanguageModule {
        name,
        source,
        missing,
    })
}
