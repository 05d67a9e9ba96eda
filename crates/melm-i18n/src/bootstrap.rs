//! Seeds a translation table from an Elm module of string constants.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::I18nError;
use crate::table::{Entry, Section, TranslationTable, collect_multi_line, open_triple_quote};

/// A definition line: exactly one `=` with a non-empty left-hand side.
#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([^=\s][^=]*?)\s*=\s*([^=]*?)\s*$").expect("valid definition regex")
});

/// Scans `source` for `key = value` definitions and records each value under
/// `language`.
///
/// Lines with no `=` or more than one are skipped. A value opening with a
/// triple quote runs until a line ending with the same quote; those
/// continuation lines may contain `=` freely. Every definition becomes its own
/// section, in source order.
///
/// # Errors
///
/// Returns [`I18nError::UnterminatedValue`] when a triple-quoted value is
/// still open at the end of `source`.
pub fn bootstrap(source: &str, language: &str) -> Result<TranslationTable, I18nError> {
    let mut table = TranslationTable::new();
    let mut lines = source.lines().enumerate().map(|(index, line)| (index + 1, line));

    while let Some((number, raw)) = lines.next() {
        let Some(captures) = DEFINITION.captures(raw.trim_end()) else {
            continue;
        };
        let (Some(key_match), Some(value_match)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        let (key, first) = (key_match.as_str(), value_match.as_str());

        let value = match open_triple_quote(first) {
            Some(quote) => {
                let continuation = lines.by_ref().map(|(_, rest)| rest.trim_end());
                collect_multi_line(first, quote, continuation)
                    .ok_or_else(|| I18nError::unterminated(number, key))?
            }
            None => first.to_owned(),
        };

        let mut section = Section::new(key);
        section.push(Entry::new(language, value));
        table.push(section);
    }

    Ok(table)
}
