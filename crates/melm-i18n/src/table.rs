//! The translation table model, parser and renderer.

use crate::error::I18nError;

const TRIPLE_QUOTES: [&str; 2] = ["\"\"\"", "'''"];

/// One `lang=value` line of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    language: String,
    value: String,
}

impl Entry {
    /// Creates an entry.
    #[must_use]
    pub fn new(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            value: value.into(),
        }
    }

    /// Returns the language code.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the raw value, quotes included.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A `[key]` header and the entries below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    key: String,
    entries: Vec<Entry>,
}

impl Section {
    /// Creates an empty section.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: Vec::new(),
        }
    }

    /// Returns the translation key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }
}

/// An ordered list of sections. Keys may repeat; order is file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    sections: Vec<Section>,
}

impl TranslationTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Returns the sections in file order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Appends a section.
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Returns the number of sections.
    #[must_use]
    pub const fn entry_count(&self) -> usize {
        self.sections.len()
    }

    /// Parses the table format.
    ///
    /// Blank lines and lines starting with `#` are ignored between entries.
    /// A value opening with `"""` or `'''` continues over the following lines
    /// until one ends with the same quote; continuation lines keep their
    /// leading whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::Parse`] for malformed headers or entries,
    /// [`I18nError::EntryOutsideSection`] for an entry before the first
    /// header, and [`I18nError::UnterminatedValue`] for a multi-line value
    /// that never closes.
    pub fn parse(input: &str) -> Result<Self, I18nError> {
        let mut table = Self::new();
        let mut lines = input.lines().enumerate().map(|(index, line)| (index + 1, line));

        while let Some((number, raw)) = lines.next() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let key = header
                    .strip_suffix(']')
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .ok_or_else(|| I18nError::parse(number, "expected `[key]`"))?;
                table.push(Section::new(key));
                continue;
            }

            let (language, first) = line
                .split_once('=')
                .map(|(lang, value)| (lang.trim(), value.trim()))
                .filter(|(lang, _)| !lang.is_empty())
                .ok_or_else(|| I18nError::parse(number, "expected `lang=value`"))?;
            let Some(section) = table.sections.last_mut() else {
                return Err(I18nError::EntryOutsideSection { line: number });
            };

            let value = match open_triple_quote(first) {
                Some(quote) => {
                    let continuation = lines.by_ref().map(|(_, rest)| rest.trim_end());
                    collect_multi_line(first, quote, continuation)
                        .ok_or_else(|| I18nError::unterminated(number, language))?
                }
                None => first.to_owned(),
            };
            section.push(Entry::new(language, value));
        }

        Ok(table)
    }

    /// Renders the table: a header per section, two-space indented entries,
    /// and a blank line after each section.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str(&format!("[{}]\n", section.key));
            for entry in &section.entries {
                out.push_str(&format!("  {}={}\n", entry.language, entry.value));
            }
            out.push('\n');
        }
        out
    }
}

/// Returns the quote a value opens without closing on the same line.
pub(crate) fn open_triple_quote(value: &str) -> Option<&'static str> {
    TRIPLE_QUOTES.into_iter().find(|quote| {
        value.starts_with(quote)
            && !(value.len() >= quote.len() * 2 && value.ends_with(quote))
    })
}

/// Joins `first` with continuation lines up to and including the one ending
/// with `quote`. Returns `None` when the input runs out first.
pub(crate) fn collect_multi_line<'a>(
    first: &str,
    quote: &str,
    continuation: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let mut value = first.to_owned();
    for line in continuation {
        value.push('\n');
        value.push_str(line);
        if line.ends_with(quote) {
            return Some(value);
        }
    }
    None
}
