//! Pattern compilation and ordinal match selection.
//!
//! Patterns are compiled in multi-line, dot-matches-newline mode so `^` and
//! `$` anchor on line boundaries while `.` can span them. Selection is kept
//! separate from the recursion so scripts can be tested against synthetic
//! documents.

use regex::{Regex, RegexBuilder};

use crate::error::WeaveError;

/// A regular expression ready to be matched against working spans.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
}

impl CompiledPattern {
    /// Compiles `pattern` with multi-line and dot-all semantics.
    ///
    /// # Errors
    ///
    /// Returns [`WeaveError::InvalidPattern`] if the regex does not compile.
    pub fn compile(pattern: &str) -> Result<Self, WeaveError> {
        let regex = RegexBuilder::new(pattern)
            .multi_line(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|error| WeaveError::invalid_pattern(pattern, error.to_string()))?;
        Ok(Self { regex })
    }

    /// Returns the pattern source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns every non-overlapping match in `text`, in document order.
    #[must_use]
    pub fn find_all(&self, text: &str) -> Vec<SpanMatch> {
        self.regex
            .find_iter(text)
            .map(|found| SpanMatch::locate(text, found.start(), found.end()))
            .collect()
    }

    /// Selects one match by ordinal.
    ///
    /// Non-negative selectors count from the first match; negative selectors
    /// index from the end, so `-1` is the last match. Returns `None` when the
    /// pattern does not match or the ordinal is out of range.
    #[must_use]
    pub fn select(&self, text: &str, selector: i64) -> Option<SpanMatch> {
        let matches = self.find_all(text);
        let index = resolve_ordinal(selector, matches.len())?;
        matches.into_iter().nth(index)
    }
}

/// A selected match, located by byte offsets and line numbers within a span.
///
/// Line numbers are zero-based. The end line counts the newlines before the
/// match end, so a match that consumes a trailing newline ends on the
/// following line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanMatch {
    start: usize,
    end: usize,
    start_line: usize,
    end_line: usize,
}

impl SpanMatch {
    fn locate(text: &str, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            start_line: line_at(text, start),
            end_line: line_at(text, end),
        }
    }

    /// Returns the byte offset where the match starts.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the byte offset just past the match.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Returns the line holding the first matched byte.
    #[must_use]
    pub const fn start_line(&self) -> usize {
        self.start_line
    }

    /// Returns the line on which the match ends.
    #[must_use]
    pub const fn end_line(&self) -> usize {
        self.end_line
    }
}

fn line_at(text: &str, offset: usize) -> usize {
    text.as_bytes()
        .iter()
        .take(offset)
        .filter(|byte| **byte == b'\n')
        .count()
}

fn resolve_ordinal(selector: i64, len: usize) -> Option<usize> {
    if selector >= 0 {
        let index = usize::try_from(selector).ok()?;
        (index < len).then_some(index)
    } else {
        let back = usize::try_from(selector.unsigned_abs()).ok()?;
        len.checked_sub(back)
    }
}
