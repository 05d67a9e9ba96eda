//! Working spans: contiguous runs of document lines.

/// A contiguous run of lines from a document.
///
/// `start_line` is the absolute, zero-based line number of the first line in
/// the full document. Spans are values: narrowing and splicing return new
/// spans and never mutate the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingSpan {
    lines: Vec<String>,
    start_line: usize,
}

impl WorkingSpan {
    /// Creates a span covering the whole document.
    ///
    /// Lines are split on `\n` only, so joining them back with
    /// [`WorkingSpan::text`] reproduces the input exactly.
    #[must_use]
    pub fn from_document(document: &str) -> Self {
        Self {
            lines: document.split('\n').map(str::to_owned).collect(),
            start_line: 0,
        }
    }

    /// Returns the span's lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the absolute line number of the first line.
    #[must_use]
    pub const fn start_line(&self) -> usize {
        self.start_line
    }

    /// Returns the number of lines in the span.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns whether the span holds no lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the span's text, lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns the sub-span covering lines `first..=last`, or `None` when the
    /// range falls outside this span.
    #[must_use]
    pub fn narrow(&self, first: usize, last: usize) -> Option<Self> {
        let lines = self.lines.get(first..=last)?.to_vec();
        Some(Self {
            lines,
            start_line: self.start_line.saturating_add(first),
        })
    }

    /// Returns a copy of this span with lines `first..=last` replaced by
    /// `replacement`. Lines outside the range are carried over untouched.
    #[must_use]
    pub fn splice(&self, first: usize, last: usize, replacement: Vec<String>) -> Self {
        let lines = self
            .lines
            .iter()
            .take(first)
            .cloned()
            .chain(replacement)
            .chain(self.lines.iter().skip(last.saturating_add(1)).cloned())
            .collect();
        Self {
            lines,
            start_line: self.start_line,
        }
    }

    /// Returns a span at the same position holding `lines`.
    #[must_use]
    pub(crate) const fn with_lines(&self, lines: Vec<String>) -> Self {
        Self {
            lines,
            start_line: self.start_line,
        }
    }

    /// Consumes the span and returns its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
