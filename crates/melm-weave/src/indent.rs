//! Indentation inference for inserted fragments.

/// Indentation resolved for an insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    width: usize,
    blank_run: usize,
}

impl Indent {
    /// Returns the number of spaces to prefix inserted lines with.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns how many blank lines separate the insertion point from the
    /// nearest non-blank line above it.
    #[must_use]
    pub const fn blank_run(&self) -> usize {
        self.blank_run
    }
}

/// Resolves the indentation for text inserted at line index `at`.
///
/// Walks backward from the line before `at` over whitespace-only lines; the
/// first non-blank line supplies the width (its count of leading whitespace
/// characters). `indent_offset` is subtracted only when it does not exceed
/// that width. When every earlier line is blank the width is zero.
#[must_use]
pub fn resolve_indent(lines: &[String], at: usize, indent_offset: Option<usize>) -> Indent {
    let mut blank_run = 0;
    let mut width = 0;
    for line in lines.iter().take(at).rev() {
        if line.trim().is_empty() {
            blank_run += 1;
            continue;
        }
        width = line.chars().take_while(|c| c.is_whitespace()).count();
        break;
    }

    if let Some(offset) = indent_offset.filter(|offset| *offset <= width) {
        width -= offset;
    }

    Indent { width, blank_run }
}
