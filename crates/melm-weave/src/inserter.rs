//! Idempotent fragment insertion.
//!
//! A fragment is spliced next to an anchor line unless the same (trimmed)
//! lines already border the insertion point, so re-running a weave converges.

use serde::{Deserialize, Serialize};

use crate::indent::resolve_indent;

/// Where a fragment lands relative to its anchor line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Above the anchor, and above any blank lines directly preceding it.
    Before,
    /// Directly below the anchor.
    #[default]
    After,
}

/// Outcome of an insertion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    lines: Vec<String>,
    delta: usize,
}

impl Insertion {
    /// Returns the resulting lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the insertion and returns the resulting lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Returns the number of lines added; zero when the fragment was present.
    #[must_use]
    pub const fn delta(&self) -> usize {
        self.delta
    }

    /// Returns whether the fragment was spliced in.
    #[must_use]
    pub const fn inserted(&self) -> bool {
        self.delta > 0
    }
}

/// Inserts a rendered `fragment` next to line `anchor` of `lines`.
///
/// The fragment is re-indented to the width resolved by
/// [`resolve_indent`](crate::resolve_indent), keeping its own relative
/// indentation. With [`Placement::Before`] it moves up past the blank lines
/// that precede the anchor. Nothing is inserted if the lines at the insertion
/// index, or the lines just above it, already equal the fragment once
/// whitespace is trimmed.
#[must_use]
pub fn insert(
    lines: &[String],
    anchor: usize,
    fragment: &str,
    placement: Placement,
    indent_offset: Option<usize>,
) -> Insertion {
    let at = match placement {
        Placement::After => anchor.saturating_add(1),
        Placement::Before => anchor,
    }
    .min(lines.len());
    let indent = resolve_indent(lines, at, indent_offset);
    let index = match placement {
        Placement::After => at,
        Placement::Before => at.saturating_sub(indent.blank_run()),
    };

    let rendered = reindent(fragment, indent.width());
    if borders(lines, index, &rendered) {
        return Insertion {
            lines: lines.to_vec(),
            delta: 0,
        };
    }

    let delta = rendered.len();
    let spliced = lines
        .iter()
        .take(index)
        .cloned()
        .chain(rendered)
        .chain(lines.iter().skip(index).cloned())
        .collect();
    Insertion {
        lines: spliced,
        delta,
    }
}

fn reindent(fragment: &str, width: usize) -> Vec<String> {
    let body = fragment.strip_suffix('\n').unwrap_or(fragment);
    let prefix = " ".repeat(width);
    body.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect()
}

fn borders(lines: &[String], index: usize, rendered: &[String]) -> bool {
    let span = rendered.len();
    let same_as_fragment = |start: usize| {
        lines
            .get(start..start.saturating_add(span))
            .is_some_and(|window| {
                window
                    .iter()
                    .map(|line| line.trim())
                    .eq(rendered.iter().map(|line| line.trim()))
            })
    };
    same_as_fragment(index) || index.checked_sub(span).is_some_and(same_as_fragment)
}
