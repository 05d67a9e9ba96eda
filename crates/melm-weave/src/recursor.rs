//! Narrowing recursion over match specs.
//!
//! Each spec selects a match in the current span, narrows to the lines that
//! match covers and hands the rest of the list to the next level. Changes made
//! below are spliced back on the way out, then the level's own fragment (if
//! any) is inserted next to its match's last line, shifted by however many
//! lines the deeper levels added.

use tracing::debug;

use crate::inserter::insert;
use crate::script::PreparedSpec;
use crate::span::WorkingSpan;

const RECURSOR_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::recursor");

/// Result of descending through a list of specs.
#[derive(Debug)]
pub(crate) enum Descent {
    /// Every spec matched; `span` is the rewritten span and `delta` the number
    /// of lines added inside it.
    Woven { span: WorkingSpan, delta: usize },
    /// The spec at `spec_index` (counted from the top of the script) found no
    /// match. Nothing below it was applied.
    Abort { spec_index: usize },
}

/// Applies `specs` to `span`, starting at depth `depth`.
pub(crate) fn descend(span: &WorkingSpan, specs: &[PreparedSpec], depth: usize) -> Descent {
    let Some((spec, rest)) = specs.split_first() else {
        return Descent::Woven {
            span: span.clone(),
            delta: 0,
        };
    };

    let Some(found) = spec.pattern().select(&span.text(), spec.selector()) else {
        debug!(
            target: RECURSOR_TARGET,
            depth,
            pattern = spec.pattern().as_str(),
            selector = spec.selector(),
            "no match in span"
        );
        return Descent::Abort { spec_index: depth };
    };
    let Some(narrowed) = span.narrow(found.start_line(), found.end_line()) else {
        return Descent::Abort { spec_index: depth };
    };
    debug!(
        target: RECURSOR_TARGET,
        depth,
        first_line = narrowed.start_line(),
        lines = narrowed.len(),
        "narrowed span"
    );

    let (inner, inner_delta) = match descend(&narrowed, rest, depth.saturating_add(1)) {
        Descent::Woven { span: woven, delta } => (woven, delta),
        abort @ Descent::Abort { .. } => return abort,
    };
    let spliced = span.splice(found.start_line(), found.end_line(), inner.into_lines());

    let Some(fragment) = spec.fragment() else {
        return Descent::Woven {
            span: spliced,
            delta: inner_delta,
        };
    };
    let anchor = found.end_line().saturating_add(inner_delta);
    let insertion = insert(
        spliced.lines(),
        anchor,
        fragment,
        spec.placement(),
        spec.indent_offset(),
    );
    debug!(
        target: RECURSOR_TARGET,
        depth,
        anchor_line = spliced.start_line().saturating_add(anchor),
        added = insertion.delta(),
        "fragment placed"
    );
    let delta = inner_delta.saturating_add(insertion.delta());
    Descent::Woven {
        span: spliced.with_lines(insertion.into_lines()),
        delta,
    }
}
