//! Error types for weave operations.
//!
//! Every variant here is a configuration or input defect that aborts the whole
//! invocation. A weave script whose anchor cannot be found is not an error: it
//! is reported as a [`crate::SkippedScript`] and the document is left as it
//! stood before that script.

use thiserror::Error;

/// Errors from preparing or running weave scripts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WeaveError {
    /// A match-spec pattern is not a valid regular expression.
    #[error("invalid pattern `{pattern}`: {message}")]
    InvalidPattern {
        /// The pattern source text.
        pattern: String,
        /// Description of the compilation failure.
        message: String,
    },

    /// A template references a placeholder the substitution map lacks.
    #[error("unresolved placeholder `${name}` in template")]
    UnresolvedPlaceholder {
        /// The placeholder name.
        name: String,
    },

    /// A template contains a `$` that does not start a placeholder.
    #[error("malformed placeholder at byte {offset} in template")]
    MalformedPlaceholder {
        /// Byte offset of the offending `$`.
        offset: usize,
    },

    /// A module identifier is not a dotted sequence of capitalised names.
    #[error("invalid module name `{name}`: {message}")]
    InvalidModuleName {
        /// The rejected module name.
        name: String,
        /// Why it was rejected.
        message: String,
    },

    /// A script table could not be read or written as JSON.
    #[error("invalid script table: {message}")]
    InvalidScriptTable {
        /// Description of the serialisation failure.
        message: String,
    },
}

impl WeaveError {
    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Creates an unresolved placeholder error.
    #[must_use]
    pub fn unresolved_placeholder(name: impl Into<String>) -> Self {
        Self::UnresolvedPlaceholder { name: name.into() }
    }

    /// Creates a malformed placeholder error.
    #[must_use]
    pub const fn malformed_placeholder(offset: usize) -> Self {
        Self::MalformedPlaceholder { offset }
    }

    /// Creates an invalid module name error.
    #[must_use]
    pub fn invalid_module_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidModuleName {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid script table error.
    #[must_use]
    pub fn invalid_script_table(message: impl Into<String>) -> Self {
        Self::InvalidScriptTable {
            message: message.into(),
        }
    }
}
