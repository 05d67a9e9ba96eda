//! Error types for translation tables.

use thiserror::Error;

/// Errors from reading translation tables or generating language modules.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum I18nError {
    /// A table line could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// An entry appeared before any `[key]` header.
    #[error("line {line}: entry outside of a section")]
    EntryOutsideSection {
        /// One-based line number.
        line: usize,
    },

    /// A triple-quoted value was still open at the end of the input.
    #[error("line {line}: unterminated multi-line value for `{key}`")]
    UnterminatedValue {
        /// One-based line where the value starts.
        line: usize,
        /// Key or language the value belongs to.
        key: String,
    },

    /// A language code cannot name an Elm module.
    #[error("invalid language `{language}`: expected ASCII letters, digits or `_`")]
    InvalidLanguage {
        /// The rejected language code.
        language: String,
    },

    /// A translation key cannot name an Elm value.
    #[error("invalid key `{key}`: Elm values start with a lowercase letter")]
    InvalidKey {
        /// The rejected key.
        key: String,
    },
}

impl I18nError {
    /// Creates a parse error for `line`.
    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Creates an unterminated value error.
    #[must_use]
    pub fn unterminated(line: usize, key: impl Into<String>) -> Self {
        Self::UnterminatedValue {
            line,
            key: key.into(),
        }
    }

    /// Returns the one-based line the error points at, if any.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. }
            | Self::EntryOutsideSection { line }
            | Self::UnterminatedValue { line, .. } => Some(*line),
            Self::InvalidLanguage { .. } | Self::InvalidKey { .. } => None,
        }
    }
}
