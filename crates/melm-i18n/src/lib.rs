//! Translation tables for Elm applications.
//!
//! A table is a line-oriented file of sections, one per translation key, each
//! listing `lang=value` entries:
//!
//! ```text
//! # greetings
//! [greet]
//!   en="Hello"
//!   fr="Bonjour"
//! ```
//!
//! This crate parses and renders that format, seeds a table from an existing
//! Elm module of string constants ([`bootstrap`]) and generates one Elm module
//! per language with default-language fallback ([`generate`]).

mod bootstrap;
mod error;
mod generate;
mod table;

pub use bootstrap::bootstrap;
pub use error::I18nError;
pub use generate::{LanguageModule, generate, module_suffix};
pub use table::{Entry, Section, TranslationTable};

#[cfg(test)]
mod tests;
