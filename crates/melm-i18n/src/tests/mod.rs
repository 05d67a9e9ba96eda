//! Crate-level tests for melm-i18n.
