//! Crate-level tests for melm-weave.

mod behaviour;
