//! # labcfg-security — Security Posture Checks
//!
//! Hand-written domain checks layered on top of schema validation. They are
//! advisory: a triggered rule adds a warning to the document's
//! [`ValidationResult`](labcfg_core::ValidationResult) and never changes its
//! status.
//!
//! ## Architecture
//!
//! - **Field navigation** (`field.rs`): explicit optional lookup into a
//!   document and the truthiness test the rules share.
//!
//! - **Rules** (`rules.rs`): the static rule table, one slice per
//!   [`ConfigType`](labcfg_core::ConfigType), selected by an exhaustive
//!   `match`, plus the [`SecurityRuleEngine`] that evaluates it.
//!
//! ## Crate Policy
//!
//! - Checks run whether or not the document is schema-valid, and must not
//!   panic on any shape of input.
//! - Each rule declares how it treats a missing field; nothing relies on an
//!   implicit default.

pub mod field;
pub mod rules;

pub use field::{is_truthy, lookup, yaml11_bool, Absence};
pub use rules::{Condition, SecurityRule, SecurityRuleEngine};
