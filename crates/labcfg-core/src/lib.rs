//! # labcfg-core — Foundational Types for labcfg
//!
//! This crate is the leaf of the labcfg workspace. It defines the types every
//! other crate agrees on: which configuration documents exist, what a
//! validation outcome looks like, and how failures are classified.
//!
//! ## Key Design Principles
//!
//! 1. **Single `ConfigType` enum.** One definition, four variants, exhaustive
//!    `match` everywhere. Adding a configuration type forces the schema
//!    lookup, the loader layout, and the security rule table to handle it.
//!
//! 2. **Monotonic `ValidationStatus`.** A [`ValidationResult`] starts
//!    `pending`, becomes `invalid` on its first error and can never be marked
//!    `valid` afterwards. `errors` is non-empty exactly when the status is
//!    `invalid`.
//!
//! 3. **Findings are data.** Schema violations and security warnings are
//!    recorded on a result; only operational failures (missing schema,
//!    unknown type, unreadable file) are Rust errors.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `labcfg-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config_type;
pub mod error;
pub mod result;

// Re-export primary types for ergonomic imports.
pub use config_type::ConfigType;
pub use error::{ConfigTypeError, LabcfgError};
pub use result::{ValidationResult, ValidationStatus};
