//! # labcfg-schema — Schema Loading & Validation
//!
//! Provides the input side of a labcfg run:
//!
//! - [`store`]: loads the JSON Schema document whose top-level
//!   `definitions` map holds one sub-schema per [`ConfigType`].
//! - [`loader`]: loads one YAML (or JSON) configuration document into a
//!   `serde_json::Value`.
//! - [`validate`]: compiles each sub-schema once as a draft-07 validator
//!   and reports every violation, sorted by document path.
//! - [`violation`]: document paths and the `Error at <path>: <message>`
//!   rendering.
//!
//! ## Crate Policy
//!
//! - Depends only on `labcfg-core` internally.
//! - Never performs network I/O: external `$ref` URIs are refused rather
//!   than fetched.
//!
//! [`ConfigType`]: labcfg_core::ConfigType

pub mod loader;
pub mod store;
pub mod validate;
pub mod violation;

// Re-export primary types.
pub use loader::{load_config, parse_config};
pub use store::SchemaStore;
pub use validate::{render_errors, SchemaValidator};
pub use violation::{DocumentPath, PathSegment, Violation};
