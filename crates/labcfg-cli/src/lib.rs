//! # labcfg-cli — Command-Line Interface
//!
//! Wires the schema store, validator, security rules and report aggregator
//! into the `labcfg` binary.
//!
//! ## Subcommands
//!
//! - `validate`: validate the whole configuration tree (or a `--type` subset)
//! - `check`: validate one document as a given type
//! - `types`: list configuration types and their schema coverage
//!
//! ```bash
//! labcfg validate
//! labcfg validate --type sso --format json
//! labcfg check ./mail.yaml --type email
//! labcfg types --base-dir /srv/homelab
//! ```
//!
//! Argument parsing lives in `main.rs`; handlers here return the process
//! exit code and leave process setup to the binary.

pub mod layout;
pub mod settings;
pub mod validate;

pub use layout::Layout;
pub use settings::{OutputFormat, Settings, SettingsError};
