//! # labcfg-report — Run Summary & Reporting
//!
//! Consumes the [`ValidationResult`]s of one run and turns them into a
//! [`Summary`], a process exit status, and operator-facing output.
//!
//! - [`summary`]: the read-only fold over results.
//! - [`reporter`]: the [`Reporter`] sink trait with a `tracing` log-line
//!   implementation and a JSON implementation.
//! - [`aggregator`]: [`ReportAggregator`], which owns one reporter for the
//!   lifetime of a run and produces the final [`RunOutcome`].
//!
//! Output goes through the reporter handed to the aggregator; nothing in
//! this crate installs or depends on process-global logging configuration.
//!
//! [`ValidationResult`]: labcfg_core::ValidationResult

pub mod aggregator;
pub mod reporter;
pub mod summary;

pub use aggregator::{ReportAggregator, RunOutcome, SkippedDocument};
pub use reporter::{JsonReporter, Reporter, RunReport, TracingReporter};
pub use summary::{exit_code, summarize, Summary};
