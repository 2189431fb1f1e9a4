//! # Reporters
//!
//! A [`Reporter`] receives the events of one run: each document as it is
//! started, skipped or finished, then the final [`RunReport`].
//!
//! - [`TracingReporter`] renders everything as `tracing` events, the
//!   default human-readable output.
//! - [`JsonReporter`] stays quiet per document and writes the whole
//!   [`RunReport`] as one JSON document at the end.

use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use labcfg_core::{ConfigType, ValidationResult};
use serde::Serialize;

use crate::aggregator::SkippedDocument;
use crate::summary::Summary;

/// The complete output of a run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// When the report was produced (RFC 3339, UTC).
    pub generated_at: DateTime<Utc>,
    pub summary: &'a Summary,
    pub results: &'a [ValidationResult],
    pub skipped: &'a [SkippedDocument],
}

/// Sink for run events.
pub trait Reporter {
    /// Validation of a document is about to start.
    fn started(&mut self, _config_type: ConfigType, _path: &Path) {}

    /// A document was not found and will not be validated.
    fn skipped(&mut self, skipped: &SkippedDocument);

    /// A document has been fully validated and checked.
    fn recorded(&mut self, result: &ValidationResult);

    /// The run is over.
    ///
    /// # Errors
    ///
    /// Returns any error from writing the report.
    fn finished(&mut self, report: &RunReport<'_>) -> io::Result<()>;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn started(&mut self, config_type: ConfigType, path: &Path) {
        (**self).started(config_type, path);
    }

    fn skipped(&mut self, skipped: &SkippedDocument) {
        (**self).skipped(skipped);
    }

    fn recorded(&mut self, result: &ValidationResult) {
        (**self).recorded(result);
    }

    fn finished(&mut self, report: &RunReport<'_>) -> io::Result<()> {
        (**self).finished(report)
    }
}

/// Human-readable report through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn started(&mut self, config_type: ConfigType, path: &Path) {
        tracing::info!(%config_type, path = %path.display(), "Validating {config_type} configuration...");
    }

    fn skipped(&mut self, skipped: &SkippedDocument) {
        tracing::warn!(
            config_type = %skipped.config_type,
            path = %skipped.path,
            "Configuration file not found: {}",
            skipped.path
        );
    }

    fn recorded(&mut self, result: &ValidationResult) {
        let config_type = result.config_type();
        if result.is_valid() {
            tracing::info!(%config_type, "Configuration validation successful");
        } else {
            tracing::error!(
                %config_type,
                errors = result.errors().len(),
                "Validation errors found:"
            );
            for error in result.errors() {
                tracing::error!(%config_type, "  {error}");
            }
        }

        if !result.security_warnings().is_empty() {
            tracing::warn!(
                %config_type,
                warnings = result.security_warnings().len(),
                "Security issues detected:"
            );
            for warning in result.security_warnings() {
                tracing::warn!(%config_type, "  {warning}");
            }
        }
    }

    fn finished(&mut self, report: &RunReport<'_>) -> io::Result<()> {
        let summary = report.summary;
        tracing::info!("Validation Summary Report");
        tracing::info!("=========================");
        tracing::info!("Total Configurations Checked: {}", summary.total);
        tracing::info!("Invalid Configurations: {}", summary.invalid);
        tracing::info!("Total Security Warnings: {}", summary.total_warnings);
        if !report.skipped.is_empty() {
            tracing::info!("Skipped Configurations: {}", report.skipped.len());
        }
        if summary.passed() {
            tracing::info!("Result: PASSED");
        } else {
            tracing::error!("Result: FAILED ({} invalid)", summary.invalid);
        }

        if !summary.errors_by_type.is_empty() {
            tracing::info!("Errors by Configuration Type:");
            for (config_type, errors) in &summary.errors_by_type {
                tracing::info!("{} Errors:", config_type.as_str().to_uppercase());
                for error in errors {
                    tracing::info!("  - {error}");
                }
            }
        }

        if !summary.warnings_by_type.is_empty() {
            tracing::info!("Security Warnings Summary:");
            for (config_type, warnings) in &summary.warnings_by_type {
                tracing::info!("{}:", config_type.as_str().to_uppercase());
                for warning in warnings {
                    tracing::info!("  - {warning}");
                }
            }
        }
        Ok(())
    }
}

/// Writes the [`RunReport`] as pretty-printed JSON when the run finishes.
#[derive(Debug)]
pub struct JsonReporter<W> {
    writer: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn skipped(&mut self, skipped: &SkippedDocument) {
        tracing::debug!(config_type = %skipped.config_type, path = %skipped.path, "skipped");
    }

    fn recorded(&mut self, result: &ValidationResult) {
        tracing::debug!(%result, "recorded");
    }

    fn finished(&mut self, report: &RunReport<'_>) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}
