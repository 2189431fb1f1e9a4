//! # Report Aggregation
//!
//! [`ReportAggregator`] collects the [`ValidationResult`]s of one run and
//! forwards every event to a [`Reporter`]. Output goes only through that
//! reporter; the aggregator itself writes nothing.

use std::io;
use std::path::Path;

use chrono::Utc;
use labcfg_core::{ConfigType, ValidationResult};
use serde::Serialize;

use crate::reporter::{Reporter, RunReport};
use crate::summary::{exit_code, summarize, Summary};

/// A document that was expected but not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDocument {
    pub config_type: ConfigType,
    pub path: String,
    pub reason: String,
}

/// Collects results for one run.
#[derive(Debug)]
pub struct ReportAggregator<R> {
    reporter: R,
    results: Vec<ValidationResult>,
    skipped: Vec<SkippedDocument>,
}

impl<R: Reporter> ReportAggregator<R> {
    pub fn new(reporter: R) -> Self {
        Self {
            reporter,
            results: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Announce that `path` is about to be validated as `config_type`.
    pub fn begin(&mut self, config_type: ConfigType, path: &Path) {
        self.reporter.started(config_type, path);
    }

    /// Record a completed result.
    pub fn record(&mut self, result: ValidationResult) {
        self.reporter.recorded(&result);
        self.results.push(result);
    }

    /// Record a document that was not validated. Skipped documents do not
    /// affect the exit code.
    pub fn skip(&mut self, config_type: ConfigType, path: &Path, reason: impl Into<String>) {
        let skipped = SkippedDocument {
            config_type,
            path: path.display().to_string(),
            reason: reason.into(),
        };
        self.reporter.skipped(&skipped);
        self.skipped.push(skipped);
    }

    /// Results recorded so far, in recording order.
    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    /// Documents skipped so far.
    pub fn skipped(&self) -> &[SkippedDocument] {
        &self.skipped
    }

    /// Summarise the run and hand the final report to the reporter.
    ///
    /// # Errors
    ///
    /// Returns the reporter's write error, if any.
    pub fn finish(mut self) -> io::Result<RunOutcome> {
        let summary = summarize(&self.results);
        self.reporter.finished(&RunReport {
            generated_at: Utc::now(),
            summary: &summary,
            results: &self.results,
            skipped: &self.skipped,
        })?;
        Ok(RunOutcome {
            summary,
            results: self.results,
            skipped: self.skipped,
        })
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: Summary,
    pub results: Vec<ValidationResult>,
    pub skipped: Vec<SkippedDocument>,
}

impl RunOutcome {
    /// `0` when every validated document is valid, `1` otherwise.
    pub fn exit_code(&self) -> u8 {
        exit_code(&self.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recording {
        events: Vec<String>,
        finished_total: Option<usize>,
    }

    impl Reporter for Recording {
        fn started(&mut self, config_type: ConfigType, _path: &Path) {
            self.events.push(format!("start {config_type}"));
        }

        fn skipped(&mut self, skipped: &SkippedDocument) {
            self.events.push(format!("skip {}", skipped.config_type));
        }

        fn recorded(&mut self, result: &ValidationResult) {
            self.events
                .push(format!("record {} {}", result.config_type(), result.status()));
        }

        fn finished(&mut self, report: &RunReport<'_>) -> io::Result<()> {
            self.finished_total = Some(report.summary.total);
            Ok(())
        }
    }

    fn valid(config_type: ConfigType) -> ValidationResult {
        let mut r = ValidationResult::new(config_type, format!("{config_type}.yaml"));
        r.mark_as_valid();
        r
    }

    #[test]
    fn events_reach_the_reporter_in_order() {
        let mut reporter = Recording::default();
        let mut agg = ReportAggregator::new(&mut reporter);
        agg.begin(ConfigType::Network, Path::new("network.yaml"));
        agg.record(valid(ConfigType::Network));
        agg.skip(ConfigType::Email, Path::new("email.yaml"), "not found");
        let outcome = agg.finish().unwrap();

        assert_eq!(
            reporter.events,
            vec!["start network", "record network valid", "skip email"]
        );
        assert_eq!(reporter.finished_total, Some(1));
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn skipped_documents_do_not_fail_the_run() {
        let mut agg = ReportAggregator::new(Recording::default());
        agg.record(valid(ConfigType::Network));
        agg.record(valid(ConfigType::Email));
        agg.skip(ConfigType::Domains, Path::new("domains.yaml"), "not found");
        agg.record(valid(ConfigType::Sso));
        assert_eq!(agg.results().len(), 3);
        assert_eq!(agg.skipped()[0].config_type, ConfigType::Domains);

        let outcome = agg.finish().unwrap();
        assert_eq!(outcome.summary.total, 3);
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn one_invalid_result_fails_the_run() {
        let mut broken = ValidationResult::new(ConfigType::Sso, "sso.yaml");
        broken.add_error("Error at : \"provider\" is a required property");
        let mut agg = ReportAggregator::new(Recording::default());
        agg.record(valid(ConfigType::Network));
        agg.record(broken);
        let outcome = agg.finish().unwrap();
        assert_eq!(outcome.summary.invalid, 1);
        assert_eq!(outcome.exit_code(), 1);
    }

    #[test]
    fn reporter_write_failure_propagates() {
        struct Failing;
        impl Reporter for Failing {
            fn skipped(&mut self, _: &SkippedDocument) {}
            fn recorded(&mut self, _: &ValidationResult) {}
            fn finished(&mut self, _: &RunReport<'_>) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
        }
        let err = ReportAggregator::new(Failing).finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
