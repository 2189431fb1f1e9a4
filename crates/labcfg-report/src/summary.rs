//! # Summary
//!
//! A pure fold over the results of a run. Grouping maps are `BTreeMap`s
//! keyed by [`ConfigType`], so they iterate in processing order.

use std::collections::BTreeMap;

use labcfg_core::{ConfigType, ValidationResult};
use serde::Serialize;

/// Cross-document totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of documents validated (skipped documents excluded).
    pub total: usize,
    /// Number of documents whose status is not `valid`.
    pub invalid: usize,
    /// Errors per type; types without errors are absent.
    pub errors_by_type: BTreeMap<ConfigType, Vec<String>>,
    /// Security warnings across all documents.
    pub total_warnings: usize,
    /// Warnings per type; types without warnings are absent.
    pub warnings_by_type: BTreeMap<ConfigType, Vec<String>>,
}

impl Summary {
    /// Whether the run passes: every validated document is `valid`.
    pub fn passed(&self) -> bool {
        self.invalid == 0
    }
}

/// Summarise `results`.
pub fn summarize(results: &[ValidationResult]) -> Summary {
    let mut summary = Summary {
        total: results.len(),
        ..Summary::default()
    };

    for result in results {
        if !result.is_valid() {
            summary.invalid += 1;
        }
        if !result.errors().is_empty() {
            summary
                .errors_by_type
                .entry(result.config_type())
                .or_default()
                .extend(result.errors().iter().cloned());
        }
        if !result.security_warnings().is_empty() {
            summary.total_warnings += result.security_warnings().len();
            summary
                .warnings_by_type
                .entry(result.config_type())
                .or_default()
                .extend(result.security_warnings().iter().cloned());
        }
    }

    summary
}

/// Process exit status for a run: `0` when every result is valid, `1`
/// otherwise. An empty run passes.
pub fn exit_code(results: &[ValidationResult]) -> u8 {
    if results.iter().all(ValidationResult::is_valid) {
        0
    } else {
        1
    }
}
