//! # Validation Results
//!
//! One [`ValidationResult`] is created per configuration document at the
//! start of its validation. The schema step appends errors, the security
//! step appends warnings, and the result is then handed to the report
//! aggregator read-only.
//!
//! ## Status Machine
//!
//! ```text
//!   pending ──(add_error)──────────────► invalid   (terminal)
//!      │
//!      └──(mark_as_valid, no errors)───► valid
//! ```
//!
//! The fields are private so the invariant "`errors` is non-empty exactly
//! when `status == invalid`" cannot be broken from outside this module.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConfigType;

/// Lifecycle state of a [`ValidationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Validation has not finished.
    Pending,
    /// Validation finished with zero errors.
    Valid,
    /// At least one error was recorded.
    Invalid,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        };
        f.write_str(s)
    }
}

/// Validation outcome for a single configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    config_type: ConfigType,
    config_path: String,
    status: ValidationStatus,
    errors: Vec<String>,
    security_warnings: Vec<String>,
}

impl ValidationResult {
    /// Start a new, `pending` result for the document at `config_path`.
    pub fn new(config_type: ConfigType, config_path: impl Into<String>) -> Self {
        Self {
            config_type,
            config_path: config_path.into(),
            status: ValidationStatus::Pending,
            errors: Vec::new(),
            security_warnings: Vec::new(),
        }
    }

    /// Record an error. The result becomes (and stays) `invalid`.
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.status = ValidationStatus::Invalid;
    }

    /// Record a security warning. Does not affect the status.
    pub fn add_security_warning(&mut self, warning: impl Into<String>) {
        self.security_warnings.push(warning.into());
    }

    /// Mark validation as complete with no errors.
    ///
    /// Returns `false` and leaves the status untouched if any error has
    /// been recorded.
    pub fn mark_as_valid(&mut self) -> bool {
        if self.status == ValidationStatus::Invalid {
            return false;
        }
        self.status = ValidationStatus::Valid;
        true
    }

    /// True only once validation has completed with zero errors.
    pub fn is_valid(&self) -> bool {
        self.status == ValidationStatus::Valid
    }

    pub fn config_type(&self) -> ConfigType {
        self.config_type
    }

    pub fn config_path(&self) -> &str {
        &self.config_path
    }

    pub fn status(&self) -> ValidationStatus {
        self.status
    }

    /// Errors in the order they were recorded.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Security warnings in the order they were recorded.
    pub fn security_warnings(&self) -> &[String] {
        &self.security_warnings
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ValidationResult(type={}, status={}, errors={}, warnings={}, path='{}')",
            self.config_type,
            self.status,
            self.errors.len(),
            self.security_warnings.len(),
            self.config_path
        )
    }
}
