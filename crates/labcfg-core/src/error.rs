//! # Error Hierarchy
//!
//! Structured error types for labcfg, built with `thiserror`.
//!
//! Every variant that concerns a file carries the offending path so that a
//! fatal condition can be reported to the operator without further context.
//! Schema violations and security warnings are not errors: they are recorded
//! on a [`ValidationResult`](crate::ValidationResult).

use std::path::PathBuf;

use thiserror::Error;

use crate::ConfigType;

/// Top-level error type for labcfg.
#[derive(Error, Debug)]
pub enum LabcfgError {
    /// The schema file does not exist or is not a readable file.
    #[error("schema file not found: {}", path.display())]
    SchemaNotFound {
        /// Path that was tried.
        path: PathBuf,
    },

    /// The schema file is not valid JSON.
    #[error("invalid JSON in schema file {}: {reason}", path.display())]
    SchemaParse {
        /// Path to the schema file.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// A sub-schema could not be compiled into a draft-07 validator.
    #[error("schema definition for '{config_type}' is not a valid draft-07 schema: {reason}")]
    SchemaCompile {
        /// The definition that failed to compile.
        config_type: ConfigType,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A configuration document does not exist.
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound {
        /// Path that was tried.
        path: PathBuf,
    },

    /// A configuration document exists but is not well-formed YAML/JSON.
    #[error("invalid YAML in configuration file {}: {reason}", path.display())]
    ConfigParse {
        /// Path to the configuration document.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// A configuration type was requested that the code or the schema does
    /// not know about.
    #[error(transparent)]
    UnknownConfigType(#[from] ConfigTypeError),

    /// Any other I/O failure while reading an input file.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl LabcfgError {
    /// Whether a run may continue past this error by skipping one document.
    ///
    /// Only a missing configuration document qualifies; every other error
    /// either aborts the run or is recorded as a failed result.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::ConfigNotFound { .. })
    }
}

/// Errors resolving a configuration type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigTypeError {
    /// The name is not one of `network`, `email`, `domains`, `sso`.
    #[error("unknown configuration type: \"{0}\" (expected one of network, email, domains, sso)")]
    Unknown(String),

    /// The schema document has no `definitions.<type>` entry.
    #[error("schema has no definition for configuration type '{0}'")]
    MissingDefinition(ConfigType),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_path() {
        let err = LabcfgError::SchemaNotFound {
            path: PathBuf::from("/etc/labcfg/config.schema.json"),
        };
        assert!(err.to_string().contains("/etc/labcfg/config.schema.json"));

        let err = LabcfgError::ConfigParse {
            path: PathBuf::from("templates/email.yaml.template"),
            reason: "mapping values are not allowed here".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("templates/email.yaml.template"));
        assert!(msg.contains("mapping values"));
    }

    #[test]
    fn only_missing_config_is_skippable() {
        assert!(LabcfgError::ConfigNotFound {
            path: PathBuf::from("x")
        }
        .is_skippable());
        assert!(!LabcfgError::SchemaNotFound {
            path: PathBuf::from("x")
        }
        .is_skippable());
        assert!(!LabcfgError::ConfigParse {
            path: PathBuf::from("x"),
            reason: String::new()
        }
        .is_skippable());
        assert!(!LabcfgError::from(ConfigTypeError::MissingDefinition(ConfigType::Sso))
            .is_skippable());
    }

    #[test]
    fn config_type_error_converts_transparently() {
        let err: LabcfgError = ConfigTypeError::MissingDefinition(ConfigType::Domains).into();
        assert_eq!(
            err.to_string(),
            "schema has no definition for configuration type 'domains'"
        );
    }
}
