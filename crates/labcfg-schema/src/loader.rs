//! # Configuration Loader
//!
//! Reads one configuration document and parses it as YAML. YAML is a
//! superset of JSON, so `.json` documents go through the same parser. The
//! document is deserialized straight into a `serde_json::Value`, which is
//! what the schema validator and the security rules operate on.

use std::io::ErrorKind;
use std::path::Path;

use labcfg_core::LabcfgError;
use serde_json::Value;

/// Load the configuration document at `path`.
///
/// # Errors
///
/// - [`LabcfgError::ConfigNotFound`] if the file does not exist. This is the
///   one error a run recovers from, by skipping the document.
/// - [`LabcfgError::Io`] for any other read failure.
/// - [`LabcfgError::ConfigParse`] if the content is not well-formed YAML.
pub fn load_config(path: &Path) -> Result<Value, LabcfgError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LabcfgError::ConfigNotFound {
            path: path.to_path_buf(),
        },
        _ => LabcfgError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    parse_config(&content, path)
}

/// Parse configuration text that was read from `path`.
///
/// An empty (or whitespace-only) document parses as `null`.
///
/// # Errors
///
/// Returns [`LabcfgError::ConfigParse`] if the content is not well-formed
/// YAML, contains more than one document, or uses mapping keys that are
/// not strings.
pub fn parse_config(content: &str, path: &Path) -> Result<Value, LabcfgError> {
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_yaml::from_str(content).map_err(|e| LabcfgError::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
