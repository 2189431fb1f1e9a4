//! # Schema Store
//!
//! Loads the single JSON Schema document used by a run. The document is
//! parsed once and never mutated; validators borrow their sub-schemas from
//! it.

use std::path::Path;

use labcfg_core::{ConfigType, ConfigTypeError, LabcfgError};
use serde_json::{Map, Value};

/// The parsed schema document.
#[derive(Debug, Clone)]
pub struct SchemaStore {
    document: Value,
}

impl SchemaStore {
    /// Load and parse the schema file at `path`.
    ///
    /// # Errors
    ///
    /// - [`LabcfgError::SchemaNotFound`] if `path` is not an existing file.
    /// - [`LabcfgError::Io`] if the file exists but cannot be read.
    /// - [`LabcfgError::SchemaParse`] if the content is not valid JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LabcfgError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LabcfgError::SchemaNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| LabcfgError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let document: Value =
            serde_json::from_str(&content).map_err(|e| LabcfgError::SchemaParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), "loaded schema document");

        Ok(Self { document })
    }

    /// Wrap an already-parsed schema document.
    pub fn from_value(document: Value) -> Self {
        Self { document }
    }

    /// The top-level `definitions` mapping, if present.
    pub fn definitions(&self) -> Option<&Map<String, Value>> {
        self.document.get("definitions").and_then(Value::as_object)
    }

    /// Look up the sub-schema for `config_type`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigTypeError::MissingDefinition`] if the document has no
    /// `definitions.<config_type>` entry.
    pub fn definition(&self, config_type: ConfigType) -> Result<&Value, ConfigTypeError> {
        self.definitions()
            .and_then(|defs| defs.get(config_type.as_str()))
            .ok_or(ConfigTypeError::MissingDefinition(config_type))
    }

    /// The configuration types this document defines, in processing order.
    pub fn defined_types(&self) -> Vec<ConfigType> {
        ConfigType::all()
            .iter()
            .copied()
            .filter(|t| self.definition(*t).is_ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn load_missing_file_is_schema_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.schema.json");
        let err = SchemaStore::load(&path).unwrap_err();
        assert!(
            matches!(err, LabcfgError::SchemaNotFound { path: ref p } if p == &path),
            "Expected SchemaNotFound, got: {err}"
        );
    }

    #[test]
    fn load_directory_is_schema_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = SchemaStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, LabcfgError::SchemaNotFound { .. }));
    }

    #[test]
    fn load_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.schema.json");
        std::fs::write(&path, b"{ \"definitions\": ").unwrap();
        let err = SchemaStore::load(&path).unwrap_err();
        match err {
            LabcfgError::SchemaParse { path: p, reason } => {
                assert_eq!(p, path);
                assert!(!reason.is_empty());
            }
            other => panic!("Expected SchemaParse, got: {other}"),
        }
    }

    #[test]
    fn load_valid_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.schema.json");
        std::fs::write(
            &path,
            br#"{"definitions": {"network": {"type": "object"}}}"#,
        )
        .unwrap();
        let store = SchemaStore::load(&path).unwrap();
        assert_eq!(store.defined_types(), vec![ConfigType::Network]);
        assert_eq!(
            store.definition(ConfigType::Network).unwrap(),
            &json!({"type": "object"})
        );
    }

    #[test]
    fn missing_definition_is_reported_per_type() {
        let store = SchemaStore::from_value(json!({
            "definitions": {"network": {}, "sso": {}}
        }));
        assert!(store.definition(ConfigType::Network).is_ok());
        assert_eq!(
            store.definition(ConfigType::Email).unwrap_err(),
            ConfigTypeError::MissingDefinition(ConfigType::Email)
        );
        assert_eq!(
            store.defined_types(),
            vec![ConfigType::Network, ConfigType::Sso]
        );
    }

    #[test]
    fn document_without_definitions_defines_nothing() {
        let store = SchemaStore::from_value(json!({"type": "object"}));
        assert!(store.definitions().is_none());
        assert!(store.defined_types().is_empty());
    }
}
