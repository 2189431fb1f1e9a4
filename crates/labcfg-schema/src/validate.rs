//! # Schema Validation
//!
//! Validates configuration documents against the draft-07 sub-schema for
//! their [`ConfigType`].
//!
//! ## Design
//!
//! [`SchemaValidator`] compiles each sub-schema found in the
//! [`SchemaStore`] exactly once and reuses the compiled validator for every
//! document of that type. All violations are collected (never just the
//! first), then sorted by document path with the message as tie-breaker,
//! so the output order never depends on validator iteration order.
//!
//! ## Reference Resolution
//!
//! A sub-schema is compiled on its own, but internal references of the
//! form `#/definitions/<name>` resolve against the shared document's
//! `definitions`. Any other `$ref` target is refused by
//! [`OfflineRetriever`]: validation never touches the network.

use std::collections::HashMap;
use std::fmt;

use jsonschema::{Draft, Retrieve, Uri, Validator};
use labcfg_core::{ConfigType, ConfigTypeError, LabcfgError};
use serde_json::Value;

use crate::store::SchemaStore;
use crate::violation::{DocumentPath, Violation};

/// Retriever that refuses every external `$ref`.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema reference not allowed: {}", uri.as_str()).into())
    }
}

/// Compiled draft-07 validators, one per configuration type defined in the
/// schema document.
pub struct SchemaValidator {
    compiled: HashMap<ConfigType, Validator>,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<ConfigType> = self.compiled.keys().copied().collect();
        types.sort();
        f.debug_struct("SchemaValidator")
            .field("compiled", &types)
            .finish()
    }
}

impl SchemaValidator {
    /// Compile every sub-schema the store defines.
    ///
    /// # Errors
    ///
    /// Returns [`LabcfgError::SchemaCompile`] if a defined sub-schema is not
    /// a valid draft-07 schema.
    pub fn new(store: &SchemaStore) -> Result<Self, LabcfgError> {
        Self::for_types(store, ConfigType::all())
    }

    /// Compile the sub-schemas for `types` only. A broken definition for a
    /// type outside `types` is never looked at.
    ///
    /// Types without a definition are not an error here; validating a
    /// document of such a type is.
    ///
    /// # Errors
    ///
    /// Returns [`LabcfgError::SchemaCompile`] if one of the selected
    /// sub-schemas is not a valid draft-07 schema.
    pub fn for_types(store: &SchemaStore, types: &[ConfigType]) -> Result<Self, LabcfgError> {
        let defined = store.defined_types();
        let mut compiled = HashMap::with_capacity(types.len());
        for &config_type in types {
            if defined.contains(&config_type) && !compiled.contains_key(&config_type) {
                compiled.insert(config_type, compile(store, config_type)?);
            }
        }
        tracing::debug!(
            definitions = compiled.len(),
            "compiled schema definitions"
        );
        Ok(Self { compiled })
    }

    /// Validate `value` against the sub-schema for `config_type`.
    ///
    /// Returns every violation, sorted by document path. An empty vector
    /// means the document is schema-valid.
    ///
    /// # Errors
    ///
    /// Returns [`LabcfgError::UnknownConfigType`] if the schema document has
    /// no definition for `config_type`.
    pub fn validate(
        &self,
        config_type: ConfigType,
        value: &Value,
    ) -> Result<Vec<Violation>, LabcfgError> {
        let validator = self
            .compiled
            .get(&config_type)
            .ok_or(ConfigTypeError::MissingDefinition(config_type))?;

        let mut violations: Vec<Violation> = validator
            .iter_errors(value)
            .map(|err| Violation {
                path: DocumentPath::from_pointer(&err.instance_path.to_string(), value),
                message: err.to_string(),
            })
            .collect();
        violations.sort();
        Ok(violations)
    }
}

/// Render violations as `Error at <path>: <message>` lines, preserving order.
pub fn render_errors(violations: &[Violation]) -> Vec<String> {
    violations.iter().map(ToString::to_string).collect()
}

fn compile(store: &SchemaStore, config_type: ConfigType) -> Result<Validator, LabcfgError> {
    let definition = store.definition(config_type)?;
    let schema = with_shared_definitions(definition, store);

    jsonschema::options()
        .with_draft(Draft::Draft7)
        .with_retriever(OfflineRetriever)
        .build(&schema)
        .map_err(|e| LabcfgError::SchemaCompile {
            config_type,
            reason: e.to_string(),
        })
}

/// Give a sub-schema access to the document-level `definitions` so that
/// `#/definitions/<name>` references resolve. A sub-schema that declares its
/// own `definitions` is left as is.
fn with_shared_definitions(definition: &Value, store: &SchemaStore) -> Value {
    let mut schema = definition.clone();
    if let (Value::Object(map), Some(shared)) = (&mut schema, store.definitions()) {
        if !map.contains_key("definitions") {
            map.insert("definitions".to_string(), Value::Object(shared.clone()));
        }
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::PathSegment;
    use proptest::prelude::*;
    use serde_json::json;

    fn store() -> SchemaStore {
        SchemaStore::from_value(json!({
            "definitions": {
                "network": {
                    "type": "object",
                    "required": ["cidr_blocks"],
                    "properties": {
                        "cidr_blocks": {
                            "type": "array",
                            "items": {"$ref": "#/definitions/cidr"}
                        },
                        "allowed_ranges": {"type": "array", "items": {"type": "string"}}
                    }
                },
                "email": {
                    "type": "object",
                    "required": ["smtp", "from_address"],
                    "properties": {
                        "smtp": {
                            "type": "object",
                            "properties": {
                                "port": {"type": "integer", "minimum": 1, "maximum": 65535},
                                "encryption": {"enum": ["none", "tls", "starttls"]}
                            }
                        },
                        "from_address": {"type": "string"}
                    }
                },
                "cidr": {
                    "type": "string",
                    "pattern": "^[0-9.]+/[0-9]{1,2}$"
                }
            }
        }))
    }

    #[test]
    fn valid_document_has_no_violations() {
        let validator = SchemaValidator::new(&store()).unwrap();
        let doc = json!({"cidr_blocks": ["10.0.0.0/16", "192.168.1.0/24"]});
        assert!(validator.validate(ConfigType::Network, &doc).unwrap().is_empty());
    }

    #[test]
    fn missing_required_property_is_reported_at_root() {
        let validator = SchemaValidator::new(&store()).unwrap();
        let violations = validator
            .validate(ConfigType::Network, &json!({"allowed_ranges": []}))
            .unwrap();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].path.is_root());
        assert!(violations[0].message.contains("cidr_blocks"));
        assert!(violations[0].to_string().starts_with("Error at : "));
    }

    #[test]
    fn every_violation_is_reported() {
        let validator = SchemaValidator::new(&store()).unwrap();
        let violations = validator.validate(ConfigType::Email, &json!({})).unwrap();
        assert_eq!(violations.len(), 2, "got: {violations:?}");
        let joined = render_errors(&violations).join("\n");
        assert!(joined.contains("smtp"));
        assert!(joined.contains("from_address"));
    }

    #[test]
    fn violations_are_sorted_by_path() {
        let validator = SchemaValidator::new(&store()).unwrap();
        let doc = json!({
            "smtp": {"port": 0, "encryption": "ssl3"},
            "from_address": 42
        });
        let violations = validator.validate(ConfigType::Email, &doc).unwrap();
        let rendered: Vec<String> = violations.iter().map(|v| v.path.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["from_address", "smtp -> encryption", "smtp -> port"]
        );
    }

    #[test]
    fn shared_definitions_resolve_and_index_paths_are_typed() {
        let validator = SchemaValidator::new(&store()).unwrap();
        let doc = json!({"cidr_blocks": ["10.0.0.0/16", "not-a-cidr"]});
        let violations = validator.validate(ConfigType::Network, &doc).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].path.segments(),
            &[
                PathSegment::Key("cidr_blocks".to_string()),
                PathSegment::Index(1)
            ]
        );
        assert!(violations[0]
            .to_string()
            .starts_with("Error at cidr_blocks -> 1: "));
    }

    #[test]
    fn undefined_type_is_unknown_config_type() {
        let validator = SchemaValidator::new(&store()).unwrap();
        let err = validator.validate(ConfigType::Sso, &json!({})).unwrap_err();
        assert!(matches!(
            err,
            LabcfgError::UnknownConfigType(ConfigTypeError::MissingDefinition(ConfigType::Sso))
        ));
    }

    #[test]
    fn invalid_definition_fails_to_compile() {
        let store = SchemaStore::from_value(json!({
            "definitions": {"domains": {"type": 12}}
        }));
        let err = SchemaValidator::new(&store).unwrap_err();
        assert!(
            matches!(err, LabcfgError::SchemaCompile { config_type: ConfigType::Domains, .. }),
            "Expected SchemaCompile, got: {err}"
        );
    }

    #[test]
    fn external_refs_are_not_fetched() {
        let store = SchemaStore::from_value(json!({
            "definitions": {"sso": {"$ref": "https://example.invalid/sso.schema.json"}}
        }));
        assert!(matches!(
            SchemaValidator::new(&store),
            Err(LabcfgError::SchemaCompile { .. })
        ));
    }

    #[test]
    fn broken_definition_outside_selection_is_not_compiled() {
        let store = SchemaStore::from_value(json!({
            "definitions": {
                "network": {"type": "object", "required": ["cidr_blocks"]},
                "sso": {"type": 12}
            }
        }));
        assert!(SchemaValidator::new(&store).is_err());

        let validator = SchemaValidator::for_types(&store, &[ConfigType::Network]).unwrap();
        let violations = validator.validate(ConfigType::Network, &json!({})).unwrap();
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            validator.validate(ConfigType::Sso, &json!({})),
            Err(LabcfgError::UnknownConfigType(ConfigTypeError::MissingDefinition(ConfigType::Sso)))
        ));
    }

    #[test]
    fn selecting_an_undefined_type_is_not_a_compile_error() {
        let validator =
            SchemaValidator::for_types(&store(), &[ConfigType::Email, ConfigType::Domains]).unwrap();
        assert!(validator
            .validate(ConfigType::Email, &json!({"smtp": {}, "from_address": "ops@lab"}))
            .unwrap()
            .is_empty());
        assert!(validator.validate(ConfigType::Domains, &json!({})).is_err());
    }

    fn email_doc() -> impl Strategy<Value = Value> {
        (
            prop_oneof![Just(json!(25)), Just(json!(0)), Just(json!("x")), Just(json!(70000))],
            prop_oneof![Just(json!("tls")), Just(json!("bogus")), Just(json!(1))],
            prop_oneof![Just(json!("ops@lab")), Just(json!(7)), Just(Value::Null)],
            any::<bool>(),
        )
            .prop_map(|(port, encryption, from, include_smtp)| {
                let mut doc = serde_json::Map::new();
                if include_smtp {
                    doc.insert("smtp".into(), json!({"port": port, "encryption": encryption}));
                }
                if !from.is_null() {
                    doc.insert("from_address".into(), from);
                }
                Value::Object(doc)
            })
    }

    proptest! {
        #[test]
        fn repeated_validation_is_identical_and_sorted(doc in email_doc()) {
            let validator = SchemaValidator::new(&store()).unwrap();
            let first = validator.validate(ConfigType::Email, &doc).unwrap();
            let second = validator.validate(ConfigType::Email, &doc).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert!(first.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
