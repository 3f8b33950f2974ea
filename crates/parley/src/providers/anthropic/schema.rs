//! Structured output schemas and the structural rules Anthropic enforces on them.
//!
//! This is not a JSON Schema validator. It only walks the keywords that can
//! hold sub-schemas and checks that every object schema closes itself with
//! `additionalProperties: false`, reporting the first offending node by its
//! dotted path from the root.
use serde_json::{Map, Value};

use crate::errors::SchemaViolation;
use crate::models::schema::Schema;

pub const ADDITIONAL_PROPERTIES_REQUIRED: &str =
    "Object schemas must set 'additionalProperties' to false for Anthropic structured outputs.";

const ROOT_PATH: &str = "schema";

/// Schema keywords the validator inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Type,
    Properties,
    Items,
    AdditionalProperties,
    AnyOf,
    OneOf,
    AllOf,
}

impl Keyword {
    pub const COMBINATORS: [Keyword; 3] = [Keyword::AnyOf, Keyword::OneOf, Keyword::AllOf];

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Type => "type",
            Keyword::Properties => "properties",
            Keyword::Items => "items",
            Keyword::AdditionalProperties => "additionalProperties",
            Keyword::AnyOf => "anyOf",
            Keyword::OneOf => "oneOf",
            Keyword::AllOf => "allOf",
        }
    }

    fn lookup(self, node: &Map<String, Value>) -> Option<&Value> {
        node.get(self.as_str())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaValidator;

impl SchemaValidator {
    /// Check the whole document, failing on the first violation in document order
    pub fn validate(schema: &Schema) -> Result<(), SchemaViolation> {
        validate_node(schema.as_value(), ROOT_PATH)
    }
}

fn validate_node(node: &Value, path: &str) -> Result<(), SchemaViolation> {
    let Some(node) = node.as_object() else {
        return Ok(());
    };

    validate_object_schema(node, path)?;
    validate_properties(node, path)?;
    validate_items(node, path)?;
    validate_combinators(node, path)
}

fn validate_object_schema(node: &Map<String, Value>, path: &str) -> Result<(), SchemaViolation> {
    let is_object = Keyword::Type.lookup(node).and_then(Value::as_str) == Some("object");
    let closed = Keyword::AdditionalProperties.lookup(node) == Some(&Value::Bool(false));

    if is_object && !closed {
        return Err(SchemaViolation::new(path, ADDITIONAL_PROPERTIES_REQUIRED));
    }
    Ok(())
}

fn validate_properties(node: &Map<String, Value>, path: &str) -> Result<(), SchemaViolation> {
    let Some(properties) = Keyword::Properties.lookup(node).and_then(Value::as_object) else {
        return Ok(());
    };

    for (key, property) in properties {
        validate_node(property, &format!("{path}.properties.{key}"))?;
    }
    Ok(())
}

fn validate_items(node: &Map<String, Value>, path: &str) -> Result<(), SchemaViolation> {
    match Keyword::Items.lookup(node) {
        Some(items) => validate_node(items, &format!("{path}.items")),
        None => Ok(()),
    }
}

fn validate_combinators(node: &Map<String, Value>, path: &str) -> Result<(), SchemaViolation> {
    for keyword in Keyword::COMBINATORS {
        let Some(schemas) = keyword.lookup(node).and_then(Value::as_array) else {
            continue;
        };

        for (index, sub_schema) in schemas.iter().enumerate() {
            validate_node(sub_schema, &format!("{path}.{}[{index}]", keyword.as_str()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn violation_path(schema: Value) -> String {
        SchemaValidator::validate(&Schema::from_value(schema))
            .expect_err("schema should be rejected")
            .path
    }

    #[test]
    fn test_accepts_closed_object() {
        let schema = json!({
            "type": "object",
            "properties": {"name": {"type": "string"}},
            "additionalProperties": false
        });
        assert!(SchemaValidator::validate(&schema.into()).is_ok());
    }

    #[test]
    fn test_rejects_missing_additional_properties() {
        let schema = json!({"type": "object", "properties": {"name": {"type": "string"}}});
        let err = SchemaValidator::validate(&schema.into()).unwrap_err();

        assert_eq!(err.path, "schema");
        assert!(err.to_string().contains("additionalProperties' to false"));
    }

    #[test]
    fn test_rejects_additional_properties_true() {
        let schema = json!({"type": "object", "additionalProperties": true});
        assert_eq!(violation_path(schema), "schema");

        let schema = json!({"type": "object", "additionalProperties": {"type": "string"}});
        assert_eq!(violation_path(schema), "schema");
    }

    #[test]
    fn test_reports_nested_property_path() {
        let schema = json!({
            "type": "object",
            "properties": {
                "user": {"type": "object", "properties": {"name": {"type": "string"}}}
            },
            "additionalProperties": false
        });
        assert_eq!(violation_path(schema), "schema.properties.user");
    }

    #[test]
    fn test_reports_array_items_path() {
        let schema = json!({
            "type": "object",
            "properties": {
                "users": {
                    "type": "array",
                    "items": {"type": "object", "properties": {"name": {"type": "string"}}}
                }
            },
            "additionalProperties": false
        });
        assert_eq!(violation_path(schema), "schema.properties.users.items");
    }

    #[test]
    fn test_accepts_closed_array_items() {
        let schema = json!({
            "type": "object",
            "properties": {
                "users": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {"name": {"type": "string"}},
                        "additionalProperties": false
                    }
                }
            },
            "additionalProperties": false
        });
        assert!(SchemaValidator::validate(&schema.into()).is_ok());
    }

    #[test]
    fn test_reports_combinator_index() {
        let schema = json!({
            "type": "object",
            "properties": {
                "value": {
                    "anyOf": [
                        {"type": "string"},
                        {"type": "object", "properties": {"id": {"type": "integer"}}}
                    ]
                }
            },
            "additionalProperties": false
        });
        assert_eq!(violation_path(schema), "schema.properties.value.anyOf[1]");

        let schema = json!({
            "oneOf": [{"type": "object", "additionalProperties": false}, {"type": "object"}]
        });
        assert_eq!(violation_path(schema), "schema.oneOf[1]");

        let schema = json!({"allOf": [{"type": "object"}]});
        assert_eq!(violation_path(schema), "schema.allOf[0]");
    }

    #[test]
    fn test_first_violation_in_document_order() {
        let schema = json!({
            "type": "object",
            "properties": {
                "first": {"type": "object"},
                "second": {"type": "object"}
            },
            "additionalProperties": false
        });
        assert_eq!(violation_path(schema), "schema.properties.first");
    }

    #[test]
    fn test_object_check_precedes_children() {
        let schema = json!({
            "type": "object",
            "properties": {"inner": {"type": "object"}}
        });
        assert_eq!(violation_path(schema), "schema");
    }

    #[test]
    fn test_non_mapping_nodes_terminate() {
        assert!(SchemaValidator::validate(&json!({"type": "string"}).into()).is_ok());
        assert!(SchemaValidator::validate(&json!("object").into()).is_ok());
        assert!(SchemaValidator::validate(&json!({"items": [{"type": "object"}]}).into()).is_ok());
        assert!(SchemaValidator::validate(&json!({"properties": {"x": true}}).into()).is_ok());
    }

    #[test]
    fn test_validation_does_not_mutate_schema() {
        let original = json!({"type": "object", "properties": {"a": {"type": "object"}}});
        let schema = Schema::from_value(original.clone());
        let _ = SchemaValidator::validate(&schema);
        assert_eq!(schema.as_value(), &original);
    }

    #[derive(Serialize)]
    struct PropertySchema {
        #[serde(rename = "type")]
        kind: &'static str,
    }

    #[derive(Serialize)]
    struct ObjectSchema {
        #[serde(rename = "type")]
        kind: &'static str,
        properties: BTreeMap<&'static str, PropertySchema>,
        #[serde(rename = "additionalProperties", skip_serializing_if = "Option::is_none")]
        additional_properties: Option<bool>,
    }

    #[test]
    fn test_typed_and_json_forms_agree() {
        for closed in [Some(false), None] {
            let typed = ObjectSchema {
                kind: "object",
                properties: BTreeMap::from([("name", PropertySchema { kind: "string" })]),
                additional_properties: closed,
            };
            let typed = Schema::from_serialize(&typed).unwrap();

            let mut json = json!({"type": "object", "properties": {"name": {"type": "string"}}});
            if let Some(flag) = closed {
                json["additionalProperties"] = json!(flag);
            }
            let json = Schema::from_value(json);

            assert_eq!(typed, json);
            assert_eq!(
                SchemaValidator::validate(&typed),
                SchemaValidator::validate(&json)
            );
        }
    }
}
