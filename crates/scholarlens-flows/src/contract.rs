//! Output contracts handed to the model as JSON Schema
//!
//! Each contract declares exactly the value field and `sources`, both
//! required. Single-choice dimensions constrain the value to an enum built
//! from the same vocabulary the validator checks against.

use scholarlens_domain::{Cardinality, ClassificationSchema};
use serde_json::{json, Value};

fn sources_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "page": { "type": "integer", "minimum": 1 },
                "text": { "type": "string" }
            },
            "required": ["page", "text"]
        }
    })
}

/// JSON Schema for one classification dimension
pub fn classification_contract(schema: &ClassificationSchema) -> Value {
    let value = match schema.cardinality {
        Cardinality::Single => json!({
            "type": "string",
            "enum": schema.legal_tokens(),
        }),
        _ => json!({ "type": "string" }),
    };

    json!({
        "type": "object",
        "properties": {
            (schema.field): value,
            "sources": sources_schema(),
        },
        "required": [schema.field, "sources"]
    })
}

/// JSON Schema for the query flow
pub fn query_contract() -> Value {
    json!({
        "type": "object",
        "properties": {
            "answer": { "type": "string" },
            "answerable": { "type": "boolean" },
            "sources": sources_schema(),
        },
        "required": ["answer", "answerable", "sources"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::{BUILTIN, DESIGN_TYPE, MEASURES};

    #[test]
    fn test_single_contract_has_enum() {
        let contract = classification_contract(&DESIGN_TYPE);
        let values = contract["properties"]["designType"]["enum"].as_array().unwrap();
        let values: Vec<&str> = values.iter().filter_map(Value::as_str).collect();
        assert_eq!(values, DESIGN_TYPE.legal_tokens());
    }

    #[test]
    fn test_multi_contract_is_string() {
        let contract = classification_contract(&MEASURES);
        assert_eq!(contract["properties"]["measures"]["type"], "string");
        assert!(contract["properties"]["measures"].get("enum").is_none());
    }

    #[test]
    fn test_every_contract_requires_exactly_two_fields() {
        for schema in BUILTIN {
            let contract = classification_contract(schema);
            assert_eq!(contract["required"], json!([schema.field, "sources"]));
            assert_eq!(contract["properties"].as_object().unwrap().len(), 2);
            assert_eq!(contract["properties"]["sources"]["items"]["properties"]["page"]["type"], "integer");
        }
    }

    #[test]
    fn test_query_contract() {
        let contract = query_contract();
        assert_eq!(contract["properties"]["answerable"]["type"], "boolean");
        assert_eq!(contract["required"].as_array().unwrap().len(), 3);
    }
}
