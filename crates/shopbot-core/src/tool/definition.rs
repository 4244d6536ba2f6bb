//! Helpers for building tool input schemas

use serde_json::{json, Value as JsonValue};

/// Small helpers for assembling JSON schemas by hand.
pub struct SchemaBuilder;

impl SchemaBuilder {
    /// Object schema from `(name, type, description, required)` tuples.
    pub fn object_schema(properties: Vec<(&str, &str, &str, bool)>) -> JsonValue {
        let props: serde_json::Map<String, JsonValue> = properties
            .iter()
            .map(|(name, type_str, desc, _)| {
                (
                    name.to_string(),
                    json!({"type": type_str, "description": desc}),
                )
            })
            .collect();

        let required: Vec<&str> = properties
            .iter()
            .filter(|(_, _, _, required)| *required)
            .map(|(name, _, _, _)| *name)
            .collect();

        json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }

    /// String schema restricted to the given values
    pub fn string_enum(enum_values: Vec<&str>) -> JsonValue {
        json!({
            "type": "string",
            "enum": enum_values
        })
    }
}
