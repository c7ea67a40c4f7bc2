//! Recursive `additionalProperties` stamping across a generated schema.
use serde_json::{Map, Value};

// Everything a schema node can structurally contain. `additionalProperties`
// itself is not recursed into, the stamp below replaces it.
const SINGLE_CHILDREN: &[&str] = &[
    "propertyNames",
    "not",
    "contains",
    "if",
    "then",
    "else",
    "additionalItems",
];
const ARRAY_CHILDREN: &[&str] = &["allOf", "anyOf", "oneOf"];
const OBJECT_CHILDREN: &[&str] = &["properties", "patternProperties", "definitions", "$defs"];

pub(crate) fn stamp_additional_properties(schema: &mut Value, allowed: bool) {
    let object = match schema.as_object_mut() {
        Some(object) => object,
        None => return,
    };
    // `$ref` subtrees are opaque
    if object.contains_key("$ref") {
        return;
    }
    if is_object_schema(object) {
        object.insert("additionalProperties".to_string(), Value::Bool(allowed));
    }
    for key in SINGLE_CHILDREN {
        if let Some(child) = object.get_mut(*key) {
            stamp_additional_properties(child, allowed);
        }
    }
    if let Some(items) = object.get_mut("items") {
        match items {
            Value::Array(entries) => {
                for entry in entries {
                    stamp_additional_properties(entry, allowed);
                }
            }
            single => stamp_additional_properties(single, allowed),
        }
    }
    for key in ARRAY_CHILDREN {
        if let Some(Value::Array(entries)) = object.get_mut(*key) {
            for entry in entries {
                stamp_additional_properties(entry, allowed);
            }
        }
    }
    for key in OBJECT_CHILDREN {
        if let Some(Value::Object(children)) = object.get_mut(*key) {
            for (_, child) in children.iter_mut() {
                stamp_additional_properties(child, allowed);
            }
        }
    }
    if let Some(Value::Object(children)) = object.get_mut("dependencies") {
        for (_, child) in children.iter_mut() {
            // Only the schema arm; property-name lists stay as they are
            if child.is_object() {
                stamp_additional_properties(child, allowed);
            }
        }
    }
}

fn is_object_schema(object: &Map<String, Value>) -> bool {
    if object.contains_key("properties") {
        return true;
    }
    match object.get("type") {
        Some(Value::String(type_)) => type_ == "object",
        Some(Value::Array(types)) => types.iter().any(|entry| entry == "object"),
        _ => false,
    }
}
