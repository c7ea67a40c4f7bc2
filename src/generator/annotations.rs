//! Copies per-field annotation keys onto a generated field schema.
use super::{context::GenerationContext, shape_schema};
use crate::reflect::{AnnotationValue, Annotations};
use serde_json::{json, Value};

pub(crate) fn apply(schema: &mut Value, annotations: &Annotations, context: &mut GenerationContext) {
    let is_ref = schema.get("$ref").is_some();
    for (key, value) in annotations.iter() {
        // A `$ref` must stay the sole key of its object
        if is_ref {
            return;
        }
        let entry = match key {
            "minLength" | "maxLength" | "minItems" | "maxItems" | "minProperties"
            | "maxProperties" => integer_value(value).map(|limit| (key, limit)),
            "minimum" | "maximum" | "exclusiveMinimum" | "exclusiveMaximum" | "multipleOf" => {
                number_value(value).map(|limit| (key, limit))
            }
            "pattern" | "title" | "description" => {
                value.as_str().map(|text| (key, json!(text)))
            }
            "format" => stringified(value).map(|text| (key, json!(text))),
            "uniqueItems" => value.as_bool().map(|unique| (key, json!(unique))),
            "default" => Some((key, value_to_json(value, context))),
            "examples" => match value {
                AnnotationValue::List(_) | AnnotationValue::Json(Value::Array(_)) => {
                    Some((key, value_to_json(value, context)))
                }
                _ => None,
            },
            // `_const` exists for hosts where `const` is not a legal key
            "const" | "_const" => Some(("const", value_to_json(value, context))),
            "enum" => match value {
                AnnotationValue::List(_) | AnnotationValue::Json(Value::Array(_)) => {
                    Some((key, value_to_json(value, context)))
                }
                _ => None,
            },
            "items" => items_entry(value, context).map(|items| (key, items)),
            "contains" | "not" => schema_entry(value, context).map(|subschema| (key, subschema)),
            "allOf" | "anyOf" | "oneOf" => match value {
                AnnotationValue::List(entries) => {
                    let schemas: Vec<Value> = entries
                        .iter()
                        .filter_map(|entry| schema_entry(entry, context))
                        .collect();
                    if schemas.is_empty() {
                        None
                    } else {
                        Some((key, Value::Array(schemas)))
                    }
                }
                AnnotationValue::Json(Value::Array(_)) => {
                    Some((key, value_to_json(value, context)))
                }
                _ => None,
            },
            // Control keys, consumed by the record walker
            "required" | "ignore" | "name" => None,
            // Unrecognized annotation keys are ignored
            _ => None,
        };
        if let Some((key, entry)) = entry {
            if let Some(object) = schema.as_object_mut() {
                object.insert(key.to_string(), entry);
            }
        }
    }
}

fn integer_value(value: &AnnotationValue) -> Option<Value> {
    match value {
        AnnotationValue::Int(limit) => Some(json!(limit)),
        _ => None,
    }
}

fn number_value(value: &AnnotationValue) -> Option<Value> {
    match value {
        AnnotationValue::Int(limit) => Some(json!(limit)),
        AnnotationValue::Float(limit) => Some(json!(limit)),
        _ => None,
    }
}

fn stringified(value: &AnnotationValue) -> Option<String> {
    match value {
        AnnotationValue::Str(text) => Some(text.clone()),
        AnnotationValue::Int(number) => Some(number.to_string()),
        AnnotationValue::Float(number) => Some(number.to_string()),
        AnnotationValue::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

// A subschema position: a type reference is expanded through the generator,
// raw JSON is taken as-is
fn schema_entry(value: &AnnotationValue, context: &mut GenerationContext) -> Option<Value> {
    match value {
        AnnotationValue::Shape(shape) => Some(shape_schema(shape, context)),
        AnnotationValue::Json(schema) => Some(schema.clone()),
        _ => None,
    }
}

// `items` also accepts the tuple form
fn items_entry(value: &AnnotationValue, context: &mut GenerationContext) -> Option<Value> {
    match value {
        AnnotationValue::List(entries) => {
            let schemas: Vec<Value> = entries
                .iter()
                .filter_map(|entry| schema_entry(entry, context))
                .collect();
            Some(Value::Array(schemas))
        }
        other => schema_entry(other, context),
    }
}

fn value_to_json(value: &AnnotationValue, context: &mut GenerationContext) -> Value {
    match value {
        AnnotationValue::Bool(flag) => json!(flag),
        AnnotationValue::Int(number) => json!(number),
        AnnotationValue::Float(number) => json!(number),
        AnnotationValue::Str(text) => json!(text),
        AnnotationValue::List(entries) => Value::Array(
            entries
                .iter()
                .map(|entry| value_to_json(entry, context))
                .collect(),
        ),
        AnnotationValue::Json(raw) => raw.clone(),
        AnnotationValue::Shape(shape) => shape_schema(shape, context),
    }
}

#[cfg(test)]
mod tests {
    use crate::generator::{generate_from_shape, GenerateOptions};
    use crate::reflect::{AnnotationValue, Annotations, RecordShape, TypeShape};
    use serde_json::json;

    fn field_schema(annotations: Annotations, shape: TypeShape) -> serde_json::Value {
        let record =
            TypeShape::Record(RecordShape::new("", "Holder").field_with("x", shape, annotations));
        let schema = generate_from_shape(&record, &GenerateOptions::default());
        schema["properties"]["x"].clone()
    }

    #[test]
    fn string_annotations() {
        let schema = field_schema(
            Annotations::new()
                .with("minLength", 1)
                .with("maxLength", 10)
                .with("pattern", "^[a-z]+$")
                .with("format", "email"),
            TypeShape::String,
        );
        assert_eq!(
            schema,
            json!({
                "type": "string",
                "minLength": 1,
                "maxLength": 10,
                "pattern": "^[a-z]+$",
                "format": "email"
            })
        );
    }

    #[test]
    fn numeric_annotations() {
        let schema = field_schema(
            Annotations::new()
                .with("minimum", 0)
                .with("exclusiveMaximum", 10.5)
                .with("multipleOf", 0.5),
            TypeShape::Number,
        );
        assert_eq!(schema["minimum"], json!(0));
        assert_eq!(schema["exclusiveMaximum"], json!(10.5));
        assert_eq!(schema["multipleOf"], json!(0.5));
    }

    #[test]
    fn metadata_and_fixed_values() {
        let schema = field_schema(
            Annotations::new()
                .with("title", "Kind")
                .with("description", "the kind")
                .with("default", "a")
                .with("_const", "a")
                .with(
                    "enum",
                    vec![AnnotationValue::from("a"), AnnotationValue::from("b")],
                ),
            TypeShape::String,
        );
        assert_eq!(schema["title"], json!("Kind"));
        assert_eq!(schema["description"], json!("the kind"));
        assert_eq!(schema["default"], json!("a"));
        assert_eq!(schema["const"], json!("a"));
        assert_eq!(schema["enum"], json!(["a", "b"]));
    }

    #[test]
    fn composition_expands_type_references() {
        let schema = field_schema(
            Annotations::new().with(
                "oneOf",
                vec![
                    AnnotationValue::Shape(TypeShape::Integer),
                    AnnotationValue::Json(json!({"type": "string", "minLength": 1})),
                ],
            ),
            TypeShape::Any,
        );
        assert_eq!(
            schema["oneOf"],
            json!([{"type": "integer"}, {"type": "string", "minLength": 1}])
        );
    }

    #[test]
    fn items_single_and_tuple_forms() {
        let single = field_schema(
            Annotations::new().with("items", TypeShape::Integer),
            TypeShape::Array(Box::new(TypeShape::Any)),
        );
        assert_eq!(single["items"], json!({"type": "integer"}));

        let tuple = field_schema(
            Annotations::new().with(
                "items",
                vec![
                    AnnotationValue::Shape(TypeShape::Integer),
                    AnnotationValue::Shape(TypeShape::String),
                ],
            ),
            TypeShape::Array(Box::new(TypeShape::Any)),
        );
        assert_eq!(
            tuple["items"],
            json!([{"type": "integer"}, {"type": "string"}])
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let schema = field_schema(
            Annotations::new().with("somethingElse", "whatever"),
            TypeShape::String,
        );
        assert_eq!(schema, json!({"type": "string"}));
    }
}
