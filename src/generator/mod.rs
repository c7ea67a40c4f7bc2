//! Type-driven schema generation.
//!
//! [`generate`] walks a [`TypeShape`] and emits a draft-07 schema document.
//! Nested records are either inlined or, when refs are enabled, named under
//! `definitions`/`$defs` and referenced with intra-document `$ref` pointers;
//! the ref table makes mutually recursive record graphs terminate.
mod annotations;
mod context;
mod post_process;

use crate::reflect::{AnnotationValue, Reflect, RecordShape, TypeShape};
use context::GenerationContext;
use serde_json::{json, Map, Value};

/// The default `$schema` value.
pub const DRAFT_07: &str = "https://json-schema.org/draft-07/schema#";

/// Where nested record schemas end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefsMode {
    /// Every nested record is inlined into its use site.
    Inline,
    /// Nested records are emitted under `definitions` and referenced.
    Definitions,
    /// Like `Definitions`, but under the draft-2019 `$defs` key.
    Defs,
}

impl RefsMode {
    pub(crate) fn defs_key(self) -> &'static str {
        match self {
            RefsMode::Defs => "$defs",
            _ => "definitions",
        }
    }
}

impl Default for RefsMode {
    fn default() -> Self {
        RefsMode::Inline
    }
}

/// Knobs for [`generate`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Overrides the default title (the unqualified type name).
    pub title: Option<String>,
    /// Added as a top-level `description`.
    pub description: Option<String>,
    /// Added as `$id`.
    pub id: Option<String>,
    /// The `$schema` value; [`DRAFT_07`] when not set.
    pub draft: Option<String>,
    pub refs: RefsMode,
    /// Adds every field to `required`, regardless of nullability or
    /// annotations.
    pub all_fields_required: bool,
    /// When set, recursively stamps this value as `additionalProperties`
    /// onto every object subschema of the generated document.
    pub additional_properties: Option<bool>,
}

/// Generate the schema document for `T`.
#[must_use]
pub fn generate<T: Reflect>(options: &GenerateOptions) -> Value {
    generate_from_shape(&T::shape(), options)
}

/// Generate a schema document from an already-reflected shape.
#[must_use]
pub fn generate_from_shape(shape: &TypeShape, options: &GenerateOptions) -> Value {
    let mut context = GenerationContext::new(options);
    let body = root_schema(shape, &mut context);

    let mut document = Map::new();
    document.insert(
        "$schema".to_string(),
        Value::String(options.draft.clone().unwrap_or_else(|| DRAFT_07.to_string())),
    );
    document.insert(
        "title".to_string(),
        Value::String(
            options
                .title
                .clone()
                .unwrap_or_else(|| default_title(shape)),
        ),
    );
    if let Some(description) = &options.description {
        document.insert("description".to_string(), Value::String(description.clone()));
    }
    if let Some(id) = &options.id {
        document.insert("$id".to_string(), Value::String(id.clone()));
    }
    if let Value::Object(keywords) = body {
        for (key, value) in keywords {
            document.insert(key, value);
        }
    }
    if context.has_definitions() {
        document.insert(
            context.defs_key().to_string(),
            Value::Object(context.take_definitions()),
        );
    }

    let mut schema = Value::Object(document);
    if let Some(allowed) = options.additional_properties {
        post_process::stamp_additional_properties(&mut schema, allowed);
    }
    schema
}

fn default_title(shape: &TypeShape) -> String {
    match shape {
        TypeShape::Any => "Any".to_string(),
        TypeShape::Null => "Null".to_string(),
        TypeShape::Boolean => "Boolean".to_string(),
        TypeShape::Integer => "Integer".to_string(),
        TypeShape::Number => "Number".to_string(),
        TypeShape::String => "String".to_string(),
        TypeShape::Array(_) | TypeShape::Set(_) | TypeShape::Tuple(_) => "Array".to_string(),
        TypeShape::Map(_) => "Object".to_string(),
        TypeShape::Optional(inner) => default_title(inner),
        TypeShape::Union(_) => "Union".to_string(),
        TypeShape::Record(record) => record.name().to_string(),
        TypeShape::Deferred(thunk) => default_title(&thunk()),
    }
}

// The root record is emitted inline rather than behind a `$ref`; it still
// takes part in the ref table so cycles back to the root resolve.
fn root_schema(shape: &TypeShape, context: &mut GenerationContext) -> Value {
    if let TypeShape::Deferred(thunk) = shape {
        return root_schema(&thunk(), context);
    }
    match shape {
        TypeShape::Record(record) => {
            let identity = record.definition_key();
            if context.use_refs() {
                let name = context.assign_name(record);
                context.enter(identity);
                let body = record_body(record, context);
                context.exit();
                if context.root_revisited() {
                    // A cycle reached the root, so its `$ref` target must
                    // exist under the definitions as well
                    context.insert_definition(name, body.clone());
                }
                body
            } else {
                context.enter(identity);
                let body = record_body(record, context);
                context.exit();
                body
            }
        }
        other => shape_schema(other, context),
    }
}

pub(crate) fn shape_schema(shape: &TypeShape, context: &mut GenerationContext) -> Value {
    match shape {
        TypeShape::Any => json!({}),
        TypeShape::Null => json!({"type": "null"}),
        TypeShape::Boolean => json!({"type": "boolean"}),
        TypeShape::Integer => json!({"type": "integer"}),
        TypeShape::Number => json!({"type": "number"}),
        TypeShape::String => json!({"type": "string"}),
        TypeShape::Array(element) => {
            let items = shape_schema(element, context);
            json!({"type": "array", "items": items})
        }
        TypeShape::Set(element) => {
            let items = shape_schema(element, context);
            json!({"type": "array", "uniqueItems": true, "items": items})
        }
        TypeShape::Tuple(elements) => {
            let items: Vec<Value> = elements
                .iter()
                .map(|element| shape_schema(element, context))
                .collect();
            let arity = elements.len();
            json!({"type": "array", "items": items, "minItems": arity, "maxItems": arity})
        }
        TypeShape::Map(value) => {
            if **value == TypeShape::Any {
                json!({"type": "object"})
            } else {
                let additional = shape_schema(value, context);
                json!({"type": "object", "additionalProperties": additional})
            }
        }
        TypeShape::Optional(inner) => nullable_schema(shape_schema(inner, context)),
        TypeShape::Union(variants) => union_schema(variants, context),
        TypeShape::Record(record) => record_reference(record, context),
        TypeShape::Deferred(thunk) => {
            let shape = thunk();
            shape_schema(&shape, context)
        }
    }
}

fn union_schema(variants: &[TypeShape], context: &mut GenerationContext) -> Value {
    let non_null: Vec<&TypeShape> = variants
        .iter()
        .filter(|variant| **variant != TypeShape::Null)
        .collect();
    let has_null = non_null.len() != variants.len();
    if non_null.is_empty() {
        return json!({"type": "null"});
    }
    if non_null.len() == 1 {
        let schema = shape_schema(non_null[0], context);
        return if has_null {
            nullable_schema(schema)
        } else {
            schema
        };
    }
    // The source-side union is exclusive, hence `oneOf` rather than `anyOf`
    let mut schemas: Vec<Value> = non_null
        .iter()
        .map(|variant| shape_schema(variant, context))
        .collect();
    if has_null {
        schemas.push(json!({"type": "null"}));
    }
    json!({"oneOf": schemas})
}

// Extend a generated schema to also accept `null`.
fn nullable_schema(schema: Value) -> Value {
    // A `$ref` cannot carry siblings, so it is wrapped instead of widened
    if schema.get("$ref").is_some() {
        return json!({"oneOf": [schema, {"type": "null"}]});
    }
    let mut schema = schema;
    if let Some(object) = schema.as_object_mut() {
        if let Some(Value::Array(variants)) = object.get_mut("oneOf") {
            variants.push(json!({"type": "null"}));
            return schema;
        }
        match object.get_mut("type") {
            Some(Value::String(single)) => {
                let single = single.clone();
                object.insert("type".to_string(), json!([single, "null"]));
            }
            Some(Value::Array(types)) => {
                if !types.iter().any(|entry| entry == "null") {
                    types.push(json!("null"))
                }
            }
            // No `type` means accept-all, which admits null already
            _ => {}
        }
    }
    schema
}

fn record_reference(record: &RecordShape, context: &mut GenerationContext) -> Value {
    let identity = record.definition_key();
    if !context.use_refs() {
        // Inline mode cannot express recursion; re-entering a record that is
        // still being generated falls back to the accept-all schema so
        // generation terminates
        if context.on_stack(&identity) {
            return json!({});
        }
        context.enter(identity);
        let body = record_body(record, context);
        context.exit();
        return body;
    }
    let name = context.assign_name(record);
    if context.on_stack(&identity) {
        // The in-progress frame will store the definition on exit
        context.mark_revisited(&identity);
        return context.ref_to(&name);
    }
    if context.has_definition(&name) {
        return context.ref_to(&name);
    }
    context.enter(identity);
    let body = record_body(record, context);
    context.exit();
    context.insert_definition(name.clone(), body);
    context.ref_to(&name)
}

fn is_nullable(shape: &TypeShape) -> bool {
    match shape {
        TypeShape::Optional(_) | TypeShape::Null => true,
        TypeShape::Union(variants) => variants.iter().any(|variant| *variant == TypeShape::Null),
        TypeShape::Deferred(thunk) => is_nullable(&thunk()),
        _ => false,
    }
}

fn record_body(record: &RecordShape, context: &mut GenerationContext) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for field in record.fields() {
        if field
            .annotations
            .get("ignore")
            .and_then(AnnotationValue::as_bool)
            .unwrap_or(false)
        {
            continue;
        }
        let json_name = field
            .annotations
            .get("name")
            .and_then(AnnotationValue::as_str)
            .unwrap_or(field.name)
            .to_string();
        let mut field_schema = shape_schema(&field.shape, context);
        annotations::apply(&mut field_schema, &field.annotations, context);
        let is_required = if context.all_fields_required() {
            true
        } else {
            match field
                .annotations
                .get("required")
                .and_then(AnnotationValue::as_bool)
            {
                Some(explicit) => explicit,
                None => !is_nullable(&field.shape),
            }
        };
        if is_required {
            required.push(Value::String(json_name.clone()));
        }
        properties.insert(json_name, field_schema);
    }
    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    if !properties.is_empty() {
        schema.insert("properties".to_string(), Value::Object(properties));
    }
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    Value::Object(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Annotations;

    fn options() -> GenerateOptions {
        GenerateOptions::default()
    }

    #[test]
    fn scalar_shapes() {
        let schema = generate_from_shape(&TypeShape::Integer, &options());
        assert_eq!(schema["type"], json!("integer"));
        assert_eq!(schema["$schema"], json!(DRAFT_07));
        assert_eq!(schema["title"], json!("Integer"));
    }

    #[test]
    fn array_and_set_shapes() {
        let schema = generate_from_shape(
            &TypeShape::Array(Box::new(TypeShape::String)),
            &options(),
        );
        assert_eq!(schema["items"], json!({"type": "string"}));
        let schema =
            generate_from_shape(&TypeShape::Set(Box::new(TypeShape::Integer)), &options());
        assert_eq!(schema["uniqueItems"], json!(true));
    }

    #[test]
    fn tuple_shape() {
        let schema = generate_from_shape(
            &TypeShape::Tuple(vec![TypeShape::Integer, TypeShape::String]),
            &options(),
        );
        assert_eq!(
            schema["items"],
            json!([{"type": "integer"}, {"type": "string"}])
        );
        assert_eq!(schema["minItems"], json!(2));
        assert_eq!(schema["maxItems"], json!(2));
    }

    #[test]
    fn map_shape() {
        let schema =
            generate_from_shape(&TypeShape::Map(Box::new(TypeShape::Integer)), &options());
        assert_eq!(schema["additionalProperties"], json!({"type": "integer"}));
        // A map of anything has no value constraint to state
        let schema = generate_from_shape(&TypeShape::Map(Box::new(TypeShape::Any)), &options());
        assert!(schema.get("additionalProperties").is_none());
    }

    #[test]
    fn nullable_widens_type() {
        let schema = generate_from_shape(
            &TypeShape::Optional(Box::new(TypeShape::Integer)),
            &options(),
        );
        assert_eq!(schema["type"], json!(["integer", "null"]));
    }

    #[test]
    fn union_uses_one_of() {
        let schema = generate_from_shape(
            &TypeShape::Union(vec![TypeShape::Integer, TypeShape::String]),
            &options(),
        );
        assert_eq!(
            schema["oneOf"],
            json!([{"type": "integer"}, {"type": "string"}])
        );
    }

    #[test]
    fn record_with_annotations() {
        let record = TypeShape::Record(
            RecordShape::new("", "User")
                .field_with(
                    "id",
                    TypeShape::Integer,
                    Annotations::new().with("minimum", 1),
                )
                .field("age", TypeShape::Optional(Box::new(TypeShape::Integer))),
        );
        let schema = generate_from_shape(&record, &options());
        assert_eq!(schema["title"], json!("User"));
        assert_eq!(
            schema["properties"]["id"],
            json!({"type": "integer", "minimum": 1})
        );
        assert_eq!(schema["required"], json!(["id"]));
    }

    #[test]
    fn renamed_and_ignored_fields() {
        let record = TypeShape::Record(
            RecordShape::new("", "Config")
                .field_with(
                    "internal",
                    TypeShape::String,
                    Annotations::new().with("ignore", true),
                )
                .field_with(
                    "kind",
                    TypeShape::String,
                    Annotations::new().with("name", "type"),
                ),
        );
        let schema = generate_from_shape(&record, &options());
        assert!(schema["properties"].get("internal").is_none());
        assert_eq!(schema["properties"]["type"], json!({"type": "string"}));
        assert_eq!(schema["required"], json!(["type"]));
    }

    #[test]
    fn all_fields_required_overrides_nullability() {
        let record = TypeShape::Record(
            RecordShape::new("", "User")
                .field("age", TypeShape::Optional(Box::new(TypeShape::Integer)))
                .field_with(
                    "note",
                    TypeShape::String,
                    Annotations::new().with("required", false),
                ),
        );
        let schema = generate_from_shape(
            &record,
            &GenerateOptions {
                all_fields_required: true,
                ..GenerateOptions::default()
            },
        );
        assert_eq!(schema["required"], json!(["age", "note"]));
    }

    #[test]
    fn inline_recursion_falls_back_to_accept_all() {
        // Node { next: Option<Node> } without refs must still terminate
        fn node() -> RecordShape {
            RecordShape::new("", "Node").field(
                "next",
                TypeShape::Optional(Box::new(TypeShape::Record(
                    RecordShape::new("", "Node").field("next", TypeShape::Any),
                ))),
            )
        }
        // The inner occurrence shares the identity, which is what matters
        let schema = generate_from_shape(&TypeShape::Record(node()), &options());
        assert_eq!(schema["type"], json!("object"));
    }
}
