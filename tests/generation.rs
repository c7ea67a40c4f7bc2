use serde_json::{json, Value};
use typeschema::reflect::{record_value, Annotations, RecordShape, Reflect, TypeShape};
use typeschema::{
    generate, generate_from_shape, validate, GenerateOptions, RefsMode, Schema, TypedSchema,
};

struct User {
    id: u64,
    name: String,
    email: String,
    age: Option<u64>,
}

impl Reflect for User {
    fn shape() -> TypeShape {
        TypeShape::Record(
            RecordShape::new("users", "User")
                .field_with(
                    "id",
                    TypeShape::Integer,
                    Annotations::new().with("minimum", 1),
                )
                .field_with(
                    "name",
                    TypeShape::String,
                    Annotations::new().with("minLength", 1),
                )
                .field_with(
                    "email",
                    TypeShape::String,
                    Annotations::new().with("format", "email"),
                )
                .field("age", TypeShape::Optional(Box::new(TypeShape::Integer))),
        )
    }

    fn to_json(&self) -> Value {
        record_value(vec![
            ("id", self.id.to_json()),
            ("name", self.name.to_json()),
            ("email", self.email.to_json()),
            ("age", self.age.to_json()),
        ])
    }
}

// Node and Leaf form a mutually recursive record graph
fn node_shape() -> TypeShape {
    TypeShape::Record(
        RecordShape::new("graph", "Node")
            .field("value", TypeShape::Integer)
            .field(
                "leaf",
                TypeShape::Optional(Box::new(TypeShape::Deferred(leaf_shape))),
            ),
    )
}

fn leaf_shape() -> TypeShape {
    TypeShape::Record(RecordShape::new("graph", "Leaf").field(
        "parent",
        TypeShape::Optional(Box::new(TypeShape::Deferred(node_shape))),
    ))
}

fn collect_refs(schema: &Value, refs: &mut Vec<String>) {
    match schema {
        Value::Object(object) => {
            if let Some(Value::String(reference)) = object.get("$ref") {
                refs.push(reference.clone());
            }
            for (_, child) in object {
                collect_refs(child, refs);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_refs(item, refs);
            }
        }
        _ => {}
    }
}

#[test]
fn generated_user_schema_shape() {
    let schema = generate::<User>(&GenerateOptions::default());
    assert_eq!(
        schema["$schema"],
        json!("https://json-schema.org/draft-07/schema#")
    );
    assert_eq!(schema["title"], json!("User"));
    assert_eq!(schema["type"], json!("object"));
    assert_eq!(
        schema["properties"]["id"],
        json!({"type": "integer", "minimum": 1})
    );
    assert_eq!(
        schema["properties"]["email"],
        json!({"type": "string", "format": "email"})
    );
    assert_eq!(
        schema["properties"]["age"],
        json!({"type": ["integer", "null"]})
    );
    // Nullable fields are not required unless asked for
    assert_eq!(schema["required"], json!(["id", "name", "email"]));
}

#[test]
fn generated_schema_validates_instances() {
    let schema = generate::<User>(&GenerateOptions::default());
    assert!(validate(
        &schema,
        &json!({"id": 1, "name": "Alice", "email": "alice@example.com", "age": 30})
    )
    .is_ok());
    // Nullable `age` accepts an explicit null and absence alike
    assert!(validate(
        &schema,
        &json!({"id": 1, "name": "Alice", "email": "alice@example.com", "age": null})
    )
    .is_ok());

    let errors =
        validate(&schema, &json!({"id": 0, "name": "", "email": "x", "age": null})).unwrap_err();
    let mut paths: Vec<String> = errors
        .iter()
        .map(|error| error.instance_path().to_string())
        .collect();
    paths.sort();
    assert_eq!(paths, vec![".email", ".id", ".name"]);
}

#[test]
fn typed_validation_entry_points() {
    let compiled = TypedSchema::<User>::new(&GenerateOptions::default()).unwrap();
    let alice = User {
        id: 1,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        age: Some(30),
    };
    assert!(compiled.is_valid_instance(&alice));
    assert!(compiled.validate_instance(&alice).is_ok());

    let broken = User {
        id: 0,
        name: String::new(),
        email: "x".to_string(),
        age: None,
    };
    assert!(!compiled.is_valid_instance(&broken));
    let errors = compiled.validate_instance(&broken).unwrap_err();
    let mut paths: Vec<String> = errors
        .iter()
        .map(|error| error.instance_path().to_string())
        .collect();
    paths.sort();
    assert_eq!(paths, vec![".email", ".id", ".name"]);
}

#[test]
fn generation_is_deterministic() {
    let options = GenerateOptions {
        refs: RefsMode::Definitions,
        ..GenerateOptions::default()
    };
    let first = serde_json::to_string(&generate_from_shape(&node_shape(), &options)).unwrap();
    let second = serde_json::to_string(&generate_from_shape(&node_shape(), &options)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn cycle_safety_and_reference_locality() {
    let options = GenerateOptions {
        refs: RefsMode::Definitions,
        ..GenerateOptions::default()
    };
    let schema = generate_from_shape(&node_shape(), &options);

    // One definition per distinct record reachable from the root; the root
    // itself is stored because the graph cycles back to it
    let definitions = schema["definitions"].as_object().unwrap();
    let keys: Vec<&String> = definitions.keys().collect();
    assert_eq!(keys, vec!["graph.Leaf", "graph.Node"]);

    // Every emitted reference resolves against the document root
    let mut refs = Vec::new();
    collect_refs(&schema, &mut refs);
    assert!(!refs.is_empty());
    for reference in refs {
        let pointer = reference.trim_start_matches('#');
        assert!(
            schema.pointer(pointer).is_some(),
            "{} does not resolve",
            reference
        );
    }

    // And the generated document actually validates cyclic-shaped data
    let compiled = Schema::compile(&schema).unwrap();
    assert!(compiled.is_valid(&json!({
        "value": 1,
        "leaf": {"parent": {"value": 2, "leaf": null}}
    })));
    assert!(!compiled.is_valid(&json!({
        "value": 1,
        "leaf": {"parent": {"value": "nope"}}
    })));
}

#[test]
fn defs_location_can_be_switched() {
    let options = GenerateOptions {
        refs: RefsMode::Defs,
        ..GenerateOptions::default()
    };
    let schema = generate_from_shape(&node_shape(), &options);
    assert!(schema.get("definitions").is_none());
    assert!(schema["$defs"].get("graph.Leaf").is_some());
    let mut refs = Vec::new();
    collect_refs(&schema, &mut refs);
    assert!(refs.iter().all(|reference| reference.starts_with("#/$defs/")));
}

#[test]
fn nullable_record_reference_is_wrapped_in_one_of() {
    let options = GenerateOptions {
        refs: RefsMode::Definitions,
        ..GenerateOptions::default()
    };
    let schema = generate_from_shape(&node_shape(), &options);
    // A `$ref` cannot take a `"null"` type sibling, so the nullable field
    // becomes a oneOf with an explicit null branch
    assert_eq!(
        schema["properties"]["leaf"],
        json!({"oneOf": [{"$ref": "#/definitions/graph.Leaf"}, {"type": "null"}]})
    );
}

#[test]
fn repeated_record_types_share_one_definition() {
    let pair = TypeShape::Record(
        RecordShape::new("users", "Pair")
            .field("first", User::shape())
            .field("second", User::shape()),
    );
    let options = GenerateOptions {
        refs: RefsMode::Definitions,
        ..GenerateOptions::default()
    };
    let schema = generate_from_shape(&pair, &options);
    assert_eq!(schema["definitions"].as_object().unwrap().len(), 1);
    assert_eq!(
        schema["properties"]["first"],
        json!({"$ref": "#/definitions/users.User"})
    );
    assert_eq!(
        schema["properties"]["second"],
        json!({"$ref": "#/definitions/users.User"})
    );
}

#[test]
fn options_are_applied() {
    let options = GenerateOptions {
        title: Some("Account".to_string()),
        description: Some("A user account".to_string()),
        id: Some("https://example.com/schemas/user.json".to_string()),
        draft: Some("http://json-schema.org/draft-07/schema#".to_string()),
        ..GenerateOptions::default()
    };
    let schema = generate::<User>(&options);
    assert_eq!(schema["title"], json!("Account"));
    assert_eq!(schema["description"], json!("A user account"));
    assert_eq!(schema["$id"], json!("https://example.com/schemas/user.json"));
    assert_eq!(
        schema["$schema"],
        json!("http://json-schema.org/draft-07/schema#")
    );
}

#[test]
fn additional_properties_stamping() {
    let options = GenerateOptions {
        additional_properties: Some(false),
        ..GenerateOptions::default()
    };
    let schema = generate::<User>(&options);
    assert_eq!(schema["additionalProperties"], json!(false));

    // The stamped schema now rejects unexpected properties
    let errors = validate(
        &schema,
        &json!({"id": 1, "name": "Alice", "email": "alice@example.com", "extra": 1}),
    )
    .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("'extra'"));

    // Applying the option is idempotent: a second generation run with the
    // same options produces a byte-identical document
    let again = generate::<User>(&options);
    assert_eq!(
        serde_json::to_string(&schema).unwrap(),
        serde_json::to_string(&again).unwrap()
    );
}

#[test]
fn all_fields_required_option() {
    let options = GenerateOptions {
        all_fields_required: true,
        ..GenerateOptions::default()
    };
    let schema = generate::<User>(&options);
    assert_eq!(schema["required"], json!(["id", "name", "email", "age"]));
}

#[test]
fn std_collection_shapes_round_trip() {
    let schema = generate::<Vec<String>>(&GenerateOptions::default());
    assert!(validate(&schema, &json!(["a", "b"])).is_ok());
    assert!(validate(&schema, &json!([1])).is_err());

    let schema =
        generate::<std::collections::BTreeMap<String, u32>>(&GenerateOptions::default());
    assert!(validate(&schema, &json!({"a": 1})).is_ok());
    assert!(validate(&schema, &json!({"a": "x"})).is_err());

    let schema = generate::<(u32, String)>(&GenerateOptions::default());
    assert!(validate(&schema, &json!([1, "x"])).is_ok());
    assert!(validate(&schema, &json!([1])).is_err());
    assert!(validate(&schema, &json!([1, "x", 2])).is_err());
}
