//! Schema compilation.
//! The main idea is to compile the input JSON Schema to a validators tree that
//! will contain everything needed to perform such validation in runtime.
use crate::{
    error::{CompilationError, ErrorIterator, ValidationError},
    generator::{generate, GenerateOptions},
    keywords,
    keywords::Validators,
    paths::InstancePath,
    reflect::Reflect,
};
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

lazy_static! {
    // The two boolean schemas in their object desugaring: `true` is the
    // accept-all empty schema, `false` rejects everything.
    static ref ACCEPT_ALL: Value = Value::Object(Map::new());
    static ref REJECT_ALL: Value = serde_json::json!({"not": {}});
}

/// A compiled JSON Schema. Stores the validators tree and runs validation on
/// input instances.
pub struct Schema<'a> {
    pub(crate) document: &'a Value,
    pub(crate) validators: Validators,
}

impl<'a> Schema<'a> {
    /// Compile `document` into a validation tree.
    ///
    /// `document` must be a JSON object or a boolean; anything else is a
    /// `CompilationError`.
    pub fn compile(document: &'a Value) -> Result<Schema<'a>, CompilationError> {
        let validators = compile_validators(document)?;
        Ok(Schema {
            document,
            validators,
        })
    }

    /// The boolean schemas: `true` is the accept-all schema `{}`, `false` is
    /// `{"not": {}}`.
    #[must_use]
    pub fn from_bool(value: bool) -> Schema<'static> {
        let document: &'static Value = if value { &ACCEPT_ALL } else { &REJECT_ALL };
        Schema::compile(document).expect("Boolean schemas always compile")
    }

    /// The root schema document this schema was compiled from.
    #[must_use]
    pub fn document(&self) -> &Value {
        self.document
    }

    /// Run validation against `instance` and return an iterator over
    /// `ValidationError` in the error case.
    pub fn validate(&'a self, instance: &'a Value) -> Result<(), ErrorIterator<'a>> {
        let path = InstancePath::new();
        let mut errors = self
            .validators
            .iter()
            .flat_map(move |validator| validator.validate(self.document, instance, &path))
            .collect::<Vec<_>>()
            .into_iter()
            .peekable();
        if errors.peek().is_none() {
            Ok(())
        } else {
            Err(Box::new(errors))
        }
    }

    /// Run validation against `instance` but return a boolean result instead
    /// of an iterator. It is useful for cases, where it is important to only
    /// know the fact if the data valid or not. This approach is much faster,
    /// than `validate`.
    #[must_use]
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validators
            .iter()
            .all(|validator| validator.is_valid(self.document, instance))
    }
}

impl fmt::Debug for Schema<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("document", &self.document)
            .finish()
    }
}

/// A schema generated from the type `T`, compiled and tagged with its source
/// type. The typed validation entry points only accept instances of `T`.
pub struct TypedSchema<T: Reflect> {
    document: Value,
    validators: Validators,
    _source: PhantomData<T>,
}

impl<T: Reflect> TypedSchema<T> {
    /// Generate the schema for `T` and compile it.
    pub fn new(options: &GenerateOptions) -> Result<TypedSchema<T>, CompilationError> {
        let document = generate::<T>(options);
        let validators = compile_validators(&document)?;
        Ok(TypedSchema {
            document,
            validators,
            _source: PhantomData,
        })
    }

    /// The generated schema document.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Validate an in-memory instance of `T` and collect the error report.
    ///
    /// The instance is reflected into its JSON view first; record fields
    /// holding the null sentinel are treated as absent, so `required` sees
    /// them as missing.
    pub fn validate_instance(&self, instance: &T) -> Result<(), Vec<ValidationError<'static>>> {
        let value = instance.to_json();
        let path = InstancePath::new();
        let errors: Vec<_> = self
            .validators
            .iter()
            .flat_map(|validator| validator.validate(&self.document, &value, &path))
            .map(ValidationError::into_owned)
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The boolean counterpart of `validate_instance`.
    #[must_use]
    pub fn is_valid_instance(&self, instance: &T) -> bool {
        let value = instance.to_json();
        self.validators
            .iter()
            .all(|validator| validator.is_valid(&self.document, &value))
    }
}

impl<T: Reflect> fmt::Debug for TypedSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSchema")
            .field("document", &self.document)
            .finish()
    }
}

/// Compile a JSON Schema node into a tree of validators.
///
/// A `$ref` node short-circuits: sibling keywords are ignored when the
/// reference is present.
pub(crate) fn compile_validators(schema: &Value) -> Result<Validators, CompilationError> {
    match schema {
        Value::Bool(value) => Ok(vec![keywords::boolean::compile(*value)?]),
        Value::Object(object) => {
            if let Some(reference) = object.get("$ref") {
                if let Value::String(reference) = reference {
                    Ok(vec![keywords::ref_::compile(reference)?])
                } else {
                    Err(CompilationError::SchemaError)
                }
            } else {
                let mut validators = Vec::with_capacity(object.len());
                for (keyword, subschema) in object {
                    if let Some(compilation_func) = keywords::keyword_validator(keyword) {
                        if let Some(validator) = compilation_func(object, subschema) {
                            validators.push(validator?)
                        }
                    }
                }
                Ok(validators)
            }
        }
        _ => Err(CompilationError::SchemaError),
    }
}
