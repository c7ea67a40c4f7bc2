//! Error types
use crate::paths::JsonPath;
use crate::primitive_type::PrimitiveType;
use serde_json::Value;
use std::{
    borrow::Cow,
    error, fmt,
    iter::{empty, once},
};

/// The error type that happens when the input schema is not valid.
///
/// The only raised condition in this crate: everything that can go wrong with
/// an otherwise well-formed schema during validation is reported as a
/// `ValidationError` instead.
#[derive(Debug, PartialEq, Eq)]
pub enum CompilationError {
    /// The schema handle is not an object or a boolean, or a keyword has a
    /// structurally invalid value.
    SchemaError,
}

impl error::Error for CompilationError {}

impl fmt::Display for CompilationError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schema compilation error")
    }
}

/// An error that can occur during validation.
#[derive(Debug)]
pub struct ValidationError<'a> {
    instance: Cow<'a, Value>,
    kind: ValidationErrorKind,
    instance_path: JsonPath,
}

/// An iterator over instances of `ValidationError` that represent validation
/// errors for the input instance.
///
/// # Examples
///
/// ```rust
/// use typeschema::Schema;
/// use serde_json::json;
///
/// let schema = json!({"maxLength": 5});
/// let instance = json!("foobar");
/// if let Ok(compiled) = Schema::compile(&schema) {
///     if let Err(errors) = compiled.validate(&instance) {
///         for error in errors {
///             println!("Validation error: {}", error)
///         }
///     }
/// }
/// ```
pub type ErrorIterator<'a> = Box<dyn Iterator<Item = ValidationError<'a>> + Send + Sync + 'a>;

// Empty iterator means no error happened
pub(crate) fn no_error<'a>() -> ErrorIterator<'a> {
    Box::new(empty())
}
// A wrapper for one error
pub(crate) fn error(instance: ValidationError) -> ErrorIterator<'_> {
    Box::new(once(instance))
}

/// Kinds of errors that may happen during validation
#[derive(Debug)]
pub enum ValidationErrorKind {
    /// The input array contains more items than the tuple schema allows.
    AdditionalItems { limit: usize },
    /// The input object contains a property not allowed by the schema.
    AdditionalProperty { property: String },
    /// The input value is not valid under any of the given schemas.
    AnyOf,
    /// The input value doesn't match the expected constant.
    Constant { expected_value: Value },
    /// The input array doesn't contain items conforming to the specified schema.
    Contains,
    /// The input value doesn't match any of the specified options.
    Enum { options: Value },
    /// Value is too large.
    ExclusiveMaximum { limit: f64 },
    /// Value is too small.
    ExclusiveMinimum { limit: f64 },
    /// Everything is invalid for the `false` schema.
    FalseSchema,
    /// The input doesn't match the specified format.
    Format { format: &'static str },
    /// A `$ref` JSON Pointer doesn't resolve against the root document.
    InvalidReference { reference: String },
    /// Too many items in an array.
    MaxItems { limit: u64 },
    /// Value is too large.
    Maximum { limit: f64 },
    /// String is too long.
    MaxLength { limit: u64 },
    /// Too many properties in an object.
    MaxProperties { limit: u64 },
    /// Too few items in an array.
    MinItems { limit: u64 },
    /// Value is too small.
    Minimum { limit: f64 },
    /// String is too short.
    MinLength { limit: u64 },
    /// Not enough properties in an object.
    MinProperties { limit: u64 },
    /// The number is not a multiple of another number.
    MultipleOf { multiple_of: f64 },
    /// Negated schema matched.
    Not { schema: Value },
    /// The input value is valid under more than one of the given schemas.
    OneOfMultipleValid,
    /// The input value is not valid under any of the given schemas.
    OneOfNotValid,
    /// The input doesn't match the pattern.
    Pattern { pattern: String },
    /// A required property is missing.
    Required { property: String },
    /// A schema resolved during validation failed to compile.
    Schema,
    /// The input value doesn't match one or multiple required types.
    Type { kind: TypeKind },
    /// The input array has non-unique elements.
    UniqueItems,
    /// A `$ref` target is not an intra-document `#/` JSON Pointer.
    UnsupportedReference { reference: String },
}

/// Whether the `type` keyword named a single type or an array of types.
#[derive(Debug)]
pub enum TypeKind {
    Single(PrimitiveType),
    Multiple(Vec<PrimitiveType>),
}

/// Shortcuts for creation of specific error kinds.
impl<'a> ValidationError<'a> {
    /// The kind of the failed check.
    #[must_use]
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }

    /// The part of the instance that failed validation.
    #[must_use]
    pub fn instance(&self) -> &Value {
        &self.instance
    }

    /// Dotted path to the offending value; empty at the instance root.
    #[must_use]
    pub fn instance_path(&self) -> &JsonPath {
        &self.instance_path
    }

    /// Detach the error from the validated instance.
    #[must_use]
    pub fn into_owned(self) -> ValidationError<'static> {
        ValidationError {
            instance: Cow::Owned(self.instance.into_owned()),
            kind: self.kind,
            instance_path: self.instance_path,
        }
    }

    pub(crate) fn additional_items(
        instance_path: JsonPath,
        instance: &'a Value,
        limit: usize,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::AdditionalItems { limit },
            instance_path,
        }
    }
    pub(crate) fn additional_property(
        instance_path: JsonPath,
        instance: &'a Value,
        property: String,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::AdditionalProperty { property },
            instance_path,
        }
    }
    pub(crate) fn any_of(instance_path: JsonPath, instance: &'a Value) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::AnyOf,
            instance_path,
        }
    }
    pub(crate) fn constant(
        instance_path: JsonPath,
        instance: &'a Value,
        expected_value: &Value,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::Constant {
                expected_value: expected_value.clone(),
            },
            instance_path,
        }
    }
    pub(crate) fn contains(instance_path: JsonPath, instance: &'a Value) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::Contains,
            instance_path,
        }
    }
    pub(crate) fn enumeration(
        instance_path: JsonPath,
        instance: &'a Value,
        options: &Value,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::Enum {
                options: options.clone(),
            },
            instance_path,
        }
    }
    pub(crate) fn exclusive_maximum(
        instance_path: JsonPath,
        instance: &'a Value,
        limit: f64,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::ExclusiveMaximum { limit },
            instance_path,
        }
    }
    pub(crate) fn exclusive_minimum(
        instance_path: JsonPath,
        instance: &'a Value,
        limit: f64,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::ExclusiveMinimum { limit },
            instance_path,
        }
    }
    pub(crate) fn false_schema(
        instance_path: JsonPath,
        instance: &'a Value,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::FalseSchema,
            instance_path,
        }
    }
    pub(crate) fn format(
        instance_path: JsonPath,
        instance: &'a Value,
        format: &'static str,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::Format { format },
            instance_path,
        }
    }
    pub(crate) fn invalid_reference(
        instance_path: JsonPath,
        instance: &'a Value,
        reference: String,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::InvalidReference { reference },
            instance_path,
        }
    }
    pub(crate) fn max_items(
        instance_path: JsonPath,
        instance: &'a Value,
        limit: u64,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::MaxItems { limit },
            instance_path,
        }
    }
    pub(crate) fn maximum(
        instance_path: JsonPath,
        instance: &'a Value,
        limit: f64,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::Maximum { limit },
            instance_path,
        }
    }
    pub(crate) fn max_length(
        instance_path: JsonPath,
        instance: &'a Value,
        limit: u64,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::MaxLength { limit },
            instance_path,
        }
    }
    pub(crate) fn max_properties(
        instance_path: JsonPath,
        instance: &'a Value,
        limit: u64,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::MaxProperties { limit },
            instance_path,
        }
    }
    pub(crate) fn min_items(
        instance_path: JsonPath,
        instance: &'a Value,
        limit: u64,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::MinItems { limit },
            instance_path,
        }
    }
    pub(crate) fn minimum(
        instance_path: JsonPath,
        instance: &'a Value,
        limit: f64,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::Minimum { limit },
            instance_path,
        }
    }
    pub(crate) fn min_length(
        instance_path: JsonPath,
        instance: &'a Value,
        limit: u64,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::MinLength { limit },
            instance_path,
        }
    }
    pub(crate) fn min_properties(
        instance_path: JsonPath,
        instance: &'a Value,
        limit: u64,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::MinProperties { limit },
            instance_path,
        }
    }
    pub(crate) fn multiple_of(
        instance_path: JsonPath,
        instance: &'a Value,
        multiple_of: f64,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::MultipleOf { multiple_of },
            instance_path,
        }
    }
    pub(crate) fn not(
        instance_path: JsonPath,
        instance: &'a Value,
        schema: Value,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::Not { schema },
            instance_path,
        }
    }
    pub(crate) fn one_of_multiple_valid(
        instance_path: JsonPath,
        instance: &'a Value,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::OneOfMultipleValid,
            instance_path,
        }
    }
    pub(crate) fn one_of_not_valid(
        instance_path: JsonPath,
        instance: &'a Value,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::OneOfNotValid,
            instance_path,
        }
    }
    pub(crate) fn pattern(
        instance_path: JsonPath,
        instance: &'a Value,
        pattern: String,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::Pattern { pattern },
            instance_path,
        }
    }
    pub(crate) fn required(
        instance_path: JsonPath,
        instance: &'a Value,
        property: String,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::Required { property },
            instance_path,
        }
    }
    pub(crate) fn schema(instance_path: JsonPath, instance: &'a Value) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::Schema,
            instance_path,
        }
    }
    pub(crate) fn single_type_error(
        instance_path: JsonPath,
        instance: &'a Value,
        type_name: PrimitiveType,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::Type {
                kind: TypeKind::Single(type_name),
            },
            instance_path,
        }
    }
    pub(crate) fn multiple_type_error(
        instance_path: JsonPath,
        instance: &'a Value,
        types: Vec<PrimitiveType>,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::Type {
                kind: TypeKind::Multiple(types),
            },
            instance_path,
        }
    }
    pub(crate) fn unique_items(
        instance_path: JsonPath,
        instance: &'a Value,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::UniqueItems,
            instance_path,
        }
    }
    pub(crate) fn unsupported_reference(
        instance_path: JsonPath,
        instance: &'a Value,
        reference: String,
    ) -> ValidationError<'a> {
        ValidationError {
            instance: Cow::Borrowed(instance),
            kind: ValidationErrorKind::UnsupportedReference { reference },
            instance_path,
        }
    }
}

impl error::Error for ValidationError<'_> {}

/// Textual representation of various validation errors, prefixed with the
/// dotted path to the offending value.
impl fmt::Display for ValidationError<'_> {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.instance_path.is_empty() {
            write!(f, "{}: ", self.instance_path)?
        }
        match &self.kind {
            ValidationErrorKind::Schema => write!(f, "Schema error"),
            ValidationErrorKind::AdditionalItems { limit } => {
                // Reported only for arrays longer than the tuple schema
                let extras: Vec<&Value> = self
                    .instance
                    .as_array()
                    .expect("Always valid")
                    .iter()
                    .skip(*limit)
                    .collect();
                let verb = if extras.len() == 1 { "was" } else { "were" };
                write!(
                    f,
                    "Additional items are not allowed ({} {} unexpected)",
                    extras
                        .iter()
                        .map(|x| x.to_string())
                        .collect::<Vec<String>>()
                        .join(", "),
                    verb
                )
            }
            ValidationErrorKind::AdditionalProperty { property } => {
                write!(f, "Additional property '{}' is not allowed", property)
            }
            ValidationErrorKind::AnyOf => write!(
                f,
                "'{}' is not valid under any of the given schemas",
                self.instance
            ),
            ValidationErrorKind::Constant { expected_value } => {
                write!(f, "'{}' was expected", expected_value)
            }
            ValidationErrorKind::Contains => write!(
                f,
                "None of '{}' are valid under the given schema",
                self.instance
            ),
            ValidationErrorKind::Enum { options } => {
                write!(f, "'{}' is not one of '{}'", self.instance, options)
            }
            ValidationErrorKind::ExclusiveMaximum { limit } => write!(
                f,
                "{} is greater than or equal to the maximum of {}",
                self.instance, limit
            ),
            ValidationErrorKind::ExclusiveMinimum { limit } => write!(
                f,
                "{} is less than or equal to the minimum of {}",
                self.instance, limit
            ),
            ValidationErrorKind::FalseSchema => {
                write!(f, "False schema does not allow '{}'", self.instance)
            }
            ValidationErrorKind::Format { format } => {
                write!(f, "'{}' is not a '{}'", self.instance, format)
            }
            ValidationErrorKind::InvalidReference { reference } => {
                write!(f, "Invalid reference: {}", reference)
            }
            ValidationErrorKind::MaxItems { limit } => write!(
                f,
                "{} has more than the maximum of {} items",
                self.instance, limit
            ),
            ValidationErrorKind::Maximum { limit } => write!(
                f,
                "{} is greater than the maximum of {}",
                self.instance, limit
            ),
            ValidationErrorKind::MaxLength { limit } => write!(
                f,
                "'{}' is longer than the maximum of {} characters",
                self.instance, limit
            ),
            ValidationErrorKind::MaxProperties { limit } => write!(
                f,
                "{} has more than the maximum of {} properties",
                self.instance, limit
            ),
            ValidationErrorKind::MinItems { limit } => write!(
                f,
                "{} has less than the minimum of {} items",
                self.instance, limit
            ),
            ValidationErrorKind::Minimum { limit } => {
                write!(f, "{} is less than the minimum of {}", self.instance, limit)
            }
            ValidationErrorKind::MinLength { limit } => write!(
                f,
                "'{}' is shorter than the minimum of {} characters",
                self.instance, limit
            ),
            ValidationErrorKind::MinProperties { limit } => write!(
                f,
                "{} has less than the minimum of {} properties",
                self.instance, limit
            ),
            ValidationErrorKind::MultipleOf { multiple_of } => {
                write!(f, "{} is not a multiple of {}", self.instance, multiple_of)
            }
            ValidationErrorKind::Not { schema } => {
                write!(f, "{} is not allowed for {}", schema, self.instance)
            }
            ValidationErrorKind::OneOfMultipleValid => write!(
                f,
                "'{}' matches multiple of the given schemas",
                self.instance
            ),
            ValidationErrorKind::OneOfNotValid => {
                write!(f, "'{}' matches none of the given schemas", self.instance)
            }
            ValidationErrorKind::Pattern { pattern } => {
                write!(f, "'{}' does not match '{}'", self.instance, pattern)
            }
            ValidationErrorKind::Required { property } => {
                write!(f, "Required property '{}' is missing", property)
            }
            ValidationErrorKind::Type { kind } => match kind {
                TypeKind::Single(type_) => {
                    write!(f, "'{}' is not of type '{}'", self.instance, type_)
                }
                TypeKind::Multiple(types) => write!(
                    f,
                    "'{}' is not of types '{}'",
                    self.instance,
                    types
                        .iter()
                        .map(|t| format!("{}", t))
                        .collect::<Vec<String>>()
                        .join(", ")
                ),
            },
            ValidationErrorKind::UniqueItems => write!(
                f,
                "'{}' has non-unique elements (items must be unique)",
                self.instance
            ),
            ValidationErrorKind::UnsupportedReference { reference } => {
                write!(f, "Unsupported reference: {}", reference)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::JsonPath;
    use serde_json::json;

    #[test]
    fn type_error() {
        let instance = json!(42);
        let err =
            ValidationError::single_type_error(JsonPath::default(), &instance, PrimitiveType::String);
        assert_eq!(format!("{}", err), "'42' is not of type 'string'")
    }

    #[test]
    fn path_prefix() {
        let instance = json!(0);
        let path: JsonPath = (&crate::paths::InstancePath::new().push("id")).into();
        let err = ValidationError::minimum(path, &instance, 1.0);
        assert_eq!(format!("{}", err), ".id: 0 is less than the minimum of 1")
    }
}
