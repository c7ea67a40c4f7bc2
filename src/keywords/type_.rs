use crate::{
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::InstancePath,
    primitive_type::PrimitiveType,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::convert::TryFrom;
use std::fmt;

fn is_integer(number: &serde_json::Number) -> bool {
    number.is_u64()
        || number.is_i64()
        || number.as_f64().map_or(false, |value| value.fract() == 0.)
}

pub(crate) struct MultipleTypesValidator {
    types: Vec<PrimitiveType>,
}

impl MultipleTypesValidator {
    #[inline]
    pub(crate) fn compile(items: &[Value]) -> CompilationResult {
        let mut types = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(string) => {
                    if let Ok(primitive_type) = PrimitiveType::try_from(string.as_str()) {
                        types.push(primitive_type)
                    } else {
                        return Err(CompilationError::SchemaError);
                    }
                }
                _ => return Err(CompilationError::SchemaError),
            }
        }
        Ok(Box::new(MultipleTypesValidator { types }))
    }
}

impl Validate for MultipleTypesValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if self.is_valid(root, instance) {
            no_error()
        } else {
            error(ValidationError::multiple_type_error(
                instance_path.into(),
                instance,
                self.types.clone(),
            ))
        }
    }

    fn is_valid(&self, _: &Value, instance: &Value) -> bool {
        self.types.iter().any(|type_| match (type_, instance) {
            (PrimitiveType::Array, Value::Array(_))
            | (PrimitiveType::Boolean, Value::Bool(_))
            | (PrimitiveType::Null, Value::Null)
            | (PrimitiveType::Number, Value::Number(_))
            | (PrimitiveType::Object, Value::Object(_))
            | (PrimitiveType::String, Value::String(_)) => true,
            (PrimitiveType::Integer, Value::Number(number)) => is_integer(number),
            _ => false,
        })
    }
}
impl fmt::Display for MultipleTypesValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type: [{}]",
            self.types
                .iter()
                .map(|type_| format!("{}", type_))
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

macro_rules! single_type_validator {
    ($name:ident, $primitive_type:expr, $is_valid:expr) => {
        pub(crate) struct $name {}
        impl $name {
            #[inline]
            pub(crate) fn compile() -> CompilationResult {
                Ok(Box::new($name {}))
            }
        }
        impl Validate for $name {
            fn validate<'a>(
                &self,
                root: &'a Value,
                instance: &'a Value,
                instance_path: &InstancePath,
            ) -> ErrorIterator<'a> {
                if self.is_valid(root, instance) {
                    no_error()
                } else {
                    error(ValidationError::single_type_error(
                        instance_path.into(),
                        instance,
                        $primitive_type,
                    ))
                }
            }

            fn is_valid(&self, _: &Value, instance: &Value) -> bool {
                let check: fn(&Value) -> bool = $is_valid;
                check(instance)
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "type: {}", $primitive_type)
            }
        }
    };
}

single_type_validator!(ArrayTypeValidator, PrimitiveType::Array, |instance| {
    instance.is_array()
});
// Booleans are never numbers, and numbers are never booleans
single_type_validator!(BooleanTypeValidator, PrimitiveType::Boolean, |instance| {
    instance.is_boolean()
});
single_type_validator!(NullTypeValidator, PrimitiveType::Null, |instance| {
    instance.is_null()
});
single_type_validator!(NumberTypeValidator, PrimitiveType::Number, |instance| {
    instance.is_number()
});
single_type_validator!(ObjectTypeValidator, PrimitiveType::Object, |instance| {
    instance.is_object()
});
single_type_validator!(StringTypeValidator, PrimitiveType::String, |instance| {
    instance.is_string()
});
// An integral number: `1.0` counts, `true` does not
single_type_validator!(IntegerTypeValidator, PrimitiveType::Integer, |instance| {
    match instance {
        Value::Number(number) => is_integer(number),
        _ => false,
    }
});

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    match schema {
        Value::String(item) => Some(compile_single_type(item.as_str())),
        Value::Array(items) => {
            if items.len() == 1 {
                if let Some(Value::String(item)) = items.iter().next() {
                    Some(compile_single_type(item.as_str()))
                } else {
                    Some(Err(CompilationError::SchemaError))
                }
            } else {
                Some(MultipleTypesValidator::compile(items))
            }
        }
        _ => Some(Err(CompilationError::SchemaError)),
    }
}

fn compile_single_type(item: &str) -> CompilationResult {
    match PrimitiveType::try_from(item) {
        Ok(PrimitiveType::Array) => ArrayTypeValidator::compile(),
        Ok(PrimitiveType::Boolean) => BooleanTypeValidator::compile(),
        Ok(PrimitiveType::Integer) => IntegerTypeValidator::compile(),
        Ok(PrimitiveType::Null) => NullTypeValidator::compile(),
        Ok(PrimitiveType::Number) => NumberTypeValidator::compile(),
        Ok(PrimitiveType::Object) => ObjectTypeValidator::compile(),
        Ok(PrimitiveType::String) => StringTypeValidator::compile(),
        Err(()) => Err(CompilationError::SchemaError),
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"type": "integer"}), &json!(1))]
    #[test_case(&json!({"type": "integer"}), &json!(1.0); "a float with zero fractional part is an integer")]
    #[test_case(&json!({"type": "integer"}), &json!(-3))]
    #[test_case(&json!({"type": "number"}), &json!(1.5))]
    #[test_case(&json!({"type": "number"}), &json!(1))]
    #[test_case(&json!({"type": "boolean"}), &json!(true))]
    #[test_case(&json!({"type": "null"}), &json!(null))]
    #[test_case(&json!({"type": "string"}), &json!("ab"))]
    #[test_case(&json!({"type": "array"}), &json!([]))]
    #[test_case(&json!({"type": "object"}), &json!({}))]
    #[test_case(&json!({"type": ["integer", "string"]}), &json!("ab"))]
    #[test_case(&json!({"type": ["integer", "string"]}), &json!(7))]
    fn type_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"type": "integer"}), &json!(1.5))]
    #[test_case(&json!({"type": "integer"}), &json!(true); "a boolean is not an integer")]
    #[test_case(&json!({"type": "number"}), &json!(true); "a boolean is not a number")]
    #[test_case(&json!({"type": "boolean"}), &json!(1); "a number is not a boolean")]
    #[test_case(&json!({"type": "null"}), &json!(0))]
    #[test_case(&json!({"type": "string"}), &json!(1))]
    #[test_case(&json!({"type": "array"}), &json!({}))]
    #[test_case(&json!({"type": "object"}), &json!([]))]
    #[test_case(&json!({"type": ["integer", "string"]}), &json!(null))]
    fn type_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn multiple_types_error_message() {
        tests_util::expect_errors(
            &json!({"type": ["integer", "string"]}),
            &json!(null),
            &["'null' is not of types 'integer', 'string'"],
        )
    }
}
