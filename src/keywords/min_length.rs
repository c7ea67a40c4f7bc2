use crate::{
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::InstancePath,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct MinLengthValidator {
    limit: u64,
}

impl MinLengthValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value) -> CompilationResult {
        if let Some(limit) = schema.as_u64() {
            Ok(Box::new(MinLengthValidator { limit }))
        } else {
            Err(CompilationError::SchemaError)
        }
    }
}

impl Validate for MinLengthValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if self.is_valid(root, instance) {
            no_error()
        } else {
            error(ValidationError::min_length(
                instance_path.into(),
                instance,
                self.limit,
            ))
        }
    }

    fn is_valid(&self, _: &Value, instance: &Value) -> bool {
        if let Value::String(item) = instance {
            // Lengths are counted in Unicode code points, not bytes
            (item.chars().count() as u64) >= self.limit
        } else {
            true
        }
    }
}
impl fmt::Display for MinLengthValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "minLength: {}", self.limit)
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    Some(MinLengthValidator::compile(schema))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"minLength": 2}), &json!("ab"))]
    #[test_case(&json!({"minLength": 2}), &json!("äöü"); "code points, not bytes")]
    #[test_case(&json!({"minLength": 2}), &json!(1); "a number is ignored")]
    fn min_length_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"minLength": 2}), &json!("f"))]
    #[test_case(&json!({"minLength": 3}), &json!("äö"))]
    fn min_length_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn error_message() {
        tests_util::expect_errors(
            &json!({"minLength": 2}),
            &json!("f"),
            &[r#"'"f"' is shorter than the minimum of 2 characters"#],
        )
    }
}
