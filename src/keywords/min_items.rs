use crate::{
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::InstancePath,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct MinItemsValidator {
    limit: u64,
}

impl MinItemsValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value) -> CompilationResult {
        if let Some(limit) = schema.as_u64() {
            Ok(Box::new(MinItemsValidator { limit }))
        } else {
            Err(CompilationError::SchemaError)
        }
    }
}

impl Validate for MinItemsValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if self.is_valid(root, instance) {
            no_error()
        } else {
            error(ValidationError::min_items(
                instance_path.into(),
                instance,
                self.limit,
            ))
        }
    }

    fn is_valid(&self, _: &Value, instance: &Value) -> bool {
        if let Value::Array(items) = instance {
            (items.len() as u64) >= self.limit
        } else {
            true
        }
    }
}
impl fmt::Display for MinItemsValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "minItems: {}", self.limit)
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    Some(MinItemsValidator::compile(schema))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"minItems": 1}), &json!([1]))]
    #[test_case(&json!({"minItems": 1}), &json!("ignored"))]
    fn min_items_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test]
    fn error_message() {
        tests_util::expect_errors(
            &json!({"minItems": 1}),
            &json!([]),
            &["[] has less than the minimum of 1 items"],
        )
    }
}
