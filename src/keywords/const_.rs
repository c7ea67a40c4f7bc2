use crate::{
    error::{error, no_error, ErrorIterator, ValidationError},
    keywords::{helpers, CompilationResult},
    paths::InstancePath,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct ConstValidator {
    expected: Value,
}

impl ConstValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value) -> CompilationResult {
        Ok(Box::new(ConstValidator {
            expected: schema.clone(),
        }))
    }
}

impl Validate for ConstValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if self.is_valid(root, instance) {
            no_error()
        } else {
            error(ValidationError::constant(
                instance_path.into(),
                instance,
                &self.expected,
            ))
        }
    }

    fn is_valid(&self, _: &Value, instance: &Value) -> bool {
        helpers::equal(&self.expected, instance)
    }
}
impl fmt::Display for ConstValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "const: {}", self.expected)
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    Some(ConstValidator::compile(schema))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"const": 2}), &json!(2))]
    #[test_case(&json!({"const": 2}), &json!(2.0))]
    #[test_case(&json!({"const": null}), &json!(null))]
    #[test_case(&json!({"const": {"a": [1]}}), &json!({"a": [1.0]}))]
    fn const_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"const": 2}), &json!(5))]
    #[test_case(&json!({"const": 1}), &json!(true))]
    #[test_case(&json!({"const": "a"}), &json!("b"))]
    fn const_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn error_message() {
        tests_util::expect_errors(&json!({"const": 2}), &json!(5), &["'2' was expected"])
    }
}
