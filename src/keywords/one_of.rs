use crate::{
    compilation::compile_validators,
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::{format_vec_of_validators, CompilationResult, Validators},
    paths::InstancePath,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct OneOfValidator {
    schemas: Vec<Validators>,
}

impl OneOfValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value) -> CompilationResult {
        if let Value::Array(items) = schema {
            let mut schemas = Vec::with_capacity(items.len());
            for item in items {
                schemas.push(compile_validators(item)?)
            }
            Ok(Box::new(OneOfValidator { schemas }))
        } else {
            Err(CompilationError::SchemaError)
        }
    }
}

impl Validate for OneOfValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        let mut valid_schemas = self.schemas.iter().filter(|validators| {
            validators
                .iter()
                .all(|validator| validator.is_valid(root, instance))
        });
        if valid_schemas.next().is_some() {
            // If one schema is valid we need to ensure that there are no
            // other valid schemas
            if valid_schemas.next().is_none() {
                no_error()
            } else {
                error(ValidationError::one_of_multiple_valid(
                    instance_path.into(),
                    instance,
                ))
            }
        } else {
            error(ValidationError::one_of_not_valid(
                instance_path.into(),
                instance,
            ))
        }
    }

    fn is_valid(&self, root: &Value, instance: &Value) -> bool {
        let mut valid_schemas = self.schemas.iter().filter(|validators| {
            validators
                .iter()
                .all(|validator| validator.is_valid(root, instance))
        });
        valid_schemas.next().is_some() && valid_schemas.next().is_none()
    }
}
impl fmt::Display for OneOfValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oneOf: [{}]", format_vec_of_validators(&self.schemas))
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    Some(OneOfValidator::compile(schema))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]}), &json!(1))]
    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]}), &json!(2.5))]
    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"type": "number"}]}), &json!(1.5); "matches the number branch only")]
    fn one_of_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]}), &json!(1.5); "matches none")]
    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]}), &json!(3); "matches both")]
    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"type": "number"}]}), &json!(1); "an integer is also a number")]
    fn one_of_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test_case(
        &json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]}),
        &json!(1.5),
        &["'1.5' matches none of the given schemas"]
    )]
    #[test_case(
        &json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]}),
        &json!(3),
        &["'3' matches multiple of the given schemas"]
    )]
    fn error_message(schema: &Value, instance: &Value, expected: &[&str]) {
        tests_util::expect_errors(schema, instance, expected)
    }
}
