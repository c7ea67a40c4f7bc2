use crate::{
    compilation::compile_validators,
    error::{no_error, CompilationError, ErrorIterator},
    keywords::{format_vec_of_validators, CompilationResult, Validators},
    paths::InstancePath,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct AllOfValidator {
    schemas: Vec<Validators>,
}

impl AllOfValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value) -> CompilationResult {
        if let Value::Array(items) = schema {
            let mut schemas = Vec::with_capacity(items.len());
            for item in items {
                schemas.push(compile_validators(item)?)
            }
            Ok(Box::new(AllOfValidator { schemas }))
        } else {
            Err(CompilationError::SchemaError)
        }
    }
}

impl Validate for AllOfValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        // Errors from every failing subschema accumulate
        let errors: Vec<_> = self
            .schemas
            .iter()
            .flat_map(|validators| {
                validators
                    .iter()
                    .flat_map(|validator| validator.validate(root, instance, instance_path))
                    .collect::<Vec<_>>()
            })
            .collect();
        if errors.is_empty() {
            no_error()
        } else {
            Box::new(errors.into_iter())
        }
    }

    fn is_valid(&self, root: &Value, instance: &Value) -> bool {
        self.schemas.iter().all(|validators| {
            validators
                .iter()
                .all(|validator| validator.is_valid(root, instance))
        })
    }
}
impl fmt::Display for AllOfValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "allOf: [{}]", format_vec_of_validators(&self.schemas))
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    Some(AllOfValidator::compile(schema))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"allOf": [{"type": "integer"}, {"minimum": 2}]}), &json!(2))]
    #[test_case(&json!({"allOf": [{"type": "integer"}]}), &json!(1))]
    fn all_of_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"allOf": [{"type": "integer"}, {"minimum": 2}]}), &json!(1))]
    #[test_case(&json!({"allOf": [{"type": "integer"}, {"minimum": 2}]}), &json!("x"))]
    fn all_of_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn all_errors_accumulate() {
        tests_util::expect_errors(
            &json!({"allOf": [{"type": "integer"}, {"minimum": 2}]}),
            &json!(1.5),
            &[
                "'1.5' is not of type 'integer'",
                "1.5 is less than the minimum of 2",
            ],
        )
    }
}
