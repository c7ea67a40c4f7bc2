use crate::{
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::InstancePath,
    validator::Validate,
};
use num_cmp::NumCmp;
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct ExclusiveMinimumValidator {
    limit: f64,
}

impl ExclusiveMinimumValidator {
    #[inline]
    pub(crate) fn compile(limit: f64) -> CompilationResult {
        Ok(Box::new(ExclusiveMinimumValidator { limit }))
    }
}

impl Validate for ExclusiveMinimumValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if self.is_valid(root, instance) {
            no_error()
        } else {
            error(ValidationError::exclusive_minimum(
                instance_path.into(),
                instance,
                self.limit,
            ))
        }
    }

    fn is_valid(&self, _: &Value, instance: &Value) -> bool {
        if let Value::Number(item) = instance {
            return if let Some(item) = item.as_u64() {
                NumCmp::num_gt(item, self.limit)
            } else if let Some(item) = item.as_i64() {
                NumCmp::num_gt(item, self.limit)
            } else {
                let item = item.as_f64().expect("Always valid");
                NumCmp::num_gt(item, self.limit)
            };
        }
        true
    }
}
impl fmt::Display for ExclusiveMinimumValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exclusiveMinimum: {}", self.limit)
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    match schema {
        // Draft 6 and newer: the keyword is a strict numeric bound of its own
        Value::Number(limit) => {
            let limit = limit.as_f64().expect("Always valid");
            Some(ExclusiveMinimumValidator::compile(limit))
        }
        // Draft 4: a boolean modifier of `minimum`, handled over there
        Value::Bool(_) => None,
        _ => Some(Err(CompilationError::SchemaError)),
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"exclusiveMinimum": 1.1}), &json!(1.2))]
    #[test_case(&json!({"exclusiveMinimum": 5}), &json!(6))]
    #[test_case(&json!({"exclusiveMinimum": 5}), &json!("a string is ignored"))]
    #[test_case(&json!({"exclusiveMinimum": false}), &json!(-100); "draft 4 boolean alone has no effect")]
    fn exclusive_minimum_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"exclusiveMinimum": 1.1}), &json!(1.1))]
    #[test_case(&json!({"exclusiveMinimum": 5}), &json!(4))]
    fn exclusive_minimum_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn error_message() {
        tests_util::expect_errors(
            &json!({"exclusiveMinimum": 1.1}),
            &json!(1.1),
            &["1.1 is less than or equal to the minimum of 1.1"],
        )
    }
}
