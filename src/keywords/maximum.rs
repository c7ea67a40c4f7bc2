use crate::{
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::{exclusive_maximum::ExclusiveMaximumValidator, CompilationResult},
    paths::InstancePath,
    validator::Validate,
};
use num_cmp::NumCmp;
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct MaximumValidator {
    limit: f64,
}

impl MaximumValidator {
    #[inline]
    pub(crate) fn compile(limit: f64) -> CompilationResult {
        Ok(Box::new(MaximumValidator { limit }))
    }
}

impl Validate for MaximumValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if self.is_valid(root, instance) {
            no_error()
        } else {
            error(ValidationError::maximum(
                instance_path.into(),
                instance,
                self.limit,
            ))
        }
    }

    fn is_valid(&self, _: &Value, instance: &Value) -> bool {
        if let Value::Number(item) = instance {
            return if let Some(item) = item.as_u64() {
                !NumCmp::num_gt(item, self.limit)
            } else if let Some(item) = item.as_i64() {
                !NumCmp::num_gt(item, self.limit)
            } else {
                let item = item.as_f64().expect("Always valid");
                !NumCmp::num_gt(item, self.limit)
            };
        }
        true
    }
}
impl fmt::Display for MaximumValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "maximum: {}", self.limit)
    }
}

#[inline]
pub(crate) fn compile(parent: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    if let Value::Number(limit) = schema {
        let limit = limit.as_f64().expect("Always valid");
        // Draft 4: a `true` boolean `exclusiveMaximum` turns the inclusive
        // bound into a strict one
        if let Some(Value::Bool(true)) = parent.get("exclusiveMaximum") {
            Some(ExclusiveMaximumValidator::compile(limit))
        } else {
            Some(MaximumValidator::compile(limit))
        }
    } else {
        Some(Err(CompilationError::SchemaError))
    }
}
