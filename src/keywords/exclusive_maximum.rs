use crate::{
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::InstancePath,
    validator::Validate,
};
use num_cmp::NumCmp;
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct ExclusiveMaximumValidator {
    limit: f64,
}

impl ExclusiveMaximumValidator {
    #[inline]
    pub(crate) fn compile(limit: f64) -> CompilationResult {
        Ok(Box::new(ExclusiveMaximumValidator { limit }))
    }
}

impl Validate for ExclusiveMaximumValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if self.is_valid(root, instance) {
            no_error()
        } else {
            error(ValidationError::exclusive_maximum(
                instance_path.into(),
                instance,
                self.limit,
            ))
        }
    }

    fn is_valid(&self, _: &Value, instance: &Value) -> bool {
        if let Value::Number(item) = instance {
            return if let Some(item) = item.as_u64() {
                NumCmp::num_lt(item, self.limit)
            } else if let Some(item) = item.as_i64() {
                NumCmp::num_lt(item, self.limit)
            } else {
                let item = item.as_f64().expect("Always valid");
                NumCmp::num_lt(item, self.limit)
            };
        }
        true
    }
}
impl fmt::Display for ExclusiveMaximumValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exclusiveMaximum: {}", self.limit)
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    match schema {
        // Draft 6 and newer: the keyword is a strict numeric bound of its own
        Value::Number(limit) => {
            let limit = limit.as_f64().expect("Always valid");
            Some(ExclusiveMaximumValidator::compile(limit))
        }
        // Draft 4: a boolean modifier of `maximum`, handled over there
        Value::Bool(_) => None,
        _ => Some(Err(CompilationError::SchemaError)),
    }
}
