use crate::{
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::InstancePath,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::fmt;

// Remainders within this tolerance of either zero or the divisor count as
// exact, which absorbs the rounding of decimal fractions in binary floats
// (e.g. `1.1 % 0.1`).
const TOLERANCE: f64 = 1e-8;

pub(crate) struct MultipleOfValidator {
    multiple_of: f64,
}

impl MultipleOfValidator {
    #[inline]
    pub(crate) fn compile(multiple_of: f64) -> CompilationResult {
        Ok(Box::new(MultipleOfValidator { multiple_of }))
    }
}

impl Validate for MultipleOfValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if self.is_valid(root, instance) {
            no_error()
        } else {
            error(ValidationError::multiple_of(
                instance_path.into(),
                instance,
                self.multiple_of,
            ))
        }
    }

    fn is_valid(&self, _: &Value, instance: &Value) -> bool {
        if let Value::Number(item) = instance {
            let item = item.as_f64().expect("Always valid");
            let remainder = (item % self.multiple_of).abs();
            remainder < TOLERANCE || (self.multiple_of.abs() - remainder).abs() < TOLERANCE
        } else {
            true
        }
    }
}
impl fmt::Display for MultipleOfValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "multipleOf: {}", self.multiple_of)
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    if let Value::Number(multiple_of) = schema {
        let multiple_of = multiple_of.as_f64().expect("Always valid");
        Some(MultipleOfValidator::compile(multiple_of))
    } else {
        Some(Err(CompilationError::SchemaError))
    }
}
