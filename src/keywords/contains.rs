use crate::{
    compilation::compile_validators,
    error::{error, no_error, ErrorIterator, ValidationError},
    keywords::{format_validators, CompilationResult, Validators},
    paths::InstancePath,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct ContainsValidator {
    validators: Validators,
}

impl ContainsValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value) -> CompilationResult {
        Ok(Box::new(ContainsValidator {
            validators: compile_validators(schema)?,
        }))
    }
}

impl Validate for ContainsValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if self.is_valid(root, instance) {
            no_error()
        } else {
            error(ValidationError::contains(instance_path.into(), instance))
        }
    }

    fn is_valid(&self, root: &Value, instance: &Value) -> bool {
        if let Value::Array(items) = instance {
            items.iter().any(|item| {
                self.validators
                    .iter()
                    .all(|validator| validator.is_valid(root, item))
            })
        } else {
            true
        }
    }
}
impl fmt::Display for ContainsValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "contains: {}", format_validators(&self.validators))
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    Some(ContainsValidator::compile(schema))
}
