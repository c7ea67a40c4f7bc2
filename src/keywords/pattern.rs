use crate::{
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::InstancePath,
    validator::Validate,
};
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct PatternValidator {
    original: String,
    pattern: Regex,
}

impl PatternValidator {
    #[inline]
    pub(crate) fn compile(pattern: &str) -> Option<CompilationResult> {
        // Patterns that do not compile are skipped entirely, they never
        // become validation errors
        match Regex::new(pattern) {
            Ok(compiled) => Some(Ok(Box::new(PatternValidator {
                original: pattern.to_string(),
                pattern: compiled,
            }))),
            Err(_) => None,
        }
    }
}

impl Validate for PatternValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if self.is_valid(root, instance) {
            no_error()
        } else {
            error(ValidationError::pattern(
                instance_path.into(),
                instance,
                self.original.clone(),
            ))
        }
    }

    fn is_valid(&self, _: &Value, instance: &Value) -> bool {
        if let Value::String(item) = instance {
            self.pattern.is_match(item)
        } else {
            true
        }
    }
}
impl fmt::Display for PatternValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern: {}", self.original)
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    match schema {
        Value::String(item) => PatternValidator::compile(item),
        _ => Some(Err(CompilationError::SchemaError)),
    }
}
