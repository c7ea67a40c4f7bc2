use crate::{
    compilation::compile_validators,
    error::{no_error, CompilationError, ErrorIterator},
    keywords::{CompilationResult, Validators},
    paths::InstancePath,
    validator::Validate,
};
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct PatternPropertiesValidator {
    patterns: Vec<(Regex, Validators)>,
}

impl PatternPropertiesValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value) -> CompilationResult {
        match schema {
            Value::Object(map) => {
                let mut patterns = Vec::with_capacity(map.len());
                for (pattern, subschema) in map {
                    // Entries with patterns that do not compile are skipped,
                    // same as the `pattern` keyword
                    if let Ok(compiled) = Regex::new(pattern) {
                        patterns.push((compiled, compile_validators(subschema)?));
                    }
                }
                Ok(Box::new(PatternPropertiesValidator { patterns }))
            }
            _ => Err(CompilationError::SchemaError),
        }
    }
}

impl Validate for PatternPropertiesValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let errors: Vec<_> = self
                .patterns
                .iter()
                .flat_map(|(pattern, validators)| {
                    item.iter()
                        .filter(move |(key, _)| pattern.is_match(key))
                        .flat_map(move |(key, value)| {
                            let property_path = instance_path.push(key.as_str());
                            validators
                                .iter()
                                .flat_map(|validator| {
                                    validator.validate(root, value, &property_path)
                                })
                                .collect::<Vec<_>>()
                        })
                })
                .collect();
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }

    fn is_valid(&self, root: &Value, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            self.patterns.iter().all(|(pattern, validators)| {
                item.iter()
                    .filter(|(key, _)| pattern.is_match(key))
                    .all(|(_, value)| {
                        validators
                            .iter()
                            .all(|validator| validator.is_valid(root, value))
                    })
            })
        } else {
            true
        }
    }
}
impl fmt::Display for PatternPropertiesValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "patternProperties: {{{}}}",
            self.patterns
                .iter()
                .map(|(key, _)| key.as_str().to_string())
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    Some(PatternPropertiesValidator::compile(schema))
}
