use crate::{
    compilation::compile_validators,
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::{format_validators, CompilationResult, Validators},
    paths::InstancePath,
    validator::Validate,
};
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

// Properties already claimed by the sibling `properties` and
// `patternProperties` keywords are not "additional"
fn covered_properties(parent: &Map<String, Value>) -> (Vec<String>, Vec<Regex>) {
    let properties = match parent.get("properties") {
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        _ => Vec::new(),
    };
    let patterns = match parent.get("patternProperties") {
        Some(Value::Object(map)) => map
            .keys()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect(),
        _ => Vec::new(),
    };
    (properties, patterns)
}

fn is_additional(key: &str, properties: &[String], patterns: &[Regex]) -> bool {
    !properties.iter().any(|property| property == key)
        && !patterns.iter().any(|pattern| pattern.is_match(key))
}

pub(crate) struct AdditionalPropertiesObjectValidator {
    validators: Validators,
    properties: Vec<String>,
    patterns: Vec<Regex>,
}
impl AdditionalPropertiesObjectValidator {
    #[inline]
    pub(crate) fn compile(
        schema: &Value,
        properties: Vec<String>,
        patterns: Vec<Regex>,
    ) -> CompilationResult {
        Ok(Box::new(AdditionalPropertiesObjectValidator {
            validators: compile_validators(schema)?,
            properties,
            patterns,
        }))
    }
}
impl Validate for AdditionalPropertiesObjectValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let errors: Vec<_> = item
                .iter()
                .filter(|(key, _)| is_additional(key, &self.properties, &self.patterns))
                .flat_map(|(key, value)| {
                    let property_path = instance_path.push(key.as_str());
                    self.validators
                        .iter()
                        .flat_map(|validator| validator.validate(root, value, &property_path))
                        .collect::<Vec<_>>()
                })
                .collect();
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }

    fn is_valid(&self, root: &Value, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            item.iter()
                .filter(|(key, _)| is_additional(key, &self.properties, &self.patterns))
                .all(|(_, value)| {
                    self.validators
                        .iter()
                        .all(|validator| validator.is_valid(root, value))
                })
        } else {
            true
        }
    }
}
impl fmt::Display for AdditionalPropertiesObjectValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "additionalProperties: {}",
            format_validators(&self.validators)
        )
    }
}

pub(crate) struct AdditionalPropertiesFalseValidator {
    properties: Vec<String>,
    patterns: Vec<Regex>,
}
impl AdditionalPropertiesFalseValidator {
    #[inline]
    pub(crate) fn compile(properties: Vec<String>, patterns: Vec<Regex>) -> CompilationResult {
        Ok(Box::new(AdditionalPropertiesFalseValidator {
            properties,
            patterns,
        }))
    }
}
impl Validate for AdditionalPropertiesFalseValidator {
    fn validate<'a>(
        &self,
        _: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let errors: Vec<_> = item
                .iter()
                .filter(|(key, _)| is_additional(key, &self.properties, &self.patterns))
                .map(|(key, _)| {
                    ValidationError::additional_property(
                        instance_path.into(),
                        instance,
                        key.clone(),
                    )
                })
                .collect();
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }

    fn is_valid(&self, _: &Value, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            item.keys()
                .all(|key| !is_additional(key, &self.properties, &self.patterns))
        } else {
            true
        }
    }
}
impl fmt::Display for AdditionalPropertiesFalseValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "additionalProperties: false")
    }
}

#[inline]
pub(crate) fn compile(parent: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    let (properties, patterns) = covered_properties(parent);
    match schema {
        Value::Bool(true) => None,
        Value::Bool(false) => Some(AdditionalPropertiesFalseValidator::compile(
            properties, patterns,
        )),
        Value::Object(_) => Some(AdditionalPropertiesObjectValidator::compile(
            schema, properties, patterns,
        )),
        _ => Some(Err(CompilationError::SchemaError)),
    }
}
