use crate::{
    compilation::compile_validators,
    error::{no_error, CompilationError, ErrorIterator},
    keywords::{format_key_value_validators, required::RequiredValidator, CompilationResult, Validators},
    paths::InstancePath,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct DependenciesValidator {
    dependencies: Vec<(String, Validators)>,
}

impl DependenciesValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value) -> CompilationResult {
        match schema {
            Value::Object(map) => {
                let mut dependencies = Vec::with_capacity(map.len());
                for (key, subschema) in map {
                    // An array names co-required properties, anything else is
                    // a schema the whole object must conform to
                    let validators = match subschema {
                        Value::Array(_) => vec![RequiredValidator::compile(subschema)?],
                        _ => compile_validators(subschema)?,
                    };
                    dependencies.push((key.clone(), validators))
                }
                Ok(Box::new(DependenciesValidator { dependencies }))
            }
            _ => Err(CompilationError::SchemaError),
        }
    }
}

impl Validate for DependenciesValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let errors: Vec<_> = self
                .dependencies
                .iter()
                .filter(|(property, _)| item.contains_key(property))
                .flat_map(|(_, validators)| {
                    validators
                        .iter()
                        .flat_map(|validator| validator.validate(root, instance, instance_path))
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
            self.dependencies
                .iter()
                .filter(|(property, _)| item.contains_key(property))
                .all(|(_, validators)| {
                    validators
                        .iter()
                        .all(|validator| validator.is_valid(root, instance))
                })
        } else {
            true
        }
    }
}
impl fmt::Display for DependenciesValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dependencies: {{{}}}",
            format_key_value_validators(&self.dependencies)
        )
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    Some(DependenciesValidator::compile(schema))
}
