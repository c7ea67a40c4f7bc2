use crate::{
    compilation::compile_validators,
    error::{no_error, ErrorIterator, ValidationError},
    keywords::{format_validators, CompilationResult, Validators},
    paths::InstancePath,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct PropertyNamesValidator {
    validators: Validators,
}

impl PropertyNamesValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value) -> CompilationResult {
        Ok(Box::new(PropertyNamesValidator {
            validators: compile_validators(schema)?,
        }))
    }
}

impl Validate for PropertyNamesValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            // Property names are validated as standalone strings; the
            // resulting errors have to own that temporary value
            let errors: Vec<_> = item
                .keys()
                .flat_map(|key| {
                    let name = Value::String(key.clone());
                    self.validators
                        .iter()
                        .flat_map(|validator| validator.validate(root, &name, instance_path))
                        .map(ValidationError::into_owned)
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
            item.keys().all(|key| {
                let name = Value::String(key.clone());
                self.validators
                    .iter()
                    .all(|validator| validator.is_valid(root, &name))
            })
        } else {
            true
        }
    }
}
impl fmt::Display for PropertyNamesValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "propertyNames: {}", format_validators(&self.validators))
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    Some(PropertyNamesValidator::compile(schema))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"propertyNames": {"maxLength": 3}}), &json!({"foo": 1}))]
    #[test_case(&json!({"propertyNames": {"maxLength": 3}}), &json!({}))]
    #[test_case(&json!({"propertyNames": false}), &json!({}))]
    #[test_case(&json!({"propertyNames": {"maxLength": 3}}), &json!("ignored"))]
    fn property_names_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"propertyNames": {"maxLength": 3}}), &json!({"quux": 1}))]
    #[test_case(&json!({"propertyNames": false}), &json!({"anything": 1}))]
    fn property_names_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }
}
