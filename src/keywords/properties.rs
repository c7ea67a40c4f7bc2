use crate::{
    compilation::compile_validators,
    error::{no_error, CompilationError, ErrorIterator},
    keywords::{format_key_value_validators, CompilationResult, Validators},
    paths::InstancePath,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct PropertiesValidator {
    properties: Vec<(String, Validators)>,
}

impl PropertiesValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value) -> CompilationResult {
        match schema {
            Value::Object(map) => {
                let mut properties = Vec::with_capacity(map.len());
                for (key, subschema) in map {
                    properties.push((key.clone(), compile_validators(subschema)?));
                }
                Ok(Box::new(PropertiesValidator { properties }))
            }
            _ => Err(CompilationError::SchemaError),
        }
    }
}

impl Validate for PropertiesValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if let Value::Object(item) = instance {
            let errors: Vec<_> = self
                .properties
                .iter()
                .filter_map(|(name, validators)| {
                    item.get(name).map(|property| {
                        let property_path = instance_path.push(name.as_str());
                        validators
                            .iter()
                            .flat_map(|validator| validator.validate(root, property, &property_path))
                            .collect::<Vec<_>>()
                    })
                })
                .flatten()
                .collect();
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }

    fn is_valid(&self, root: &Value, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            self.properties.iter().all(|(name, validators)| {
                item.get(name).map_or(true, |property| {
                    validators
                        .iter()
                        .all(|validator| validator.is_valid(root, property))
                })
            })
        } else {
            true
        }
    }
}
impl fmt::Display for PropertiesValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "properties: {{{}}}",
            format_key_value_validators(&self.properties)
        )
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    Some(PropertiesValidator::compile(schema))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"properties": {"foo": {"type": "integer"}}}), &json!({"foo": 1}))]
    #[test_case(&json!({"properties": {"foo": {"type": "integer"}}}), &json!({"bar": "not checked"}); "absent properties are fine")]
    #[test_case(&json!({"properties": {"foo": {"type": "integer"}}}), &json!("ignored"))]
    fn properties_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"properties": {"foo": {"type": "integer"}}}), &json!({"foo": "bar"}))]
    fn properties_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn error_path() {
        tests_util::assert_instance_path(
            &json!({"properties": {"foo": {"properties": {"bar": {"type": "integer"}}}}}),
            &json!({"foo": {"bar": "x"}}),
            ".foo.bar",
        )
    }
}
