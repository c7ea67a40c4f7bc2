use crate::{
    compilation::compile_validators,
    error::{no_error, ErrorIterator},
    keywords::{format_validators, format_vec_of_validators, CompilationResult, Validators},
    paths::InstancePath,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct ItemsArrayValidator {
    items: Vec<Validators>,
}
impl ItemsArrayValidator {
    #[inline]
    pub(crate) fn compile(schemas: &[Value]) -> CompilationResult {
        let mut items = Vec::with_capacity(schemas.len());
        for item in schemas {
            items.push(compile_validators(item)?)
        }
        Ok(Box::new(ItemsArrayValidator { items }))
    }
}
impl Validate for ItemsArrayValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if let Value::Array(items) = instance {
            let errors: Vec<_> = items
                .iter()
                .zip(self.items.iter())
                .enumerate()
                .flat_map(|(idx, (item, validators))| {
                    let item_path = instance_path.push(idx);
                    validators
                        .iter()
                        .flat_map(|validator| validator.validate(root, item, &item_path))
                        .collect::<Vec<_>>()
                })
                .collect();
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }

    fn is_valid(&self, root: &Value, instance: &Value) -> bool {
        if let Value::Array(items) = instance {
            items
                .iter()
                .zip(self.items.iter())
                .all(|(item, validators)| {
                    validators
                        .iter()
                        .all(|validator| validator.is_valid(root, item))
                })
        } else {
            true
        }
    }
}
impl fmt::Display for ItemsArrayValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "items: [{}]", format_vec_of_validators(&self.items))
    }
}

pub(crate) struct ItemsObjectValidator {
    validators: Validators,
}
impl ItemsObjectValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value) -> CompilationResult {
        Ok(Box::new(ItemsObjectValidator {
            validators: compile_validators(schema)?,
        }))
    }
}
impl Validate for ItemsObjectValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if let Value::Array(items) = instance {
            let errors: Vec<_> = items
                .iter()
                .enumerate()
                .flat_map(|(idx, item)| {
                    let item_path = instance_path.push(idx);
                    self.validators
                        .iter()
                        .flat_map(|validator| validator.validate(root, item, &item_path))
                        .collect::<Vec<_>>()
                })
                .collect();
            Box::new(errors.into_iter())
        } else {
            no_error()
        }
    }

    fn is_valid(&self, root: &Value, instance: &Value) -> bool {
        if let Value::Array(items) = instance {
            items.iter().all(|item| {
                self.validators
                    .iter()
                    .all(|validator| validator.is_valid(root, item))
            })
        } else {
            true
        }
    }
}
impl fmt::Display for ItemsObjectValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "items: {}", format_validators(&self.validators))
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    match schema {
        Value::Array(items) => Some(ItemsArrayValidator::compile(items)),
        Value::Object(_) | Value::Bool(_) => Some(ItemsObjectValidator::compile(schema)),
        _ => None,
    }
}
