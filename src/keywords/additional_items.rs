use crate::{
    compilation::compile_validators,
    error::{error, no_error, ErrorIterator, ValidationError},
    keywords::{format_validators, CompilationResult, Validators},
    paths::InstancePath,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct AdditionalItemsObjectValidator {
    validators: Validators,
    items_count: usize,
}
impl AdditionalItemsObjectValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, items_count: usize) -> CompilationResult {
        Ok(Box::new(AdditionalItemsObjectValidator {
            validators: compile_validators(schema)?,
            items_count,
        }))
    }
}
impl Validate for AdditionalItemsObjectValidator {
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
                .skip(self.items_count)
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
            items.iter().skip(self.items_count).all(|item| {
                self.validators
                    .iter()
                    .all(|validator| validator.is_valid(root, item))
            })
        } else {
            true
        }
    }
}
impl fmt::Display for AdditionalItemsObjectValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "additionalItems: {}",
            format_validators(&self.validators)
        )
    }
}

pub(crate) struct AdditionalItemsBooleanValidator {
    items_count: usize,
}
impl AdditionalItemsBooleanValidator {
    #[inline]
    pub(crate) fn compile(items_count: usize) -> CompilationResult {
        Ok(Box::new(AdditionalItemsBooleanValidator { items_count }))
    }
}
impl Validate for AdditionalItemsBooleanValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if self.is_valid(root, instance) {
            no_error()
        } else {
            error(ValidationError::additional_items(
                instance_path.into(),
                instance,
                self.items_count,
            ))
        }
    }

    fn is_valid(&self, _: &Value, instance: &Value) -> bool {
        if let Value::Array(items) = instance {
            items.len() <= self.items_count
        } else {
            true
        }
    }
}
impl fmt::Display for AdditionalItemsBooleanValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "additionalItems: false")
    }
}

#[inline]
pub(crate) fn compile(parent: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    // `additionalItems` only means something when `items` is in its tuple
    // form; with a single-schema `items` every element is already covered
    if let Some(Value::Array(items)) = parent.get("items") {
        let items_count = items.len();
        match schema {
            Value::Object(_) => Some(AdditionalItemsObjectValidator::compile(
                schema,
                items_count,
            )),
            Value::Bool(true) => None,
            Value::Bool(false) => Some(AdditionalItemsBooleanValidator::compile(items_count)),
            _ => None,
        }
    } else {
        None
    }
}
