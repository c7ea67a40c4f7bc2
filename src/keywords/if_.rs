use crate::{
    compilation::compile_validators,
    error::{no_error, ErrorIterator},
    keywords::{format_validators, CompilationResult, Validators},
    paths::InstancePath,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::fmt;

pub(crate) struct ConditionalValidator {
    condition: Validators,
    on_success: Option<Validators>,
    on_failure: Option<Validators>,
}

impl ConditionalValidator {
    #[inline]
    pub(crate) fn compile(
        condition: &Value,
        then_schema: Option<&Value>,
        else_schema: Option<&Value>,
    ) -> CompilationResult {
        Ok(Box::new(ConditionalValidator {
            condition: compile_validators(condition)?,
            on_success: match then_schema {
                Some(schema) => Some(compile_validators(schema)?),
                None => None,
            },
            on_failure: match else_schema {
                Some(schema) => Some(compile_validators(schema)?),
                None => None,
            },
        }))
    }

    // The `if` check itself never produces errors
    fn condition_holds(&self, root: &Value, instance: &Value) -> bool {
        self.condition
            .iter()
            .all(|validator| validator.is_valid(root, instance))
    }
}

impl Validate for ConditionalValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        let branch = if self.condition_holds(root, instance) {
            &self.on_success
        } else {
            &self.on_failure
        };
        match branch {
            Some(validators) => {
                let errors: Vec<_> = validators
                    .iter()
                    .flat_map(|validator| validator.validate(root, instance, instance_path))
                    .collect();
                Box::new(errors.into_iter())
            }
            None => no_error(),
        }
    }

    fn is_valid(&self, root: &Value, instance: &Value) -> bool {
        let branch = if self.condition_holds(root, instance) {
            &self.on_success
        } else {
            &self.on_failure
        };
        match branch {
            Some(validators) => validators
                .iter()
                .all(|validator| validator.is_valid(root, instance)),
            None => true,
        }
    }
}
impl fmt::Display for ConditionalValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if: {}", format_validators(&self.condition))?;
        if let Some(validators) = &self.on_success {
            write!(f, ", then: {}", format_validators(validators))?;
        }
        if let Some(validators) = &self.on_failure {
            write!(f, ", else: {}", format_validators(validators))?;
        }
        Ok(())
    }
}

#[inline]
pub(crate) fn compile(parent: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    let then_schema = parent.get("then");
    let else_schema = parent.get("else");
    if then_schema.is_none() && else_schema.is_none() {
        // A bare `if` applies no constraints
        None
    } else {
        Some(ConditionalValidator::compile(
            schema,
            then_schema,
            else_schema,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"if": {"minimum": 0}, "then": {"multipleOf": 2}}), &json!(4))]
    #[test_case(&json!({"if": {"minimum": 0}, "then": {"multipleOf": 2}}), &json!(-1); "failed condition without else")]
    #[test_case(&json!({"if": {"minimum": 0}, "else": {"multipleOf": 2}}), &json!(-2))]
    #[test_case(&json!({"if": {"minimum": 0}, "else": {"multipleOf": 2}}), &json!(3); "held condition without then")]
    #[test_case(&json!({"if": {"minimum": 0}}), &json!(-1); "bare if applies nothing")]
    #[test_case(&json!({"if": {"minimum": 0}, "then": {"multipleOf": 2}, "else": {"multipleOf": 3}}), &json!(-3))]
    fn conditional_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"if": {"minimum": 0}, "then": {"multipleOf": 2}}), &json!(3))]
    #[test_case(&json!({"if": {"minimum": 0}, "else": {"multipleOf": 2}}), &json!(-1))]
    #[test_case(&json!({"if": {"minimum": 0}, "then": {"multipleOf": 2}, "else": {"multipleOf": 3}}), &json!(-4))]
    fn conditional_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }
}
