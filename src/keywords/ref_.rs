use crate::{
    compilation::compile_validators,
    error::{error, ErrorIterator, ValidationError},
    keywords::{CompilationResult, Validators},
    paths::InstancePath,
    resolver::{self, ResolveError},
    validator::Validate,
};
use parking_lot::RwLock;
use serde_json::Value;
use std::fmt;

enum RefFailure {
    Unsupported,
    NotFound,
    // The target resolved but is not a valid schema
    Schema,
}

pub(crate) struct RefValidator {
    reference: String,
    /// Precomputed validators.
    /// They are behind a RwLock as it is not possible to compute them
    /// at compile time without risking infinite loops of references
    /// and at the same time during validation we iterate over shared
    /// references (&self) and not owned references (&mut self).
    validators: RwLock<Option<Validators>>,
}

impl RefValidator {
    #[inline]
    pub(crate) fn compile(reference: &str) -> CompilationResult {
        Ok(Box::new(RefValidator {
            reference: reference.to_string(),
            validators: RwLock::new(None),
        }))
    }

    /// Ensure that validators are built, and built once.
    fn ensure_validators(&self, root: &Value) -> Result<(), RefFailure> {
        if self.validators.read().is_none() {
            let resolved = resolver::resolve(&self.reference, root).map_err(|err| match err {
                ResolveError::External => RefFailure::Unsupported,
                ResolveError::NotFound => RefFailure::NotFound,
            })?;
            let validators = compile_validators(resolved).map_err(|_| RefFailure::Schema)?;

            // Inject the validators into self.validators
            *self.validators.write() = Some(validators);
        }
        Ok(())
    }

    fn failure_to_error<'a>(
        &self,
        failure: RefFailure,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ValidationError<'a> {
        match failure {
            RefFailure::Unsupported => ValidationError::unsupported_reference(
                instance_path.into(),
                instance,
                self.reference.clone(),
            ),
            RefFailure::NotFound => ValidationError::invalid_reference(
                instance_path.into(),
                instance,
                self.reference.clone(),
            ),
            RefFailure::Schema => ValidationError::schema(instance_path.into(), instance),
        }
    }
}

impl Validate for RefValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        match self.ensure_validators(root) {
            Err(failure) => error(self.failure_to_error(failure, instance, instance_path)),
            Ok(()) => Box::new(
                self.validators
                    .read()
                    .as_ref()
                    .expect("ensure_validators guarantees the presence of the validators")
                    .iter()
                    .flat_map(|validator| validator.validate(root, instance, instance_path))
                    .collect::<Vec<_>>()
                    .into_iter(),
            ),
        }
    }

    fn is_valid(&self, root: &Value, instance: &Value) -> bool {
        if self.ensure_validators(root).is_err() {
            false
        } else {
            self.validators
                .read()
                .as_ref()
                .expect("ensure_validators guarantees the presence of the validators")
                .iter()
                .all(|validator| validator.is_valid(root, instance))
        }
    }
}
impl fmt::Display for RefValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$ref: {}", self.reference)
    }
}

#[inline]
pub(crate) fn compile(reference: &str) -> CompilationResult {
    RefValidator::compile(reference)
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(
        &json!({"definitions": {"a": {"type": "integer"}}, "properties": {"foo": {"$ref": "#/definitions/a"}}}),
        &json!({"foo": 3})
    )]
    #[test_case(
        &json!({
            "definitions": {
                "Node": {
                    "type": "object",
                    "properties": {"next": {"$ref": "#/definitions/Node"}}
                }
            },
            "$ref": "#/definitions/Node"
        }),
        &json!({"next": {"next": {}}});
        "recursive references terminate on finite instances"
    )]
    #[test_case(
        &json!({"definitions": {"any": {}}, "$ref": "#/definitions/any"}),
        &json!(42);
        "a reference to the empty schema accepts everything"
    )]
    fn ref_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(
        &json!({"definitions": {"a": {"type": "integer"}}, "properties": {"foo": {"$ref": "#/definitions/a"}}}),
        &json!({"foo": true})
    )]
    #[test_case(&json!({"$ref": "#/definitions/missing"}), &json!(1); "an unresolvable pointer is a validation error")]
    #[test_case(&json!({"$ref": "http://example.com/schema.json"}), &json!(1); "external references are unsupported")]
    fn ref_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn unresolvable_error_message() {
        tests_util::expect_errors(
            &json!({"$ref": "#/definitions/missing"}),
            &json!(1),
            &["Invalid reference: #/definitions/missing"],
        )
    }

    #[test]
    fn external_error_message() {
        tests_util::expect_errors(
            &json!({"$ref": "http://example.com/schema.json"}),
            &json!(1),
            &["Unsupported reference: http://example.com/schema.json"],
        )
    }
}
