use crate::{
    error::{error, no_error, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::InstancePath,
    validator::Validate,
};
use serde_json::Value;
use std::fmt;

pub(crate) struct TrueValidator {}
impl TrueValidator {
    #[inline]
    pub(crate) fn compile() -> CompilationResult {
        Ok(Box::new(TrueValidator {}))
    }
}
impl Validate for TrueValidator {
    fn validate<'a>(&self, _: &'a Value, _: &'a Value, _: &InstancePath) -> ErrorIterator<'a> {
        no_error()
    }

    fn is_valid(&self, _: &Value, _: &Value) -> bool {
        true
    }
}
impl fmt::Display for TrueValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "true")
    }
}

pub(crate) struct FalseValidator {}
impl FalseValidator {
    #[inline]
    pub(crate) fn compile() -> CompilationResult {
        Ok(Box::new(FalseValidator {}))
    }
}
impl Validate for FalseValidator {
    fn validate<'a>(
        &self,
        _: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        error(ValidationError::false_schema(
            instance_path.into(),
            instance,
        ))
    }

    fn is_valid(&self, _: &Value, _: &Value) -> bool {
        false
    }
}
impl fmt::Display for FalseValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "false")
    }
}

#[inline]
pub(crate) fn compile(value: bool) -> CompilationResult {
    if value {
        TrueValidator::compile()
    } else {
        FalseValidator::compile()
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn true_allows_everything() {
        tests_util::is_valid(&json!(true), &json!({"foo": "bar"}));
        tests_util::is_valid(&json!(true), &json!(null));
    }

    #[test]
    fn false_allows_nothing() {
        tests_util::is_not_valid(&json!(false), &json!({"foo": "bar"}));
        tests_util::is_not_valid(&json!(false), &json!(null));
    }
}
