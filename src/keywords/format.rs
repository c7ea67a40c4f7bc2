//! Validator for `format` keyword.
use crate::{
    error::{error, no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    paths::InstancePath,
    validator::Validate,
};
use chrono::DateTime;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

lazy_static! {
    static ref URI_RE: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S*\z").expect("Is a valid regex");
    static ref UUID_RE: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\z"
    )
    .expect("Is a valid regex");
}

macro_rules! string_format_validator {
    ($name:ident, $format_name:tt, $check:expr) => {
        struct $name {}
        impl $name {
            pub(crate) fn compile() -> CompilationResult {
                Ok(Box::new($name {}))
            }
        }
        impl Validate for $name {
            fn validate<'a>(
                &self,
                root: &'a Value,
                instance: &'a Value,
                instance_path: &InstancePath,
            ) -> ErrorIterator<'a> {
                if self.is_valid(root, instance) {
                    no_error()
                } else {
                    error(ValidationError::format(
                        instance_path.into(),
                        instance,
                        $format_name,
                    ))
                }
            }

            fn is_valid(&self, _: &Value, instance: &Value) -> bool {
                if let Value::String(item) = instance {
                    let check: fn(&str) -> bool = $check;
                    check(item)
                } else {
                    true
                }
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!("format: ", $format_name))
            }
        }
    };
}

// Exactly one `@`, no whitespace anywhere, and a dot in the domain part
fn is_valid_email(string: &str) -> bool {
    if string.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = string.splitn(2, '@');
    let local = parts.next().expect("Always present");
    match parts.next() {
        Some(domain) => !local.is_empty() && !domain.contains('@') && domain.contains('.'),
        None => false,
    }
}

string_format_validator!(DateTimeValidator, "date-time", |instance_string| {
    // RFC 3339 with a mandatory timezone (`Z` or an offset); fractional
    // seconds are optional
    DateTime::parse_from_rfc3339(instance_string).is_ok()
});
string_format_validator!(EmailValidator, "email", is_valid_email);
string_format_validator!(URIValidator, "uri", |instance_string| {
    URI_RE.is_match(instance_string)
});
string_format_validator!(UUIDValidator, "uuid", |instance_string| {
    UUID_RE.is_match(instance_string)
});

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    if let Value::String(format) = schema {
        match format.as_str() {
            "date-time" => Some(DateTimeValidator::compile()),
            "email" => Some(EmailValidator::compile()),
            "uri" => Some(URIValidator::compile()),
            "uuid" => Some(UUIDValidator::compile()),
            // Unknown formats are accepted silently
            _ => None,
        }
    } else {
        Some(Err(CompilationError::SchemaError))
    }
}
