//! # typeschema
//!
//! A crate for JSON Schema (draft-07) validation with optional type-driven
//! schema generation. The input schema is compiled into a validation tree,
//! which reduces runtime costs for working with schema parameters.
//!
//! Supports:
//!   - the draft-07 keyword vocabulary, including intra-document `$ref`;
//!   - the draft-04 boolean forms of `exclusiveMinimum` / `exclusiveMaximum`;
//!   - deriving a schema from a type shape with per-field annotations.
//!
//! ## Example:
//!
//! ```rust
//! use typeschema::{Schema, CompilationError};
//! use serde_json::json;
//!
//! fn main() -> Result<(), CompilationError> {
//!     let schema = json!({"maxLength": 5});
//!     let instance = json!("foo");
//!     let compiled = Schema::compile(&schema)?;
//!     let result = compiled.validate(&instance);
//!     if let Err(errors) = result {
//!         for error in errors {
//!             println!("Validation error: {}", error)
//!         }
//!     }
//!     Ok(())
//! }
//! ```
#![warn(
    clippy::doc_markdown,
    clippy::redundant_closure,
    clippy::explicit_iter_loop,
    clippy::match_same_arms,
    clippy::needless_borrow,
    clippy::print_stdout,
    clippy::trivially_copy_pass_by_ref,
    clippy::needless_pass_by_value,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]
#[macro_use]
extern crate lazy_static;

mod compilation;
mod error;
pub mod generator;
mod keywords;
mod paths;
mod primitive_type;
pub mod reflect;
mod resolver;
mod validator;

pub use compilation::{Schema, TypedSchema};
pub use error::{CompilationError, ErrorIterator, TypeKind, ValidationError, ValidationErrorKind};
pub use generator::{generate, generate_from_shape, GenerateOptions, RefsMode};
pub use paths::JsonPath;
pub use primitive_type::PrimitiveType;

use serde_json::Value;

/// A shortcut for validating `instance` against `schema`.
/// ```rust
/// use typeschema::is_valid;
/// use serde_json::json;
///
/// let schema = json!({"maxLength": 5});
/// let instance = json!("foo");
/// assert!(is_valid(&schema, &instance));
/// ```
///
/// This function panics if an invalid schema is passed.
#[must_use]
#[inline]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    let compiled = Schema::compile(schema).expect("Invalid schema");
    compiled.is_valid(instance)
}

/// A shortcut for validating `instance` against `schema` with a collected
/// error report. `Ok(())` is the "no errors" outcome; the error arm carries
/// every accumulated validation error, each tagged with the dotted path to the
/// offending value.
///
/// This function panics if an invalid schema is passed.
pub fn validate(schema: &Value, instance: &Value) -> Result<(), Vec<ValidationError<'static>>> {
    let compiled = Schema::compile(schema).expect("Invalid schema");
    let result = match compiled.validate(instance) {
        Ok(()) => Ok(()),
        Err(errors) => Err(errors.map(ValidationError::into_owned).collect()),
    };
    result
}

/// Like [`is_valid`], but prints every validation error to standard error
/// before returning.
///
/// This function panics if an invalid schema is passed.
#[must_use]
pub fn is_valid_verbose(schema: &Value, instance: &Value) -> bool {
    match validate(schema, instance) {
        Ok(()) => true,
        Err(errors) => {
            for error in &errors {
                eprintln!("Validation error: {}", error);
            }
            false
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_valid() {
        let schema = json!({"minLength": 5});
        let valid = json!("foobar");
        let invalid = json!("foo");
        assert!(is_valid(&schema, &valid));
        assert!(!is_valid(&schema, &invalid));
    }

    #[test]
    fn test_validate_report() {
        let schema = json!({"type": "integer", "minimum": 1});
        assert!(validate(&schema, &json!(1)).is_ok());
        let errors = validate(&schema, &json!(0)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("minimum"));
    }
}
