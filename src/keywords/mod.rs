pub(crate) mod additional_items;
pub(crate) mod additional_properties;
pub(crate) mod all_of;
pub(crate) mod any_of;
pub(crate) mod boolean;
pub(crate) mod const_;
pub(crate) mod contains;
pub(crate) mod dependencies;
pub(crate) mod enum_;
pub(crate) mod exclusive_maximum;
pub(crate) mod exclusive_minimum;
pub(crate) mod format;
pub(crate) mod helpers;
pub(crate) mod if_;
pub(crate) mod items;
pub(crate) mod max_items;
pub(crate) mod max_length;
pub(crate) mod max_properties;
pub(crate) mod maximum;
pub(crate) mod min_items;
pub(crate) mod min_length;
pub(crate) mod min_properties;
pub(crate) mod minimum;
pub(crate) mod multiple_of;
pub(crate) mod not;
pub(crate) mod one_of;
pub(crate) mod pattern;
pub(crate) mod pattern_properties;
pub(crate) mod properties;
pub(crate) mod property_names;
pub(crate) mod ref_;
pub(crate) mod required;
pub(crate) mod type_;
pub(crate) mod unique_items;
use crate::{error, validator::Validate};
use serde_json::{Map, Value};

pub(crate) type CompilationResult = Result<BoxedValidator, error::CompilationError>;
pub(crate) type BoxedValidator = Box<dyn Validate + Send + Sync>;
pub(crate) type Validators = Vec<BoxedValidator>;

type CompileFunc = fn(&Map<String, Value>, &Value) -> Option<CompilationResult>;

/// The draft-07 keyword vocabulary. Keywords outside this table (`$schema`,
/// `title`, `definitions`, ...) carry no validation semantics and are skipped.
pub(crate) fn keyword_validator(keyword: &str) -> Option<CompileFunc> {
    match keyword {
        "additionalItems" => Some(additional_items::compile),
        "additionalProperties" => Some(additional_properties::compile),
        "allOf" => Some(all_of::compile),
        "anyOf" => Some(any_of::compile),
        "const" => Some(const_::compile),
        "contains" => Some(contains::compile),
        "dependencies" => Some(dependencies::compile),
        "enum" => Some(enum_::compile),
        "exclusiveMaximum" => Some(exclusive_maximum::compile),
        "exclusiveMinimum" => Some(exclusive_minimum::compile),
        "format" => Some(format::compile),
        "if" => Some(if_::compile),
        "items" => Some(items::compile),
        "maximum" => Some(maximum::compile),
        "maxItems" => Some(max_items::compile),
        "maxLength" => Some(max_length::compile),
        "maxProperties" => Some(max_properties::compile),
        "minimum" => Some(minimum::compile),
        "minItems" => Some(min_items::compile),
        "minLength" => Some(min_length::compile),
        "minProperties" => Some(min_properties::compile),
        "multipleOf" => Some(multiple_of::compile),
        "not" => Some(not::compile),
        "oneOf" => Some(one_of::compile),
        "pattern" => Some(pattern::compile),
        "patternProperties" => Some(pattern_properties::compile),
        "properties" => Some(properties::compile),
        "propertyNames" => Some(property_names::compile),
        "required" => Some(required::compile),
        "type" => Some(type_::compile),
        "uniqueItems" => Some(unique_items::compile),
        _ => None,
    }
}

fn format_validators(validators: &[BoxedValidator]) -> String {
    match validators.len() {
        0 => "{}".to_string(),
        1 => {
            let name = validators[0].to_string();
            match name.as_str() {
                // boolean validators are represented as is, without brackets because if they
                // occur in a vector, then the schema is not a key/value mapping
                "true" | "false" => name,
                _ => format!("{{{}}}", name),
            }
        }
        _ => format!(
            "{{{}}}",
            validators
                .iter()
                .map(|validator| format!("{:?}", validator))
                .collect::<Vec<String>>()
                .join(", ")
        ),
    }
}

fn format_vec_of_validators(validators: &[Validators]) -> String {
    validators
        .iter()
        .map(|v| format_validators(v))
        .collect::<Vec<String>>()
        .join(", ")
}

fn format_key_value_validators(validators: &[(String, Validators)]) -> String {
    validators
        .iter()
        .map(|(name, validators)| format!("{}: {}", name, format_validators(validators)))
        .collect::<Vec<String>>()
        .join(", ")
}
