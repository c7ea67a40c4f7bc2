use crate::{
    error::{error, no_error, ErrorIterator, ValidationError},
    keywords::{helpers, CompilationResult},
    paths::InstancePath,
    validator::Validate,
};
use serde_json::{Map, Value};
use std::{
    collections::{hash_map::DefaultHasher, HashSet},
    fmt,
    hash::{Hash, Hasher},
};

// Based on the implementation proposed by Sven Marnach:
// https://stackoverflow.com/questions/60882381/what-is-the-fastest-correct-way-to-detect-that-there-are-no-duplicates-in-a-json
pub(crate) struct HashedValue<'a>(&'a Value);

impl PartialEq for HashedValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        // Numerically equal numbers are the same element regardless of their
        // JSON representation, so `1` and `1.0` are duplicates. This matches
        // the equality used by `enum` and `const`.
        helpers::equal(self.0, other.0)
    }
}
impl Eq for HashedValue<'_> {}

impl Hash for HashedValue<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.0 {
            Value::Null => state.write_u32(3_221_225_473), // chosen randomly
            Value::Bool(item) => item.hash(state),
            Value::Number(item) => {
                // Integral floats hash like the equal integer so the `Eq`
                // coalescing above stays consistent with the hash
                let value = item.as_f64().expect("Always valid");
                if value.fract() == 0. && value >= i64::min_value() as f64 && value <= i64::max_value() as f64 {
                    (value as i64).hash(state)
                } else {
                    value.to_bits().hash(state)
                }
            }
            Value::String(item) => item.hash(state),
            Value::Array(items) => {
                for item in items {
                    HashedValue(item).hash(state);
                }
            }
            Value::Object(items) => {
                let mut hash = 0;
                for (key, value) in items {
                    // We have no way of building a new hasher of type `H`, so we
                    // hardcode using the default hasher of a hash map.
                    let mut item_hasher = DefaultHasher::default();
                    key.hash(&mut item_hasher);
                    HashedValue(value).hash(&mut item_hasher);
                    hash ^= item_hasher.finish();
                }
                state.write_u64(hash);
            }
        }
    }
}

pub(crate) fn is_unique(items: &[Value]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().map(HashedValue).all(move |x| seen.insert(x))
}

pub(crate) struct UniqueItemsValidator {}

impl UniqueItemsValidator {
    #[inline]
    pub(crate) fn compile() -> CompilationResult {
        Ok(Box::new(UniqueItemsValidator {}))
    }
}

impl Validate for UniqueItemsValidator {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a> {
        if self.is_valid(root, instance) {
            no_error()
        } else {
            error(ValidationError::unique_items(
                instance_path.into(),
                instance,
            ))
        }
    }

    fn is_valid(&self, _: &Value, instance: &Value) -> bool {
        if let Value::Array(items) = instance {
            is_unique(items)
        } else {
            true
        }
    }
}
impl fmt::Display for UniqueItemsValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "uniqueItems: true")
    }
}

#[inline]
pub(crate) fn compile(_: &Map<String, Value>, schema: &Value) -> Option<CompilationResult> {
    if let Value::Bool(value) = schema {
        if *value {
            Some(UniqueItemsValidator::compile())
        } else {
            None
        }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"uniqueItems": true}), &json!([1, 2, 3]))]
    #[test_case(&json!({"uniqueItems": true}), &json!([1, "1", true, null]); "heterogeneous elements")]
    #[test_case(&json!({"uniqueItems": true}), &json!([0, false]); "zero and false are distinct")]
    #[test_case(&json!({"uniqueItems": true}), &json!([1, true]); "one and true are distinct")]
    #[test_case(&json!({"uniqueItems": false}), &json!([1, 1]))]
    #[test_case(&json!({"uniqueItems": true}), &json!([{"a": 1}, {"a": 2}]))]
    #[test_case(&json!({"uniqueItems": true}), &json!("ignored"))]
    fn unique_items_is_valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(&json!({"uniqueItems": true}), &json!([1, 1]))]
    #[test_case(&json!({"uniqueItems": true}), &json!([1, 1.0]); "numerically equal numbers are coalesced")]
    #[test_case(&json!({"uniqueItems": true}), &json!([[1], [1.0]]))]
    #[test_case(&json!({"uniqueItems": true}), &json!([{"a": 1}, {"a": 1}]))]
    fn unique_items_is_not_valid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn error_message() {
        tests_util::expect_errors(
            &json!({"uniqueItems": true}),
            &json!([1, 1]),
            &["'[1,1]' has non-unique elements (items must be unique)"],
        )
    }
}
