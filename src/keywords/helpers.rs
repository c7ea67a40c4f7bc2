use num_cmp::NumCmp;
use serde_json::{Map, Number, Value};

// Numbers are compared across their JSON representations, so `1`, `1.0` and
// `1e0` are all equal.
pub(crate) fn numbers_equal(left: &Number, right: &Number) -> bool {
    if let (Some(a), Some(b)) = (left.as_u64(), right.as_u64()) {
        a == b
    } else if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
        a == b
    } else {
        let b = right.as_f64().expect("Always valid");
        if let Some(a) = left.as_u64() {
            NumCmp::num_eq(a, b)
        } else if let Some(a) = left.as_i64() {
            NumCmp::num_eq(a, b)
        } else {
            NumCmp::num_eq(left.as_f64().expect("Always valid"), b)
        }
    }
}

/// Structural JSON equality, as used by `enum`, `const` and `uniqueItems`.
pub(crate) fn equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => numbers_equal(left, right),
        (Value::Array(left), Value::Array(right)) => equal_arrays(left, right),
        (Value::Object(left), Value::Object(right)) => equal_objects(left, right),
        (_, _) => left == right,
    }
}

pub(crate) fn equal_arrays(left: &[Value], right: &[Value]) -> bool {
    left.len() == right.len() && left.iter().zip(right.iter()).all(|(a, b)| equal(a, b))
}

pub(crate) fn equal_objects(left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .all(|(key, value)| right.get(key).map_or(false, |other| equal(value, other)))
}

#[cfg(test)]
mod tests {
    use super::equal;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!(1), &json!(1.0), true)]
    #[test_case(&json!(1), &json!(true), false; "booleans are not numbers")]
    #[test_case(&json!(0), &json!(false), false)]
    #[test_case(&json!([1, 2]), &json!([1.0, 2.0]), true)]
    #[test_case(&json!({"a": 1}), &json!({"a": 1.0}), true)]
    #[test_case(&json!({"a": 1}), &json!({"b": 1}), false)]
    #[test_case(&json!("1"), &json!(1), false)]
    fn structural_equality(left: &Value, right: &Value, expected: bool) {
        assert_eq!(equal(left, right), expected);
    }
}
