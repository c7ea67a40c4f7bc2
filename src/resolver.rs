//! Resolution of intra-document `$ref` JSON Pointers against a root schema.
use serde_json::Value;

/// Why a reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResolveError {
    /// The reference does not start with `#/` (external documents are not
    /// supported).
    External,
    /// One of the pointer segments does not exist in the root document.
    NotFound,
}

/// Resolve `reference` against `root`.
///
/// Only `#` (the whole document) and `#/segment/segment/...` pointers are
/// supported. Segments are matched raw; the `~0`/`~1` escapes are expected to
/// be pre-decoded by the caller.
pub(crate) fn resolve<'a>(reference: &str, root: &'a Value) -> Result<&'a Value, ResolveError> {
    if reference == "#" {
        return Ok(root);
    }
    let pointer = match reference.strip_prefix("#/") {
        Some(pointer) => pointer,
        None => return Err(ResolveError::External),
    };
    let mut target = root;
    for segment in pointer.split('/') {
        target = match target {
            Value::Object(object) => object.get(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|idx| items.get(idx)),
            _ => None,
        }
        .ok_or(ResolveError::NotFound)?;
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn whole_document() {
        let root = json!({"definitions": {"a": {"type": "integer"}}});
        assert_eq!(resolve("#", &root).unwrap(), &root);
    }

    #[test_case("#/definitions/a", json!({"type": "integer"}))]
    #[test_case("#/items/1", json!({"type": "string"}))]
    fn resolved(reference: &str, expected: Value) {
        let root = json!({
            "definitions": {"a": {"type": "integer"}},
            "items": [{"type": "null"}, {"type": "string"}]
        });
        assert_eq!(resolve(reference, &root).unwrap(), &expected);
    }

    #[test_case("#/definitions/missing")]
    #[test_case("#/items/7")]
    #[test_case("#/items/not-a-number")]
    #[test_case("#/definitions/a/type/deeper")]
    fn not_found(reference: &str) {
        let root = json!({
            "definitions": {"a": {"type": "integer"}},
            "items": [{"type": "null"}]
        });
        assert_eq!(resolve(reference, &root), Err(ResolveError::NotFound));
    }

    #[test_case("http://example.com/schema.json#/definitions/a")]
    #[test_case("other.json")]
    #[test_case("")]
    fn external(reference: &str) {
        let root = json!({});
        assert_eq!(resolve(reference, &root), Err(ResolveError::External));
    }
}
