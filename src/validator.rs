use crate::{error::ErrorIterator, paths::InstancePath};
use serde_json::Value;
use std::fmt;

/// A compiled keyword check.
///
/// `root` is the root schema document, carried unchanged through the whole
/// walk so that `$ref` always resolves against the document root.
pub(crate) trait Validate: Send + Sync + fmt::Display {
    fn validate<'a>(
        &self,
        root: &'a Value,
        instance: &'a Value,
        instance_path: &InstancePath,
    ) -> ErrorIterator<'a>;
    // The same as above, but does not construct errors. It is faster for
    // cases when the result itself is not needed (like `anyOf`), since errors
    // are not constructed.
    fn is_valid(&self, root: &Value, instance: &Value) -> bool;
}

impl fmt::Debug for dyn Validate + Send + Sync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string())
    }
}
