//! Facilities for working with paths within validated instances.
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum PathChunk {
    Name(String),
    Index(usize),
}

impl From<String> for PathChunk {
    #[inline]
    fn from(value: String) -> Self {
        PathChunk::Name(value)
    }
}
impl From<&str> for PathChunk {
    #[inline]
    fn from(value: &str) -> Self {
        PathChunk::Name(value.to_string())
    }
}
impl From<usize> for PathChunk {
    #[inline]
    fn from(value: usize) -> Self {
        PathChunk::Index(value)
    }
}

/// A dotted path to a value within a JSON instance.
///
/// Object descent is rendered as `.name`, array descent as `[idx]` with
/// zero-based indices. The root path is the empty string.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct JsonPath(Vec<PathChunk>);

impl JsonPath {
    /// `true` for the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The path as a vector of strings. Each component is casted to `String`.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
            .iter()
            .map(|chunk| match chunk {
                PathChunk::Name(name) => name.to_string(),
                PathChunk::Index(idx) => idx.to_string(),
            })
            .collect()
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.0 {
            match chunk {
                PathChunk::Name(name) => write!(f, ".{}", name)?,
                PathChunk::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// The current location inside a validated instance, kept as a chain of
/// borrowed parent frames so that descending costs no allocation until an
/// error materializes it into a `JsonPath`.
#[derive(Clone, Debug)]
pub(crate) struct InstancePath<'a> {
    chunk: Option<PathChunk>,
    parent: Option<&'a InstancePath<'a>>,
}

impl<'a> InstancePath<'a> {
    pub(crate) const fn new() -> Self {
        InstancePath {
            chunk: None,
            parent: None,
        }
    }

    #[inline]
    pub(crate) fn push(&'a self, chunk: impl Into<PathChunk>) -> InstancePath<'a> {
        InstancePath {
            chunk: Some(chunk.into()),
            parent: Some(self),
        }
    }

    pub(crate) fn to_path(&self) -> JsonPath {
        let mut chunks = Vec::new();
        let mut current = self;
        loop {
            if let Some(chunk) = &current.chunk {
                chunks.push(chunk.clone())
            }
            match current.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        chunks.reverse();
        JsonPath(chunks)
    }
}

impl From<&InstancePath<'_>> for JsonPath {
    #[inline]
    fn from(path: &InstancePath<'_>) -> Self {
        path.to_path()
    }
}
