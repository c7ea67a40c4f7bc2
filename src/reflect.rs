//! The reflection surface consumed by the schema generator.
//!
//! A type describes itself through [`Reflect`]: a structural [`TypeShape`]
//! used to derive its schema, and a JSON view of a runtime instance used by
//! the typed validation entry points. Shapes for records carry per-field
//! [`Annotations`] that the generator copies onto the field schemas.
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

/// A structural description of a type, as far as schema generation cares.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    /// Anything; generates the accept-all schema `{}`.
    Any,
    Null,
    Boolean,
    /// Any integer width.
    Integer,
    /// Any float width.
    Number,
    String,
    /// An ordered sequence with a single element type.
    Array(Box<TypeShape>),
    /// Like `Array`, but elements are unique.
    Set(Box<TypeShape>),
    /// A fixed-arity sequence; generates the tuple form of `items`.
    Tuple(Vec<TypeShape>),
    /// A string-keyed mapping; the shape is the value type.
    Map(Box<TypeShape>),
    /// `T` or the null sentinel.
    Optional(Box<TypeShape>),
    /// An exclusive choice between variants; generates `oneOf`.
    Union(Vec<TypeShape>),
    /// A concrete user-defined record.
    Record(RecordShape),
    /// A lazily-built shape. Self-referential records cannot embed their own
    /// shape as a value; the cycle is broken by deferring to the shape
    /// function, which the generator calls on demand (its ref table keeps the
    /// expansion finite).
    Deferred(fn() -> TypeShape),
}

/// A reflected record type: its identity plus the ordered field list.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
    module_path: &'static str,
    name: &'static str,
    fields: Vec<FieldShape>,
}

impl RecordShape {
    /// A record shape with no fields yet. `module_path` is usually the
    /// `module_path!()` of the defining module and keeps definition keys
    /// stable and collision-free.
    #[must_use]
    pub fn new(module_path: &'static str, name: &'static str) -> RecordShape {
        RecordShape {
            module_path,
            name,
            fields: Vec::new(),
        }
    }

    /// Append a field without annotations.
    #[must_use]
    pub fn field(self, name: &'static str, shape: TypeShape) -> RecordShape {
        self.field_with(name, shape, Annotations::new())
    }

    /// Append a field with its annotation bag.
    #[must_use]
    pub fn field_with(
        mut self,
        name: &'static str,
        shape: TypeShape,
        annotations: Annotations,
    ) -> RecordShape {
        self.fields.push(FieldShape {
            name,
            shape,
            annotations,
        });
        self
    }

    /// The unqualified type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn fields(&self) -> &[FieldShape] {
        &self.fields
    }

    /// The stable string naming this record under `definitions`, derived
    /// from the module path and the type name (`path.to.module.Name`).
    #[must_use]
    pub fn definition_key(&self) -> String {
        if self.module_path.is_empty() {
            self.name.to_string()
        } else {
            format!("{}.{}", self.module_path.replace("::", "."), self.name)
        }
    }
}

/// One reflected record field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldShape {
    pub(crate) name: &'static str,
    pub(crate) shape: TypeShape,
    pub(crate) annotations: Annotations,
}

/// A flat, insertion-ordered bag of per-field metadata, keyed by strings.
/// Unknown keys are ignored by the generator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Annotations(Vec<(String, AnnotationValue)>);

impl Annotations {
    #[must_use]
    pub fn new() -> Annotations {
        Annotations(Vec::new())
    }

    /// Set `key`, replacing an earlier entry with the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AnnotationValue>) {
        let key = key.into();
        self.0.retain(|(existing, _)| *existing != key);
        self.0.push((key, value.into()));
    }

    /// Builder-style `set`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AnnotationValue>) -> Annotations {
        self.set(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AnnotationValue> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnnotationValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single annotation value. The variants cover everything the generator
/// knows how to copy onto a schema: scalars, lists, raw schema fragments and
/// references to other reflected types.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<AnnotationValue>),
    /// A raw schema fragment (or any JSON value, for `default`/`examples`).
    Json(Value),
    /// A reference to another reflected type; expanded through the generator.
    Shape(TypeShape),
}

impl AnnotationValue {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnnotationValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        AnnotationValue::Bool(value)
    }
}
impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self {
        AnnotationValue::Int(value)
    }
}
impl From<i32> for AnnotationValue {
    fn from(value: i32) -> Self {
        AnnotationValue::Int(i64::from(value))
    }
}
impl From<u64> for AnnotationValue {
    fn from(value: u64) -> Self {
        AnnotationValue::Int(value as i64)
    }
}
impl From<f64> for AnnotationValue {
    fn from(value: f64) -> Self {
        AnnotationValue::Float(value)
    }
}
impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        AnnotationValue::Str(value.to_string())
    }
}
impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        AnnotationValue::Str(value)
    }
}
impl From<Vec<AnnotationValue>> for AnnotationValue {
    fn from(value: Vec<AnnotationValue>) -> Self {
        AnnotationValue::List(value)
    }
}
impl From<Value> for AnnotationValue {
    fn from(value: Value) -> Self {
        AnnotationValue::Json(value)
    }
}
impl From<TypeShape> for AnnotationValue {
    fn from(value: TypeShape) -> Self {
        AnnotationValue::Shape(value)
    }
}

/// Types that can describe their own shape and reflect runtime instances
/// into JSON.
///
/// Implementations for records are written by hand (or by an external
/// derive); everything else comes with the crate. In `to_json`, a record
/// field holding the null sentinel is omitted entirely, which is what makes
/// `required` treat it as absent — [`record_value`] does this for you.
pub trait Reflect {
    /// The structural shape of the type.
    fn shape() -> TypeShape;

    /// The JSON view of this instance.
    fn to_json(&self) -> Value;
}

/// Assemble the JSON view of a record instance, dropping fields whose value
/// is the null sentinel.
#[must_use]
pub fn record_value<'a, I>(fields: I) -> Value
where
    I: IntoIterator<Item = (&'a str, Value)>,
{
    let mut map = Map::new();
    for (name, value) in fields {
        if !value.is_null() {
            map.insert(name.to_string(), value);
        }
    }
    Value::Object(map)
}

macro_rules! reflect_scalar {
    ($shape:expr => $($type:ty),+) => {
        $(
            impl Reflect for $type {
                fn shape() -> TypeShape {
                    $shape
                }

                fn to_json(&self) -> Value {
                    Value::from(self.clone())
                }
            }
        )+
    };
}

reflect_scalar!(TypeShape::Boolean => bool);
reflect_scalar!(TypeShape::Integer => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
reflect_scalar!(TypeShape::Number => f32, f64);
reflect_scalar!(TypeShape::String => String);

impl Reflect for &str {
    fn shape() -> TypeShape {
        TypeShape::String
    }

    fn to_json(&self) -> Value {
        Value::String((*self).to_string())
    }
}

impl Reflect for Value {
    fn shape() -> TypeShape {
        TypeShape::Any
    }

    fn to_json(&self) -> Value {
        self.clone()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn shape() -> TypeShape {
        TypeShape::Optional(Box::new(T::shape()))
    }

    fn to_json(&self) -> Value {
        match self {
            Some(value) => value.to_json(),
            None => Value::Null,
        }
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn shape() -> TypeShape {
        T::shape()
    }

    fn to_json(&self) -> Value {
        (**self).to_json()
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape() -> TypeShape {
        TypeShape::Array(Box::new(T::shape()))
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(Reflect::to_json).collect())
    }
}

impl<T: Reflect + Eq + Hash> Reflect for HashSet<T> {
    fn shape() -> TypeShape {
        TypeShape::Set(Box::new(T::shape()))
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(Reflect::to_json).collect())
    }
}

impl<T: Reflect + Ord> Reflect for BTreeSet<T> {
    fn shape() -> TypeShape {
        TypeShape::Set(Box::new(T::shape()))
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(Reflect::to_json).collect())
    }
}

impl<V: Reflect> Reflect for HashMap<String, V> {
    fn shape() -> TypeShape {
        TypeShape::Map(Box::new(V::shape()))
    }

    fn to_json(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl<V: Reflect> Reflect for BTreeMap<String, V> {
    fn shape() -> TypeShape {
        TypeShape::Map(Box::new(V::shape()))
    }

    fn to_json(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }
}

macro_rules! reflect_tuple {
    ($($name:ident),+) => {
        impl<$($name: Reflect),+> Reflect for ($($name,)+) {
            fn shape() -> TypeShape {
                TypeShape::Tuple(vec![$($name::shape()),+])
            }

            #[allow(non_snake_case)]
            fn to_json(&self) -> Value {
                let ($($name,)+) = self;
                Value::Array(vec![$($name.to_json()),+])
            }
        }
    };
}

reflect_tuple!(A);
reflect_tuple!(A, B);
reflect_tuple!(A, B, C);
reflect_tuple!(A, B, C, D);
