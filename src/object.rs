//! PDF object types.
//!
//! Values are typed; the legacy three-form string rule (name, pre-escaped
//! literal, plain text) is available through `Object::from(&str)`.

use bytes::Bytes;
use indexmap::IndexMap;

/// Ordered PDF dictionary. Entries serialize in insertion order.
pub type Dictionary = IndexMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// Name, stored without the leading `/`
    Name(String),
    /// Text string, escaped when serialized
    String(String),
    /// Pre-escaped literal token, written verbatim (e.g. `(already\) escaped)`)
    Literal(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (ordered key-value pairs)
    Dictionary(Dictionary),
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
///
/// Handed out before the referenced object is serialized, so it can be used
/// for forward references. Always generation 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32) -> Self {
        Self { id }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} 0 R", self.id)
    }
}

impl Object {
    /// Get the type name of this object (without data).
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Real(_) => "Real",
            Object::Name(_) => "Name",
            Object::String(_) => "String",
            Object::Literal(_) => "Literal",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Reference(_) => "Reference",
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to cast to dictionary.
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Check if this is a null object.
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Boolean(b)
    }
}

impl From<i64> for Object {
    fn from(i: i64) -> Self {
        Object::Integer(i)
    }
}

impl From<i32> for Object {
    fn from(i: i32) -> Self {
        Object::Integer(i as i64)
    }
}

impl From<u32> for Object {
    fn from(i: u32) -> Self {
        Object::Integer(i as i64)
    }
}

impl From<usize> for Object {
    fn from(i: usize) -> Self {
        Object::Integer(i as i64)
    }
}

impl From<f64> for Object {
    fn from(r: f64) -> Self {
        Object::Real(r)
    }
}

/// Dispatches on the leading character: `/Name` becomes a name, `(...)` is
/// taken as an already escaped literal, anything else is text to escape.
impl From<&str> for Object {
    fn from(s: &str) -> Self {
        if let Some(name) = s.strip_prefix('/') {
            Object::Name(name.to_string())
        } else if s.starts_with('(') {
            Object::Literal(s.to_string())
        } else {
            Object::String(s.to_string())
        }
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::from(s.as_str())
    }
}

impl From<ObjectRef> for Object {
    fn from(r: ObjectRef) -> Self {
        Object::Reference(r)
    }
}

impl From<Vec<Object>> for Object {
    fn from(items: Vec<Object>) -> Self {
        Object::Array(items)
    }
}

impl From<Dictionary> for Object {
    fn from(dict: Dictionary) -> Self {
        Object::Dictionary(dict)
    }
}

/// An allocated indirect object: id, dictionary and optional raw stream bytes.
///
/// Stream `Length`/`Filter` entries are not stored here; the serializer adds
/// them when the object is written.
#[derive(Debug, Clone)]
pub struct IndirectObject {
    /// Object number
    pub id: u32,
    /// Object dictionary
    pub dict: Dictionary,
    /// Raw (unfiltered unless the dict names a Filter) stream bytes
    pub stream: Option<Bytes>,
}

impl IndirectObject {
    /// Create an indirect object.
    pub fn new(id: u32, dict: Dictionary, stream: Option<Bytes>) -> Self {
        Self { id, dict, stream }
    }

    /// Reference to this object.
    pub fn reference(&self) -> ObjectRef {
        ObjectRef::new(self.id)
    }

    /// Whether the object carries stream data.
    pub fn is_stream(&self) -> bool {
        self.stream.is_some()
    }
}
