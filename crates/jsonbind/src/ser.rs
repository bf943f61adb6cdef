//! Serialization back to compact JSON text.
//!
//! [`ToJson`] is the write-side peer of [`FromJson`](crate::FromJson): a
//! typed value renders itself into a [`Node`], and [`to_string`] turns that
//! node into compact text through the tree's own renderer. Object shapes
//! declare their field bindings with an [`ObjectWriter`], mirroring the
//! `required`/`optional` table on the read side.
//!
//! The serializer never consults the parser and never inserts whitespace.

use alloc::{
    collections::{BTreeMap, BTreeSet},
    string::{String, ToString},
    vec::Vec,
};

use crate::de::JsonKey;
use crate::dom::{Fields, Node};
use crate::registry::TypeHandle;

/// Recursive conversion from a typed value into a document node.
pub trait ToJson {
    /// Renders `self` as a document node.
    fn to_json(&self) -> Node;
}

/// Renders `value` as a document tree.
pub fn to_node<T: ToJson + ?Sized>(value: &T) -> Node {
    value.to_json()
}

/// Renders `value` as compact JSON text.
///
/// Keys are double-quoted, members comma separated, and no whitespace is
/// inserted. Numeric and boolean values render as bare literal text; any
/// value the literal grammar cannot read back (for example a non-finite
/// float) renders quoted instead.
pub fn to_string<T: ToJson + ?Sized>(value: &T) -> String {
    value.to_json().to_string()
}

/// Declarative field-binding table for serializing one object.
///
/// # Examples
///
/// ```rust
/// use jsonbind::{Node, ObjectWriter, ToJson};
///
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl ToJson for Point {
///     fn to_json(&self) -> Node {
///         ObjectWriter::new()
///             .field("x", &self.x)
///             .field("y", &self.y)
///             .finish()
///     }
/// }
///
/// assert_eq!(jsonbind::to_string(&Point { x: 1, y: 2 }), r#"{"x":1,"y":2}"#);
/// ```
#[derive(Debug, Default)]
pub struct ObjectWriter {
    fields: Fields,
}

impl ObjectWriter {
    /// Starts an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` under `key`; fields render in the order they are
    /// declared, and rebinding a key replaces its value in place.
    #[must_use]
    pub fn field<T: ToJson + ?Sized>(mut self, key: &str, value: &T) -> Self {
        self.fields.insert(key, value.to_json());
        self
    }

    /// Finishes the object node.
    #[must_use]
    pub fn finish(self) -> Node {
        Node::Object(self.fields)
    }
}

macro_rules! impl_to_json_via_display {
    ($($t:ty),+ $(,)?) => {
        $(
            impl ToJson for $t {
                fn to_json(&self) -> Node {
                    Node::Primitive(self.to_string())
                }
            }
        )+
    };
}

impl_to_json_via_display!(bool, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl ToJson for String {
    fn to_json(&self) -> Node {
        Node::Primitive(self.clone())
    }
}

impl ToJson for str {
    fn to_json(&self) -> Node {
        Node::primitive(self)
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Node {
        match self {
            Some(value) => value.to_json(),
            None => Node::Null,
        }
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> Node {
        Node::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Node {
        self.as_slice().to_json()
    }
}

impl<T: ToJson> ToJson for BTreeSet<T> {
    fn to_json(&self) -> Node {
        Node::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl<K: JsonKey, V: ToJson> ToJson for BTreeMap<K, V> {
    /// Maps render their entries in key order.
    fn to_json(&self) -> Node {
        let mut fields = Fields::new();
        for (key, value) in self {
            fields.insert(key.key_text(), value.to_json());
        }
        Node::Object(fields)
    }
}

impl ToJson for TypeHandle {
    fn to_json(&self) -> Node {
        Node::primitive(self.name())
    }
}

impl ToJson for Node {
    fn to_json(&self) -> Node {
        self.clone()
    }
}
