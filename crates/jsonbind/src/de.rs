//! Type-directed deserialization.
//!
//! A [`Binder`] turns a document tree (or raw text, parsing it first) into
//! typed values. Target types implement [`FromJson`]; for object shapes the
//! impl body is the field-binding table itself, one
//! [`FieldReader::required`] or [`FieldReader::optional`] call per bound
//! key, resolved in declaration order. Keys present in the document but
//! bound by nothing are ignored.
//!
//! Binding is all-or-nothing: the first mismatch aborts the call with a
//! single [`BindError`] naming the key path and the expected vs. actual
//! shape.

use alloc::{
    borrow::ToOwned,
    collections::{BTreeMap, BTreeSet},
    string::{String, ToString},
    vec::Vec,
};

use crate::dom::{self, Node};
use crate::error::{BindError, Error};
use crate::path::PathComponent;
use crate::registry::{TypeHandle, TypeRegistry};

/// Recursive conversion from a document node into a typed value.
pub trait FromJson: Sized {
    /// Converts `node` into `Self`, recursing through `binder` for nested
    /// shapes.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] when `node` does not match the declared
    /// shape.
    fn from_json(node: &Node, binder: &Binder<'_>) -> Result<Self, BindError>;
}

/// The deserialization entry point: a registry plus the conversion driver.
#[derive(Debug, Clone, Copy)]
pub struct Binder<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> Binder<'r> {
    /// Creates a binder over a caller-supplied registry.
    #[must_use]
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Parses `text` and binds the resulting tree to `T`.
    ///
    /// # Errors
    ///
    /// A malformed-text [`ParseError`](crate::ParseError) always precedes
    /// and is distinct from any [`BindError`]; binding never starts on text
    /// that failed to parse.
    pub fn from_str<T: FromJson>(&self, text: &str) -> Result<T, Error> {
        let root = dom::parse_str(text)?;
        Ok(self.from_node(&root)?)
    }

    /// Binds an already-parsed tree to `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] when the tree does not match `T`'s shape.
    pub fn from_node<T: FromJson>(&self, node: &Node) -> Result<T, BindError> {
        T::from_json(node, self)
    }

    /// Opens an object node for field lookup.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch when `node` is not an object.
    pub fn fields<'a>(&self, node: &'a Node) -> Result<FieldReader<'a, 'r>, BindError> {
        match node {
            Node::Object(fields) => Ok(FieldReader {
                fields,
                binder: *self,
            }),
            other => Err(BindError::mismatch("object", other)),
        }
    }

    /// Resolves a fully qualified type name through the registry.
    ///
    /// # Errors
    ///
    /// Returns [`BindErrorKind::UnknownType`](crate::BindErrorKind) for
    /// unregistered names.
    pub fn resolve_type(&self, name: &str) -> Result<TypeHandle, BindError> {
        self.registry
            .resolve(name)
            .ok_or_else(|| BindError::unknown_type(name))
    }
}

/// Name-based lookup within one object node.
///
/// Obtained from [`Binder::fields`]; each lookup converts the found node to
/// the requested shape and tags any failure with the field's key.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a, 'r> {
    fields: &'a dom::Fields,
    binder: Binder<'r>,
}

impl FieldReader<'_, '_> {
    /// Reads a non-nullable field.
    ///
    /// # Errors
    ///
    /// An absent or null member raises "missing required field"; any
    /// conversion failure is reported under this field's key.
    pub fn required<T: FromJson>(&self, key: &str) -> Result<T, BindError> {
        match self.fields.get(key) {
            None | Some(Node::Null) => Err(BindError::missing_field(key)),
            Some(node) => T::from_json(node, &self.binder)
                .map_err(|e| e.at(PathComponent::Key(key.to_string()))),
        }
    }

    /// Reads a nullable field; absent and null both yield `None`.
    ///
    /// # Errors
    ///
    /// A present, non-null member that fails to convert is reported under
    /// this field's key.
    pub fn optional<T: FromJson>(&self, key: &str) -> Result<Option<T>, BindError> {
        match self.fields.get(key) {
            None | Some(Node::Null) => Ok(None),
            Some(node) => T::from_json(node, &self.binder)
                .map(Some)
                .map_err(|e| e.at(PathComponent::Key(key.to_string()))),
        }
    }
}

/// Parses `text` and binds it to `T` with an empty type registry.
///
/// # Errors
///
/// See [`Binder::from_str`].
pub fn from_str<T: FromJson>(text: &str) -> Result<T, Error> {
    let registry = TypeRegistry::new();
    Binder::new(&registry).from_str(text)
}

/// Binds an already-parsed tree to `T` with an empty type registry.
///
/// # Errors
///
/// See [`Binder::from_node`].
pub fn from_node<T: FromJson>(node: &Node) -> Result<T, BindError> {
    let registry = TypeRegistry::new();
    Binder::new(&registry).from_node(node)
}

/// An object key convertible to a declared map-key shape: `String`, or an
/// enum declared through [`json_enum!`](crate::json_enum).
pub trait JsonKey: Ord + Sized {
    /// Converts an object key into the key type.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] for text no constant matches.
    fn from_key(text: &str) -> Result<Self, BindError>;

    /// The key text written when serializing.
    fn key_text(&self) -> &str;
}

impl JsonKey for String {
    fn from_key(text: &str) -> Result<Self, BindError> {
        Ok(text.to_owned())
    }

    fn key_text(&self) -> &str {
        self
    }
}

macro_rules! impl_from_json_for_parsed {
    ($($t:ty),+ $(,)?) => {
        $(
            impl FromJson for $t {
                fn from_json(node: &Node, _binder: &Binder<'_>) -> Result<Self, BindError> {
                    let text = node
                        .as_primitive()
                        .ok_or_else(|| BindError::mismatch(stringify!($t), node))?;
                    text.parse()
                        .map_err(|_| BindError::invalid_value(stringify!($t), text))
                }
            }
        )+
    };
}

impl_from_json_for_parsed!(bool, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl FromJson for String {
    fn from_json(node: &Node, _binder: &Binder<'_>) -> Result<Self, BindError> {
        node.as_primitive()
            .map(ToOwned::to_owned)
            .ok_or_else(|| BindError::mismatch("string", node))
    }
}

impl<T: FromJson> FromJson for Option<T> {
    fn from_json(node: &Node, binder: &Binder<'_>) -> Result<Self, BindError> {
        match node {
            Node::Null => Ok(None),
            other => T::from_json(other, binder).map(Some),
        }
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(node: &Node, binder: &Binder<'_>) -> Result<Self, BindError> {
        let items = node
            .as_array()
            .ok_or_else(|| BindError::mismatch("array", node))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                T::from_json(item, binder).map_err(|e| e.at(PathComponent::Index(i)))
            })
            .collect()
    }
}

impl<T: FromJson + Ord> FromJson for BTreeSet<T> {
    fn from_json(node: &Node, binder: &Binder<'_>) -> Result<Self, BindError> {
        let items = node
            .as_array()
            .ok_or_else(|| BindError::mismatch("array", node))?;
        // Same traversal as a list; collecting into the set de-duplicates.
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                T::from_json(item, binder).map_err(|e| e.at(PathComponent::Index(i)))
            })
            .collect()
    }
}

impl<K: JsonKey, V: FromJson> FromJson for BTreeMap<K, V> {
    fn from_json(node: &Node, binder: &Binder<'_>) -> Result<Self, BindError> {
        let fields = node
            .as_object()
            .ok_or_else(|| BindError::mismatch("object", node))?;
        let mut map = BTreeMap::new();
        for (key, value) in fields.iter() {
            let bound_key =
                K::from_key(key).map_err(|e| e.at(PathComponent::Key(key.to_owned())))?;
            let bound_value = V::from_json(value, binder)
                .map_err(|e| e.at(PathComponent::Key(key.to_owned())))?;
            map.insert(bound_key, bound_value);
        }
        Ok(map)
    }
}

impl FromJson for TypeHandle {
    fn from_json(node: &Node, binder: &Binder<'_>) -> Result<Self, BindError> {
        let text = node
            .as_primitive()
            .ok_or_else(|| BindError::mismatch("type name", node))?;
        binder.resolve_type(text)
    }
}

impl FromJson for Node {
    fn from_json(node: &Node, _binder: &Binder<'_>) -> Result<Self, BindError> {
        Ok(node.clone())
    }
}
