//! A permissive JSON parser and type-directed object binder.
//!
//! The crate is split along the read path: [`Parser`] drives a caller
//! supplied [`EventSink`] one structural event at a time, [`TreeBuilder`]
//! materializes those events into a [`Node`] tree, and [`Binder`] converts a
//! tree into typed values through the [`FromJson`] trait. [`ToJson`] is the
//! write-side peer, rendering a typed graph back into compact JSON text.
//!
//! The accepted dialect is deliberately looser than RFC 8259: object keys
//! may be bare or single-quoted, string values may use either quote
//! character, and numeric literals are restricted to unsigned integers and
//! simple decimals. See [`ParserOptions`] for the available strictness
//! toggles.
//!
//! # Examples
//!
//! ```rust
//! use jsonbind::{FromJson, Node};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! impl FromJson for Point {
//!     fn from_json(node: &Node, binder: &jsonbind::Binder<'_>) -> Result<Self, jsonbind::BindError> {
//!         let obj = binder.fields(node)?;
//!         Ok(Self {
//!             x: obj.required("x")?,
//!             y: obj.required("y")?,
//!         })
//!     }
//! }
//!
//! let point: Point = jsonbind::from_str("{x: 1, y: 2}").unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod de;
mod dom;
mod error;
mod options;
mod parser;
mod path;
mod registry;
mod ser;

#[cfg(test)]
mod tests;

pub use de::{Binder, FieldReader, FromJson, JsonKey, from_node, from_str};
pub use dom::{Fields, Node, TreeBuilder, parse_str};
pub use error::{BindError, BindErrorKind, Error, Expected, ParseError};
pub use options::ParserOptions;
pub use parser::{EventSink, Parser};
pub use path::{PathComponent, PathComponentFrom};
pub use registry::{TypeHandle, TypeRegistry};
pub use ser::{ObjectWriter, ToJson, to_node, to_string};

#[doc(hidden)]
pub use alloc::vec;

/// Macro to build a `Vec<PathComponent>` from a heterogeneous list of keys
/// and indices.
///
/// ```rust
/// extern crate alloc;
/// # use jsonbind::{path, PathComponent};
/// let p = path!["array", 0, "abc"];
/// assert_eq!(
///     p,
///     vec![
///         PathComponent::Key("array".into()),
///         PathComponent::Index(0),
///         PathComponent::Key("abc".into())
///     ]
/// );
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        use $crate::PathComponentFrom;
        $crate::vec![$($crate::PathComponent::from_path_component($elem)),*]
    }};
}

/// Declares a unit enum whose variants are matched by constant name on the
/// wire.
///
/// The expansion wires up [`FromJson`], [`ToJson`] and [`JsonKey`], so the
/// enum can appear as a field value or as a map key.
///
/// ```rust
/// jsonbind::json_enum! {
///     pub enum Channel { STABLE, CANARY }
/// }
///
/// let channel: Channel = jsonbind::from_str("\"CANARY\"").unwrap();
/// assert_eq!(channel, Channel::CANARY);
/// assert_eq!(jsonbind::to_string(&channel), "\"CANARY\"");
/// ```
#[macro_export]
macro_rules! json_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        // Variants mirror wire constants, which are conventionally uppercase.
        #[allow(non_camel_case_types)]
        $vis enum $name {
            $($variant,)+
        }

        impl $name {
            /// The constant's name as it appears on the wire.
            #[must_use]
            $vis const fn constant_name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl $crate::FromJson for $name {
            fn from_json(
                node: &$crate::Node,
                _binder: &$crate::Binder<'_>,
            ) -> Result<Self, $crate::BindError> {
                let text = node
                    .as_primitive()
                    .ok_or_else(|| $crate::BindError::mismatch(stringify!($name), node))?;
                <Self as $crate::JsonKey>::from_key(text)
            }
        }

        impl $crate::ToJson for $name {
            fn to_json(&self) -> $crate::Node {
                $crate::Node::primitive(self.constant_name())
            }
        }

        impl $crate::JsonKey for $name {
            fn from_key(text: &str) -> Result<Self, $crate::BindError> {
                match text {
                    $(stringify!($variant) => Ok(Self::$variant),)+
                    _ => Err($crate::BindError::unknown_constant(stringify!($name), text)),
                }
            }

            fn key_text(&self) -> &str {
                self.constant_name()
            }
        }
    };
}
