//! Error types for the two engine stages.
//!
//! [`ParseError`] reports character-level problems and always carries the
//! character index (not the byte offset) of the failure. [`BindError`]
//! reports shape-level problems after a successful parse and carries the key
//! path at which the mismatch occurred. [`Error`] is the union returned by
//! entry points that run both stages.

use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::dom::Node;
use crate::path::{PathComponent, write_path};

/// What would have been legal at the point a [`ParseError`] was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Exactly one of the listed characters.
    OneOf(&'static [char]),
    /// Any character that can begin a value.
    Value,
    /// Any character that can begin an object key.
    Key,
    /// Nothing further: the document was already complete.
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::OneOf(chars) => {
                f.write_str("one of ")?;
                for (i, c) in chars.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{c}'")?;
                }
                Ok(())
            }
            Expected::Value => f.write_str("a value"),
            Expected::Key => f.write_str("an object key"),
            Expected::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// Malformed character-level input. Fatal to the parse; no partial tree is
/// produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A character that no legal continuation of the input starts with.
    #[error("unexpected character '{found}' at index {index}, expected {expected}")]
    UnexpectedCharacter {
        /// The offending character.
        found: char,
        /// Character index of the offending character.
        index: usize,
        /// The set of characters that would have been legal.
        expected: Expected,
    },
    /// A bare value that is neither a keyword nor an unsigned integer or
    /// simple decimal.
    #[error("invalid literal `{literal}` at index {index}")]
    InvalidLiteral {
        /// The rejected literal text.
        literal: String,
        /// Character index at which the literal started.
        index: usize,
    },
    /// The input ended while a construct was still open.
    #[error("unexpected end of input at index {index}")]
    UnexpectedEndOfInput {
        /// Character index one past the final character.
        index: usize,
    },
}

/// The parsed tree does not match the requested shape. Fatal to the bind;
/// no partial value is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindError {
    kind: BindErrorKind,
    path: Vec<PathComponent>,
}

/// The specific shape mismatch behind a [`BindError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindErrorKind {
    /// A non-nullable field was absent or null.
    #[error("missing required field `{key}`")]
    MissingField {
        /// The JSON key the field binds to.
        key: String,
    },
    /// The node kind does not match the declared shape.
    #[error("expected {expected}, found {actual}")]
    Mismatch {
        /// The declared shape.
        expected: &'static str,
        /// The node kind actually present.
        actual: &'static str,
    },
    /// A primitive's raw text is not well-formed for the declared type.
    #[error("invalid {expected} literal `{text}`")]
    InvalidValue {
        /// The declared primitive type.
        expected: &'static str,
        /// The offending raw text.
        text: String,
    },
    /// Raw text matched none of an enum's constant names.
    #[error("no constant `{constant}` in {enumeration}")]
    UnknownConstant {
        /// The enum the text was matched against.
        enumeration: &'static str,
        /// The unmatched raw text.
        constant: String,
    },
    /// A type-literal name is not present in the registry.
    #[error("unresolvable type name `{name}`")]
    UnknownType {
        /// The unresolved fully qualified name.
        name: String,
    },
}

impl BindError {
    pub(crate) fn new(kind: BindErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
        }
    }

    /// A required field was absent or null.
    #[must_use]
    pub fn missing_field(key: &str) -> Self {
        Self::new(BindErrorKind::MissingField { key: key.into() })
    }

    /// `node` is not of the declared shape.
    #[must_use]
    pub fn mismatch(expected: &'static str, node: &Node) -> Self {
        Self::new(BindErrorKind::Mismatch {
            expected,
            actual: node.kind(),
        })
    }

    /// A primitive's raw text failed to parse as the declared type.
    #[must_use]
    pub fn invalid_value(expected: &'static str, text: &str) -> Self {
        Self::new(BindErrorKind::InvalidValue {
            expected,
            text: text.into(),
        })
    }

    /// Raw text matched none of the enum's constants.
    #[must_use]
    pub fn unknown_constant(enumeration: &'static str, constant: &str) -> Self {
        Self::new(BindErrorKind::UnknownConstant {
            enumeration,
            constant: constant.into(),
        })
    }

    /// A type-literal name could not be resolved.
    #[must_use]
    pub fn unknown_type(name: &str) -> Self {
        Self::new(BindErrorKind::UnknownType { name: name.into() })
    }

    /// Prepends `component` to the key path as the error bubbles out of a
    /// nested conversion.
    #[must_use]
    pub fn at(mut self, component: PathComponent) -> Self {
        self.path.insert(0, component);
        self
    }

    /// The specific mismatch.
    #[must_use]
    pub fn kind(&self) -> &BindErrorKind {
        &self.kind
    }

    /// The key path from the root to the failing node.
    #[must_use]
    pub fn path(&self) -> &[PathComponent] {
        &self.path
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at ", self.kind)?;
        write_path(f, &self.path)
    }
}

impl core::error::Error for BindError {}

/// Union of the two failure stages, as returned by [`crate::Binder::from_str`].
///
/// A [`ParseError`] always precedes and is distinct from any [`BindError`]:
/// binding never starts on malformed text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The text failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The text parsed but did not match the requested shape.
    #[error(transparent)]
    Bind(#[from] BindError),
}
