//! The document tree and its builder.
//!
//! [`Node`] is the in-memory representation shared by the read and write
//! paths. Scalars stay as raw literal text ([`Node::Primitive`]) until the
//! binder coerces them, so the tree carries no numeric types of its own and
//! no memory of the original quoting style.
//!
//! # Examples
//!
//! ```rust
//! use jsonbind::{Node, parse_str};
//!
//! let root = parse_str(r#"{alpha: 'one', "beta": [2, null]}"#).unwrap();
//! let fields = root.as_object().unwrap();
//! assert_eq!(fields.get("alpha"), Some(&Node::primitive("one")));
//! assert_eq!(root.to_string(), r#"{"alpha":"one","beta":[2,null]}"#);
//! ```

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::error::ParseError;
use crate::parser::{EventSink, Parser, literal_matches_grammar};

/// One node of a parsed document.
///
/// The tree is finite: nodes own their children and nothing refers back up.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// An ordered mapping of unique keys to child nodes.
    Object(Fields),
    /// An ordered sequence of child nodes.
    Array(Vec<Node>),
    /// The null value.
    Null,
    /// A scalar, kept as raw literal text; quoting is stripped but escape
    /// sequences are left undecoded.
    Primitive(String),
}

impl Default for Node {
    fn default() -> Self {
        Self::Null
    }
}

impl Node {
    /// Builds a primitive node from raw text.
    #[must_use]
    pub fn primitive(text: impl Into<String>) -> Self {
        Self::Primitive(text.into())
    }

    /// Returns `true` if the node is [`Null`](Self::Null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the node is an [`Object`](Self::Object).
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Returns `true` if the node is an [`Array`](Self::Array).
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// The object's fields, if this node is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Fields> {
        if let Self::Object(fields) = self {
            Some(fields)
        } else {
            None
        }
    }

    /// The array's elements, if this node is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Node]> {
        if let Self::Array(items) = self {
            Some(items)
        } else {
            None
        }
    }

    /// The raw literal text, if this node is a primitive.
    #[must_use]
    pub fn as_primitive(&self) -> Option<&str> {
        if let Self::Primitive(text) = self {
            Some(text)
        } else {
            None
        }
    }

    /// The node kind as a noun, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Object(..) => "object",
            Self::Array(..) => "array",
            Self::Null => "null",
            Self::Primitive(..) => "primitive",
        }
    }
}

impl From<Fields> for Node {
    fn from(fields: Fields) -> Self {
        Self::Object(fields)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::Array(items)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Primitive(text)
    }
}

/// The ordered members of an object node.
///
/// Insertion order is preserved. Writing an existing key again replaces its
/// value in place, keeping the key's original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fields(Vec<(String, Node)>);

impl Fields {
    /// Creates an empty member list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node` under `key`; the last write for a key wins.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) {
        let key = key.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = node,
            None => self.0.push((key, node)),
        }
    }

    /// Looks up a member by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, node)| node)
    }

    /// Returns `true` if a member with `key` exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the object has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.0.iter().map(|(key, node)| (key.as_str(), node))
    }
}

/// Materializes a [`Node`] tree from parser events.
///
/// Keeps its own stack of in-progress containers, one entry per open
/// construct, each remembering the key it will attach under.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<(Option<String>, Node)>,
    pending_key: Option<String>,
    root: Option<Node>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished root, once a parse has completed successfully.
    #[must_use]
    pub fn into_root(self) -> Option<Node> {
        self.root
    }

    fn open(&mut self, node: Node) {
        let key = self.pending_key.take();
        self.stack.push((key, node));
    }

    fn close(&mut self) {
        let (key, node) = self
            .stack
            .pop()
            .expect("a close event follows its open event");
        self.attach(key, node);
    }

    fn attach(&mut self, key: Option<String>, node: Node) {
        match self.stack.last_mut() {
            None => self.root = Some(node),
            Some((_, Node::Object(fields))) => {
                fields.insert(key.expect("a key precedes every object member"), node);
            }
            Some((_, Node::Array(items))) => items.push(node),
            Some(_) => unreachable!("only containers are held open"),
        }
    }
}

impl EventSink for TreeBuilder {
    fn begin_object(&mut self) {
        self.open(Node::Object(Fields::new()));
    }

    fn end_object(&mut self) {
        self.close();
    }

    fn begin_array(&mut self) {
        self.open(Node::Array(Vec::new()));
    }

    fn end_array(&mut self) {
        self.close();
    }

    fn key(&mut self, text: &str) {
        self.pending_key = Some(text.to_string());
    }

    fn primitive(&mut self, text: &str) {
        // The event contract has no dedicated null notification, so the
        // exact text `null` collapses to the null node here whether or not
        // it was quoted on the wire.
        let node = if text == "null" {
            Node::Null
        } else {
            Node::Primitive(text.to_string())
        };
        let key = self.pending_key.take();
        self.attach(key, node);
    }
}

/// Parses `text` into a document tree with the default dialect options.
///
/// # Errors
///
/// Returns the [`ParseError`] raised by the tokenizing parser.
pub fn parse_str(text: &str) -> Result<Node, ParseError> {
    let mut builder = TreeBuilder::new();
    Parser::default().parse(text, &mut builder)?;
    Ok(builder
        .into_root()
        .expect("a successful parse yields a document root"))
}

/// Returns `true` if `text` would be read back as the same primitive when
/// rendered without quotes.
fn renders_bare(text: &str) -> bool {
    text != "null" && literal_matches_grammar(text)
}

fn contains_unescaped(text: &str, quote: char) -> bool {
    let mut prev = None;
    for c in text.chars() {
        if c == quote && prev != Some('\\') {
            return true;
        }
        prev = Some(c);
    }
    false
}

/// Renders `text` as a quoted string.
///
/// Parsed raw text is re-emitted verbatim: a quote already preceded by a
/// backslash gets no second escape, and text holding an unescaped `"` (only
/// reachable from single-quoted input) falls back to single-quote
/// delimiters. Both rules mirror the scanner's one-character lookback, so
/// rendering then reparsing reproduces the same raw text.
fn write_quoted<W: fmt::Write>(text: &str, f: &mut W) -> fmt::Result {
    let quote = if contains_unescaped(text, '"') && !contains_unescaped(text, '\'') {
        '\''
    } else {
        '"'
    };
    f.write_char(quote)?;
    let mut prev = None;
    for c in text.chars() {
        if c == quote && prev != Some('\\') {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
        prev = Some(c);
    }
    f.write_char(quote)
}

impl fmt::Display for Node {
    /// Compact rendering: no inserted whitespace, members comma separated,
    /// primitives bare whenever the literal grammar can read them back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => f.write_str("null"),
            Node::Primitive(text) => {
                if renders_bare(text) {
                    f.write_str(text)
                } else {
                    write_quoted(text, f)
                }
            }
            Node::Array(items) => {
                f.write_str("[")?;
                let mut first = true;
                for item in items {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Node::Object(fields) => {
                f.write_str("{")?;
                let mut first = true;
                for (key, node) in fields.iter() {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write_quoted(key, f)?;
                    write!(f, ":{node}")?;
                }
                f.write_str("}")
            }
        }
    }
}
