//! Resolution of type-literal fields.
//!
//! Some documents carry a fully qualified type name as a string value. The
//! engine never interprets such names itself; callers supply a
//! [`TypeRegistry`] at construction listing every name they are prepared to
//! accept, and a successful lookup yields a [`TypeHandle`]. The registry is
//! an explicit value, shared immutably across calls; there is no process
//! wide table.

use alloc::{collections::BTreeSet, string::String};
use core::fmt;

/// The read-only set of resolvable type names.
///
/// # Examples
///
/// ```rust
/// use jsonbind::TypeRegistry;
///
/// let registry = TypeRegistry::with_types(["com.example.Widget"]);
/// assert!(registry.resolve("com.example.Widget").is_some());
/// assert!(registry.resolve("com.example.Gadget").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    names: BTreeSet<String>,
}

impl TypeRegistry {
    /// Creates an empty registry; every type-literal lookup will fail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from an iterator of fully qualified names.
    pub fn with_types<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Adds one resolvable name.
    pub fn register(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Resolves `name` to a handle, if registered.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<TypeHandle> {
        self.names.get(name).map(|name| TypeHandle { name: name.clone() })
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// A resolved type name.
///
/// Serializing a handle writes the name back out, so resolution and
/// rendering are exact inverses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeHandle {
    name: String,
}

impl TypeHandle {
    /// The fully qualified name this handle resolved from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
