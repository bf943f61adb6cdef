use alloc::vec::Vec;

use crate::{Fields, Node};

pub fn obj<const N: usize>(entries: [(&str, Node); N]) -> Node {
    let mut fields = Fields::new();
    for (key, node) in entries {
        fields.insert(key, node);
    }
    Node::Object(fields)
}

pub fn arr<const N: usize>(items: [Node; N]) -> Node {
    Node::Array(Vec::from(items))
}

pub fn prim(text: &str) -> Node {
    Node::primitive(text)
}
