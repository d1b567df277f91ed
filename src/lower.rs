//! Flatten a type tree into independently named declarations.
use indexmap::IndexMap;
use tracing::trace;

use crate::inference::TypeNode;
use crate::ir::{Atom, Declaration};

/// Depth-first over a LIFO frontier: children are pushed in source order and
/// popped from the same end, so among siblings the last one is visited first.
/// Only composites are emitted. Output order is part of the rendered text and
/// must not change.
pub fn flatten(root: &TypeNode) -> Vec<Declaration> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node {
            TypeNode::Primitive(_) => {}
            TypeNode::Array { name, elements } => {
                out.push(array_declaration(name, elements));
                stack.extend(elements.iter());
            }
            TypeNode::Object { name, members } => {
                out.push(object_declaration(name, members));
                stack.extend(members.values());
            }
        }
    }
    trace!(declarations = out.len(), "flattened tree");
    out
}

// A nested array inside an array is written as a reference to the enclosing
// array itself; rendering depends on it.
fn array_declaration(name: &str, elements: &[TypeNode]) -> Declaration {
    Declaration::Array {
        name: name.to_string(),
        elements: elements.iter().map(|el| match el {
            TypeNode::Array { .. } => Atom::Ref(name.to_string()),
            other => to_atom(other),
        }).collect(),
    }
}

fn object_declaration(name: &str, members: &IndexMap<String, TypeNode>) -> Declaration {
    Declaration::Object {
        name: name.to_string(),
        members: members.iter().map(|(k, v)| (k.clone(), to_atom(v))).collect(),
    }
}

fn to_atom(node: &TypeNode) -> Atom {
    match node {
        TypeNode::Primitive(p) => Atom::Primitive(*p),
        TypeNode::Array { name, .. } | TypeNode::Object { name, .. } => Atom::Ref(name.clone()),
    }
}
