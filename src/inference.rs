//! Tree builder: classify one JSON sample into a named type tree.
//!
//! Leaves become primitive tags. Every array and object gets a name from the
//! run's [`Namer`], so a tree built by one `Inference` never repeats a name.
//! Object member order follows the source document (`serde_json` is built
//! with `preserve_order`).
pub mod atom;
pub mod namer;
mod arr;
mod obj;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

pub use atom::{classify, types_for_object, Primitive};
pub use namer::{Namer, ROOT_NAME};

use crate::error::{Error, Result};

// ------------------------------- Tree ------------------------------------ //

#[derive(Clone, Debug, PartialEq)]
pub enum TypeNode {
    Primitive(Primitive),
    /// One element node per source position, duplicates kept.
    Array { name: String, elements: Vec<TypeNode> },
    Object { name: String, members: IndexMap<String, TypeNode> },
}

impl TypeNode {
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeNode::Primitive(_) => None,
            TypeNode::Array { name, .. } | TypeNode::Object { name, .. } => Some(name),
        }
    }

    pub fn is_composite(&self) -> bool { self.name().is_some() }

    /// Primitive tag, or the composite's name.
    pub fn type_tag(&self) -> &str {
        match self {
            TypeNode::Primitive(p) => p.as_str(),
            TypeNode::Array { name, .. } | TypeNode::Object { name, .. } => name,
        }
    }

    /// Total node count, primitives included.
    pub fn size(&self) -> usize {
        match self {
            TypeNode::Primitive(_) => 1,
            TypeNode::Array { elements, .. } => 1 + elements.iter().map(TypeNode::size).sum::<usize>(),
            TypeNode::Object { members, .. } => 1 + members.values().map(TypeNode::size).sum::<usize>(),
        }
    }
}

// ------------------------------- Front API -------------------------------- //

/// One inference run. Owns the naming context, so independent runs never
/// share counters and can proceed in parallel.
#[derive(Debug, Default)]
pub struct Inference { namer: Namer }

impl Inference {
    pub fn new() -> Self { Self { namer: Namer::new() } }

    pub fn namer(&self) -> &Namer { &self.namer }

    /// Required before reusing this context for an unrelated sample.
    pub fn reset(&mut self) { self.namer.reset(); }

    pub fn build(&mut self, value: &Value, field_name: Option<&str>) -> Result<TypeNode> {
        match value {
            Value::Array(xs) => self.build_array(xs, field_name),
            Value::Object(m) => self.build_object(m, field_name),
            leaf => Ok(TypeNode::Primitive(classify(leaf)?)),
        }
    }

    /// Build from any host value that serializes to JSON.
    pub fn build_serialize<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<TypeNode> {
        let value = serde_json::to_value(value)
            .map_err(|e| Error::UnsupportedValue { reason: e.to_string() })?;
        self.build(&value, None)
    }
}

/// Build a tree with a fresh naming context.
pub fn infer_from_value(value: &Value) -> Result<TypeNode> {
    Inference::new().build(value, None)
}

// ------------------------------- Tests ------------------------------------ //
