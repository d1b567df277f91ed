use std::fmt;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Terminal type tag for a JSON leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Null,
}

impl Primitive {
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Null => "null",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a leaf value. Composites must be routed to the tree builder
/// before they get here.
pub fn classify(v: &Value) -> Result<Primitive> {
    match v {
        Value::String(_) => Ok(Primitive::String),
        Value::Number(_) => Ok(Primitive::Number),
        Value::Bool(_) => Ok(Primitive::Boolean),
        Value::Null => Ok(Primitive::Null),
        Value::Array(_) => Err(Error::InvalidLeaf { kind: "array" }),
        Value::Object(_) => Err(Error::InvalidLeaf { kind: "object" }),
    }
}

/// Primitive tag of every member of a flat object, in key order.
pub fn types_for_object(map: &Map<String, Value>) -> Result<IndexMap<String, Primitive>> {
    map.iter()
        .map(|(k, v)| Ok((k.clone(), classify(v)?)))
        .collect()
}
