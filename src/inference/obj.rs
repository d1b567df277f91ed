use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::{Inference, TypeNode};
use crate::error::Result;

impl Inference {
    /// Name the object before its members so parents always get the lower
    /// counters. Each member is built under its own key.
    pub(super) fn build_object(&mut self, map: &Map<String, Value>, field_name: Option<&str>) -> Result<TypeNode> {
        let name = self.namer.next_name(field_name);
        let mut members = IndexMap::with_capacity(map.len());
        for (k, v) in map {
            let ty = self.build(v, Some(k))?;
            members.insert(k.clone(), ty);
        }
        Ok(TypeNode::Object { name, members })
    }
}
