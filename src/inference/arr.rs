use serde_json::Value;

use super::{Inference, TypeNode};
use crate::error::Result;

impl Inference {
    /// Name the array, then one node per position. Elements have no field
    /// name of their own.
    pub(super) fn build_array(&mut self, xs: &[Value], field_name: Option<&str>) -> Result<TypeNode> {
        let name = self.namer.next_name(field_name);
        let elements = xs.iter()
            .map(|el| self.build(el, None))
            .collect::<Result<Vec<_>>>()?;
        Ok(TypeNode::Array { name, elements })
    }
}
