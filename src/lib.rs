//! Infer TypeScript-style type declarations from a single JSON sample.
//!
//! The pipeline is build → flatten → dedupe → render:
//!
//! ```
//! let sample = serde_json::json!({ "name": "Rex", "tags": ["good", "boy"] });
//! let text = json_tsdecl::render_value(&sample).unwrap();
//! assert_eq!(text, "export type Root = {\n  name: string;\n  tags: Tags;\n};\n\ntype Tags = (string)[];\n");
//! ```
pub mod codegen;
pub mod dedupe;
pub mod error;
pub mod inference;
pub mod ir;
pub mod lower;
pub mod similarity;

use serde_json::Value;
use tracing::debug;

pub use codegen::{Codegen, CodegenOptions};
pub use dedupe::{DedupeOptions, Deduped, ReplacementMap};
pub use error::{Error, Result};
pub use inference::{Inference, Namer, Primitive, TypeNode};
pub use ir::{Atom, Declaration, Declarations};

#[derive(Clone, Debug, Default)]
pub struct Options {
    pub codegen: CodegenOptions,
    pub dedupe: DedupeOptions,
}

pub fn render_value(value: &Value) -> Result<String> {
    render_value_with(value, &Options::default())
}

/// One complete run with its own naming context.
pub fn render_value_with(value: &Value, options: &Options) -> Result<String> {
    let tree = Inference::new().build(value, None)?;
    render_tree(&tree, options)
}

pub fn render_tree(tree: &TypeNode, options: &Options) -> Result<String> {
    let mut cg = Codegen::with_options(options.codegen.clone());
    match tree {
        TypeNode::Primitive(p) => cg.emit_alias(inference::ROOT_NAME, *p),
        _ => cg.emit(&declarations_for_tree(tree, options.dedupe)?.declarations),
    }
    Ok(cg.into_string())
}

/// Flatten and dedupe without rendering. Empty for a primitive tree.
pub fn declarations_for_tree(tree: &TypeNode, options: DedupeOptions) -> Result<Deduped> {
    let flat = lower::flatten(tree);
    debug!(nodes = tree.size(), declarations = flat.len(), "flattened");
    dedupe::dedupe_with(flat, options)
}

pub fn declarations_for_value(value: &Value, options: DedupeOptions) -> Result<Deduped> {
    let tree = Inference::new().build(value, None)?;
    declarations_for_tree(&tree, options)
}
