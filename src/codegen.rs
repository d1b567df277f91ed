//! Render declarations as TypeScript-style type aliases.
//!
//! ```text
//! export type Root = {
//!   foo: string;
//!   baz: Baz;
//! };
//!
//! type Baz = (number | T)[];
//! ```
//!
//! Only the first declaration carries the `export` marker.
use crate::inference::Primitive;
use crate::ir::{Atom, Declaration, Declarations};

#[derive(Clone, Debug)]
pub struct CodegenOptions {
    /// Prefix for each object member line.
    pub indent: String,
    /// Mark the first declaration with `export`.
    pub export: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self { indent: "  ".to_string(), export: true }
    }
}

#[derive(Debug, Default)]
pub struct Codegen {
    options: CodegenOptions,
    out: String,
    emitted: usize,
}

impl Codegen {
    pub fn new() -> Self { Self::default() }

    pub fn with_options(options: CodegenOptions) -> Self {
        Self { options, ..Self::default() }
    }

    /// Append every declaration, in order.
    pub fn emit(&mut self, decls: &Declarations) {
        for decl in decls.iter() {
            let text = render_declaration(decl, &self.options.indent);
            self.push(&text);
        }
    }

    /// Append `type <name> = <tag>;` for a sample with no composites.
    pub fn emit_alias(&mut self, name: &str, primitive: Primitive) {
        self.push(&format!("type {name} = {primitive};"));
    }

    fn push(&mut self, text: &str) {
        if self.emitted == 0 {
            if self.options.export {
                self.out.push_str("export ");
            }
        } else {
            self.out.push_str("\n\n");
        }
        self.out.push_str(text);
        self.emitted += 1;
    }

    pub fn into_string(mut self) -> String {
        if self.emitted > 0 {
            self.out.push('\n');
        }
        self.out
    }
}

/// Render with default options.
pub fn render(decls: &Declarations) -> String {
    let mut cg = Codegen::new();
    cg.emit(decls);
    cg.into_string()
}

pub fn render_declaration(decl: &Declaration, indent: &str) -> String {
    match decl {
        Declaration::Object { name, members } => {
            let delimiter = format!("\n{indent}");
            let lines: Vec<String> = members.iter()
                .map(|(key, atom)| format!("{key}: {};", atom.type_tag()))
                .collect();
            format!("type {name} = {{{delimiter}{}\n}};", lines.join(&delimiter))
        }
        Declaration::Array { name, elements } => {
            format!("type {name} = {}[];", union_text(elements))
        }
    }
}

/// `(a | b)` over the distinct element texts in first-seen order; empty for
/// an empty array.
pub fn union_text(elements: &[Atom]) -> String {
    if elements.is_empty() {
        return String::new();
    }
    let mut unique: Vec<&str> = Vec::with_capacity(elements.len());
    for el in elements {
        let text = el.type_tag();
        if !unique.contains(&text) {
            unique.push(text);
        }
    }
    format!("({})", unique.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn p(x: Primitive) -> Atom { Atom::Primitive(x) }
    fn r(x: &str) -> Atom { Atom::Ref(x.to_string()) }

    fn array(name: &str, elements: Vec<Atom>) -> Declaration {
        Declaration::Array { name: name.to_string(), elements }
    }

    fn object(name: &str, members: Vec<(&str, Atom)>) -> Declaration {
        Declaration::Object {
            name: name.to_string(),
            members: members.into_iter().map(|(k, a)| (k.to_string(), a)).collect::<IndexMap<_, _>>(),
        }
    }

    fn decls(xs: Vec<Declaration>) -> Declarations { xs.into_iter().collect() }

    #[test]
    fn empty_arrays_render_without_parens() {
        let out = render(&decls(vec![array("Root", vec![])]));
        assert_eq!(out, "export type Root = [];\n");
    }

    #[test]
    fn simple_arrays() {
        let out = render(&decls(vec![array("Root", vec![p(Primitive::Number)])]));
        assert_eq!(out, "export type Root = (number)[];\n");
    }

    #[test]
    fn union_entries_are_deduplicated() {
        let elements = vec![p(Primitive::Number); 4];
        let out = render(&decls(vec![array("Root", elements)]));
        assert_eq!(out, "export type Root = (number)[];\n");
    }

    #[test]
    fn union_keeps_first_seen_order() {
        let elements = vec![r("T1"), p(Primitive::Number), r("T1"), p(Primitive::Null)];
        assert_eq!(union_text(&elements), "(T1 | number | null)");
    }

    #[test]
    fn arrays_with_types() {
        let out = render(&decls(vec![
            array("Root", vec![p(Primitive::Number), r("T1")]),
            object("T1", vec![("fish", p(Primitive::Boolean))]),
        ]));
        assert_eq!(out, "export type Root = (number | T1)[];\n\ntype T1 = {\n  fish: boolean;\n};\n");
    }

    #[test]
    fn whole_document() {
        let out = render(&decls(vec![
            object("Root", vec![("foo", p(Primitive::String)), ("baz", r("T1"))]),
            array("T1", vec![p(Primitive::Number), p(Primitive::Number), p(Primitive::Number), r("T2")]),
            object("T2", vec![("1", r("T3")), ("quux", p(Primitive::Null)), ("true", p(Primitive::Boolean))]),
            object("T3", vec![("false", r("T4"))]),
            array("T4", vec![]),
        ]));
        let expected = "export type Root = {
  foo: string;
  baz: T1;
};

type T1 = (number | T2)[];

type T2 = {
  1: T3;
  quux: null;
  true: boolean;
};

type T3 = {
  false: T4;
};

type T4 = [];
";
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_objects_keep_the_member_line() {
        let out = render(&decls(vec![object("Root", vec![])]));
        assert_eq!(out, "export type Root = {\n  \n};\n");
    }

    #[test]
    fn options_control_indent_and_export() {
        let mut cg = Codegen::with_options(CodegenOptions { indent: "    ".into(), export: false });
        cg.emit(&decls(vec![object("Root", vec![("a", p(Primitive::Number))])]));
        assert_eq!(cg.into_string(), "type Root = {\n    a: number;\n};\n");
    }

    #[test]
    fn aliases_for_primitive_samples() {
        let mut cg = Codegen::new();
        cg.emit_alias("Root", Primitive::Number);
        assert_eq!(cg.into_string(), "export type Root = number;\n");
    }

    #[test]
    fn nothing_emitted_is_empty() {
        assert_eq!(Codegen::new().into_string(), "");
    }
}
