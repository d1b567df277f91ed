// Flat declaration IR for codegen. Nothing in here nests: composites refer to
// each other by name.

use indexmap::IndexMap;
use serde::Serialize;

use crate::inference::Primitive;

/// A member or element slot: a primitive tag or a reference to another
/// declaration by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Atom {
    Primitive(Primitive),
    Ref(String),
}

impl Atom {
    /// Text used for both rendering and similarity checks.
    pub fn type_tag(&self) -> &str {
        match self {
            Atom::Primitive(p) => p.as_str(),
            Atom::Ref(name) => name,
        }
    }

    pub fn as_ref_name(&self) -> Option<&str> {
        match self {
            Atom::Ref(name) => Some(name),
            Atom::Primitive(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Declaration {
    Array { name: String, elements: Vec<Atom> },
    Object { name: String, members: IndexMap<String, Atom> },
}

/// The part of a declaration that identifies its shape; names excluded.
#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Content<'a> {
    Elements(&'a [Atom]),
    Members(&'a IndexMap<String, Atom>),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Array { name, .. } | Declaration::Object { name, .. } => name,
        }
    }

    pub fn is_array(&self) -> bool { matches!(self, Declaration::Array { .. }) }
    pub fn is_object(&self) -> bool { matches!(self, Declaration::Object { .. }) }

    /// Every atom in declaration order.
    pub fn atoms(&self) -> Box<dyn Iterator<Item = &Atom> + '_> {
        match self {
            Declaration::Array { elements, .. } => Box::new(elements.iter()),
            Declaration::Object { members, .. } => Box::new(members.values()),
        }
    }

    pub(crate) fn atoms_mut(&mut self) -> Box<dyn Iterator<Item = &mut Atom> + '_> {
        match self {
            Declaration::Array { elements, .. } => Box::new(elements.iter_mut()),
            Declaration::Object { members, .. } => Box::new(members.values_mut()),
        }
    }

    /// Canonical serialization of the content. Equal keys mean equal shapes.
    pub fn content_key(&self) -> serde_json::Result<String> {
        let content = match self {
            Declaration::Array { elements, .. } => Content::Elements(elements),
            Declaration::Object { members, .. } => Content::Members(members),
        };
        serde_json::to_string(&content)
    }
}

/// Declarations keyed by name, in output order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Declarations(IndexMap<String, Declaration>);

impl Declarations {
    pub fn new() -> Self { Self::default() }

    /// Appends, or replaces in place if the name is already present.
    pub fn insert(&mut self, decl: Declaration) {
        self.0.insert(decl.name().to_string(), decl);
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> { self.0.get(name) }

    /// Follow a reference atom to its declaration.
    pub fn resolve(&self, atom: &Atom) -> Option<&Declaration> {
        atom.as_ref_name().and_then(|name| self.get(name))
    }

    pub fn first(&self) -> Option<&Declaration> { self.0.first().map(|(_, d)| d) }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> { self.0.values() }
    pub fn names(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }
}

impl FromIterator<Declaration> for Declarations {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        let mut out = Self::new();
        for decl in iter { out.insert(decl); }
        out
    }
}

impl IntoIterator for Declarations {
    type Item = Declaration;
    type IntoIter = indexmap::map::IntoValues<String, Declaration>;
    fn into_iter(self) -> Self::IntoIter { self.0.into_values() }
}
