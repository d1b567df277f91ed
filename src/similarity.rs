//! Decide whether two independently produced shapes are the same.
//!
//! Comparison is shallow: members are matched by their type tag (primitive
//! tag or declaration name), never by descending into what a name refers to.
//! Array shapes are never similar to anything.
use std::collections::{BTreeMap, HashMap, HashSet};

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::inference::TypeNode;
use crate::ir::Declaration;

/// String-keyed collections whose key sets can be compared.
pub trait Fields {
    type Value;
    fn labels(&self) -> impl Iterator<Item = &str>;
    fn field(&self, label: &str) -> Option<&Self::Value>;
}

impl<V> Fields for IndexMap<String, V> {
    type Value = V;
    fn labels(&self) -> impl Iterator<Item = &str> { self.keys().map(String::as_str) }
    fn field(&self, label: &str) -> Option<&V> { self.get(label) }
}

impl<V> Fields for BTreeMap<String, V> {
    type Value = V;
    fn labels(&self) -> impl Iterator<Item = &str> { self.keys().map(String::as_str) }
    fn field(&self, label: &str) -> Option<&V> { self.get(label) }
}

impl<V> Fields for HashMap<String, V> {
    type Value = V;
    fn labels(&self) -> impl Iterator<Item = &str> { self.keys().map(String::as_str) }
    fn field(&self, label: &str) -> Option<&V> { self.get(label) }
}

impl Fields for Map<String, Value> {
    type Value = Value;
    fn labels(&self) -> impl Iterator<Item = &str> { self.keys().map(String::as_str) }
    fn field(&self, label: &str) -> Option<&Value> { self.get(label) }
}

/// Jaccard ratio. Two empty sets overlap fully.
pub fn overlap_amount(intersection: usize, union: usize) -> f64 {
    if union == 0 {
        return 1.0;
    }
    intersection as f64 / union as f64
}

/// True iff both key sets are identical.
pub fn have_same_field_labels<A: Fields, B: Fields>(a: &A, b: &B) -> bool {
    let a_labels: HashSet<&str> = a.labels().collect();
    let b_labels: HashSet<&str> = b.labels().collect();
    let intersection = a_labels.intersection(&b_labels).count();
    let union = a_labels.union(&b_labels).count();
    overlap_amount(intersection, union) >= 1.0
}

/// Same key sets, and `values_equal` holds for every key. Stops at the first
/// mismatch.
pub fn have_same_field_values<A, B, F>(a: &A, b: &B, values_equal: F) -> bool
where
    A: Fields,
    B: Fields,
    F: Fn(&A::Value, &B::Value) -> bool,
{
    if !have_same_field_labels(a, b) {
        return false;
    }
    a.labels().all(|label| match (a.field(label), b.field(label)) {
        (Some(x), Some(y)) => values_equal(x, y),
        _ => false,
    })
}

/// [`have_same_field_values`] with plain equality.
pub fn have_equal_field_values<M>(a: &M, b: &M) -> bool
where
    M: Fields,
    M::Value: PartialEq,
{
    have_same_field_values(a, b, |x, y| x == y)
}

pub fn are_similar_definition(a: &Declaration, b: &Declaration) -> bool {
    match (a, b) {
        (Declaration::Object { members: a, .. }, Declaration::Object { members: b, .. }) => {
            have_same_field_values(a, b, |x, y| x.type_tag() == y.type_tag())
        }
        _ => false,
    }
}

/// Same rule on tree nodes; a composite member's tag is its name.
pub fn are_similar_tree(a: &TypeNode, b: &TypeNode) -> bool {
    match (a, b) {
        (TypeNode::Object { members: a, .. }, TypeNode::Object { members: b, .. }) => {
            have_same_field_values(a, b, |x, y| x.type_tag() == y.type_tag())
        }
        _ => false,
    }
}
