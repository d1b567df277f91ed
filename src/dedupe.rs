//! Structural deduplication of flattened declarations.
//!
//! Two declarations are duplicates when their content keys match (member or
//! element atoms, in order; names excluded). The first occurrence survives,
//! later ones are dropped and recorded in the replacement map, and references
//! to dropped names are rewritten to the survivor.
//!
//! Rewriting can make two survivors identical (`{p: P}` and `{p: P2}` once
//! `P2 → P`), so merging repeats until a round finds nothing. Running
//! [`dedupe`] on its own output therefore yields an empty map.
use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::ir::{Atom, Declaration, Declarations};

/// Dropped declaration name → surviving declaration name. Targets are never
/// keys, so one application is enough.
pub type ReplacementMap = IndexMap<String, String>;

#[derive(Clone, Copy, Debug, Default)]
pub struct DedupeOptions {
    /// Rewrite references held by array declarations too. Off by default:
    /// meeting such a reference fails with [`Error::UnimplementedRewrite`].
    pub rewrite_arrays: bool,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct Deduped {
    pub declarations: Declarations,
    pub replacements: ReplacementMap,
}

pub fn dedupe(decls: Vec<Declaration>) -> Result<Deduped> {
    dedupe_with(decls, DedupeOptions::default())
}

pub fn dedupe_with(decls: Vec<Declaration>, options: DedupeOptions) -> Result<Deduped> {
    let before = decls.len();
    let mut current = decls;
    let mut replacements = ReplacementMap::new();
    loop {
        let (mut survivors, round) = merge_round(current)?;
        if round.is_empty() {
            current = survivors;
            break;
        }
        // earlier survivors may have been merged away in this round
        for target in replacements.values_mut() {
            if let Some(next) = round.get(target.as_str()) {
                *target = next.clone();
            }
        }
        apply_replacements(&mut survivors, &round, options)?;
        replacements.extend(round);
        current = survivors;
    }
    debug!(before, after = current.len(), merged = replacements.len(), "deduplicated declarations");
    Ok(Deduped { declarations: current.into_iter().collect(), replacements })
}

/// One pass: keep first occurrences, map every later duplicate onto it.
fn merge_round(decls: Vec<Declaration>) -> Result<(Vec<Declaration>, ReplacementMap)> {
    let mut canonical: HashMap<String, String> = HashMap::with_capacity(decls.len());
    let mut round = ReplacementMap::new();
    let mut survivors = Vec::with_capacity(decls.len());
    for decl in decls {
        let key = decl.content_key()?;
        match canonical.get(&key) {
            Some(keep) => {
                trace!(dropped = decl.name(), kept = keep.as_str(), "merging duplicate");
                round.insert(decl.name().to_string(), keep.clone());
            }
            None => {
                canonical.insert(key, decl.name().to_string());
                survivors.push(decl);
            }
        }
    }
    Ok((survivors, round))
}

/// Point every reference to a replaced name at its survivor.
pub fn apply_replacements(
    decls: &mut [Declaration],
    replacements: &ReplacementMap,
    options: DedupeOptions,
) -> Result<()> {
    if replacements.is_empty() {
        return Ok(());
    }
    for decl in decls.iter_mut() {
        if decl.is_array() && !options.rewrite_arrays {
            let stale = decl.atoms()
                .filter_map(Atom::as_ref_name)
                .find(|name| replacements.contains_key(*name));
            if let Some(reference) = stale {
                return Err(Error::UnimplementedRewrite {
                    declaration: decl.name().to_string(),
                    reference: reference.to_string(),
                });
            }
            continue;
        }
        for atom in decl.atoms_mut() {
            if let Atom::Ref(name) = atom {
                if let Some(target) = replacements.get(name.as_str()) {
                    *name = target.clone();
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{infer_from_value, Primitive};
    use crate::lower::flatten;
    use serde_json::json;

    fn flat(v: serde_json::Value) -> Vec<Declaration> {
        flatten(&infer_from_value(&v).unwrap())
    }

    fn names(d: &Deduped) -> Vec<&str> { d.declarations.names().collect() }

    #[test]
    fn distinct_declarations_pass_through() {
        let decls = flat(json!({ "a": { "x": 1 }, "b": { "y": 1 } }));
        let out = dedupe(decls.clone()).unwrap();
        assert!(out.replacements.is_empty());
        assert_eq!(out.declarations.into_iter().collect::<Vec<_>>(), decls);
    }

    #[test]
    fn duplicates_merge_into_first_occurrence() {
        // flatten order: Root, B, A
        let out = dedupe(flat(json!({ "a": [], "b": [] }))).unwrap();
        assert_eq!(names(&out), vec!["Root", "B"]);
        assert_eq!(out.replacements.get("A").map(String::as_str), Some("B"));

        let Some(Declaration::Object { members, .. }) = out.declarations.get("Root") else { panic!() };
        assert_eq!(members["a"], Atom::Ref("B".into()));
        assert_eq!(members["b"], Atom::Ref("B".into()));
    }

    #[test]
    fn merges_cascade_until_stable() {
        // P and P2 merge, which makes X and Y identical
        let out = dedupe(flat(json!({ "x": { "p": {} }, "y": { "p": {} } }))).unwrap();
        assert_eq!(names(&out), vec!["Root", "Y", "P2"]);
        assert_eq!(out.replacements.get("P").map(String::as_str), Some("P2"));
        assert_eq!(out.replacements.get("X").map(String::as_str), Some("Y"));

        let Some(Declaration::Object { members, .. }) = out.declarations.get("Root") else { panic!() };
        assert_eq!(members["x"], Atom::Ref("Y".into()));
    }

    #[test]
    fn replacement_targets_are_survivors() {
        let out = dedupe(flat(json!({
            "a": { "p": { "q": {} } },
            "b": { "p": { "q": {} } },
            "c": { "p": { "q": {} } }
        }))).unwrap();
        for target in out.replacements.values() {
            assert!(out.declarations.get(target).is_some(), "{target} should survive");
            assert!(!out.replacements.contains_key(target));
        }
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let inputs = [
            json!({ "x": { "p": {} }, "y": { "p": {} } }),
            json!({ "a": [], "b": [], "c": { "d": [] } }),
            json!({ "foo": "x", "baz": [1, 2, 3, { "quux": null, "true": false, "1": { "false": [] } }] }),
        ];
        for v in inputs {
            let once = dedupe(flat(v)).unwrap();
            let twice = dedupe(once.declarations.clone().into_iter().collect()).unwrap();
            assert!(twice.replacements.is_empty());
            assert_eq!(twice.declarations, once.declarations);
        }
    }

    #[test]
    fn array_references_are_not_rewritten_by_default() {
        let err = dedupe(flat(json!([{ "a": 1 }, { "a": 1 }]))).unwrap_err();
        match err {
            Error::UnimplementedRewrite { declaration, reference } => {
                assert_eq!(declaration, "Root");
                assert_eq!(reference, "T");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn array_references_rewrite_when_enabled() {
        let options = DedupeOptions { rewrite_arrays: true };
        let out = dedupe_with(flat(json!([{ "a": 1 }, { "a": 1 }])), options).unwrap();
        assert_eq!(names(&out), vec!["Root", "T2"]);
        let Some(Declaration::Array { elements, .. }) = out.declarations.get("Root") else { panic!() };
        assert_eq!(elements, &vec![Atom::Ref("T2".into()), Atom::Ref("T2".into())]);
    }

    #[test]
    fn arrays_without_stale_references_are_left_alone() {
        let out = dedupe(flat(json!({ "a": [1], "b": { "n": [1, 2] } }))).unwrap();
        assert!(out.replacements.is_empty());
        let Some(Declaration::Array { elements, .. }) = out.declarations.get("A") else { panic!() };
        assert_eq!(elements, &vec![Atom::Primitive(Primitive::Number)]);
    }
}
