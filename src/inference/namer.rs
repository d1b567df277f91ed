use std::collections::{HashMap, HashSet};

/// Name reserved for the first composite of a run.
pub const ROOT_NAME: &str = "Root";

/// Base token for composites without a field name (array elements).
const DEFAULT_BASE: &str = "T";

/// Per-run naming context.
///
/// The first composite is always `Root`. Every later composite is named after
/// its field, capitalized, with a numeric suffix from the second use onwards
/// (`person`, `person` → `Person`, `Person2`). `Root` is pre-counted so a field
/// called `root` becomes `Root2`.
#[derive(Clone, Debug)]
pub struct Namer {
    named_root: bool,
    counts: HashMap<String, u32>,
    issued: HashSet<String>,
}

impl Default for Namer {
    fn default() -> Self { Self::new() }
}

impl Namer {
    pub fn new() -> Self {
        Self {
            named_root: false,
            counts: HashMap::from([(ROOT_NAME.to_string(), 1)]),
            issued: HashSet::new(),
        }
    }

    pub fn next_name(&mut self, field_name: Option<&str>) -> String {
        if !self.named_root {
            self.named_root = true;
            self.issued.insert(ROOT_NAME.to_string());
            return ROOT_NAME.to_string();
        }
        let base = capitalize_first(field_name.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_BASE));
        // a suffixed name can coincide with a field that already looks
        // suffixed (`t2`), so skip anything handed out before
        loop {
            let count = self.counts.entry(base.clone()).or_insert(0);
            *count += 1;
            let candidate = if *count == 1 { base.clone() } else { format!("{base}{count}") };
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Forget every name handed out so far.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Number of names handed out since construction or the last reset.
    pub fn issued(&self) -> usize { self.issued.len() }
}

fn capitalize_first(x: &str) -> String {
    let mut chars = x.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_name_is_root_regardless_of_field() {
        let mut namer = Namer::new();
        assert_eq!(namer.next_name(Some("person")), "Root");
        assert_eq!(namer.next_name(Some("person")), "Person");
        assert_eq!(namer.next_name(Some("person")), "Person2");
        assert_eq!(namer.next_name(Some("person")), "Person3");
    }

    #[test]
    fn unnamed_composites_use_default_base() {
        let mut namer = Namer::new();
        namer.next_name(None);
        assert_eq!(namer.next_name(None), "T");
        assert_eq!(namer.next_name(None), "T2");
        assert_eq!(namer.next_name(Some("")), "T3");
    }

    #[test]
    fn root_field_does_not_collide_with_root() {
        let mut namer = Namer::new();
        namer.next_name(None);
        assert_eq!(namer.next_name(Some("root")), "Root2");
    }

    #[test]
    fn suffixed_field_names_stay_unique() {
        let mut namer = Namer::new();
        namer.next_name(None);
        assert_eq!(namer.next_name(Some("t2")), "T2");
        assert_eq!(namer.next_name(None), "T");
        assert_eq!(namer.next_name(None), "T3");
        assert_eq!(namer.issued(), 4);
    }

    #[test]
    fn reset_starts_over() {
        let mut namer = Namer::new();
        namer.next_name(None);
        namer.next_name(Some("person"));
        namer.reset();
        assert_eq!(namer.issued(), 0);
        assert_eq!(namer.next_name(Some("person")), "Root");
        assert_eq!(namer.next_name(Some("person")), "Person");
    }

    #[test]
    fn capitalizes_only_the_first_char() {
        assert_eq!(capitalize_first("fooBar"), "FooBar");
        assert_eq!(capitalize_first("1"), "1");
        assert_eq!(capitalize_first("ßeta"), "SSeta");
        assert_eq!(capitalize_first(""), "");
    }
}
