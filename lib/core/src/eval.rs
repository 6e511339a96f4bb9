use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

/// Truth values of named atoms. Atoms missing from the assignment are false.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: BTreeMap<String, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        self.values.insert(name.into(), value);
    }

    pub fn with(mut self, name: impl Into<String>, value: bool) -> Self {
        self.set(name, value);
        self
    }

    pub fn value(&self, name: &str) -> bool {
        self.values.get(name).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(name, &value)| (name.as_str(), value))
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut assignment = Assignment::new();
        for (name, value) in iter {
            assignment.set(name, value);
        }
        assignment
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.values.iter().format_with(", ", |(name, value), f| f(&format_args!("{name}={}", u8::from(*value))))
        )
    }
}

/// Enumerates all `2^n` assignments of the given atoms, starting from all-false.
pub fn assignments(atoms: &[String]) -> impl Iterator<Item = Assignment> + '_ {
    assert!(atoms.len() < 64, "too many atoms to enumerate: {}", atoms.len());
    (0..(1u64 << atoms.len())).map(move |mask| {
        atoms
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), mask & (1 << i) != 0))
            .collect()
    })
}

/// Extends `base` with every assignment of `extra` atoms.
pub fn extensions<'a>(base: &'a Assignment, extra: &'a [String]) -> impl Iterator<Item = Assignment> + 'a {
    assignments(extra).map(move |ext| {
        let mut full = base.clone();
        for (name, value) in ext.iter() {
            full.set(name, value);
        }
        full
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_atoms_are_false() {
        let a = Assignment::new().with("A", true);
        assert!(a.value("A"));
        assert!(!a.value("B"));
    }

    #[test]
    fn test_enumerate_all_assignments() {
        let atoms = names(&["A", "B", "C"]);
        let all: Vec<Assignment> = assignments(&atoms).collect();
        assert_eq!(all.len(), 8);
        assert!(all.iter().map(|a| a.to_string()).all_unique());
        assert_eq!(all[0].to_string(), "{A=0, B=0, C=0}");
        assert_eq!(all[7].to_string(), "{A=1, B=1, C=1}");
    }

    #[test]
    fn test_enumerate_no_atoms() {
        assert_eq!(assignments(&[]).count(), 1);
    }

    #[test]
    fn test_extensions_keep_base() {
        let base = Assignment::new().with("A", true);
        let extra = names(&["p1", "p2"]);
        let all: Vec<Assignment> = extensions(&base, &extra).collect();
        assert_eq!(all.len(), 4);
        assert!(all.iter().all(|a| a.value("A")));
    }
}
