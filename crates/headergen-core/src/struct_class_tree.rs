//! Inheritance index built while parsing structs and classes
//!
//! A linear top-down walk only encounters the bases written directly on each
//! class. Bases declared in included headers (or earlier in the file) are never
//! walked again, so the class parser re-visits each newly discovered base and
//! records its own links here, keeping multi-level chains complete.

use crate::entity::AccessSpecifier;
use std::collections::{HashMap, HashSet};

/// Child → parent link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceLink {
    pub parent: String,
    pub access: AccessSpecifier,
}

/// Flattened child → parents index keyed by fully qualified name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructClassTree {
    links: HashMap<String, Vec<InheritanceLink>>,
}

impl StructClassTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `child : access parent`.
    ///
    /// Returns `false` when the link was already known.
    pub fn add_link(
        &mut self,
        child: impl Into<String>,
        parent: impl Into<String>,
        access: AccessSpecifier,
    ) -> bool {
        let parent = parent.into();
        let parents = self.links.entry(child.into()).or_default();

        if parents.iter().any(|link| link.parent == parent) {
            return false;
        }

        parents.push(InheritanceLink { parent, access });
        true
    }

    /// Whether `name` has been recorded as a child
    pub fn contains(&self, name: &str) -> bool {
        self.links.contains_key(name)
    }

    /// Direct parents in declaration order
    pub fn parents_of(&self, name: &str) -> &[InheritanceLink] {
        self.links.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every direct and indirect base, depth first in declaration order, without duplicates
    pub fn all_bases(&self, name: &str) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut bases = Vec::new();
        self.collect_bases(name, &mut visited, &mut bases);
        bases
    }

    /// Whether `base` is a direct or indirect base of `derived`
    pub fn is_base_of(&self, base: &str, derived: &str) -> bool {
        self.all_bases(derived).iter().any(|b| b == base)
    }

    pub fn len(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn collect_bases(&self, name: &str, visited: &mut HashSet<String>, out: &mut Vec<String>) {
        for link in self.parents_of(name) {
            if visited.insert(link.parent.clone()) {
                out.push(link.parent.clone());
                self.collect_bases(&link.parent, visited, out);
            }
        }
    }
}

#[cfg(test)]
#[path = "struct_class_tree/struct_class_tree_tests.rs"]
mod struct_class_tree_tests;
