//! This module provides the Annotation map attached to metabolites and reactions

use indexmap::IndexMap;

/// MIRIAM style annotations, mapping a namespace (e.g. "kegg.compound", "sbo") to the
/// identifiers annotated under it
///
/// Model files store annotation values either as a single string or as a list of strings,
/// both are normalized to a list here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Annotation {
    entries: IndexMap<String, Vec<String>>,
}

impl Annotation {
    pub fn new() -> Self {
        Annotation {
            entries: IndexMap::new(),
        }
    }

    /// Add an identifier under a namespace
    pub fn insert(&mut self, namespace: &str, identifier: &str) {
        self.entries
            .entry(namespace.to_string())
            .or_default()
            .push(identifier.to_string());
    }

    /// Get all identifiers annotated under a namespace
    ///
    /// Returns an empty slice if the namespace is absent.
    pub fn get(&self, namespace: &str) -> &[String] {
        self.entries.get(namespace).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `identifier` is annotated under `namespace`
    pub fn contains(&self, namespace: &str, identifier: &str) -> bool {
        self.get(namespace).iter().any(|id| id == identifier)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut ann = Annotation::new();
        ann.insert("kegg.compound", "C00031");
        ann.insert("kegg.compound", "C00221");
        ann.insert("sbo", "SBO:0000247");
        assert_eq!(ann.get("kegg.compound"), &["C00031", "C00221"]);
        assert_eq!(ann.get("sbo"), &["SBO:0000247"]);
        assert!(ann.get("chebi").is_empty());
    }

    #[test]
    fn contains() {
        let mut ann = Annotation::new();
        ann.insert("sbo", "SBO:0000629");
        assert!(ann.contains("sbo", "SBO:0000629"));
        assert!(!ann.contains("sbo", "SBO:0000247"));
        assert!(!ann.contains("kegg.compound", "SBO:0000629"));
    }
}
