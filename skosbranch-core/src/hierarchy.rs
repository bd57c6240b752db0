//! Broader-concept adjacency derived from a triple store.
//!
//! Multi-parent hierarchies are directed graphs, not trees, so the index is a
//! petgraph [`DiGraph`] with one node per concept and one edge per
//! `narrower -> broader` link. Outgoing edges answer "broader of", incoming
//! edges answer "narrower of".

use crate::{Term, TripleStore};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Read-only mapping from each concept to its direct broader concepts.
///
/// # Example
///
/// ```rust
/// use skosbranch_core::{vocab, HierarchyIndex, Term, Triple, TripleStore};
///
/// let store = TripleStore::load(vec![
///     Triple::new("http://ex/C3", vocab::SKOS_BROADER, "http://ex/C2"),
///     Triple::new("http://ex/C3", vocab::SKOS_BROADER, "http://ex/C9"),
/// ])?;
/// let index = HierarchyIndex::build(&store, vocab::SKOS_BROADER);
///
/// let parents: Vec<_> = index.broader_of(&Term::iri("http://ex/C3")).collect();
/// assert_eq!(parents, vec![&Term::iri("http://ex/C2"), &Term::iri("http://ex/C9")]);
/// # Ok::<(), skosbranch_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct HierarchyIndex {
    /// Concept nodes; an edge `a -> b` means `a` has broader concept `b`.
    graph: DiGraph<Term, ()>,

    /// Map from concept term to node index.
    node_index: HashMap<Term, NodeIndex>,

    /// The predicate the index was built from.
    predicate: String,
}

impl HierarchyIndex {
    /// Build the index from every triple whose predicate is `hierarchy_predicate`.
    pub fn build(store: &TripleStore, hierarchy_predicate: &str) -> Self {
        let mut index = Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
            predicate: hierarchy_predicate.to_string(),
        };

        let mut skipped = 0usize;
        for triple in store.triples_with_predicate(hierarchy_predicate) {
            if !triple.object.is_resource() {
                warn!(
                    subject = %triple.subject,
                    object = %triple.object,
                    "hierarchy link points at a literal, ignoring it"
                );
                skipped += 1;
                continue;
            }
            let narrower = index.get_or_create(&triple.subject);
            let broader = index.get_or_create(&triple.object);
            // The store is deduplicated, so each link is seen once.
            index.graph.add_edge(narrower, broader, ());
        }

        debug!(
            predicate = hierarchy_predicate,
            concepts = index.graph.node_count(),
            links = index.graph.edge_count(),
            skipped,
            "built hierarchy index"
        );
        index
    }

    fn get_or_create(&mut self, term: &Term) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(term) {
            return idx;
        }
        let idx = self.graph.add_node(term.clone());
        self.node_index.insert(term.clone(), idx);
        idx
    }

    /// Direct broader concepts, in the order their links were loaded.
    ///
    /// Root and unknown concepts yield nothing.
    pub fn broader_of<'a>(&'a self, concept: &Term) -> impl Iterator<Item = &'a Term> + 'a {
        self.neighbors(concept, Direction::Outgoing)
    }

    /// Direct narrower concepts (inverse of [`broader_of`](Self::broader_of)).
    pub fn narrower_of<'a>(&'a self, concept: &Term) -> impl Iterator<Item = &'a Term> + 'a {
        self.neighbors(concept, Direction::Incoming)
    }

    fn neighbors<'a>(&'a self, concept: &Term, dir: Direction) -> impl Iterator<Item = &'a Term> + 'a {
        self.node(concept)
            .map(|idx| self.neighbor_indices(idx, dir))
            .unwrap_or_default()
            .into_iter()
            .map(move |n| &self.graph[n])
    }

    pub(crate) fn node(&self, concept: &Term) -> Option<NodeIndex> {
        self.node_index.get(concept).copied()
    }

    pub(crate) fn graph(&self) -> &DiGraph<Term, ()> {
        &self.graph
    }

    /// Neighbor node indices in link load order.
    pub(crate) fn neighbor_indices(&self, idx: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut found: Vec<NodeIndex> = self.graph.neighbors_directed(idx, dir).collect();
        // petgraph lists the most recently added edge first.
        found.reverse();
        found
    }

    /// Whether the concept takes part in any hierarchy link.
    pub fn contains(&self, concept: &Term) -> bool {
        self.node_index.contains_key(concept)
    }

    /// The predicate this index was built from.
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// Number of concepts linked by the hierarchy predicate.
    pub fn concept_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of hierarchy links.
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Concepts without a broader concept.
    pub fn roots(&self) -> impl Iterator<Item = &Term> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .map(|idx| &self.graph[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{vocab::SKOS_BROADER, Triple};

    fn iri(s: &str) -> Term {
        Term::iri(format!("http://ex/{s}"))
    }

    fn store() -> TripleStore {
        TripleStore::load(vec![
            Triple::new("http://ex/C3", SKOS_BROADER, "http://ex/C2"),
            Triple::new("http://ex/C2", SKOS_BROADER, "http://ex/C1"),
            Triple::new("http://ex/C4", SKOS_BROADER, "http://ex/C2"),
            Triple::new("http://ex/C3", "http://ex/related", "http://ex/C5"),
        ])
        .unwrap()
    }

    #[test]
    fn test_broader_of() {
        let index = HierarchyIndex::build(&store(), SKOS_BROADER);

        assert_eq!(index.broader_of(&iri("C3")).collect::<Vec<_>>(), vec![&iri("C2")]);
        assert_eq!(index.broader_of(&iri("C1")).count(), 0);
        assert_eq!(index.broader_of(&iri("C5")).count(), 0);
        assert_eq!(index.concept_count(), 4);
        assert_eq!(index.link_count(), 3);
    }

    #[test]
    fn test_narrower_of() {
        let index = HierarchyIndex::build(&store(), SKOS_BROADER);
        let children: Vec<_> = index.narrower_of(&iri("C2")).collect();
        assert_eq!(children, vec![&iri("C3"), &iri("C4")]);
    }

    #[test]
    fn test_predicate_is_configurable() {
        let index = HierarchyIndex::build(&store(), "http://ex/related");
        assert_eq!(index.predicate(), "http://ex/related");
        assert_eq!(index.broader_of(&iri("C3")).collect::<Vec<_>>(), vec![&iri("C5")]);
        assert!(!index.contains(&iri("C1")));
    }

    #[test]
    fn test_literal_objects_are_skipped() {
        let store = TripleStore::load(vec![Triple::new(
            "http://ex/C3",
            SKOS_BROADER,
            Term::literal("not a concept"),
        )])
        .unwrap();
        let index = HierarchyIndex::build(&store, SKOS_BROADER);
        assert_eq!(index.link_count(), 0);
    }

    #[test]
    fn test_roots() {
        let index = HierarchyIndex::build(&store(), SKOS_BROADER);
        let roots: Vec<_> = index.roots().collect();
        assert_eq!(roots, vec![&iri("C1")]);
    }
}
