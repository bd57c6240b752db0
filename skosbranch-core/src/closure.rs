//! Transitive closure over the hierarchy relation.
//!
//! The walk is a level-by-level breadth-first search. A node is enqueued only
//! the first time it is discovered, so every node is expanded at most once
//! and cycles in malformed input cannot stall the walk.
//!
//! - [`ancestors_of`] - target plus everything reachable via broader links
//! - [`ancestors_of_parallel`] - same result, one BFS level expanded across threads
//! - [`descendants_of`] - target plus everything reachable via narrower links

use crate::{Error, HierarchyIndex, Result, Term};
use oxiri::Iri;
use petgraph::graph::NodeIndex;
use petgraph::visit::{VisitMap, Visitable};
use petgraph::Direction;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// A concept and all concepts reachable from it, with hop distances.
///
/// The target is always a member at distance 0. Members iterate in discovery
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureSet {
    target: Term,
    order: Vec<Term>,
    hops: HashMap<Term, usize>,
}

impl ClosureSet {
    fn singleton(target: Term) -> Self {
        let mut hops = HashMap::new();
        hops.insert(target.clone(), 0);
        Self {
            order: vec![target.clone()],
            target,
            hops,
        }
    }

    fn insert(&mut self, term: Term, distance: usize) -> bool {
        if self.hops.contains_key(&term) {
            return false;
        }
        self.hops.insert(term.clone(), distance);
        self.order.push(term);
        true
    }

    /// The concept the walk started from.
    pub fn target(&self) -> &Term {
        &self.target
    }

    /// Whether `term` is a member.
    pub fn contains(&self, term: &Term) -> bool {
        self.hops.contains_key(term)
    }

    /// Hops from the target, if `term` is a member.
    pub fn hops(&self, term: &Term) -> Option<usize> {
        self.hops.get(term).copied()
    }

    /// Largest hop distance in the set.
    pub fn depth(&self) -> usize {
        self.hops.values().copied().max().unwrap_or(0)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false: the target is a member.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Members in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.order.iter()
    }

    /// Merge another walk from the same target into this one.
    pub fn union(self, other: &ClosureSet) -> Self {
        self.union_at(other, 0)
    }

    /// Merge a walk whose own target sits `offset` hops from this set's
    /// target. Hop counts are re-based on this target and the shorter
    /// distance wins for members present in both.
    pub fn union_at(mut self, other: &ClosureSet, offset: usize) -> Self {
        for term in other.iter() {
            let distance = other.hops(term).unwrap_or(0) + offset;
            match self.hops.get_mut(term) {
                Some(known) => *known = (*known).min(distance),
                None => {
                    self.insert(term.clone(), distance);
                }
            }
        }
        self
    }
}

/// Reject targets that cannot name a concept.
///
/// IRI targets must be absolute IRIs; blank nodes are accepted as-is.
pub fn validate_target(target: &Term) -> Result<()> {
    match target {
        Term::Iri(iri) => Iri::parse(iri.as_str())
            .map(|_| ())
            .map_err(|e| Error::UnknownTarget {
                iri: iri.clone(),
                reason: e.to_string(),
            }),
        Term::BlankNode(label) if label.is_empty() => Err(Error::UnknownTarget {
            iri: "_:".to_string(),
            reason: "empty blank node label".to_string(),
        }),
        Term::BlankNode(_) => Ok(()),
        Term::Literal(lit) => Err(Error::UnknownTarget {
            iri: lit.to_string(),
            reason: "a literal cannot be a concept".to_string(),
        }),
    }
}

/// The target and all of its transitive broader concepts.
///
/// A target that takes part in no hierarchy link yields `{target}`.
///
/// # Example
///
/// ```rust
/// use skosbranch_core::{ancestors_of, vocab, HierarchyIndex, Term, Triple, TripleStore};
///
/// let store = TripleStore::load(vec![
///     Triple::new("http://ex/A", vocab::SKOS_BROADER, "http://ex/B"),
///     Triple::new("http://ex/B", vocab::SKOS_BROADER, "http://ex/A"),
/// ])?;
/// let index = HierarchyIndex::build(&store, vocab::SKOS_BROADER);
///
/// let closure = ancestors_of(&Term::iri("http://ex/A"), &index)?;
/// assert_eq!(closure.len(), 2);
/// # Ok::<(), skosbranch_core::Error>(())
/// ```
pub fn ancestors_of(target: &Term, index: &HierarchyIndex) -> Result<ClosureSet> {
    validate_target(target)?;
    Ok(walk(target, index, Direction::Outgoing))
}

/// The target and all of its transitive narrower concepts.
pub fn descendants_of(target: &Term, index: &HierarchyIndex) -> Result<ClosureSet> {
    validate_target(target)?;
    Ok(walk(target, index, Direction::Incoming))
}

/// Like [`ancestors_of`], expanding each BFS level on the rayon pool.
///
/// Threads only read the index; the visited set is updated between levels,
/// so the result (including member order) equals the sequential walk.
pub fn ancestors_of_parallel(target: &Term, index: &HierarchyIndex) -> Result<ClosureSet> {
    validate_target(target)?;
    Ok(walk_parallel(target, index, Direction::Outgoing))
}

/// Like [`descendants_of`], expanding each BFS level on the rayon pool.
pub fn descendants_of_parallel(target: &Term, index: &HierarchyIndex) -> Result<ClosureSet> {
    validate_target(target)?;
    Ok(walk_parallel(target, index, Direction::Incoming))
}

fn walk(target: &Term, index: &HierarchyIndex, dir: Direction) -> ClosureSet {
    walk_levels(target, index, dir, |frontier| {
        frontier
            .iter()
            .map(|&node| index.neighbor_indices(node, dir))
            .collect()
    })
}

fn walk_parallel(target: &Term, index: &HierarchyIndex, dir: Direction) -> ClosureSet {
    walk_levels(target, index, dir, |frontier| {
        frontier
            .par_iter()
            .map(|&node| index.neighbor_indices(node, dir))
            .collect()
    })
}

/// Shared BFS driver. `expand` maps a frontier to the neighbors of each of
/// its nodes, in frontier order.
fn walk_levels<F>(target: &Term, index: &HierarchyIndex, dir: Direction, expand: F) -> ClosureSet
where
    F: Fn(&[NodeIndex]) -> Vec<Vec<NodeIndex>>,
{
    let mut closure = ClosureSet::singleton(target.clone());

    let Some(start) = index.node(target) else {
        debug!(concept = %target, "target has no hierarchy links");
        return closure;
    };

    let graph = index.graph();
    let mut visited = graph.visit_map();
    visited.visit(start);

    let mut frontier = vec![start];
    let mut level = 0usize;

    while !frontier.is_empty() {
        level += 1;
        let mut next = Vec::new();
        for neighbors in expand(&frontier) {
            for node in neighbors {
                // `visit` returns true only on first discovery.
                if visited.visit(node) {
                    closure.insert(graph[node].clone(), level);
                    next.push(node);
                }
            }
        }
        frontier = next;
    }

    debug!(
        concept = %target,
        direction = ?dir,
        members = closure.len(),
        depth = closure.depth(),
        "closure walk finished"
    );
    closure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{vocab::SKOS_BROADER, Triple, TripleStore};

    fn iri(s: &str) -> Term {
        Term::iri(format!("http://ex/{s}"))
    }

    fn index(links: &[(&str, &str)]) -> HierarchyIndex {
        let store = TripleStore::load(links.iter().map(|(s, o)| {
            Triple::new(format!("http://ex/{s}"), SKOS_BROADER, format!("http://ex/{o}"))
        }))
        .unwrap();
        HierarchyIndex::build(&store, SKOS_BROADER)
    }

    fn members(closure: &ClosureSet) -> Vec<&Term> {
        closure.iter().collect()
    }

    #[test]
    fn test_chain() {
        let idx = index(&[("C3", "C2"), ("C2", "C1")]);
        let closure = ancestors_of(&iri("C3"), &idx).unwrap();

        assert_eq!(members(&closure), vec![&iri("C3"), &iri("C2"), &iri("C1")]);
        assert_eq!(closure.hops(&iri("C1")), Some(2));
        assert_eq!(closure.depth(), 2);
    }

    #[test]
    fn test_cycle_terminates() {
        let idx = index(&[("A", "B"), ("B", "A")]);
        let closure = ancestors_of(&iri("A"), &idx).unwrap();

        assert_eq!(closure.len(), 2);
        assert!(closure.contains(&iri("A")));
        assert!(closure.contains(&iri("B")));
    }

    #[test]
    fn test_self_loop() {
        let idx = index(&[("A", "A")]);
        let closure = ancestors_of(&iri("A"), &idx).unwrap();
        assert_eq!(members(&closure), vec![&iri("A")]);
    }

    #[test]
    fn test_multiple_parents_diamond() {
        // D -> B, D -> C, B -> A, C -> A
        let idx = index(&[("D", "B"), ("D", "C"), ("B", "A"), ("C", "A")]);
        let closure = ancestors_of(&iri("D"), &idx).unwrap();

        assert_eq!(
            members(&closure),
            vec![&iri("D"), &iri("B"), &iri("C"), &iri("A")]
        );
        assert_eq!(closure.hops(&iri("A")), Some(2));
    }

    #[test]
    fn test_unlinked_target() {
        let idx = index(&[("C3", "C2")]);
        let closure = ancestors_of(&iri("Lonely"), &idx).unwrap();
        assert_eq!(members(&closure), vec![&iri("Lonely")]);
    }

    #[test]
    fn test_does_not_walk_downwards() {
        let idx = index(&[("C3", "C2"), ("C4", "C2")]);
        let closure = ancestors_of(&iri("C3"), &idx).unwrap();
        assert!(!closure.contains(&iri("C4")));
    }

    #[test]
    fn test_descendants() {
        let idx = index(&[("C3", "C2"), ("C4", "C2"), ("C2", "C1"), ("C5", "C4")]);
        let closure = descendants_of(&iri("C2"), &idx).unwrap();

        assert_eq!(
            members(&closure),
            vec![&iri("C2"), &iri("C3"), &iri("C4"), &iri("C5")]
        );
        assert!(!closure.contains(&iri("C1")));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let idx = index(&[
            ("L", "M1"),
            ("L", "M2"),
            ("M1", "R"),
            ("M2", "R"),
            ("R", "L"),
            ("M2", "X"),
        ]);
        let seq = ancestors_of(&iri("L"), &idx).unwrap();
        let par = ancestors_of_parallel(&iri("L"), &idx).unwrap();
        assert_eq!(seq, par);

        let seq = descendants_of(&iri("R"), &idx).unwrap();
        let par = descendants_of_parallel(&iri("R"), &idx).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_invalid_target() {
        let idx = index(&[("C3", "C2")]);
        let err = ancestors_of(&Term::iri("not a uri"), &idx);
        assert!(matches!(err, Err(Error::UnknownTarget { .. })));

        let err = ancestors_of(&Term::literal("C3"), &idx);
        assert!(matches!(err, Err(Error::UnknownTarget { .. })));
    }

    #[test]
    fn test_blank_node_target() {
        let closure = ancestors_of(&Term::blank("b0"), &index(&[])).unwrap();
        assert_eq!(closure.len(), 1);
    }

    #[test]
    fn test_union_keeps_target_and_order() {
        let idx = index(&[("C3", "C2"), ("C4", "C3")]);
        let up = ancestors_of(&iri("C3"), &idx).unwrap();
        let down = descendants_of(&iri("C3"), &idx).unwrap();
        let both = up.union(&down);

        assert_eq!(both.target(), &iri("C3"));
        assert_eq!(members(&both), vec![&iri("C3"), &iri("C2"), &iri("C4")]);
    }

    #[test]
    fn test_union_at_rebases_hops() {
        let idx = index(&[("M", "P1"), ("P1", "P2"), ("T", "P2")]);
        let from_target = ancestors_of(&iri("T"), &idx).unwrap();
        let from_member = ancestors_of(&iri("M"), &idx).unwrap();

        let merged = from_target.union_at(&from_member, 1);
        assert_eq!(merged.hops(&iri("M")), Some(1));
        assert_eq!(merged.hops(&iri("P1")), Some(2));
        // Reached in one hop from the target, three through the member.
        assert_eq!(merged.hops(&iri("P2")), Some(1));
        assert_eq!(merged.depth(), 2);
    }
}
