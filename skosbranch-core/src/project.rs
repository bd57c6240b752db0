//! Subgraph projection: decide which triples survive extraction.
//!
//! A triple survives only when its subject is kept. Object membership never
//! pulls a triple in, whatever the predicate: a concept outside the closure
//! that points at a kept concept (through `skos:related`, or through its own
//! `skos:broader` link) stays out, so the extract holds only its own concepts.
//! Hierarchy links between kept concepts survive through their subject.

use crate::vocab::{SKOS_BROADER, SKOS_NARROWER};
use crate::{ClosureSet, Term, Triple, TripleStore};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Project `store` onto a closure with the plain retention rule.
///
/// Equivalent to `Projector::new(hierarchy_predicate).project(store, closure)`.
///
/// # Example
///
/// ```rust
/// use skosbranch_core::{ancestors_of, project, vocab, HierarchyIndex, Term, Triple, TripleStore};
///
/// let store = TripleStore::load(vec![
///     Triple::new("http://ex/C3", vocab::SKOS_BROADER, "http://ex/C2"),
///     Triple::new("http://ex/C5", "http://ex/related", "http://ex/C3"),
/// ])?;
/// let index = HierarchyIndex::build(&store, vocab::SKOS_BROADER);
/// let closure = ancestors_of(&Term::iri("http://ex/C3"), &index)?;
///
/// let kept = project(&store, &closure, vocab::SKOS_BROADER);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].subject, Term::iri("http://ex/C3"));
/// # Ok::<(), skosbranch_core::Error>(())
/// ```
pub fn project(store: &TripleStore, closure: &ClosureSet, hierarchy_predicate: &str) -> Vec<Triple> {
    Projector::new(hierarchy_predicate).project(store, closure)
}

/// Knobs on top of the plain retention rule. The default adds nothing.
#[derive(Debug, Clone, Default)]
pub struct RetentionPolicy {
    /// Subjects kept in addition to the closure members (e.g. concept schemes).
    pub extra_subjects: HashSet<Term>,

    /// Drop hierarchy-family links (the hierarchy predicate, `skos:broader`,
    /// `skos:narrower`) whose object is not kept.
    pub prune_dangling: bool,
}

/// Applies the retention rule to every triple of a store.
#[derive(Debug, Clone)]
pub struct Projector {
    hierarchy_predicate: String,
    policy: RetentionPolicy,
}

impl Projector {
    /// A projector with the default policy.
    pub fn new(hierarchy_predicate: impl Into<String>) -> Self {
        Self {
            hierarchy_predicate: hierarchy_predicate.into(),
            policy: RetentionPolicy::default(),
        }
    }

    /// Replace the retention policy.
    pub fn with_policy(mut self, policy: RetentionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The policy in effect.
    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    fn is_hierarchy_family(&self, predicate: &str) -> bool {
        predicate == self.hierarchy_predicate
            || predicate == SKOS_BROADER
            || predicate == SKOS_NARROWER
    }

    /// Whether a single triple survives. Depends only on the triple and the
    /// (immutable) closure, never on other triples.
    pub fn retains(&self, closure: &ClosureSet, triple: &Triple) -> bool {
        self.retains_by(&|t: &Term| closure.contains(t), triple)
    }

    fn retains_by(&self, member: &(dyn Fn(&Term) -> bool + Sync), triple: &Triple) -> bool {
        let kept = |t: &Term| member(t) || self.policy.extra_subjects.contains(t);

        if !kept(&triple.subject) {
            return false;
        }
        !(self.policy.prune_dangling
            && self.is_hierarchy_family(&triple.predicate)
            && !kept(&triple.object))
    }

    /// Retained triples, in store order.
    pub fn project(&self, store: &TripleStore, closure: &ClosureSet) -> Vec<Triple> {
        self.project_by(store, &|t: &Term| closure.contains(t))
    }

    /// Like [`project`](Self::project) with a plain set standing in for a closure.
    pub fn project_members(&self, store: &TripleStore, members: &HashSet<Term>) -> Vec<Triple> {
        self.project_by(store, &|t: &Term| members.contains(t))
    }

    fn project_by(&self, store: &TripleStore, member: &(dyn Fn(&Term) -> bool + Sync)) -> Vec<Triple> {
        let kept: Vec<Triple> = store
            .as_slice()
            .par_iter()
            .filter(|t| self.retains_by(member, t))
            .cloned()
            .collect();

        debug!(
            input = store.len(),
            retained = kept.len(),
            dropped = store.len() - kept.len(),
            "projected subgraph"
        );
        kept
    }
}
