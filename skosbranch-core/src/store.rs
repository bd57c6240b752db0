//! In-memory triple store with subject and predicate indexes.

use crate::{Error, Result, Term, Triple};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A deduplicated set of triples, indexed by subject and by predicate.
///
/// The store is built once by [`TripleStore::load`] and never mutated
/// afterwards. Iteration order is the order in which triples were first
/// seen, which keeps projection and serialization deterministic.
///
/// # Example
///
/// ```rust
/// use skosbranch_core::{Term, Triple, TripleStore};
///
/// let store = TripleStore::load(vec![
///     Triple::new("http://ex/C3", "http://ex/broader", "http://ex/C2"),
///     Triple::new("http://ex/C3", "http://ex/broader", "http://ex/C2"),
///     Triple::new("http://ex/C3", "http://ex/label", Term::literal("Leaf")),
/// ])?;
///
/// assert_eq!(store.len(), 2);
/// assert_eq!(store.triples_for(&Term::iri("http://ex/C3")).count(), 2);
/// # Ok::<(), skosbranch_core::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TripleStore {
    /// All distinct triples, in first-seen order.
    triples: Vec<Triple>,

    /// Subject -> positions in `triples`.
    by_subject: HashMap<Term, Vec<usize>>,

    /// Predicate IRI -> positions in `triples`.
    by_predicate: HashMap<String, Vec<usize>>,
}

impl TripleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest triples, dropping duplicates, and build both indexes.
    ///
    /// Fails on the first triple whose subject or predicate is empty.
    pub fn load(triples: impl IntoIterator<Item = Triple>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut distinct = Vec::new();
        let mut duplicates = 0usize;

        for triple in triples {
            if triple.subject.is_empty_resource() || !triple.subject.is_resource() {
                return Err(Error::MalformedTriple(format!(
                    "empty or non-resource subject in {triple}"
                )));
            }
            if triple.predicate.is_empty() {
                return Err(Error::MalformedTriple(format!(
                    "empty predicate in {triple}"
                )));
            }
            if seen.insert(triple.clone()) {
                distinct.push(triple);
            } else {
                duplicates += 1;
            }
        }

        // The two indexes are independent views over the same input.
        let (by_subject, by_predicate) = rayon::join(
            || index_by(&distinct, |t| t.subject.clone()),
            || index_by(&distinct, |t| t.predicate.clone()),
        );

        debug!(
            triples = distinct.len(),
            duplicates,
            subjects = by_subject.len(),
            predicates = by_predicate.len(),
            "loaded triple store"
        );

        Ok(Self {
            triples: distinct,
            by_subject,
            by_predicate,
        })
    }

    /// Triples having `subject` as subject.
    pub fn triples_for<'a>(&'a self, subject: &Term) -> impl Iterator<Item = &'a Triple> + 'a {
        self.lookup(self.by_subject.get(subject))
    }

    /// Triples with the given predicate IRI.
    pub fn triples_with_predicate<'a>(
        &'a self,
        predicate: &str,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.lookup(self.by_predicate.get(predicate))
    }

    fn lookup<'a>(&'a self, positions: Option<&'a Vec<usize>>) -> impl Iterator<Item = &'a Triple> + 'a {
        positions
            .into_iter()
            .flatten()
            .map(move |&i| &self.triples[i])
    }

    /// Whether the exact triple is present.
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples_for(&triple.subject).any(|t| t == triple)
    }

    /// Subjects declared `rdf:type <class>`, in first-seen order.
    pub fn subjects_of_type<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples_with_predicate(crate::vocab::RDF_TYPE)
            .filter(move |t| t.object.as_iri() == Some(class))
            .map(|t| &t.subject)
    }

    /// Number of distinct triples.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether the store holds no triples.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over all triples.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// All triples as a slice.
    pub fn as_slice(&self) -> &[Triple] {
        &self.triples
    }

    /// Compute statistics about the store.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            triple_count: self.triples.len(),
            subject_count: self.by_subject.len(),
            predicate_count: self.by_predicate.len(),
        }
    }

    /// Distinct predicates with their triple counts, sorted by IRI.
    pub fn predicate_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<_> = self
            .by_predicate
            .iter()
            .map(|(p, positions)| (p.as_str(), positions.len()))
            .collect();
        counts.sort_unstable();
        counts
    }
}

fn index_by<K, F>(triples: &[Triple], key: F) -> HashMap<K, Vec<usize>>
where
    K: std::hash::Hash + Eq,
    F: Fn(&Triple) -> K,
{
    let mut index: HashMap<K, Vec<usize>> = HashMap::new();
    for (i, triple) in triples.iter().enumerate() {
        index.entry(key(triple)).or_default().push(i);
    }
    index
}

/// Statistics about a triple store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of distinct triples.
    pub triple_count: usize,
    /// Number of distinct subjects.
    pub subject_count: usize,
    /// Number of distinct predicates.
    pub predicate_count: usize,
}
