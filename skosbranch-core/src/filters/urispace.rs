//! URI-space inference.
//!
//! The URI space of a vocabulary is the base IRI its concepts are minted
//! under, e.g. `http://vocab.example.org/thesaurus/`. It is inferred as the
//! most common prefix of the form `scheme://host/` followed by up to four
//! path segments, counted over IRI subjects.

use crate::{Term, TripleStore};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

fn prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(https?://[^/]+(?:/[^/]+){0,4}/)").expect("static pattern is valid")
    })
}

/// The URI-space prefix of a single IRI, if it has one.
pub fn urispace_of(iri: &str) -> Option<&str> {
    prefix_pattern()
        .captures(iri)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Most common URI-space prefix over all IRI subjects (one vote per triple).
///
/// Ties go to the prefix seen first. Returns `None` when no subject matches.
///
/// # Example
///
/// ```rust
/// use skosbranch_core::{filters::find_urispace, Term, Triple, TripleStore};
///
/// let store = TripleStore::load(vec![
///     Triple::new("http://ex.org/voc/C1", "http://ex.org/p", Term::literal("a")),
///     Triple::new("http://ex.org/voc/C2", "http://ex.org/p", Term::literal("b")),
///     Triple::new("http://other.org/x/C9", "http://ex.org/p", Term::literal("c")),
/// ])?;
/// assert_eq!(find_urispace(&store).as_deref(), Some("http://ex.org/voc/"));
/// # Ok::<(), skosbranch_core::Error>(())
/// ```
pub fn find_urispace(store: &TripleStore) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();

    for (position, triple) in store.iter().enumerate() {
        let Term::Iri(iri) = &triple.subject else {
            continue;
        };
        if let Some(prefix) = urispace_of(iri) {
            counts.entry(prefix).or_insert((0, position)).0 += 1;
        }
    }

    let best = counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(prefix, _)| prefix.to_string());

    debug!(urispace = ?best, "inferred URI space");
    best
}
