//! Triple type for RDF graphs.
//!
//! A triple represents a (subject, predicate, object) statement.

use crate::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (subject, predicate, object) triple.
///
/// This is the fundamental unit of a graph. Equality is structural, so two
/// triples whose objects differ only in language tag are distinct.
///
/// # Example
///
/// ```rust
/// use skosbranch_core::{Term, Triple};
///
/// let triple = Triple::new(
///     "http://example.org/C3",
///     "http://www.w3.org/2004/02/skos/core#prefLabel",
///     Term::lang_literal("Leaf", "en"),
/// );
/// assert_eq!(triple.subject.as_iri(), Some("http://example.org/C3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    /// Subject (IRI or blank node).
    pub subject: Term,

    /// Predicate IRI.
    pub predicate: String,

    /// Object term.
    pub object: Term,
}

impl Triple {
    /// Create a new triple.
    pub fn new(
        subject: impl Into<Term>,
        predicate: impl Into<String>,
        object: impl Into<Term>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Convert to an N-Triples line.
    pub fn to_ntriples(&self) -> String {
        format!("{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, <{}>, {})", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triple_creation() {
        let t = Triple::new("http://ex/C3", "http://ex/broader", "http://ex/C2");
        assert_eq!(t.subject, Term::iri("http://ex/C3"));
        assert_eq!(t.predicate, "http://ex/broader");
        assert_eq!(t.object, Term::iri("http://ex/C2"));
    }

    #[test]
    fn test_to_ntriples() {
        let t = Triple::new("_:b1", "http://ex/label", Term::lang_literal("Root", "en"));
        assert_eq!(t.to_ntriples(), r#"_:b1 <http://ex/label> "Root"@en ."#);
    }
}
