//! Language filtering.
//!
//! Keeps the concepts that have a `skos:prefLabel` in one of the requested
//! languages, together with their broader ancestors so the hierarchy stays
//! connected. Hierarchy links to dropped concepts are pruned. Optionally,
//! literals of kept subjects tagged with any other language are dropped too.

use crate::closure::ancestors_of;
use crate::project::{Projector, RetentionPolicy};
use crate::vocab::{SKOS_BROADER, SKOS_PREF_LABEL};
use crate::{HierarchyIndex, Result, Term, Triple, TripleStore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// Language filter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageFilter {
    /// Language tags to keep, e.g. `["en", "es"]`. Compared case-insensitively.
    pub languages: Vec<String>,

    /// Keep literals of kept subjects that are tagged with other languages.
    pub keep_other_languages: bool,
}

impl LanguageFilter {
    /// Filter for `languages`, keeping other-language literals.
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
            keep_other_languages: true,
        }
    }

    /// Set whether other-language literals survive.
    pub fn keep_other_languages(mut self, keep: bool) -> Self {
        self.keep_other_languages = keep;
        self
    }

    /// Concepts with a matching `skos:prefLabel`, in store order.
    pub fn labelled_concepts<'a>(&'a self, store: &'a TripleStore) -> impl Iterator<Item = &'a Term> + 'a {
        let mut seen = HashSet::new();
        store
            .triples_with_predicate(SKOS_PREF_LABEL)
            .filter(move |t| {
                t.object
                    .as_literal()
                    .is_some_and(|lit| lit.has_language_in(&self.languages))
            })
            .map(|t| &t.subject)
            .filter(move |s| seen.insert(*s))
    }

    /// Apply the filter to a store.
    pub fn apply(&self, store: &TripleStore) -> Result<Vec<Triple>> {
        let index = HierarchyIndex::build(store, SKOS_BROADER);

        let mut keep: HashSet<Term> = HashSet::new();
        for concept in self.labelled_concepts(store) {
            if keep.contains(concept) {
                continue;
            }
            keep.extend(ancestors_of(concept, &index)?.iter().cloned());
        }

        let kept_subjects = keep.len();
        let policy = RetentionPolicy {
            prune_dangling: true,
            ..RetentionPolicy::default()
        };
        let projected = Projector::new(SKOS_BROADER)
            .with_policy(policy)
            .project_members(store, &keep);

        let triples: Vec<Triple> = if self.keep_other_languages {
            projected
        } else {
            projected
                .into_iter()
                .filter(|t| match t.object.as_literal() {
                    Some(lit) if lit.language.is_some() => lit.has_language_in(&self.languages),
                    _ => true,
                })
                .collect()
        };

        info!(
            languages = ?self.languages,
            concepts = kept_subjects,
            retained = triples.len(),
            dropped = store.len() - triples.len(),
            "language filter applied"
        );
        Ok(triples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::SKOS_NARROWER;

    fn ex(s: &str) -> String {
        format!("http://ex/{s}")
    }

    fn store() -> TripleStore {
        TripleStore::load(vec![
            // C3 (en) -> C2 (de only) -> C1 (none)
            Triple::new(ex("C3"), SKOS_BROADER, ex("C2")),
            Triple::new(ex("C2"), SKOS_BROADER, ex("C1")),
            Triple::new(ex("C3"), SKOS_PREF_LABEL, Term::lang_literal("Leaf", "en")),
            Triple::new(ex("C3"), SKOS_PREF_LABEL, Term::lang_literal("Blatt", "de")),
            Triple::new(ex("C2"), SKOS_PREF_LABEL, Term::lang_literal("Ast", "de")),
            Triple::new(ex("C2"), SKOS_NARROWER, ex("C4")),
            // C4 has no English label and is dropped.
            Triple::new(ex("C4"), SKOS_BROADER, ex("C2")),
            Triple::new(ex("C4"), SKOS_PREF_LABEL, Term::lang_literal("Zweig", "de")),
            Triple::new(ex("C1"), "http://ex/note", Term::literal("untagged")),
        ])
        .unwrap()
    }

    #[test]
    fn test_keeps_labelled_concepts_and_ancestors() {
        let triples = LanguageFilter::new(["en"]).apply(&store()).unwrap();

        assert!(triples.contains(&Triple::new(ex("C3"), SKOS_BROADER, ex("C2"))));
        assert!(triples.contains(&Triple::new(ex("C2"), SKOS_BROADER, ex("C1"))));
        assert!(triples.contains(&Triple::new(ex("C2"), SKOS_PREF_LABEL, Term::lang_literal("Ast", "de"))));
        assert!(triples.contains(&Triple::new(ex("C1"), "http://ex/note", Term::literal("untagged"))));
        // Dangling narrower link and the unlabelled sibling are gone.
        assert!(!triples.iter().any(|t| t.subject == Term::iri(ex("C4")) || t.object == Term::iri(ex("C4"))));
        assert_eq!(triples.len(), 6);
    }

    #[test]
    fn test_drop_other_languages() {
        let triples = LanguageFilter::new(["EN"])
            .keep_other_languages(false)
            .apply(&store())
            .unwrap();

        assert!(triples.contains(&Triple::new(ex("C3"), SKOS_PREF_LABEL, Term::lang_literal("Leaf", "en"))));
        assert!(!triples.iter().any(|t| t
            .object
            .as_literal()
            .is_some_and(|l| l.language.as_deref() == Some("de"))));
        // Untagged literals are not language-specific and stay.
        assert!(triples.contains(&Triple::new(ex("C1"), "http://ex/note", Term::literal("untagged"))));
    }

    #[test]
    fn test_labelled_concepts_are_unique() {
        let store = store();
        let filter = LanguageFilter::new(["en", "de"]);
        let concepts: Vec<_> = filter.labelled_concepts(&store).collect();
        assert_eq!(concepts, vec![&Term::iri(ex("C3")), &Term::iri(ex("C2")), &Term::iri(ex("C4"))]);
    }

    #[test]
    fn test_no_match_keeps_nothing() {
        let triples = LanguageFilter::new(["fr"]).apply(&store()).unwrap();
        assert!(triples.is_empty());
    }
}
