//! Extract the subbranch of a SKOS concept hierarchy.
//!
//! Given a thesaurus and a target concept, this crate keeps the target, all of
//! its transitive broader concepts, and every triple that describes them:
//!
//! - [`TripleStore`] - deduplicated triples with subject and predicate indexes
//! - [`HierarchyIndex`] - concept -> broader/narrower adjacency for one predicate
//! - [`ancestors_of`] - breadth-first transitive closure from the target
//! - [`project`] - the triples that survive, given a closure
//! - [`extract`] / [`run`] - the whole pipeline, in memory or file to file
//!
//! # Example
//!
//! ```rust
//! use skosbranch_core::{ancestors_of, project, vocab, HierarchyIndex, Term, Triple, TripleStore};
//!
//! let store = TripleStore::load(vec![
//!     Triple::new("http://ex/C3", vocab::SKOS_BROADER, "http://ex/C2"),
//!     Triple::new("http://ex/C2", vocab::SKOS_BROADER, "http://ex/C1"),
//!     Triple::new("http://ex/C3", vocab::SKOS_PREF_LABEL, Term::lang_literal("Leaf", "en")),
//!     Triple::new("http://ex/C5", vocab::SKOS_PREF_LABEL, Term::literal("Unrelated")),
//! ])?;
//!
//! let index = HierarchyIndex::build(&store, vocab::SKOS_BROADER);
//! let closure = ancestors_of(&Term::iri("http://ex/C3"), &index)?;
//! assert_eq!(closure.len(), 3);
//!
//! let kept = project(&store, &closure, vocab::SKOS_BROADER);
//! assert_eq!(kept.len(), 3);
//! # Ok::<(), skosbranch_core::Error>(())
//! ```
//!
//! # Files
//!
//! ```rust,ignore
//! use skosbranch_core::{default_output_path, run, ExtractConfig};
//! use std::path::Path;
//!
//! let input = Path::new("thesaurus.rdf");
//! let config = ExtractConfig::new("http://vocab.example.org/C3");
//! let report = run(input, &default_output_path(input), None, &config)?;
//! println!("kept {} triples", report.retained_triples);
//! ```

mod closure;
mod error;
mod hierarchy;
mod pipeline;
mod project;
mod store;
mod term;
mod triple;

pub mod filters;
pub mod formats;
pub mod vocab;

pub use closure::{
    ancestors_of, ancestors_of_parallel, descendants_of, descendants_of_parallel, validate_target,
    ClosureSet,
};
pub use error::{Error, Result};
pub use formats::RdfFormat;
pub use hierarchy::HierarchyIndex;
pub use pipeline::{
    default_output_path, extract, load_path, run, suffixed_path, write_atomic, ExtractConfig,
    Extraction, ExtractionReport, SchemeRetention,
};
pub use project::{project, Projector, RetentionPolicy};
pub use store::{StoreStats, TripleStore};
pub use term::{Literal, Term};
pub use triple::Triple;

// Re-export petgraph for callers walking the hierarchy graph directly.
pub use petgraph;
