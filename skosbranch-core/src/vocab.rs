//! Vocabulary IRIs used by the extractor.

/// SKOS core namespace.
pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";

/// `skos:broader`, the default hierarchy predicate.
pub const SKOS_BROADER: &str = "http://www.w3.org/2004/02/skos/core#broader";
/// `skos:narrower`.
pub const SKOS_NARROWER: &str = "http://www.w3.org/2004/02/skos/core#narrower";
/// `skos:member`.
pub const SKOS_MEMBER: &str = "http://www.w3.org/2004/02/skos/core#member";
/// `skos:inScheme`.
pub const SKOS_IN_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#inScheme";
/// `skos:prefLabel`.
pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
/// `skos:Collection`.
pub const SKOS_COLLECTION: &str = "http://www.w3.org/2004/02/skos/core#Collection";
/// `skos:ConceptScheme`.
pub const SKOS_CONCEPT_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#ConceptScheme";

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

