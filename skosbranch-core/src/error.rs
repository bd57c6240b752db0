//! Error types for skosbranch-core.

use thiserror::Error;

/// Error type for extraction operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A triple with an empty subject or predicate reached the store.
    #[error("Malformed triple: {0}")]
    MalformedTriple(String),

    /// The target concept is not a syntactically valid IRI.
    #[error("Unknown target concept {iri:?}: {reason}")]
    UnknownTarget {
        /// The rejected target.
        iri: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The hierarchy predicate is not a syntactically valid IRI.
    #[error("Invalid hierarchy predicate {iri:?}: {reason}")]
    InvalidPredicate {
        /// The rejected predicate.
        iri: String,
        /// Why it was rejected.
        reason: String,
    },

    /// N-Triples or Turtle syntax error.
    #[error("Turtle syntax error: {0}")]
    Turtle(#[from] rio_turtle::TurtleError),

    /// RDF/XML syntax error.
    #[error("RDF/XML syntax error: {0}")]
    RdfXml(#[from] rio_xml::RdfXmlError),

    /// Term kinds the store cannot hold (RDF-star quoted triples).
    #[error("Unsupported term: {0}")]
    UnsupportedTerm(String),

    /// Unknown serialization format.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Config file error.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
