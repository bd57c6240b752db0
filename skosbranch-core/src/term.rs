//! RDF terms.
//!
//! A [`Term`] is an IRI, a blank node, or a literal. Literals keep their
//! language tag and datatype so that a serialized subgraph carries them
//! through unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal value with optional language tag or datatype IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    /// Lexical form.
    pub value: String,
    /// Language tag, e.g. `en` or `de-AT`.
    pub language: Option<String>,
    /// Datatype IRI (absent for simple and language-tagged literals).
    pub datatype: Option<String>,
}

impl Literal {
    /// A plain literal without tag or datatype.
    pub fn simple(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// A language-tagged literal.
    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    /// A typed literal.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: Some(datatype.into()),
        }
    }

    /// Whether the language tag is one of `languages` (case-insensitive).
    pub fn has_language_in(&self, languages: &[String]) -> bool {
        self.language
            .as_deref()
            .is_some_and(|tag| languages.iter().any(|l| l.eq_ignore_ascii_case(tag)))
    }
}

/// An RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    /// An IRI reference.
    Iri(String),
    /// A blank node, identified by its label (without `_:`).
    BlankNode(String),
    /// A literal.
    Literal(Literal),
}

impl Term {
    /// Create an IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        Self::Iri(iri.into())
    }

    /// Create a blank node term.
    pub fn blank(label: impl Into<String>) -> Self {
        Self::BlankNode(label.into())
    }

    /// Create a simple literal term.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(Literal::simple(value))
    }

    /// Create a language-tagged literal term.
    pub fn lang_literal(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self::Literal(Literal::lang(value, language))
    }

    /// The IRI, if this is one.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// The literal, if this is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// IRIs and blank nodes can be subjects; literals cannot.
    pub fn is_resource(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }

    /// True for an empty IRI or blank-node label.
    pub(crate) fn is_empty_resource(&self) -> bool {
        match self {
            Self::Iri(iri) => iri.is_empty(),
            Self::BlankNode(label) => label.is_empty(),
            Self::Literal(_) => false,
        }
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        match s.strip_prefix("_:") {
            Some(label) => Self::BlankNode(label.to_string()),
            None => Self::Iri(s.to_string()),
        }
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for c in self.value.chars() {
            match c {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\r' => write!(f, "\\r")?,
                _ => write!(f, "{c}")?,
            }
        }
        write!(f, "\"")?;
        if let Some(lang) = &self.language {
            write!(f, "@{lang}")
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^<{dt}>")
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::BlankNode(label) => write!(f, "_:{label}"),
            Self::Literal(lit) => write!(f, "{lit}"),
        }
    }
}
