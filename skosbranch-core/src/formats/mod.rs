//! RDF serialization formats.
//!
//! Parsing and serialization are delegated to Rio:
//! - N-Triples (line-based, simple)
//! - Turtle (human-readable)
//! - RDF/XML (the usual SKOS exchange format)
//!
//! Literal language tags and datatypes are carried through unchanged.
//! RDF 1.2 triple terms (quoted triples) are rejected.

mod ntriples;
mod rdfxml;
mod turtle;

pub use ntriples::NTriples;
pub use rdfxml::RdfXml;
pub use turtle::Turtle;

use crate::{Error, Literal, Result, Term, Triple};
use oxiri::Iri;
use rio_api::formatter::TriplesFormatter;
use rio_api::model;
use rio_api::parser::TriplesParser;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Supported serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdfFormat {
    /// N-Triples (`.nt`).
    NTriples,
    /// Turtle (`.ttl`).
    Turtle,
    /// RDF/XML (`.rdf`, `.xml`, `.owl`).
    RdfXml,
}

impl RdfFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "nt" => Ok(Self::NTriples),
            "ttl" => Ok(Self::Turtle),
            "rdf" | "xml" | "owl" => Ok(Self::RdfXml),
            _ => Err(Error::UnsupportedFormat(format!(
                "cannot infer RDF format from {}",
                path.display()
            ))),
        }
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::NTriples => "nt",
            Self::Turtle => "ttl",
            Self::RdfXml => "rdf",
        }
    }
}

/// Parse triples from a reader.
pub fn read<R: BufRead>(reader: R, format: RdfFormat, base_iri: Option<&str>) -> Result<Vec<Triple>> {
    match format {
        RdfFormat::NTriples => NTriples::read(reader),
        RdfFormat::Turtle => Turtle::read(reader, base_iri),
        RdfFormat::RdfXml => RdfXml::read(reader, base_iri),
    }
}

/// Parse a file, choosing the format from its extension.
///
/// Relative IRIs resolve against the file's own `file://` IRI.
pub fn read_path(path: impl AsRef<Path>) -> Result<Vec<Triple>> {
    let path = path.as_ref();
    let format = RdfFormat::from_path(path)?;
    let file = File::open(path)?;
    let base = file_iri(&fs::canonicalize(path)?);
    read(BufReader::new(file), format, Some(&base))
}

/// `file://` IRI of an absolute path, percent-encoding anything outside
/// the IRI path characters.
pub fn file_iri(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let mut iri = String::from("file://");
    if !raw.starts_with('/') {
        iri.push('/');
    }
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || "/-._~!$&'()*+,;=:@".contains(c) {
            iri.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                iri.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    iri
}

/// Serialize triples to a writer.
pub fn write<'a, W: Write>(
    triples: impl IntoIterator<Item = &'a Triple>,
    writer: W,
    format: RdfFormat,
) -> Result<()> {
    match format {
        RdfFormat::NTriples => NTriples::write(triples, writer),
        RdfFormat::Turtle => Turtle::write(triples, writer),
        RdfFormat::RdfXml => RdfXml::write(triples, writer),
    }
}

fn parse_base_iri(base_iri: Option<&str>) -> Result<Option<Iri<String>>> {
    base_iri
        .map(|base| {
            Iri::parse(base.to_string())
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e).into())
        })
        .transpose()
}

/// Drain a Rio parser into owned triples.
fn collect_triples<P>(mut parser: P) -> Result<Vec<Triple>>
where
    P: TriplesParser,
    Error: From<P::Error>,
{
    let mut triples = Vec::new();
    parser.parse_all(&mut |t| -> Result<()> {
        triples.push(from_rio(&t)?);
        Ok(())
    })?;
    Ok(triples)
}

/// Feed owned triples into a Rio formatter.
fn format_triples<'a, F>(formatter: &mut F, triples: impl IntoIterator<Item = &'a Triple>) -> Result<()>
where
    F: TriplesFormatter,
    Error: From<F::Error>,
{
    for triple in triples {
        formatter.format(&to_rio(triple)?)?;
    }
    Ok(())
}

fn from_rio(triple: &model::Triple<'_>) -> Result<Triple> {
    let subject = match triple.subject {
        model::Subject::NamedNode(n) => Term::Iri(n.iri.to_string()),
        model::Subject::BlankNode(b) => Term::BlankNode(b.id.to_string()),
        model::Subject::Triple(t) => return Err(Error::UnsupportedTerm(format!("<< {t} >>"))),
    };

    let object = match triple.object {
        model::Term::NamedNode(n) => Term::Iri(n.iri.to_string()),
        model::Term::BlankNode(b) => Term::BlankNode(b.id.to_string()),
        model::Term::Literal(model::Literal::Simple { value }) => Term::Literal(Literal::simple(value)),
        model::Term::Literal(model::Literal::LanguageTaggedString { value, language }) => {
            Term::Literal(Literal::lang(value, language))
        }
        model::Term::Literal(model::Literal::Typed { value, datatype }) => {
            Term::Literal(Literal::typed(value, datatype.iri))
        }
        model::Term::Triple(t) => return Err(Error::UnsupportedTerm(format!("<< {t} >>"))),
    };

    Ok(Triple {
        subject,
        predicate: triple.predicate.iri.to_string(),
        object,
    })
}

fn to_rio(triple: &Triple) -> Result<model::Triple<'_>> {
    let subject = match &triple.subject {
        Term::Iri(iri) => model::Subject::NamedNode(model::NamedNode { iri }),
        Term::BlankNode(id) => model::Subject::BlankNode(model::BlankNode { id }),
        Term::Literal(_) => {
            return Err(Error::MalformedTriple(format!("literal subject in {triple}")));
        }
    };

    let object = match &triple.object {
        Term::Iri(iri) => model::Term::NamedNode(model::NamedNode { iri }),
        Term::BlankNode(id) => model::Term::BlankNode(model::BlankNode { id }),
        Term::Literal(lit) => model::Term::Literal(match (&lit.language, &lit.datatype) {
            (Some(language), _) => model::Literal::LanguageTaggedString {
                value: &lit.value,
                language,
            },
            (None, Some(datatype)) => model::Literal::Typed {
                value: &lit.value,
                datatype: model::NamedNode { iri: datatype },
            },
            (None, None) => model::Literal::Simple { value: &lit.value },
        }),
    };

    Ok(model::Triple {
        subject,
        predicate: model::NamedNode {
            iri: &triple.predicate,
        },
        object,
    })
}
