//! RDF/XML format.
//!
//! Most published SKOS thesauri are distributed as RDF/XML.
//!
//! Reference: <https://www.w3.org/TR/rdf-syntax-grammar/>

use super::{collect_triples, format_triples, parse_base_iri};
use crate::{Result, Triple};
use rio_xml::{RdfXmlFormatter, RdfXmlParser};
use std::io::{BufRead, Write};

/// RDF/XML format handler.
pub struct RdfXml;

impl RdfXml {
    /// Parse RDF/XML from a reader using Rio.
    pub fn read<R: BufRead>(reader: R, base_iri: Option<&str>) -> Result<Vec<Triple>> {
        collect_triples(RdfXmlParser::new(reader, parse_base_iri(base_iri)?))
    }

    /// Write triples as RDF/XML using Rio.
    ///
    /// Every predicate IRI must split into a namespace and an XML local name.
    pub fn write<'a, W: Write>(triples: impl IntoIterator<Item = &'a Triple>, writer: W) -> Result<()> {
        let mut formatter = RdfXmlFormatter::with_indentation(writer, 2)?;
        format_triples(&mut formatter, triples)?;
        formatter.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Term};

    const SKOS_DOC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:skos="http://www.w3.org/2004/02/skos/core#">
  <skos:Concept rdf:about="http://example.org/C3">
    <skos:prefLabel xml:lang="en">Leaf</skos:prefLabel>
    <skos:broader rdf:resource="http://example.org/C2"/>
  </skos:Concept>
</rdf:RDF>
"#;

    #[test]
    fn test_read_skos_concept() {
        let triples = RdfXml::read(SKOS_DOC.as_bytes(), None).unwrap();

        // rdf:type from the typed node element, plus label and broader.
        assert_eq!(triples.len(), 3);
        assert!(triples.contains(&Triple::new(
            "http://example.org/C3",
            "http://www.w3.org/2004/02/skos/core#prefLabel",
            Term::lang_literal("Leaf", "en"),
        )));
    }

    #[test]
    fn test_write_then_read() {
        let triples = RdfXml::read(SKOS_DOC.as_bytes(), None).unwrap();
        let mut buf = Vec::new();
        RdfXml::write(&triples, &mut buf).unwrap();

        let reparsed = RdfXml::read(buf.as_slice(), None).unwrap();
        assert_eq!(reparsed.len(), triples.len());
        for t in &triples {
            assert!(reparsed.contains(t), "lost {t}");
        }
    }

    #[test]
    fn test_syntax_error() {
        let err = RdfXml::read("<rdf:RDF".as_bytes(), None);
        assert!(matches!(err, Err(Error::RdfXml(_))));
    }
}
