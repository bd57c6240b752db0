//! N-Triples format (RDF 1.2).
//!
//! Line-based, simple format for RDF triples.
//! Each line is: `<subject> <predicate> <object> .`
//!
//! Reference: <https://www.w3.org/TR/rdf12-n-triples/>

use super::{collect_triples, format_triples};
use crate::{Result, Triple};
use rio_turtle::{NTriplesFormatter, NTriplesParser};
use std::io::{BufRead, Write};

/// N-Triples format handler.
pub struct NTriples;

impl NTriples {
    /// Parse N-Triples from a reader using Rio.
    pub fn read<R: BufRead>(reader: R) -> Result<Vec<Triple>> {
        collect_triples(NTriplesParser::new(reader))
    }

    /// Write triples in N-Triples format using Rio.
    pub fn write<'a, W: Write>(triples: impl IntoIterator<Item = &'a Triple>, writer: W) -> Result<()> {
        let mut formatter = NTriplesFormatter::new(writer);
        format_triples(&mut formatter, triples)?;
        formatter.finish()?;
        Ok(())
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Vec<Triple>> {
        Self::read(s.as_bytes())
    }

    /// Convert to string.
    pub fn to_string(triples: &[Triple]) -> Result<String> {
        let mut buf = Vec::new();
        Self::write(triples, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).to_string())
    }
}
