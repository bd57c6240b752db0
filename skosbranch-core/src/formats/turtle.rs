//! Turtle format (RDF 1.2).
//!
//! Human-readable RDF serialization with prefix support.
//!
//! Reference: <https://www.w3.org/TR/rdf12-turtle/>
//!
//! Example:
//! ```turtle
//! @prefix skos: <http://www.w3.org/2004/02/skos/core#> .
//!
//! <http://example.org/C3> skos:broader <http://example.org/C2> ;
//!     skos:prefLabel "Leaf"@en .
//! ```

use super::{collect_triples, format_triples, parse_base_iri};
use crate::{Result, Triple};
use rio_turtle::{TurtleFormatter, TurtleParser};
use std::io::{BufRead, Write};

/// Turtle format handler.
pub struct Turtle;

impl Turtle {
    /// Parse Turtle from a reader using Rio.
    pub fn read<R: BufRead>(reader: R, base_iri: Option<&str>) -> Result<Vec<Triple>> {
        collect_triples(TurtleParser::new(reader, parse_base_iri(base_iri)?))
    }

    /// Write triples in Turtle format using Rio.
    ///
    /// Rio writes full IRIs; consecutive triples sharing a subject are grouped.
    pub fn write<'a, W: Write>(triples: impl IntoIterator<Item = &'a Triple>, writer: W) -> Result<()> {
        let mut formatter = TurtleFormatter::new(writer);
        format_triples(&mut formatter, triples)?;
        formatter.finish()?;
        Ok(())
    }

    /// Convert to string.
    pub fn to_string(triples: &[Triple]) -> Result<String> {
        let mut buf = Vec::new();
        Self::write(triples, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).to_string())
    }
}
