//! Stateless graph filters that sit next to subbranch extraction.
//!
//! - [`find_urispace`] - infer the base IRI concepts are minted under
//! - [`LanguageFilter`] - keep concepts labelled in chosen languages

mod language;
mod urispace;

pub use language::LanguageFilter;
pub use urispace::{find_urispace, urispace_of};
