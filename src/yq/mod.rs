//! yq module - assertion helpers that query YAML documents.
//!
//! Text inputs may hold several `---` separated documents; the expression is
//! evaluated against each of them. Other inputs go through the conversion
//! pipeline and count as a single document.

mod matcher;
mod support;
mod transform;

pub use matcher::*;
pub use support::decode_documents;
pub use transform::*;
