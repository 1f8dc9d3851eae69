pub mod pdf_reader;

pub use pdf_reader::PdfTokenReader;

use anyhow::Result;

use crate::core::model::TokenDocument;

/// Boundary to the positioned-text extractor. The resolution engine
/// only ever sees a `TokenDocument`, so tests and alternative readers
/// can substitute in-memory documents.
pub trait TokenSource {
    fn extract(&self) -> Result<TokenDocument>;
}
