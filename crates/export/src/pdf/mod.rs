//! PDF Export Module
//!
//! Converts a document element sequence into a PDF 1.4 file.
//!
//! # Architecture
//!
//! - `objects`: PDF object model (Dictionary, Array, Stream, Reference)
//! - `document`: PDF document structure (Catalog, Pages, Info)
//! - `content`: Content stream generation (text operators)
//! - `fonts`: Standard Helvetica faces, metrics and WinAnsi encoding
//! - `layout`: Pagination and line wrapping of elements
//! - `writer`: File structure, xref table and compression
//! - `options`: PDF export configuration
//! - `api`: Public API for PDF export

mod api;
mod content;
mod document;
mod fonts;
mod layout;
mod objects;
mod options;
mod writer;

pub use api::*;
pub use fonts::FontFace;
pub use layout::{layout_document, wrap_text, LaidOutPage, LayoutContext, PlacedText};
pub use options::*;
pub use writer::{PdfError, PdfResult};
