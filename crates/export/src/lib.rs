//! Export - Rendering document elements to PDF and DOCX
//!
//! Both renderers consume the same borrowed element sequence and read
//! every measurement from [`render_model::RenderConfig`]:
//!
//! - `pdf`: explicit pagination onto US Letter pages, PDF 1.4 output
//! - `docx`: flow layout in a WordprocessingML package
//! - `format`: output formats and data URI encoding
//! - `pipeline`: the production path from HTML to a data URI
//!
//! Renderers degrade into a visibly marked error document instead of
//! failing; only a failure to build that fallback reaches the caller.

mod error;
mod format;
mod pipeline;

pub mod docx;
pub mod pdf;

pub use error::{ExportError, ExportResult};
pub use format::{decode_data_uri, to_data_uri, Format};
pub use pipeline::{generate_document, render, render_both};
