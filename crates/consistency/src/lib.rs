//! Consistency - Cross-format validation of rendered documents
//!
//! Runs the PDF and DOCX renderers over one parsed element sequence and
//! compares the results:
//!
//! - `analysis`: structural statistics of the element sequence
//! - `inspect`: page and paragraph counts read back from rendered bytes
//! - `validator`: timed renders, signature checks and threshold comparisons
//! - `policy`: the thresholds, loadable from JSON
//! - `report`: human-readable and JSON output
//!
//! This is a verification path. The production pipeline never depends on it.

mod analysis;
mod error;
mod inspect;
mod policy;
mod report;
mod validator;

pub use analysis::{analyze_structure, HierarchySkip, StructureAnalysis};
pub use error::{ConsistencyError, ConsistencyResult};
pub use inspect::{inspect_docx, inspect_pdf, DocxInspection, PdfInspection};
pub use policy::ConsistencyPolicy;
pub use report::{render_batch_report, render_text_report, to_json};
pub use validator::{
    validate_batch, validate_consistency, BatchReport, ConsistencyReport, ConsistencyValidator,
    FormatResult,
};
