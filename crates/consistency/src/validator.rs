//! Cross-format consistency validation
//!
//! Parses the input once, renders it in both formats one after the
//! other, and compares the outputs. Renders are sequential so the timing
//! of one is not skewed by the other.

use crate::analysis::{analyze_structure, StructureAnalysis};
use crate::inspect::{inspect_docx, inspect_pdf, DocxInspection, PdfInspection};
use crate::policy::ConsistencyPolicy;
use doc_model::DocumentElement;
use export::{decode_data_uri, render, to_data_uri, Format};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Outcome of rendering one format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatResult {
    pub format: Format,
    /// The renderer returned bytes
    pub success: bool,
    /// The data URI prefix and the leading magic bytes are correct
    pub valid_signature: bool,
    pub size_bytes: usize,
    pub elapsed_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FormatResult {
    pub fn is_valid(&self) -> bool {
        self.success && self.valid_signature
    }
}

/// Result of validating one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    pub title: String,
    /// No errors and both outputs valid
    pub is_consistent: bool,
    pub structure: StructureAnalysis,
    pub pdf: FormatResult,
    pub docx: FormatResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_inspection: Option<PdfInspection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docx_inspection: Option<DocxInspection>,
    /// Quality signals that do not affect consistency
    pub warnings: Vec<String>,
    /// Failures that make the report inconsistent
    pub errors: Vec<String>,
}

/// Aggregate result of a batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub total: usize,
    pub consistent: usize,
    /// Share of consistent documents, 1.0 for an empty batch
    pub consistency_rate: f64,
    pub reports: Vec<ConsistencyReport>,
}

impl BatchReport {
    fn from_reports(reports: Vec<ConsistencyReport>) -> Self {
        let total = reports.len();
        let consistent = reports.iter().filter(|r| r.is_consistent).count();
        let consistency_rate = if total == 0 {
            1.0
        } else {
            consistent as f64 / total as f64
        };
        Self {
            total,
            consistent,
            consistency_rate,
            reports,
        }
    }
}

/// Validator with configurable thresholds
#[derive(Debug, Clone, Default)]
pub struct ConsistencyValidator {
    policy: ConsistencyPolicy,
}

impl ConsistencyValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ConsistencyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ConsistencyPolicy {
        &self.policy
    }

    /// Validate one document given as HTML (or plain text) and a title
    pub async fn validate(&self, html: &str, title: &str) -> ConsistencyReport {
        let imported = html_import::import(html, title);
        let mut warnings: Vec<String> = imported
            .validation
            .errors
            .iter()
            .map(|e| format!("Input: {}", e))
            .collect();

        let mut report = self.validate_elements(&imported.elements, title).await;
        warnings.append(&mut report.warnings);
        report.warnings = warnings;
        report
    }

    /// Validate an already parsed element sequence
    pub async fn validate_elements(
        &self,
        elements: &[DocumentElement],
        title: &str,
    ) -> ConsistencyReport {
        let structure = analyze_structure(elements);
        let mut warnings = structure.warnings.clone();
        let mut errors = Vec::new();

        let (pdf, pdf_bytes) = timed_render(elements, Format::Pdf).await;
        let (docx, docx_bytes) = timed_render(elements, Format::Docx).await;

        for result in [&pdf, &docx] {
            let name = result.format.extension().to_uppercase();
            match (&result.error, result.valid_signature) {
                (Some(e), _) => errors.push(e.clone()),
                (None, false) => errors.push(format!("{} output has an invalid signature", name)),
                (None, true) => {}
            }
        }

        self.compare_metrics(&pdf, &docx, &mut warnings);

        let pdf_inspection = pdf.is_valid().then(|| inspect_pdf(&pdf_bytes));
        let docx_inspection = if docx.is_valid() {
            match inspect_docx(&docx_bytes) {
                Ok(inspection) => Some(inspection),
                Err(e) => {
                    warnings.push(format!("DOCX package could not be inspected: {}", e));
                    None
                }
            }
        } else {
            None
        };

        if let (Some(p), Some(d)) = (&pdf_inspection, &docx_inspection) {
            compare_structure(&structure, p, d, &mut warnings);
        }

        let is_consistent = errors.is_empty() && pdf.is_valid() && docx.is_valid();
        if is_consistent {
            tracing::debug!("Document '{}' is consistent ({} warning(s))", title, warnings.len());
        } else {
            tracing::warn!("Document '{}' is inconsistent: {}", title, errors.join("; "));
        }

        ConsistencyReport {
            title: title.to_string(),
            is_consistent,
            structure,
            pdf,
            docx,
            pdf_inspection,
            docx_inspection,
            warnings,
            errors,
        }
    }

    /// Validate many documents one after another
    pub async fn validate_batch<C, T>(&self, documents: &[(C, T)]) -> BatchReport
    where
        C: AsRef<str>,
        T: AsRef<str>,
    {
        let mut reports = Vec::with_capacity(documents.len());
        for (content, title) in documents {
            reports.push(self.validate(content.as_ref(), title.as_ref()).await);
        }

        let batch = BatchReport::from_reports(reports);
        tracing::info!(
            "Batch validation: {}/{} consistent",
            batch.consistent,
            batch.total
        );
        batch
    }

    fn compare_metrics(&self, pdf: &FormatResult, docx: &FormatResult, warnings: &mut Vec<String>) {
        if !(pdf.success && docx.success) {
            return;
        }

        let skew = (pdf.elapsed_ms - docx.elapsed_ms).abs();
        if skew > self.policy.max_time_skew_ms as f64 {
            warnings.push(format!(
                "Render time skew of {:.0} ms exceeds {} ms (PDF {:.1} ms, DOCX {:.1} ms)",
                skew, self.policy.max_time_skew_ms, pdf.elapsed_ms, docx.elapsed_ms
            ));
        }

        let smaller = pdf.size_bytes.min(docx.size_bytes);
        let larger = pdf.size_bytes.max(docx.size_bytes);
        if smaller > 0 {
            let ratio = larger as f64 / smaller as f64;
            if ratio > self.policy.max_size_ratio {
                warnings.push(format!(
                    "Output size ratio {:.2} exceeds {:.2} (PDF {} bytes, DOCX {} bytes)",
                    ratio, self.policy.max_size_ratio, pdf.size_bytes, docx.size_bytes
                ));
            }
        }
    }
}

/// Page-break parity between the parsed sequence and both outputs
fn compare_structure(
    structure: &StructureAnalysis,
    pdf: &PdfInspection,
    docx: &DocxInspection,
    warnings: &mut Vec<String>,
) {
    if !docx.has_document {
        warnings.push("DOCX package has no main document part".to_string());
        return;
    }
    if docx.page_break_count != structure.page_break_count {
        warnings.push(format!(
            "DOCX has {} page break(s), document has {}",
            docx.page_break_count, structure.page_break_count
        ));
    }
    // Explicit breaks are a lower bound; long content adds pages of its own
    if pdf.page_count < docx.page_break_count + 1 {
        warnings.push(format!(
            "PDF has {} page(s) for {} explicit page break(s)",
            pdf.page_count, docx.page_break_count
        ));
    }
}

/// Render one format, timing it and checking the encoded output
async fn timed_render(elements: &[DocumentElement], format: Format) -> (FormatResult, Vec<u8>) {
    let start = Instant::now();
    let rendered = render(elements, format).await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    match rendered {
        Ok(bytes) => {
            let uri = to_data_uri(format, &bytes);
            let valid_signature = uri.starts_with(format.data_uri_prefix())
                && decode_data_uri(&uri)
                    .map(|(decoded, raw)| decoded == format && format.has_signature(&raw))
                    .unwrap_or(false);
            let result = FormatResult {
                format,
                success: true,
                valid_signature,
                size_bytes: bytes.len(),
                elapsed_ms,
                error: None,
            };
            (result, bytes)
        }
        Err(e) => {
            let result = FormatResult {
                format,
                success: false,
                valid_signature: false,
                size_bytes: 0,
                elapsed_ms,
                error: Some(e.to_string()),
            };
            (result, Vec::new())
        }
    }
}

/// Validate one document with the default policy
pub async fn validate_consistency(html: &str, title: &str) -> ConsistencyReport {
    ConsistencyValidator::new().validate(html, title).await
}

/// Validate many documents with the default policy
pub async fn validate_batch<C, T>(documents: &[(C, T)]) -> BatchReport
where
    C: AsRef<str>,
    T: AsRef<str>,
{
    ConsistencyValidator::new().validate_batch(documents).await
}
