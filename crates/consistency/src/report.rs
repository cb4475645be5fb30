//! Human-readable and JSON renditions of validation reports

use crate::error::ConsistencyResult;
use crate::validator::{BatchReport, ConsistencyReport, FormatResult};
use serde::Serialize;
use std::fmt::Write;

/// Serialize any report as pretty-printed JSON
pub fn to_json<T: Serialize>(report: &T) -> ConsistencyResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn format_line(out: &mut String, result: &FormatResult) {
    let name = result.format.extension().to_uppercase();
    let status = if result.is_valid() { "ok" } else { "FAILED" };
    let _ = writeln!(
        out,
        "  {:<5} {:<6} {:>9} bytes {:>9.1} ms",
        name, status, result.size_bytes, result.elapsed_ms
    );
    if let Some(ref error) = result.error {
        let _ = writeln!(out, "        {}", error);
    }
}

/// Render one report as plain text
pub fn render_text_report(report: &ConsistencyReport) -> String {
    let mut out = String::new();
    let verdict = if report.is_consistent {
        "consistent"
    } else {
        "INCONSISTENT"
    };
    let _ = writeln!(out, "{}: {}", report.title, verdict);

    let s = &report.structure;
    let _ = writeln!(
        out,
        "  structure: {} heading(s), {} paragraph(s), {} list(s) with {} item(s), {} page break(s), {} image(s)",
        s.heading_count,
        s.paragraph_count,
        s.list_count,
        s.list_item_count,
        s.page_break_count,
        s.image_count
    );

    format_line(&mut out, &report.pdf);
    format_line(&mut out, &report.docx);

    if let Some(pdf) = report.pdf_inspection {
        let _ = writeln!(out, "  pdf pages: {}", pdf.page_count);
    }
    if let Some(docx) = report.docx_inspection {
        let _ = writeln!(
            out,
            "  docx paragraphs: {}, page breaks: {}",
            docx.paragraph_count, docx.page_break_count
        );
    }

    for error in &report.errors {
        let _ = writeln!(out, "  error: {}", error);
    }
    for warning in &report.warnings {
        let _ = writeln!(out, "  warning: {}", warning);
    }

    out
}

/// Render a batch as plain text, one block per document plus a summary
pub fn render_batch_report(batch: &BatchReport) -> String {
    let mut out = String::new();
    for report in &batch.reports {
        out.push_str(&render_text_report(report));
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "{}/{} documents consistent ({:.1}%)",
        batch.consistent,
        batch.total,
        batch.consistency_rate * 100.0
    );
    out
}
