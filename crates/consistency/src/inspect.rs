//! Read structural facts back out of rendered bytes

use crate::error::ConsistencyResult;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read};
use zip::result::ZipError;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Facts read from a PDF file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfInspection {
    pub page_count: usize,
}

/// Count the page objects of a PDF.
///
/// Matches `/Type /Page` dictionary entries but not the `/Type /Pages` tree
/// root. String literals, comments and stream data are skipped, so a title
/// or content text spelling `/Type /Page` is not counted.
pub fn inspect_pdf(bytes: &[u8]) -> PdfInspection {
    const NEEDLE: &[u8] = b"/Type /Page";
    const STREAM: &[u8] = b"stream";
    const END_STREAM: &[u8] = b"endstream";

    let mut page_count = 0;
    let mut i = 0;
    while i < bytes.len() {
        let rest = &bytes[i..];
        match bytes[i] {
            b'(' => i += string_literal_len(rest),
            b'%' => i += rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len()),
            _ if rest.starts_with(NEEDLE) => {
                if rest.get(NEEDLE.len()) != Some(&b's') {
                    page_count += 1;
                }
                i += NEEDLE.len();
            }
            _ if rest.starts_with(STREAM) => {
                i += STREAM.len();
                i += find(&bytes[i..], END_STREAM)
                    .map_or(bytes.len() - i, |at| at + END_STREAM.len());
            }
            _ => i += 1,
        }
    }

    PdfInspection { page_count }
}

/// Length of the literal string at the start of `bytes`, parentheses included
fn string_literal_len(bytes: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Facts read from a DOCX package
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocxInspection {
    pub has_document: bool,
    pub paragraph_count: usize,
    pub page_break_count: usize,
}

/// Open a DOCX package and count paragraphs and explicit page breaks
pub fn inspect_docx(bytes: &[u8]) -> ConsistencyResult<DocxInspection> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut xml = String::new();
    match archive.by_name(DOCUMENT_PART) {
        Ok(mut file) => {
            file.read_to_string(&mut xml)?;
        }
        Err(ZipError::FileNotFound) => return Ok(DocxInspection::default()),
        Err(e) => return Err(e.into()),
    }

    let mut inspection = DocxInspection {
        has_document: true,
        ..Default::default()
    };

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(ref e) | Event::Empty(ref e) => match e.name().as_ref() {
                b"w:p" => inspection.paragraph_count += 1,
                b"w:br" if is_page_break(e) => inspection.page_break_count += 1,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(inspection)
}

fn is_page_break(e: &BytesStart<'_>) -> bool {
    e.attributes()
        .filter_map(|a| a.ok())
        .any(|a| a.key.as_ref() == b"w:type" && a.value.as_ref() == b"page")
}
