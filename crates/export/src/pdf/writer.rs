//! PDF Writer
//!
//! This module handles the actual PDF file generation, including:
//! - Object numbering and cross-reference table
//! - File structure (header, body, xref, trailer)
//! - Compression support

use super::content::ContentStream;
use super::document::{create_catalog, create_page, create_pages, DocumentInfo};
use super::fonts::{create_font_dict, FontFace};
use super::layout::LaidOutPage;
use super::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use super::options::PdfExportOptions;
use doc_model::DocModelError;
use render_model::{PageGeometry, RenderError};
use std::collections::BTreeSet;
use std::io::{self, Write};
use thiserror::Error;

/// PDF version written in the header
pub const PDF_VERSION: &str = "1.4";

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Invalid document structure
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// An element violates the document model
    #[error("Invalid element: {0}")]
    Element(#[from] DocModelError),
    /// Configuration could not be applied to the page
    #[error("Layout error: {0}")]
    Layout(#[from] RenderError),
}

/// Result type for PDF operations
pub type PdfResult<T> = std::result::Result<T, PdfError>;

/// Byte offset of a written object
#[derive(Debug, Clone, Copy)]
struct ObjectEntry {
    obj_num: u32,
    offset: u64,
}

/// PDF file writer
pub struct PdfWriter<W: Write> {
    /// Output writer
    writer: W,
    /// Current byte position
    position: u64,
    /// Objects in the file
    objects: Vec<ObjectEntry>,
    /// Next object number
    next_obj_num: u32,
    /// Whether to compress streams
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    /// Create a new PDF writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            objects: Vec::new(),
            next_obj_num: 1,
            compress: true,
        }
    }

    /// Set whether to compress streams
    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    /// Write bytes and update position
    fn write_bytes(&mut self, data: &[u8]) -> PdfResult<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> PdfResult<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Allocate a new object number
    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    /// Write the PDF header
    pub fn write_header(&mut self) -> PdfResult<()> {
        self.write_str(&format!("%PDF-{}\n", PDF_VERSION))?;
        // Binary marker so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: &PdfObject) -> PdfResult<()> {
        let offset = self.position;

        self.write_str(&format!("{} 0 obj\n", obj_num))?;

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(object)?;
        self.write_bytes(&serializer.into_inner())?;

        self.write_str("\nendobj\n")?;

        self.objects.push(ObjectEntry { obj_num, offset });
        Ok(())
    }

    /// Write a stream object, compressing it when enabled
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> PdfResult<()> {
        if self.compress && !stream.compressed {
            stream = compress_stream(stream)?;
        }

        stream.dict.insert("Length", stream.data.len() as i64);
        self.write_object(obj_num, &PdfObject::Stream(stream))
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: u32) -> PdfResult<()> {
        let xref_offset = self.position;

        self.objects.sort_by_key(|e| e.obj_num);
        let entries = self.objects.clone();
        let size = self.next_obj_num;

        self.write_str("xref\n")?;
        self.write_str(&format!("0 {}\n", size))?;
        self.write_str("0000000000 65535 f \n")?;

        let mut expected_num = 1u32;
        for entry in entries {
            // Allocated but never written objects are listed as free
            while expected_num < entry.obj_num {
                self.write_str("0000000000 65535 f \n")?;
                expected_num += 1;
            }
            self.write_str(&format!("{:010} 00000 n \n", entry.offset))?;
            expected_num = entry.obj_num + 1;
        }

        self.write_str("trailer\n")?;

        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", i64::from(size));
        trailer.insert("Root", PdfObject::Reference(catalog_ref));
        trailer.insert("Info", PdfObject::Reference(info_ref));

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&trailer.into())?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str("\n")?;

        self.write_str("startxref\n")?;
        self.write_str(&format!("{}\n", xref_offset))?;
        self.write_str("%%EOF\n")?;

        Ok(())
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> PdfResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Compress a stream using flate compression
fn compress_stream(mut stream: PdfStream) -> PdfResult<PdfStream> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&stream.data)?;
    stream.data = encoder.finish()?;
    stream.compressed = true;
    stream.dict.insert("Filter", PdfObject::name("FlateDecode"));

    Ok(stream)
}

/// Faces drawn anywhere in the document, in resource order
fn used_faces(pages: &[LaidOutPage]) -> Vec<FontFace> {
    let faces: BTreeSet<FontFace> = pages
        .iter()
        .flat_map(|p| p.lines.iter().map(|l| l.face))
        .collect();
    if faces.is_empty() {
        vec![FontFace::Regular]
    } else {
        faces.into_iter().collect()
    }
}

/// Draw the lines of a page into a content stream
fn page_content(page: &LaidOutPage) -> ContentStream {
    let mut content = ContentStream::new();
    for line in page.lines.iter().filter(|l| !l.text.is_empty()) {
        content.text_line(&line.text, line.face, line.size, line.x, line.y);
    }
    content
}

/// Write laid-out pages as a complete PDF file
pub fn write_document(
    pages: &[LaidOutPage],
    info: &DocumentInfo,
    geometry: &PageGeometry,
    options: &PdfExportOptions,
) -> PdfResult<Vec<u8>> {
    if pages.is_empty() {
        return Err(PdfError::InvalidDocument("No pages to export".to_string()));
    }

    let mut pdf = PdfWriter::new(Vec::new());
    pdf.set_compression(options.compress);
    pdf.write_header()?;

    let catalog_ref = pdf.allocate_object();
    let pages_ref = pdf.allocate_object();
    let info_ref = pdf.allocate_object();

    let font_refs: Vec<(FontFace, u32)> = used_faces(pages)
        .into_iter()
        .map(|face| (face, pdf.allocate_object()))
        .collect();

    let page_refs: Vec<(u32, u32)> = pages
        .iter()
        .map(|_| (pdf.allocate_object(), pdf.allocate_object()))
        .collect();

    pdf.write_object(catalog_ref, &create_catalog(pages_ref).into())?;

    let kids: Vec<u32> = page_refs.iter().map(|(page_ref, _)| *page_ref).collect();
    pdf.write_object(pages_ref, &create_pages(&kids).into())?;
    pdf.write_object(info_ref, &info.to_dictionary().into())?;

    for (face, font_ref) in &font_refs {
        pdf.write_object(*font_ref, &create_font_dict(*face).into())?;
    }

    for (page, (page_ref, content_ref)) in pages.iter().zip(&page_refs) {
        let stream = PdfStream::new(page_content(page).into_bytes());
        pdf.write_stream_object(*content_ref, stream)?;

        let page_dict = create_page(geometry, pages_ref, *content_ref, &font_refs);
        pdf.write_object(*page_ref, &page_dict.into())?;
    }

    pdf.write_xref_and_trailer(catalog_ref, info_ref)?;
    pdf.finish()
}
