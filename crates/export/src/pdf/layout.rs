//! Page layout for the PDF renderer
//!
//! Elements are placed top to bottom onto US Letter pages. The cursor is
//! measured from the top edge of the page; it is flipped into PDF user
//! space (origin bottom-left) when a line is placed.

use super::fonts::{text_width, FontFace};
use super::writer::PdfResult;
use doc_model::{DocumentElement, ElementKind, ListKind};
use render_model::{image_placeholder, list_prefix, BlockStyle, RenderConfig};
use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// A single line of text at its final position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    /// Left edge in points
    pub x: f64,
    /// Baseline in PDF user space
    pub y: f64,
    pub face: FontFace,
    pub size: f64,
}

/// The lines placed on one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub lines: Vec<PlacedText>,
}

impl LaidOutPage {
    /// Concatenated text of the page, one line per row
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Mutable layout state: the cursor and the pages produced so far
pub struct LayoutContext<'c> {
    config: &'c RenderConfig,
    /// Distance of the cursor from the top edge
    y: f64,
    pages: Vec<LaidOutPage>,
}

impl<'c> LayoutContext<'c> {
    pub fn new(config: &'c RenderConfig) -> Self {
        Self {
            config,
            y: config.page.margin_top.pdf(),
            pages: vec![LaidOutPage::default()],
        }
    }

    pub fn into_pages(self) -> Vec<LaidOutPage> {
        self.pages
    }

    fn top(&self) -> f64 {
        self.config.page.margin_top.pdf()
    }

    fn bottom(&self) -> f64 {
        self.config.page.height.pdf() - self.config.page.margin_bottom.pdf()
    }

    fn new_page(&mut self) {
        self.pages.push(LaidOutPage::default());
        self.y = self.top();
    }

    /// Start a new page when `height` no longer fits below the cursor.
    /// A block taller than a whole page is placed from the top of a fresh
    /// page and allowed to overflow.
    fn ensure_space(&mut self, height: f64) {
        if self.y + height > self.bottom() && self.y > self.top() {
            self.new_page();
        }
    }

    /// Place one line with its top at the cursor, then advance by `advance`
    fn place_line(&mut self, text: String, x: f64, face: FontFace, size: f64, advance: f64) {
        let baseline = self.config.page.height.pdf() - (self.y + size);
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(PlacedText {
                text,
                x,
                y: baseline,
                face,
                size,
            });
        }
        self.y += advance;
    }

    fn skip(&mut self, gap: f64) {
        self.y += gap;
    }
}

/// Resolved drawing parameters of one block
struct Metrics {
    face: FontFace,
    size: f64,
    leading: f64,
    x: f64,
    width: f64,
}

impl Metrics {
    fn new(config: &RenderConfig, style: &BlockStyle) -> Self {
        let indent = style.indent.pdf();
        Self {
            face: FontFace::from_style(style.bold, style.italic),
            size: style.font_size.pdf(),
            leading: config.line_height.leading(style.font_size).pdf(),
            x: config.page.margin_left.pdf() + indent,
            width: config.page.printable_width().pdf() - indent,
        }
    }
}

/// Lay out an element sequence onto pages
pub fn layout_document(
    elements: &[DocumentElement],
    config: &RenderConfig,
) -> PdfResult<Vec<LaidOutPage>> {
    config.page.validate()?;

    let mut ctx = LayoutContext::new(config);
    for element in elements {
        layout_element(&mut ctx, element)?;
    }
    Ok(ctx.into_pages())
}

/// Lay out a single element at the cursor
pub fn layout_element(ctx: &mut LayoutContext<'_>, element: &DocumentElement) -> PdfResult<()> {
    if element.duplicates_title() {
        return Ok(());
    }
    element.check()?;

    match element.kind {
        ElementKind::Title | ElementKind::Heading => layout_heading(ctx, element),
        ElementKind::List => layout_list(ctx, element),
        ElementKind::PageBreak => {
            ctx.new_page();
            Ok(())
        }
        ElementKind::Image => layout_image(ctx, element),
        ElementKind::Paragraph | ElementKind::Text | ElementKind::ListItem => {
            layout_paragraph(ctx, element)
        }
    }
}

/// Headings are kept together on one page
fn layout_heading(ctx: &mut LayoutContext<'_>, element: &DocumentElement) -> PdfResult<()> {
    let config = ctx.config;
    let style = config.style_for(element)?;
    let m = Metrics::new(config, style);
    let lines = wrap_text(&element.content, m.width, m.face, m.size);

    ctx.ensure_space(lines.len() as f64 * m.leading);
    for line in lines {
        ctx.ensure_space(m.leading);
        ctx.place_line(line, m.x, m.face, m.size, m.leading);
    }
    ctx.skip(style.space_after.pdf());
    Ok(())
}

fn layout_paragraph(ctx: &mut LayoutContext<'_>, element: &DocumentElement) -> PdfResult<()> {
    let config = ctx.config;
    let style = config.style_for(element)?;
    let m = Metrics::new(config, style);

    for line in wrap_text(&element.content, m.width, m.face, m.size) {
        ctx.ensure_space(m.leading);
        ctx.place_line(line, m.x, m.face, m.size, m.leading);
    }
    ctx.skip(style.space_after.pdf());
    Ok(())
}

fn layout_list(ctx: &mut LayoutContext<'_>, element: &DocumentElement) -> PdfResult<()> {
    let config = ctx.config;
    let style = config.style_for(element)?;
    let m = Metrics::new(config, style);
    let kind = element.list_kind.unwrap_or(ListKind::Unordered);
    let count = element.children.len();

    for (position, item) in element.children.iter().enumerate() {
        let index = item.item_index().unwrap_or(position);
        let text = format!("{}{}", list_prefix(kind, index), item.content.trim());
        let lines = wrap_text(&text, m.width, m.face, m.size);

        ctx.ensure_space(lines.len() as f64 * m.leading);
        for line in lines {
            ctx.ensure_space(m.leading);
            ctx.place_line(line, m.x, m.face, m.size, m.leading);
        }
        ctx.skip(config.list_item_gap(position + 1 == count).pdf());
    }
    Ok(())
}

/// Images become a single fixed-height placeholder line
fn layout_image(ctx: &mut LayoutContext<'_>, element: &DocumentElement) -> PdfResult<()> {
    let config = ctx.config;
    let style = config.style_for(element)?;
    let m = Metrics::new(config, style);
    let alt = element.attribute("alt").unwrap_or(&element.content);
    let block = config.image_block_height.pdf();

    let line = wrap_text(&image_placeholder(alt), m.width, m.face, m.size)
        .into_iter()
        .next()
        .unwrap_or_default();

    ctx.ensure_space(block);
    ctx.place_line(line, m.x, m.face, m.size, block);
    ctx.skip(style.space_after.pdf());
    Ok(())
}

/// Wrap `text` into lines no wider than `max_width` points.
///
/// Lines break at Unicode line break opportunities. A word wider than the
/// line is split between grapheme clusters. Always returns at least one
/// line.
pub fn wrap_text(text: &str, max_width: f64, face: FontFace, size: f64) -> Vec<String> {
    let text = text.trim();
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut start = 0;

    for (end, opportunity) in linebreaks(text) {
        let segment = &text[start..end];
        start = end;

        let candidate = format!("{}{}", current, segment);
        if text_width(candidate.trim_end(), face, size) <= max_width {
            current = candidate;
        } else {
            if !current.trim_end().is_empty() {
                lines.push(current.trim_end().to_string());
            }
            current = fit_segment(segment, max_width, face, size, &mut lines);
        }

        if opportunity == BreakOpportunity::Mandatory {
            if !current.trim().is_empty() {
                lines.push(current.trim_end().to_string());
            }
            current.clear();
        }
    }

    if !current.trim().is_empty() {
        lines.push(current.trim_end().to_string());
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Start a line with `segment`, hard-splitting it when it is wider than a
/// full line. Completed pieces go to `lines`; the remainder is returned.
fn fit_segment(
    segment: &str,
    max_width: f64,
    face: FontFace,
    size: f64,
    lines: &mut Vec<String>,
) -> String {
    let word = segment.trim_end();
    if text_width(word, face, size) <= max_width {
        return segment.to_string();
    }

    let mut piece = String::new();
    for grapheme in word.graphemes(true) {
        let wider = text_width(&piece, face, size) + text_width(grapheme, face, size);
        if wider > max_width && !piece.is_empty() {
            lines.push(std::mem::take(&mut piece));
        }
        piece.push_str(grapheme);
    }
    piece.push_str(&segment[word.len()..]);
    piece
}
