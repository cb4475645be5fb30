//! The shared render configuration table

use crate::error::{RenderError, Result};
use crate::units::{FontSize, Length, LineHeight};
use doc_model::{DocumentElement, ElementKind, MAX_HEADING_LEVEL};
use serde::Serialize;

/// Page size and margins
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width: Length,
    pub height: Length,
    pub margin_top: Length,
    pub margin_bottom: Length,
    pub margin_left: Length,
    pub margin_right: Length,
}

impl PageGeometry {
    /// US Letter (8.5 x 11 inches) with one-inch margins
    pub const fn letter() -> Self {
        Self {
            width: Length::points(612.0),
            height: Length::points(792.0),
            margin_top: Length::points(72.0),
            margin_bottom: Length::points(72.0),
            margin_left: Length::points(72.0),
            margin_right: Length::points(72.0),
        }
    }

    /// Width available for text between the side margins
    pub fn printable_width(&self) -> Length {
        self.width - self.margin_left - self.margin_right
    }

    /// Height available for text between the top and bottom margins
    pub fn printable_height(&self) -> Length {
        self.height - self.margin_top - self.margin_bottom
    }

    /// Check that all values are finite and leave a printable area
    pub fn validate(&self) -> Result<()> {
        let all = [
            self.width,
            self.height,
            self.margin_top,
            self.margin_bottom,
            self.margin_left,
            self.margin_right,
        ];
        if all.iter().any(|l| !l.is_finite() || l.pdf() < 0.0) {
            return Err(RenderError::InvalidGeometry(
                "page metrics must be finite and non-negative".to_string(),
            ));
        }
        if self.printable_width().pdf() <= 0.0 || self.printable_height().pdf() <= 0.0 {
            return Err(RenderError::InvalidGeometry(
                "margins leave no printable area".to_string(),
            ));
        }
        Ok(())
    }
}

/// Typography and spacing for one kind of block
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockStyle {
    pub font_size: FontSize,
    pub bold: bool,
    pub italic: bool,
    /// Gap after the block
    pub space_after: Length,
    /// Left indentation
    pub indent: Length,
}

impl BlockStyle {
    const fn new(size: f64, bold: bool, space_after: f64) -> Self {
        Self {
            font_size: FontSize::points(size),
            bold,
            italic: false,
            space_after: Length::points(space_after),
            indent: Length::ZERO,
        }
    }
}

/// Render configuration shared by the PDF and DOCX renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderConfig {
    pub page: PageGeometry,
    /// Line height for every text block
    pub line_height: LineHeight,
    /// Font family; both formats use a metric-compatible sans face
    pub pdf_font_family: &'static str,
    pub docx_font_family: &'static str,
    pub title: BlockStyle,
    /// Heading styles, index 0 is `h1`
    pub headings: [BlockStyle; MAX_HEADING_LEVEL as usize],
    pub paragraph: BlockStyle,
    /// List item style; `space_after` is the gap between items
    pub list_item: BlockStyle,
    /// Extra gap added once after the last item of a list
    pub list_trailing_gap: Length,
    pub image: BlockStyle,
    /// Fixed height of an image placeholder line
    pub image_block_height: Length,
}

static STANDARD: RenderConfig = RenderConfig {
    page: PageGeometry::letter(),
    line_height: LineHeight::multiple(1.15),
    pdf_font_family: "Helvetica",
    docx_font_family: "Arial",
    title: BlockStyle::new(24.0, true, 18.0),
    headings: [
        BlockStyle::new(20.0, true, 14.0),
        BlockStyle::new(16.0, true, 12.0),
        BlockStyle::new(14.0, true, 10.0),
        BlockStyle::new(12.0, true, 8.0),
        BlockStyle::new(11.0, true, 6.0),
        BlockStyle::new(10.0, true, 6.0),
    ],
    paragraph: BlockStyle::new(11.0, false, 8.0),
    list_item: BlockStyle {
        font_size: FontSize::points(11.0),
        bold: false,
        italic: false,
        space_after: Length::points(2.0),
        indent: Length::points(18.0),
    },
    list_trailing_gap: Length::points(6.0),
    image: BlockStyle {
        font_size: FontSize::points(9.0),
        bold: false,
        italic: true,
        space_after: Length::points(8.0),
        indent: Length::ZERO,
    },
    image_block_height: Length::points(14.0),
};

impl RenderConfig {
    /// The static configuration table
    pub fn standard() -> &'static RenderConfig {
        &STANDARD
    }

    /// Style for a heading level (1-6)
    pub fn heading(&self, level: u8) -> Result<&BlockStyle> {
        match level {
            1..=MAX_HEADING_LEVEL => Ok(&self.headings[(level - 1) as usize]),
            _ => Err(RenderError::UnknownHeadingLevel(level)),
        }
    }

    /// Resolve the style used to draw an element.
    ///
    /// Lists resolve to the item style. Text and any kind without a
    /// dedicated entry fall back to the paragraph style.
    pub fn style_for(&self, element: &DocumentElement) -> Result<&BlockStyle> {
        match element.kind {
            ElementKind::Title => Ok(&self.title),
            ElementKind::Heading => {
                let level = element.level.ok_or(RenderError::MissingHeadingLevel)?;
                self.heading(level)
            }
            ElementKind::List | ElementKind::ListItem => Ok(&self.list_item),
            ElementKind::Image => Ok(&self.image),
            ElementKind::Paragraph | ElementKind::Text | ElementKind::PageBreak => {
                Ok(&self.paragraph)
            }
        }
    }

    /// Space after a list item; the last item also carries the list gap
    pub fn list_item_gap(&self, is_last: bool) -> Length {
        if is_last {
            self.list_item.space_after + self.list_trailing_gap
        } else {
            self.list_item.space_after
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        STANDARD.clone()
    }
}
