//! PDF Content Stream Generation
//!
//! Builder for page content streams. The renderer only draws text, so the
//! builder covers the text object operators:
//!
//! - BT/ET: begin/end text object
//! - Tf: set font and size
//! - Tm: set text matrix
//! - Tj: show text string

use super::fonts::{to_win_ansi, FontFace};
use super::objects::{escape_string_into, format_real};
use std::io::Write;

/// Content stream builder
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Begin a text object (BT)
    pub fn begin_text(&mut self) -> &mut Self {
        self.write_line("BT");
        self
    }

    /// End a text object (ET)
    pub fn end_text(&mut self) -> &mut Self {
        self.write_line("ET");
        self
    }

    /// Set the font and size (Tf)
    pub fn set_font(&mut self, face: FontFace, size: f64) -> &mut Self {
        self.write_fmt(format_args!(
            "/{} {} Tf\n",
            face.resource_name(),
            format_real(size)
        ));
        self
    }

    /// Place the text origin at (`x`, `y`) with an identity matrix (Tm)
    pub fn set_text_position(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_fmt(format_args!(
            "1 0 0 1 {} {} Tm\n",
            format_real(x),
            format_real(y)
        ));
        self
    }

    /// Show a text string (Tj), encoded as WinAnsi
    pub fn show_text(&mut self, text: &str) -> &mut Self {
        escape_string_into(&to_win_ansi(text), &mut self.data);
        self.write_line(" Tj");
        self
    }

    /// Draw one line of text as a complete text object
    pub fn text_line(&mut self, text: &str, face: FontFace, size: f64, x: f64, y: f64) -> &mut Self {
        self.begin_text()
            .set_font(face, size)
            .set_text_position(x, y)
            .show_text(text)
            .end_text()
    }

    fn write_line(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
        self.data.push(b'\n');
    }

    fn write_fmt(&mut self, args: std::fmt::Arguments<'_>) {
        // Writing into a Vec cannot fail
        let _ = self.data.write_fmt(args);
    }
}
