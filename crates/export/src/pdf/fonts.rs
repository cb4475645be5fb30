//! PDF Font Handling
//!
//! Output uses the standard Type 1 Helvetica family, which every viewer
//! provides without embedding. Text is encoded as WinAnsi; widths come
//! from the Adobe font metrics so wrapping matches what viewers draw.

use super::objects::{PdfDictionary, PdfObject};

/// Faces of the Helvetica family used by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Oblique,
    BoldOblique,
}

impl FontFace {
    pub const ALL: [FontFace; 4] = [
        FontFace::Regular,
        FontFace::Bold,
        FontFace::Oblique,
        FontFace::BoldOblique,
    ];

    /// Select a face from style flags
    pub fn from_style(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => FontFace::Regular,
            (true, false) => FontFace::Bold,
            (false, true) => FontFace::Oblique,
            (true, true) => FontFace::BoldOblique,
        }
    }

    /// PostScript name of the base font
    pub fn base_font(&self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Oblique => "Helvetica-Oblique",
            FontFace::BoldOblique => "Helvetica-BoldOblique",
        }
    }

    /// Resource name used in content streams
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Oblique => "F3",
            FontFace::BoldOblique => "F4",
        }
    }

    fn is_bold(&self) -> bool {
        matches!(self, FontFace::Bold | FontFace::BoldOblique)
    }
}

/// Create the font dictionary for a face
pub fn create_font_dict(face: FontFace) -> PdfDictionary {
    let mut dict = PdfDictionary::typed("Font");
    dict.insert("Subtype", PdfObject::name("Type1"));
    dict.insert("BaseFont", PdfObject::name(face.base_font()));
    dict.insert("Encoding", PdfObject::name("WinAnsiEncoding"));
    dict
}

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ASCII 32..=126, in 1/1000 em
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width of one character in 1/1000 em
fn char_width(c: char, face: FontFace) -> u16 {
    let table = if face.is_bold() {
        &HELVETICA_BOLD_WIDTHS
    } else {
        &HELVETICA_WIDTHS
    };
    match c {
        ' '..='~' => table[c as usize - 32],
        '\u{2022}' => 350,
        '\u{2013}' => 556,
        '\u{2014}' | '\u{2026}' => 1000,
        '\u{2018}' | '\u{2019}' => if face.is_bold() { 278 } else { 222 },
        '\u{201C}' | '\u{201D}' => if face.is_bold() { 500 } else { 333 },
        _ => 556,
    }
}

/// Width of `text` in points when set in `face` at `size`
pub fn text_width(text: &str, face: FontFace, size: f64) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c, face))).sum();
    f64::from(units) * size / 1000.0
}

/// Encode text as WinAnsi (CP1252). Unmappable characters become `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            '\t' | '\n' | '\r' => b' ',
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_selection() {
        assert_eq!(FontFace::from_style(true, false), FontFace::Bold);
        assert_eq!(FontFace::from_style(false, true).base_font(), "Helvetica-Oblique");
        assert_eq!(FontFace::BoldOblique.resource_name(), "F4");
    }

    #[test]
    fn test_font_dict() {
        let dict = create_font_dict(FontFace::Bold);
        assert_eq!(dict.get("BaseFont"), Some(&PdfObject::name("Helvetica-Bold")));
        assert_eq!(dict.get("Encoding"), Some(&PdfObject::name("WinAnsiEncoding")));
    }

    #[test]
    fn test_text_width() {
        // "Hi" = 722 + 222 units
        assert!((text_width("Hi", FontFace::Regular, 10.0) - 9.44).abs() < 1e-9);
        assert!(text_width("Hi", FontFace::Bold, 10.0) > text_width("Hi", FontFace::Regular, 10.0));
        assert_eq!(text_width("", FontFace::Regular, 12.0), 0.0);
    }

    #[test]
    fn test_win_ansi() {
        assert_eq!(to_win_ansi("Az"), b"Az".to_vec());
        assert_eq!(to_win_ansi("\u{2022} caf\u{e9}"), vec![0x95, b' ', b'c', b'a', b'f', 0xE9]);
        assert_eq!(to_win_ansi("\u{2014}\u{4E2D}"), vec![0x97, b'?']);
    }
}
