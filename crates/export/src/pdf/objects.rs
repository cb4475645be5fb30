//! PDF Object Model
//!
//! The subset of PDF object types the exporter writes: numbers, literal
//! strings, names, arrays, dictionaries, streams and indirect references.

use std::collections::BTreeMap;
use std::io::{self, Write};

/// PDF object types
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// Literal string, already in the target encoding
    String(Vec<u8>),
    /// Name object (written with a leading /)
    Name(String),
    Array(Vec<PdfObject>),
    Dictionary(PdfDictionary),
    Stream(PdfStream),
    /// Indirect reference to an object number (generation 0)
    Reference(u32),
}

impl PdfObject {
    pub fn name(s: impl Into<String>) -> Self {
        PdfObject::Name(s.into())
    }

    /// Literal string encoded as WinAnsi
    pub fn text(s: &str) -> Self {
        PdfObject::String(super::fonts::to_win_ansi(s))
    }
}

impl From<i64> for PdfObject {
    fn from(n: i64) -> Self {
        PdfObject::Integer(n)
    }
}

impl From<f64> for PdfObject {
    fn from(n: f64) -> Self {
        PdfObject::Real(n)
    }
}

impl From<PdfDictionary> for PdfObject {
    fn from(dict: PdfDictionary) -> Self {
        PdfObject::Dictionary(dict)
    }
}

/// PDF dictionary with keys kept in sorted order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfDictionary {
    entries: BTreeMap<String, PdfObject>,
}

impl PdfDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a dictionary with a `/Type` entry
    pub fn typed(type_name: &str) -> Self {
        let mut dict = Self::new();
        dict.insert("Type", PdfObject::name(type_name));
        dict
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PdfObject>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PdfObject)> {
        self.entries.iter()
    }
}

/// PDF stream (dictionary + data)
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStream {
    pub dict: PdfDictionary,
    pub data: Vec<u8>,
    /// Whether `data` is already Flate-encoded
    pub compressed: bool,
}

impl PdfStream {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            dict: PdfDictionary::new(),
            data,
            compressed: false,
        }
    }
}

/// Serializer for PDF objects
pub struct PdfSerializer<W: Write> {
    writer: W,
}

impl<W: Write> PdfSerializer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_object(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Integer(n) => write!(self.writer, "{}", n),
            PdfObject::Real(n) => write!(self.writer, "{}", format_real(*n)),
            PdfObject::String(bytes) => self.write_string(bytes),
            PdfObject::Name(name) => self.write_name(name),
            PdfObject::Array(items) => {
                write!(self.writer, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(self.writer, " ")?;
                    }
                    self.write_object(item)?;
                }
                write!(self.writer, "]")
            }
            PdfObject::Dictionary(dict) => self.write_dictionary(dict),
            PdfObject::Stream(stream) => {
                self.write_dictionary(&stream.dict)?;
                write!(self.writer, "\nstream\n")?;
                self.writer.write_all(&stream.data)?;
                write!(self.writer, "\nendstream")
            }
            PdfObject::Reference(num) => write!(self.writer, "{} 0 R", num),
        }
    }

    fn write_string(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut escaped = Vec::with_capacity(bytes.len() + 2);
        escape_string_into(bytes, &mut escaped);
        self.writer.write_all(&escaped)
    }

    fn write_name(&mut self, name: &str) -> io::Result<()> {
        write!(self.writer, "/")?;
        for byte in name.bytes() {
            match byte {
                b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' => {
                    write!(self.writer, "#{:02X}", byte)?
                }
                0x21..=0x7E => self.writer.write_all(&[byte])?,
                _ => write!(self.writer, "#{:02X}", byte)?,
            }
        }
        Ok(())
    }

    fn write_dictionary(&mut self, dict: &PdfDictionary) -> io::Result<()> {
        write!(self.writer, "<<")?;
        for (key, value) in dict.iter() {
            write!(self.writer, " ")?;
            self.write_name(key)?;
            write!(self.writer, " ")?;
            self.write_object(value)?;
        }
        write!(self.writer, " >>")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Append `bytes` as a parenthesized literal string.
///
/// Delimiters are backslash-escaped; bytes outside printable ASCII are
/// written as octal escapes so the file body stays 7-bit clean.
pub fn escape_string_into(bytes: &[u8], out: &mut Vec<u8>) {
    out.push(b'(');
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(byte);
            }
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x20..=0x7E => out.push(byte),
            _ => out.extend_from_slice(format!("\\{:03o}", byte).as_bytes()),
        }
    }
    out.push(b')');
}

/// Format a real number with at most four decimals and no trailing zeros
pub fn format_real(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        let s = format!("{:.4}", n);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialize(obj: &PdfObject) -> String {
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(obj).unwrap();
        String::from_utf8(serializer.into_inner()).unwrap()
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(serialize(&PdfObject::Integer(42)), "42");
        assert_eq!(serialize(&PdfObject::Real(612.0)), "612");
        assert_eq!(serialize(&PdfObject::Real(12.65)), "12.65");
        assert_eq!(serialize(&PdfObject::Reference(3)), "3 0 R");
        assert_eq!(serialize(&PdfObject::name("Type")), "/Type");
    }

    #[test]
    fn test_serialize_string_escapes() {
        assert_eq!(serialize(&PdfObject::text("a (b) \\ c")), r"(a \(b\) \\ c)");
        // Bullet is 0x95 in WinAnsi
        assert_eq!(serialize(&PdfObject::text("\u{2022} x")), r"(\225 x)");
    }

    #[test]
    fn test_serialize_name_escapes() {
        assert_eq!(serialize(&PdfObject::name("A B#")), "/A#20B#23");
    }

    #[test]
    fn test_serialize_dictionary_sorted() {
        let mut dict = PdfDictionary::typed("Page");
        dict.insert("Contents", PdfObject::Reference(4));
        dict.insert(
            "MediaBox",
            PdfObject::Array(vec![0i64.into(), 0i64.into(), 612i64.into(), 792i64.into()]),
        );
        assert_eq!(
            serialize(&dict.into()),
            "<< /Contents 4 0 R /MediaBox [0 0 612 792] /Type /Page >>"
        );
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(1.0), "1");
        assert_eq!(format_real(3.14159), "3.1416");
        assert_eq!(format_real(-0.5), "-0.5");
    }
}
