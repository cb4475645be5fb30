//! Output formats and data URI encoding

use crate::error::{ExportError, ExportResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rendered document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Paginated page-description format
    Pdf,
    /// WordprocessingML container
    Docx,
}

impl Format {
    /// Both formats, PDF first
    pub const ALL: [Format; 2] = [Format::Pdf, Format::Docx];

    /// MIME type of the rendered bytes
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Pdf => "application/pdf",
            Format::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Prefix of a data URI carrying this format
    pub fn data_uri_prefix(&self) -> &'static str {
        match self {
            Format::Pdf => "data:application/pdf;base64,",
            Format::Docx => {
                "data:application/vnd.openxmlformats-officedocument.wordprocessingml.document;base64,"
            }
        }
    }

    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Docx => "docx",
        }
    }

    /// Leading bytes every valid file of this format starts with
    pub fn magic(&self) -> &'static [u8] {
        match self {
            Format::Pdf => b"%PDF-",
            Format::Docx => b"PK\x03\x04",
        }
    }

    /// Check the leading bytes of a rendered file
    pub fn has_signature(&self, bytes: &[u8]) -> bool {
        bytes.starts_with(self.magic())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(Format::Pdf),
            "docx" => Ok(Format::Docx),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Encode rendered bytes as a base64 data URI
pub fn to_data_uri(format: Format, bytes: &[u8]) -> String {
    let prefix = format.data_uri_prefix();
    let mut uri = String::with_capacity(prefix.len() + bytes.len().div_ceil(3) * 4);
    uri.push_str(prefix);
    STANDARD.encode_string(bytes, &mut uri);
    uri
}

/// Split a data URI produced by [`to_data_uri`] back into format and bytes
pub fn decode_data_uri(uri: &str) -> ExportResult<(Format, Vec<u8>)> {
    for format in Format::ALL {
        if let Some(payload) = uri.strip_prefix(format.data_uri_prefix()) {
            let bytes = STANDARD.decode(payload)?;
            return Ok((format, bytes));
        }
    }

    let head: String = uri.chars().take(48).collect();
    Err(ExportError::InvalidDataUri(head))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_prefixes() {
        assert_eq!(Format::Pdf.data_uri_prefix(), "data:application/pdf;base64,");
        assert_eq!(
            Format::Docx.data_uri_prefix(),
            "data:application/vnd.openxmlformats-officedocument.wordprocessingml.document;base64,"
        );
        for format in Format::ALL {
            assert_eq!(
                format.data_uri_prefix(),
                format!("data:{};base64,", format.mime_type())
            );
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("pdf".parse::<Format>().unwrap(), Format::Pdf);
        assert_eq!(" DOCX ".parse::<Format>().unwrap(), Format::Docx);
        assert!(matches!(
            "odt".parse::<Format>(),
            Err(ExportError::UnknownFormat(f)) if f == "odt"
        ));
    }

    #[test]
    fn test_data_uri() {
        let uri = to_data_uri(Format::Pdf, b"%PDF-1.4");
        assert_eq!(uri, "data:application/pdf;base64,JVBERi0xLjQ=");

        let (format, bytes) = decode_data_uri(&uri).unwrap();
        assert_eq!(format, Format::Pdf);
        assert!(format.has_signature(&bytes));
    }

    #[test]
    fn test_decode_rejects_unknown_prefix() {
        assert!(matches!(
            decode_data_uri("data:text/plain;base64,aGk="),
            Err(ExportError::InvalidDataUri(_))
        ));
        assert!(matches!(
            decode_data_uri("data:application/pdf;base64,***"),
            Err(ExportError::Base64(_))
        ));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Format::Docx).unwrap(), "\"docx\"");
    }
}
