//! PDF Export Options

use serde::{Deserialize, Serialize};

/// Options for PDF export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportOptions {
    /// Whether to Flate-compress content streams
    #[serde(default = "default_compress")]
    pub compress: bool,
}

fn default_compress() -> bool {
    true
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            compress: default_compress(),
        }
    }
}

impl PdfExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to compress content streams
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}
