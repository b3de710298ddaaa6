//! Error types for palette import/export.

use thiserror::Error;

/// Errors that can occur while reading or writing palette files.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Malformed JSON payload; the decoder's message is shown to the user
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// XML serialization error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Color-list file that could not be parsed
    #[error("The selected color list could not be read")]
    InvalidColorList,

    /// No registered format handles this file
    #[error("Unsupported file type: {name}")]
    UnsupportedFormat {
        /// File name that was offered
        name: String,
    },

    /// Operation not supported by this format
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl FormatError {
    /// Create an unsupported format error for a file name.
    pub fn unsupported_format(name: impl Into<String>) -> Self {
        Self::UnsupportedFormat { name: name.into() }
    }
}
