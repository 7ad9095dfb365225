//! Error types for the unslide library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unslide operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a presentation.
///
/// Only hard failures surface here. Style, theme and decorative-element
/// lookups degrade to defaults instead of producing an error.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An input file or directory does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A required argument was missing or invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The file is not a PowerPoint presentation package.
    #[error("Unknown file format")]
    UnknownFormat,

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data in the document.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required package part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// Error while producing output.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown file format");

        let err = Error::FileNotFound(PathBuf::from("deck.pptx"));
        assert_eq!(err.to_string(), "File not found: deck.pptx");

        let err = Error::InvalidArgument("Source directory must be specified".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid argument: Source directory must be specified"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
