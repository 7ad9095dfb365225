//! Presentation package detection.

use crate::container::OoxmlContainer;
use crate::error::{Error, Result};
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Main part of every PresentationML package.
pub const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Content types accepted for the presentation main part.
const PRESENTATION_CONTENT_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
    "application/vnd.openxmlformats-officedocument.presentationml.slideshow.main+xml",
    "application/vnd.openxmlformats-officedocument.presentationml.template.main+xml",
    "application/vnd.ms-powerpoint.presentation.macroEnabled.main+xml",
];

/// File extension handled by directory conversion and the CLI.
pub const PPTX_EXTENSION: &str = "pptx";

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

/// Whether `path` names a `.pptx` file (case-insensitive extension check).
///
/// This does not touch the file system.
pub fn has_pptx_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(PPTX_EXTENSION))
}

/// Whether `path` is an existing file with a `.pptx` extension.
pub fn is_presentation_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path.is_file() && has_pptx_extension(path)
}

/// Verify that an opened container is a presentation package.
///
/// The content type override of `ppt/presentation.xml` is checked first;
/// packages without `[Content_Types].xml` entries fall back to the part's
/// existence.
pub fn verify_presentation(container: &OoxmlContainer) -> Result<()> {
    match container.content_type(PRESENTATION_PART) {
        Some(ct) if PRESENTATION_CONTENT_TYPES.contains(&ct) => Ok(()),
        Some(_) => Err(Error::UnknownFormat),
        None if container.exists(PRESENTATION_PART) => Ok(()),
        None => Err(Error::MissingComponent(PRESENTATION_PART.to_string())),
    }
}
