//! # unslide
//!
//! PowerPoint (.pptx) presentations to static HTML slide pages.
//!
//! Every slide becomes a fixed-size, absolutely positioned page with
//! previous/next navigation. Theme fonts and colours, layout and master
//! decorations, backgrounds, pictures, tables and movies are carried
//! over; media is extracted next to the pages.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unslide::convert_pptx_to_html;
//!
//! let result = convert_pptx_to_html("deck.pptx", None, false)?;
//! println!("{} slides, open {}", result.slide_count, result.index_file.display());
//! # Ok::<(), unslide::Error>(())
//! ```
//!
//! ## Output layout
//!
//! ```text
//! {output}/
//!   {name}_index.html
//!   slides/slide1.html ...
//!   media/...
//!   main.html            (directory mode, more than one deck)
//! ```
//!
//! ## Lower-level APIs
//!
//! ```no_run
//! use unslide::pptx::PptxReader;
//! use unslide::style::theme_fonts;
//!
//! let pres = PptxReader::open("deck.pptx")?.read()?;
//! let fonts = theme_fonts(&pres);
//! println!("{} slides, body font {:?}", pres.slide_count(), fonts.minor);
//! # Ok::<(), unslide::Error>(())
//! ```

pub mod container;
pub mod convert;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod pptx;
pub mod render;
pub mod style;
pub mod units;
pub mod xml;

// Re-exports
pub use container::{OoxmlContainer, Relationship, Relationships};
pub use convert::{
    convert_pptx_directory, convert_pptx_to_html, ConversionResult, Converter, ConverterOptions,
    DirectoryResult, FileOutcome,
};
pub use detect::{is_presentation_file, verify_presentation};
pub use error::{Error, Result};
pub use model::{Presentation, Shape, ShapeKind, Slide};

use std::path::Path;

/// Read a presentation file into the [`Presentation`] model.
///
/// # Example
///
/// ```no_run
/// let pres = unslide::read_presentation("deck.pptx")?;
/// for slide in &pres.slides {
///     println!("slide {}: {} shapes", slide.number, slide.shapes.len());
/// }
/// # Ok::<(), unslide::Error>(())
/// ```
pub fn read_presentation(path: impl AsRef<Path>) -> Result<Presentation> {
    pptx::read_presentation(path)
}

/// Read a presentation from bytes.
pub fn read_presentation_bytes(data: &[u8]) -> Result<Presentation> {
    pptx::PptxReader::from_bytes(data.to_vec())?.read()
}
