//! PPTX (PowerPoint) presentation reader.
//!
//! Reads the Office Open XML (.pptx) package into the [`crate::model`]
//! presentation model: slides, the layouts and masters behind them, the
//! theme, and every picture or movie a part references.

mod parser;
mod shapes;

pub use parser::PptxReader;
pub use shapes::{parse_color, parse_run_properties, parse_shape, parse_shape_tree};

use crate::error::Result;
use crate::model::Presentation;
use std::path::Path;

/// Read a presentation from a file.
pub fn read_presentation(path: impl AsRef<Path>) -> Result<Presentation> {
    PptxReader::open(path)?.read()
}
