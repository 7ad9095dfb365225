//! Presentation, slide, layout and master models.

use super::Shape;
use crate::container::Relationships;
use crate::xml::XmlElement;
use std::collections::HashMap;

/// Binary media (image, video) extracted from the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub data: Vec<u8>,
    /// File extension without the dot, lower-case (e.g. "png")
    pub ext: String,
    /// Content type from `[Content_Types].xml`, if declared
    pub content_type: Option<String>,
}

impl Blob {
    /// Create a blob, deriving the extension from the part name.
    pub fn new(data: Vec<u8>, part_name: &str, content_type: Option<String>) -> Self {
        let ext = part_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.contains('/'))
            .unwrap_or_else(|| "bin".to_string());
        Self {
            data,
            ext,
            content_type,
        }
    }
}

/// An XML part together with its relationships and referenced media.
#[derive(Debug, Clone, Default)]
pub struct Part {
    /// Package path, e.g. "ppt/slides/slide1.xml"
    pub path: String,
    pub xml: XmlElement,
    pub rels: Relationships,
    /// Image and media targets, keyed by relationship ID
    pub blobs: HashMap<String, Blob>,
}

impl Part {
    /// Media referenced by a relationship ID.
    pub fn blob(&self, rel_id: &str) -> Option<&Blob> {
        self.blobs.get(rel_id)
    }

    /// The part's background element (`p:cSld/p:bg`).
    pub fn background(&self) -> Option<&XmlElement> {
        self.xml.find("cSld/bg")
    }
}

/// A slide master.
#[derive(Debug, Clone, Default)]
pub struct Master {
    pub part: Part,
    pub shapes: Vec<Shape>,
}

/// A slide layout; `master` indexes [`Presentation::masters`].
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub part: Part,
    pub name: Option<String>,
    pub master: Option<usize>,
    pub shapes: Vec<Shape>,
}

/// A slide; `layout` indexes [`Presentation::layouts`].
#[derive(Debug, Clone, Default)]
pub struct Slide {
    /// 1-based slide number
    pub number: usize,
    pub part: Part,
    pub layout: Option<usize>,
    pub shapes: Vec<Shape>,
}

/// An opened presentation.
///
/// Owns every layout, master, slide and theme for the duration of one
/// conversion. Layout and master references are indices, stable for the
/// lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct Presentation {
    /// Slide width in EMU
    pub slide_width: i64,
    /// Slide height in EMU
    pub slide_height: i64,
    pub slides: Vec<Slide>,
    pub layouts: Vec<Layout>,
    pub masters: Vec<Master>,
    /// Theme part reached from the presentation relationships
    pub theme: Option<XmlElement>,
}

impl Presentation {
    /// Default slide size (16:9, 13.333in x 7.5in).
    pub const DEFAULT_SIZE: (i64, i64) = (12_192_000, 6_858_000);

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Layout used by a slide.
    pub fn layout_of(&self, slide: &Slide) -> Option<&Layout> {
        slide.layout.and_then(|i| self.layouts.get(i))
    }

    /// Master used by a layout.
    pub fn master_of(&self, layout: &Layout) -> Option<&Master> {
        layout.master.and_then(|i| self.masters.get(i))
    }
}
