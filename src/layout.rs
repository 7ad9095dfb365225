//! Decorative elements inherited from slide layouts and masters.
//!
//! Pictures on a layout or master are written once into the media
//! directory and placed behind the slide content; lines and auto-shapes
//! are rendered as simple boxes. A picture that covers the whole slide
//! becomes the slide background instead.

use crate::model::{Part, Presentation, Shape, ShapeKind};
use crate::style::resolve_color;
use crate::units::{dash_style_to_css, emu_to_px};
use std::fs;
use std::path::{Path, PathBuf};

/// A layout or master picture placed behind the slide content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutImage {
    /// File name inside the media directory
    pub file_name: String,
    /// URL used by slide pages
    pub src: String,
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

impl LayoutImage {
    /// Whether the picture covers the whole slide (1px tolerance on the
    /// origin, 2px on the size).
    pub fn covers_slide(&self, slide_width_px: i64, slide_height_px: i64) -> bool {
        self.left <= 1
            && self.top <= 1
            && self.width >= slide_width_px - 2
            && self.height >= slide_height_px - 2
    }
}

/// Kind of a decorative layout shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationKind {
    Line,
    AutoShape,
}

/// A line or auto-shape from a layout or master, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutShape {
    pub kind: DecorationKind,
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
    /// Rotation in degrees
    pub rotation: f64,
    /// Stroke width in pixels, at least 1
    pub stroke_width: i64,
    pub stroke_color: Option<String>,
    /// CSS border style
    pub dash: &'static str,
    /// Fill colour, auto-shapes only
    pub fill_color: Option<String>,
}

/// Everything a slide inherits from its layout and master.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutElements {
    /// Pictures that stay positioned boxes, layout first then master
    pub images: Vec<LayoutImage>,
    pub shapes: Vec<LayoutShape>,
    /// Slide background CSS, replaced when a picture covers the slide
    pub background: String,
    /// Media files referenced by this slide, whether written now or earlier
    pub files: Vec<PathBuf>,
}

/// Collects layout and master decorations for slides.
#[derive(Debug, Clone)]
pub struct LayoutCollector {
    target_dir: PathBuf,
    url_prefix: String,
    slide_width_px: i64,
    slide_height_px: i64,
}

impl LayoutCollector {
    /// Create a collector writing pictures into `target_dir`.
    pub fn new(target_dir: impl Into<PathBuf>, slide_width_px: i64, slide_height_px: i64) -> Self {
        Self {
            target_dir: target_dir.into(),
            url_prefix: String::new(),
            slide_width_px,
            slide_height_px,
        }
    }

    /// Prefix prepended to file names in image URLs, e.g. `../media/`.
    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    /// Collect the pictures, lines and auto-shapes of layout
    /// `layout_index` and its master.
    ///
    /// Failures on individual shapes are logged and the shape omitted.
    /// Calling this twice with the same inputs gives the same result;
    /// picture files that already exist are not rewritten.
    pub fn collect(
        &self,
        layout_index: usize,
        pres: &Presentation,
        background: impl Into<String>,
    ) -> LayoutElements {
        let mut elements = LayoutElements {
            background: background.into(),
            ..Default::default()
        };
        let Some(layout) = pres.layouts.get(layout_index) else {
            return elements;
        };

        let mut images = Vec::new();
        let prefix = format!("layout{}", layout_index + 1);
        for (n, shape) in layout.shapes.iter().enumerate() {
            self.collect_shape(
                shape,
                &layout.part,
                &format!("{}_img{}", prefix, n),
                pres,
                &mut images,
                &mut elements,
            );
        }
        if let Some(master) = pres.master_of(layout) {
            for (n, shape) in master.shapes.iter().enumerate() {
                self.collect_shape(
                    shape,
                    &master.part,
                    &format!("master_img{}", n),
                    pres,
                    &mut images,
                    &mut elements,
                );
            }
        }

        for image in images {
            if image.covers_slide(self.slide_width_px, self.slide_height_px) {
                elements.background = format!(
                    "background-image: url('{}'); background-size: cover; \
                     background-repeat: no-repeat; background-position: center;",
                    image.src
                );
            } else {
                elements.images.push(image);
            }
        }
        elements
    }

    fn collect_shape(
        &self,
        shape: &Shape,
        part: &Part,
        stem: &str,
        pres: &Presentation,
        images: &mut Vec<LayoutImage>,
        elements: &mut LayoutElements,
    ) {
        match &shape.kind {
            ShapeKind::Picture(picture) => {
                let Some(blob) = picture.embed.as_deref().and_then(|id| part.blob(id)) else {
                    log::debug!("{}: picture '{}' has no image data", part.path, shape.name);
                    return;
                };
                let file_name = format!("{}.{}", stem, blob.ext);
                let path = self.target_dir.join(&file_name);
                if let Err(e) = write_once(&path, &blob.data) {
                    log::debug!("failed to write {}: {}", path.display(), e);
                    return;
                }
                if !elements.files.contains(&path) {
                    elements.files.push(path);
                }
                images.push(LayoutImage {
                    src: format!("{}{}", self.url_prefix, file_name),
                    file_name,
                    left: emu_to_px(shape.frame.left),
                    top: emu_to_px(shape.frame.top),
                    width: emu_to_px(shape.frame.width),
                    height: emu_to_px(shape.frame.height),
                });
            }
            ShapeKind::Line | ShapeKind::AutoShape => {
                let kind = if shape.kind == ShapeKind::Line {
                    DecorationKind::Line
                } else {
                    DecorationKind::AutoShape
                };
                let line = shape.line.as_ref();
                elements.shapes.push(LayoutShape {
                    kind,
                    left: emu_to_px(shape.frame.left),
                    top: emu_to_px(shape.frame.top),
                    width: emu_to_px(shape.frame.width),
                    height: emu_to_px(shape.frame.height),
                    rotation: shape.rotation,
                    stroke_width: line
                        .and_then(|l| l.width)
                        .map_or(1, |w| emu_to_px(w).max(1)),
                    stroke_color: line
                        .filter(|l| !l.hidden)
                        .and_then(|l| l.color.as_ref())
                        .and_then(|c| resolve_color(pres, c)),
                    dash: dash_style_to_css(line.and_then(|l| l.dash)),
                    fill_color: match kind {
                        DecorationKind::AutoShape => {
                            shape.fill.as_ref().and_then(|c| resolve_color(pres, c))
                        }
                        DecorationKind::Line => None,
                    },
                });
            }
            _ => {}
        }
    }
}

/// Write `data` to `path` unless the file already exists.
fn write_once(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, data)
}
