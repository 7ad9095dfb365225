//! PPTX reader implementation.

use super::shapes::parse_shape_tree;
use crate::container::{OoxmlContainer, Relationships};
use crate::detect::{self, PRESENTATION_PART};
use crate::error::{Error, Result};
use crate::model::{Blob, Frame, Layout, Master, Part, Presentation, Shape, Slide};
use crate::xml::XmlElement;
use std::collections::HashMap;
use std::path::Path;

/// Relationship types whose targets are loaded as media blobs.
const BLOB_REL_TYPES: &[&str] = &["image", "video", "media", "audio"];

/// Reader for PPTX (PowerPoint) presentations.
///
/// Builds a [`Presentation`] with every slide, the layouts and masters they
/// use, the theme, and the media each part references.
#[derive(Debug)]
pub struct PptxReader {
    container: OoxmlContainer,
    layout_index: HashMap<String, usize>,
    master_index: HashMap<String, usize>,
    layouts: Vec<Layout>,
    masters: Vec<Master>,
}

impl PptxReader {
    /// Open a PPTX file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    /// Create a reader from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if !detect::is_zip_file(&data) {
            return Err(Error::UnknownFormat);
        }
        let container = OoxmlContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    /// Create a reader from an opened container.
    pub fn from_container(container: OoxmlContainer) -> Result<Self> {
        detect::verify_presentation(&container)?;
        Ok(Self {
            container,
            layout_index: HashMap::new(),
            master_index: HashMap::new(),
            layouts: Vec::new(),
            masters: Vec::new(),
        })
    }

    /// Read the whole presentation.
    pub fn read(mut self) -> Result<Presentation> {
        let root = XmlElement::parse(&self.container.read_xml(PRESENTATION_PART)?)?;
        let rels = self.container.read_relationships(PRESENTATION_PART)?;

        let (default_w, default_h) = Presentation::DEFAULT_SIZE;
        let size = root.child("sldSz");
        let slide_width = size
            .and_then(|s| s.attr_parse::<i64>("cx"))
            .filter(|&cx| cx > 0)
            .unwrap_or(default_w);
        let slide_height = size
            .and_then(|s| s.attr_parse::<i64>("cy"))
            .filter(|&cy| cy > 0)
            .unwrap_or(default_h);

        // Masters in presentation order, each followed by its layouts
        let master_paths: Vec<String> = root
            .find("sldMasterIdLst")
            .map(|lst| {
                lst.children_named("sldMasterId")
                    .filter_map(|m| m.ns_attr("id"))
                    .filter_map(|id| rels.target_path(id))
                    .collect()
            })
            .unwrap_or_default();
        for path in &master_paths {
            if let Some(master) = self.master(path) {
                let layout_paths = master_layout_paths(&self.masters[master].part);
                for layout_path in layout_paths {
                    self.layout(&layout_path);
                }
            }
        }

        let slide_paths: Vec<String> = root
            .find("sldIdLst")
            .map(|lst| {
                lst.children_named("sldId")
                    .filter_map(|s| s.ns_attr("id"))
                    .filter_map(|id| rels.target_path(id))
                    .collect()
            })
            .unwrap_or_default();

        let mut slides = Vec::with_capacity(slide_paths.len());
        for (i, path) in slide_paths.iter().enumerate() {
            slides.push(self.read_slide(i + 1, path)?);
        }

        let theme = self.read_theme(&rels);

        inherit_layout_frames(&mut self.layouts, &self.masters);
        for slide in &mut slides {
            let layout = slide.layout.and_then(|i| self.layouts.get(i));
            let master = layout
                .and_then(|l| l.master)
                .and_then(|i| self.masters.get(i));
            let sources: Vec<&[Shape]> = layout
                .map(|l| l.shapes.as_slice())
                .into_iter()
                .chain(master.map(|m| m.shapes.as_slice()))
                .collect();
            inherit_frames(&mut slide.shapes, &sources);
        }

        log::debug!(
            "read presentation: {} slides, {} layouts, {} masters",
            slides.len(),
            self.layouts.len(),
            self.masters.len()
        );

        Ok(Presentation {
            slide_width,
            slide_height,
            slides,
            layouts: self.layouts,
            masters: self.masters,
            theme,
        })
    }

    fn read_slide(&mut self, number: usize, path: &str) -> Result<Slide> {
        let part = self.load_part(path)?;
        let layout = part
            .rels
            .first_of_type("slideLayout")
            .and_then(|r| part.rels.target_path(&r.id))
            .and_then(|layout_path| self.layout(&layout_path));
        let shapes = shapes_of(&part);
        Ok(Slide {
            number,
            part,
            layout,
            shapes,
        })
    }

    /// Index of the layout at `path`, loading it (and its master) on first use.
    fn layout(&mut self, path: &str) -> Option<usize> {
        if let Some(&i) = self.layout_index.get(path) {
            return Some(i);
        }
        let part = match self.load_part(path) {
            Ok(part) => part,
            Err(e) => {
                log::debug!("skipping layout {}: {}", path, e);
                return None;
            }
        };
        let master = part
            .rels
            .first_of_type("slideMaster")
            .and_then(|r| part.rels.target_path(&r.id))
            .and_then(|master_path| self.master(&master_path));
        let name = part
            .xml
            .child("cSld")
            .and_then(|c| c.attr("name"))
            .map(str::to_string);
        let shapes = shapes_of(&part);

        let index = self.layouts.len();
        self.layouts.push(Layout {
            part,
            name,
            master,
            shapes,
        });
        self.layout_index.insert(path.to_string(), index);
        Some(index)
    }

    /// Index of the master at `path`, loading it on first use.
    fn master(&mut self, path: &str) -> Option<usize> {
        if let Some(&i) = self.master_index.get(path) {
            return Some(i);
        }
        let part = match self.load_part(path) {
            Ok(part) => part,
            Err(e) => {
                log::debug!("skipping master {}: {}", path, e);
                return None;
            }
        };
        let shapes = shapes_of(&part);

        let index = self.masters.len();
        self.masters.push(Master { part, shapes });
        self.master_index.insert(path.to_string(), index);
        Some(index)
    }

    /// Theme via the presentation relationships, then the first master's.
    fn read_theme(&self, rels: &Relationships) -> Option<XmlElement> {
        let path = rels
            .first_of_type("theme")
            .and_then(|r| rels.target_path(&r.id))
            .or_else(|| {
                self.masters.first().and_then(|m| {
                    m.part
                        .rels
                        .first_of_type("theme")
                        .and_then(|r| m.part.rels.target_path(&r.id))
                })
            })?;

        match self
            .container
            .read_xml(&path)
            .and_then(|xml| XmlElement::parse(&xml))
        {
            Ok(theme) => Some(theme),
            Err(e) => {
                log::debug!("theme {} unavailable: {}", path, e);
                None
            }
        }
    }

    /// Read an XML part, its relationships and the media it references.
    fn load_part(&self, path: &str) -> Result<Part> {
        let xml = XmlElement::parse(&self.container.read_xml(path)?)?;
        let rels = self.container.read_relationships(path)?;

        let mut blobs = HashMap::new();
        for rel in rels.iter() {
            if rel.external || !BLOB_REL_TYPES.iter().any(|t| rel.is_type(t)) {
                continue;
            }
            let Some(target) = rels.target_path(&rel.id) else {
                continue;
            };
            match self.container.read_binary(&target) {
                Ok(data) => {
                    let content_type = self.container.content_type(&target).map(str::to_string);
                    blobs.insert(rel.id.clone(), Blob::new(data, &target, content_type));
                }
                Err(e) => log::debug!("{}: media {} unavailable: {}", path, target, e),
            }
        }

        Ok(Part {
            path: path.to_string(),
            xml,
            rels,
            blobs,
        })
    }
}

fn shapes_of(part: &Part) -> Vec<Shape> {
    part.xml
        .find("cSld/spTree")
        .map(parse_shape_tree)
        .unwrap_or_default()
}

/// Layout parts of a master in `p:sldLayoutIdLst` order, or in relationship
/// order when the master has no such list.
fn master_layout_paths(master: &Part) -> Vec<String> {
    match master.xml.child("sldLayoutIdLst") {
        Some(lst) => lst
            .children_named("sldLayoutId")
            .filter_map(|l| l.ns_attr("id"))
            .filter_map(|id| master.rels.target_path(id))
            .collect(),
        None => master
            .rels
            .iter()
            .filter(|r| r.is_type("slideLayout") && !r.external)
            .filter_map(|r| master.rels.target_path(&r.id))
            .collect(),
    }
}

fn inherit_layout_frames(layouts: &mut [Layout], masters: &[Master]) {
    for layout in layouts.iter_mut() {
        if let Some(master) = layout.master.and_then(|i| masters.get(i)) {
            inherit_frames(&mut layout.shapes, &[master.shapes.as_slice()]);
        }
    }
}

/// Give placeholders without their own transform the frame of the
/// matching placeholder in the first source that has one.
fn inherit_frames(shapes: &mut [Shape], sources: &[&[Shape]]) {
    for shape in shapes.iter_mut().filter(|s| !s.has_own_frame) {
        let Some(ph) = shape.placeholder.as_ref() else {
            continue;
        };
        let inherited = sources.iter().find_map(|source| {
            let candidates = source
                .iter()
                .filter(|s| s.placeholder.is_some() && s.frame != Frame::default());
            let by_idx = ph.idx.and_then(|idx| {
                candidates
                    .clone()
                    .find(|s| s.placeholder.as_ref().is_some_and(|p| p.idx == Some(idx)))
            });
            by_idx
                .or_else(|| {
                    candidates.clone().find(|s| {
                        s.placeholder.as_ref().is_some_and(|p| {
                            p.kind == ph.kind || (p.kind.is_title() && ph.kind.is_title())
                        })
                    })
                })
                .map(|s| (s.frame, s.rotation))
        });
        if let Some((frame, rotation)) = inherited {
            shape.frame = frame;
            shape.rotation = rotation;
        }
    }
}
