//! Shape models: geometry, placeholders, fills, lines and shape kinds.

use super::TextBody;
use crate::units::DashStyle;
use crate::xml::XmlElement;

/// A colour reference as written in DrawingML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorRef {
    /// `a:srgbClr@val`, six hex digits without `#`
    Rgb(String),
    /// `a:schemeClr@val`, e.g. `accent1` or `tx1`
    Scheme(String),
    /// `a:sysClr` with its cached `lastClr`
    System {
        name: String,
        last_rgb: Option<String>,
    },
}

/// Position and size in EMU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

/// Placeholder role (`p:ph@type`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaceholderType {
    Title,
    CenterTitle,
    SubTitle,
    Body,
    Object,
    Date,
    Footer,
    SlideNumber,
    Header,
    Picture,
    Chart,
    Table,
    Media,
    ClipArt,
    Diagram,
    SlideImage,
    Other(String),
}

impl PlaceholderType {
    /// Parse a `p:ph@type` value; an absent type means `obj`.
    pub fn from_ooxml(val: Option<&str>) -> Self {
        match val.unwrap_or("obj") {
            "title" => Self::Title,
            "ctrTitle" => Self::CenterTitle,
            "subTitle" => Self::SubTitle,
            "body" => Self::Body,
            "obj" => Self::Object,
            "dt" => Self::Date,
            "ftr" => Self::Footer,
            "sldNum" => Self::SlideNumber,
            "hdr" => Self::Header,
            "pic" => Self::Picture,
            "chart" => Self::Chart,
            "tbl" => Self::Table,
            "media" => Self::Media,
            "clipArt" => Self::ClipArt,
            "dgm" => Self::Diagram,
            "sldImg" => Self::SlideImage,
            other => Self::Other(other.to_string()),
        }
    }

    /// Title and centred-title placeholders.
    pub fn is_title(&self) -> bool {
        matches!(self, Self::Title | Self::CenterTitle)
    }
}

/// Placeholder reference of a shape (`p:nvPr/p:ph`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub kind: PlaceholderType,
    pub idx: Option<u32>,
}

/// Outline of a shape (`a:ln`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineFormat {
    /// Width in EMU
    pub width: Option<i64>,
    pub color: Option<ColorRef>,
    pub dash: Option<DashStyle>,
    /// `a:noFill` inside the outline
    pub hidden: bool,
}

/// Picture data of a `p:pic` shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Picture {
    /// `a:blip@r:embed`
    pub embed: Option<String>,
}

/// Movie data of a `p:pic` shape carrying `a:videoFile` or `p14:media`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Media {
    /// Relationship ID of the video part, if declared on the shape
    pub video_rel: Option<String>,
    /// Relationship ID of the poster frame image
    pub poster_embed: Option<String>,
}

/// Table data of a `p:graphicFrame` with `a:tbl`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Row-major cell text, paragraphs separated by `\n`
    pub rows: Vec<Vec<String>>,
}

/// What a shape is, as far as rendering is concerned.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Picture(Picture),
    Media(Media),
    Table(Table),
    /// Connector or preset `line` geometry
    Line,
    /// `p:sp` with preset geometry that is neither placeholder nor text box
    AutoShape,
    /// `p:sp` with `txBox="1"`
    TextBox,
    /// `p:sp` with a `p:ph` reference
    Placeholder,
    /// `p:sp` with custom geometry
    Freeform,
    Group,
    Other,
}

/// A shape on a slide, layout or master.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: u32,
    pub name: String,
    pub kind: ShapeKind,
    /// Frame in EMU; placeholders without their own transform inherit
    /// from the layout, then the master
    pub frame: Frame,
    /// Whether `frame` came from the shape's own `a:xfrm`
    pub has_own_frame: bool,
    /// Clockwise rotation in degrees
    pub rotation: f64,
    pub placeholder: Option<Placeholder>,
    /// Solid fill colour (`p:spPr/a:solidFill`)
    pub fill: Option<ColorRef>,
    pub line: Option<LineFormat>,
    pub text: Option<TextBody>,
    /// Source element, kept for list-style lookups
    pub xml: XmlElement,
}

impl Shape {
    /// Whether the shape is a title or centred-title placeholder.
    pub fn is_title_placeholder(&self) -> bool {
        self.placeholder.as_ref().is_some_and(|ph| ph.kind.is_title())
    }
}
