//! Synthetic PPTX packages for integration tests.
#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// 1x1 PNG.
pub const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0xF8,
    0xCF, 0xC0, 0xF0, 0x1F, 0x00, 0x05, 0x00, 0x01, 0xFF, 0x89, 0x99, 0x3D, 0x1D, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// 4:3 slide, 960x720 px.
pub const SLIDE_CX: i64 = 9_144_000;
pub const SLIDE_CY: i64 = 6_858_000;

/// `.rels` document for `(id, short type, target)` triples.
pub fn rels(entries: &[(&str, &str, &str)]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{}">"#,
        REL_NS
    );
    for (id, ty, target) in entries {
        xml.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}/{}" Target="{}"/>"#,
            id, REL_BASE, ty, target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Slide-like part (`p:sld`, `p:sldLayout`, `p:sldMaster`) around a shape tree.
pub fn part(root: &str, shapes: &str, extra: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:{root} {NS}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{shapes}</p:spTree></p:cSld>{extra}</p:{root}>"#
    )
}

pub fn xfrm(x: i64, y: i64, cx: i64, cy: i64) -> String {
    format!(r#"<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#)
}

pub fn title_placeholder(id: u32, text: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="Title {id}"/><p:cNvSpPr/><p:nvPr><p:ph type="ctrTitle"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:rPr lang="en-US"/><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sp>"#
    )
}

pub fn text_box(id: u32, frame: &str, text: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="TextBox {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>{frame}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr><p:txBody><a:bodyPr/><a:p><a:r><a:rPr lang="en-US" sz="2400"/><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sp>"#
    )
}

pub fn picture(id: u32, embed: &str, frame: &str) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="Picture {id}"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="{embed}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>{frame}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#
    )
}

pub fn table(id: u32, frame: &str, rows: &[&[&str]]) -> String {
    let mut body = String::new();
    for row in rows {
        body.push_str(r#"<a:tr h="370840">"#);
        for cell in *row {
            body.push_str(&format!(
                "<a:tc><a:txBody><a:bodyPr/><a:p><a:r><a:t>{cell}</a:t></a:r></a:p></a:txBody><a:tcPr/></a:tc>"
            ));
        }
        body.push_str("</a:tr>");
    }
    let frame = frame.replace("a:xfrm", "p:xfrm");
    format!(
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{id}" name="Table {id}"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr>{frame}<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblGrid/>{body}</a:tbl></a:graphicData></a:graphic></p:graphicFrame>"#
    )
}

pub fn theme(major: &str, minor: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><a:theme {NS} name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4F81BD"/></a:accent1></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="{major}"/></a:majorFont><a:minorFont><a:latin typeface="{minor}"/></a:minorFont></a:fontScheme></a:themeElements></a:theme>"#
    )
}

/// Write `(name, bytes)` entries into an in-memory ZIP.
pub fn zip_bytes(entries: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, data) in entries {
        writer.start_file(name.as_str(), options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Builder for a one-master presentation package.
pub struct DeckBuilder {
    layouts: Vec<(String, String)>,
    slides: Vec<(String, String)>,
    media: Vec<(String, Vec<u8>)>,
    master_extra: String,
    layout_list: Option<Vec<usize>>,
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckBuilder {
    pub fn new() -> Self {
        Self {
            layouts: Vec::new(),
            slides: Vec::new(),
            media: Vec::new(),
            master_extra: String::new(),
            layout_list: None,
        }
    }

    /// Extra master children after `p:cSld`, e.g. `p:txStyles`.
    pub fn master_extra(mut self, xml: &str) -> Self {
        self.master_extra = xml.to_string();
        self
    }

    /// Write the master's `p:sldLayoutIdLst` listing layouts (1-based) in
    /// this order. The master relationships stay in layout order.
    pub fn layout_list(mut self, order: &[usize]) -> Self {
        self.layout_list = Some(order.to_vec());
        self
    }

    /// Add a layout. `rels` lists extra `(id, type, target)` relationships
    /// besides the master link (`rId1`).
    pub fn layout(mut self, shapes: &str, rels: &[(&str, &str, &str)]) -> Self {
        self.push_layout(shapes, rels);
        self
    }

    fn push_layout(&mut self, shapes: &str, extra: &[(&str, &str, &str)]) {
        let mut entries = vec![("rId1", "slideMaster", "../slideMasters/slideMaster1.xml")];
        entries.extend_from_slice(extra);
        self.layouts
            .push((part("sldLayout", shapes, ""), rels(&entries)));
    }

    /// Add a slide on layout `layout` (1-based). `rels` lists extra
    /// relationships besides the layout link (`rId1`).
    pub fn slide(mut self, layout: usize, shapes: &str, rels_extra: &[(&str, &str, &str)]) -> Self {
        let target = format!("../slideLayouts/slideLayout{}.xml", layout);
        let mut entries = vec![("rId1", "slideLayout", target.as_str())];
        entries.extend_from_slice(rels_extra);
        let rels_xml = rels(&entries);
        self.slides.push((part("sld", shapes, ""), rels_xml));
        self
    }

    /// Add a media part under `ppt/media/`.
    pub fn media(mut self, name: &str, data: &[u8]) -> Self {
        self.media.push((name.to_string(), data.to_vec()));
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        if self.layouts.is_empty() {
            self.push_layout("", &[]);
        }

        let mut files: Vec<(String, Vec<u8>)> = Vec::new();
        let mut file = |name: String, data: Vec<u8>| files.push((name, data));

        let mut types = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Default Extension="mp4" ContentType="video/mp4"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#,
        );
        for i in 1..=self.slides.len() {
            types.push_str(&format!(
                r#"<Override PartName="/ppt/slides/slide{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
            ));
        }
        types.push_str("</Types>");
        file("[Content_Types].xml".into(), types.into_bytes());
        file(
            "_rels/.rels".into(),
            rels(&[("rId1", "officeDocument", "ppt/presentation.xml")]).into_bytes(),
        );

        let mut pres_rels = vec![
            ("rId1".to_string(), "slideMaster", "slideMasters/slideMaster1.xml".to_string()),
            ("rId2".to_string(), "theme", "theme/theme1.xml".to_string()),
        ];
        let mut sld_ids = String::new();
        for i in 1..=self.slides.len() {
            let id = format!("rId{}", i + 2);
            sld_ids.push_str(&format!(r#"<p:sldId id="{}" r:id="{}"/>"#, 255 + i, id));
            pres_rels.push((id, "slide", format!("slides/slide{}.xml", i)));
        }
        let pres_rels: Vec<(&str, &str, &str)> = pres_rels
            .iter()
            .map(|(id, ty, target)| (id.as_str(), *ty, target.as_str()))
            .collect();
        file(
            "ppt/presentation.xml".into(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation {NS}><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{sld_ids}</p:sldIdLst><p:sldSz cx="{SLIDE_CX}" cy="{SLIDE_CY}"/></p:presentation>"#
            )
            .into_bytes(),
        );
        file(
            "ppt/_rels/presentation.xml.rels".into(),
            rels(&pres_rels).into_bytes(),
        );
        file(
            "ppt/theme/theme1.xml".into(),
            theme("Georgia", "Verdana").into_bytes(),
        );

        let mut master_rels: Vec<(String, &str, String)> = Vec::new();
        for i in 1..=self.layouts.len() {
            master_rels.push((
                format!("rId{}", i),
                "slideLayout",
                format!("../slideLayouts/slideLayout{}.xml", i),
            ));
        }
        master_rels.push((
            format!("rId{}", self.layouts.len() + 1),
            "theme",
            "../theme/theme1.xml".to_string(),
        ));
        let master_rels: Vec<(&str, &str, &str)> = master_rels
            .iter()
            .map(|(id, ty, target)| (id.as_str(), *ty, target.as_str()))
            .collect();
        let mut master_extra = String::new();
        if let Some(order) = &self.layout_list {
            master_extra.push_str("<p:sldLayoutIdLst>");
            for (n, i) in order.iter().enumerate() {
                master_extra.push_str(&format!(
                    r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#,
                    2147483649 + n,
                    i
                ));
            }
            master_extra.push_str("</p:sldLayoutIdLst>");
        }
        master_extra.push_str(&self.master_extra);
        file(
            "ppt/slideMasters/slideMaster1.xml".into(),
            part("sldMaster", "", &master_extra).into_bytes(),
        );
        file(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels".into(),
            rels(&master_rels).into_bytes(),
        );

        for (i, (xml, rels_xml)) in self.layouts.iter().enumerate() {
            file(
                format!("ppt/slideLayouts/slideLayout{}.xml", i + 1),
                xml.clone().into_bytes(),
            );
            file(
                format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", i + 1),
                rels_xml.clone().into_bytes(),
            );
        }
        for (i, (xml, rels_xml)) in self.slides.iter().enumerate() {
            file(
                format!("ppt/slides/slide{}.xml", i + 1),
                xml.clone().into_bytes(),
            );
            file(
                format!("ppt/slides/_rels/slide{}.xml.rels", i + 1),
                rels_xml.clone().into_bytes(),
            );
        }
        for (name, data) in &self.media {
            file(format!("ppt/media/{}", name), data.clone());
        }

        zip_bytes(&files)
    }
}

/// Three slides: a title slide, a slide on a layout with a full-bleed
/// picture, and a table slide.
pub fn three_slide_deck() -> Vec<u8> {
    let full_bleed = picture(2, "rId2", &xfrm(0, 0, SLIDE_CX, SLIDE_CY));
    DeckBuilder::new()
        .layout(
            &format!(
                r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="ctrTitle"/></p:nvPr></p:nvSpPr><p:spPr>{}</p:spPr></p:sp>"#,
                xfrm(685_800, 2_130_425, 7_772_400, 1_470_025)
            ),
            &[],
        )
        .layout(&full_bleed, &[("rId2", "image", "../media/image1.png")])
        .slide(1, &title_placeholder(2, "Quarterly &amp; Review"), &[])
        .slide(
            2,
            &text_box(3, &xfrm(914_400, 914_400, 4_572_000, 914_400), "On a picture"),
            &[],
        )
        .slide(
            1,
            &table(
                4,
                &xfrm(914_400, 1_828_800, 6_096_000, 1_483_360),
                &[&["Region", "Sales"], &["North", "42"]],
            ),
            &[],
        )
        .media("image1.png", PNG)
        .build()
}
