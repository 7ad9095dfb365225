//! Shape tree parsing (`p:spTree`).

use crate::model::{
    ColorRef, Frame, LineFormat, Media, Paragraph, Picture, Placeholder, PlaceholderType,
    RunProperties, Shape, ShapeKind, Table, TextAlignment, TextBody, TextRun,
};
use crate::units::DashStyle;
use crate::xml::{parse_bool, XmlElement};

/// Parse the shapes of a `p:spTree` in document order.
///
/// Group shapes are kept as [`ShapeKind::Group`] without their members;
/// `mc:AlternateContent` contributes the shapes of its first choice.
pub fn parse_shape_tree(tree: &XmlElement) -> Vec<Shape> {
    let mut shapes = Vec::new();
    for child in &tree.children {
        match child.name.as_str() {
            "sp" | "pic" | "graphicFrame" | "cxnSp" | "grpSp" | "contentPart" => {
                shapes.push(parse_shape(child));
            }
            "AlternateContent" => {
                if let Some(branch) = child.child("Choice").or_else(|| child.child("Fallback")) {
                    shapes.extend(parse_shape_tree(branch));
                }
            }
            _ => {}
        }
    }
    shapes
}

/// Parse one shape element.
pub fn parse_shape(el: &XmlElement) -> Shape {
    let nv = el.children.iter().find(|c| c.name.starts_with("nv"));
    let c_nv_pr = nv.and_then(|nv| nv.child("cNvPr"));
    let nv_pr = nv.and_then(|nv| nv.child("nvPr"));

    let placeholder = nv_pr.and_then(|p| p.child("ph")).map(|ph| Placeholder {
        kind: PlaceholderType::from_ooxml(ph.attr("type")),
        idx: ph.attr_parse("idx"),
    });

    let sp_pr = el.child("spPr");
    let xfrm = match el.name.as_str() {
        "graphicFrame" => el.child("xfrm"),
        "grpSp" => el.find("grpSpPr/xfrm"),
        _ => sp_pr.and_then(|p| p.child("xfrm")),
    };
    let (frame, rotation) = xfrm.map(parse_xfrm).unwrap_or_default();

    let kind = classify(el, nv, nv_pr, placeholder.as_ref());
    let text = el.child("txBody").map(parse_text_body);

    Shape {
        id: c_nv_pr.and_then(|c| c.attr_parse("id")).unwrap_or(0),
        name: c_nv_pr
            .and_then(|c| c.attr("name"))
            .unwrap_or_default()
            .to_string(),
        kind,
        frame,
        has_own_frame: xfrm.is_some_and(|x| x.child("off").is_some() || x.child("ext").is_some()),
        rotation,
        placeholder,
        fill: sp_pr.and_then(|p| p.child("solidFill")).and_then(parse_color),
        line: sp_pr.and_then(|p| p.child("ln")).map(parse_line),
        text,
        xml: el.clone(),
    }
}

fn classify(
    el: &XmlElement,
    nv: Option<&XmlElement>,
    nv_pr: Option<&XmlElement>,
    placeholder: Option<&Placeholder>,
) -> ShapeKind {
    match el.name.as_str() {
        "pic" => {
            let video_rel = nv_pr.and_then(|p| {
                p.child("videoFile")
                    .and_then(|v| v.ns_attr("link"))
                    .or_else(|| p.find_deep("ext/media").and_then(|m| m.ns_attr("embed")))
            });
            let is_media = nv_pr.is_some_and(|p| {
                p.child("videoFile").is_some() || p.find_deep("ext/media").is_some()
            });
            let embed = el.find("blipFill/blip").and_then(|b| b.ns_attr("embed"));
            if is_media {
                ShapeKind::Media(Media {
                    video_rel: video_rel.map(str::to_string),
                    poster_embed: embed.map(str::to_string),
                })
            } else {
                ShapeKind::Picture(Picture {
                    embed: embed.map(str::to_string),
                })
            }
        }
        "graphicFrame" => match el.find_deep("graphicData/tbl") {
            Some(tbl) => ShapeKind::Table(parse_table(tbl)),
            None => ShapeKind::Other,
        },
        "cxnSp" => ShapeKind::Line,
        "grpSp" => ShapeKind::Group,
        "sp" => {
            let prst = el.find("spPr/prstGeom").and_then(|g| g.attr("prst"));
            if prst == Some("line") {
                ShapeKind::Line
            } else if placeholder.is_some() {
                ShapeKind::Placeholder
            } else if nv
                .and_then(|n| n.child("cNvSpPr"))
                .and_then(|c| c.attr("txBox"))
                .and_then(parse_bool)
                .unwrap_or(false)
            {
                ShapeKind::TextBox
            } else if prst.is_some() {
                ShapeKind::AutoShape
            } else if el.find("spPr/custGeom").is_some() {
                ShapeKind::Freeform
            } else {
                ShapeKind::Other
            }
        }
        _ => ShapeKind::Other,
    }
}

/// Read `a:off`, `a:ext` and `rot` (60000ths of a degree).
fn parse_xfrm(xfrm: &XmlElement) -> (Frame, f64) {
    let off = xfrm.child("off");
    let ext = xfrm.child("ext");
    let frame = Frame {
        left: off.and_then(|o| o.attr_parse("x")).unwrap_or(0),
        top: off.and_then(|o| o.attr_parse("y")).unwrap_or(0),
        width: ext.and_then(|e| e.attr_parse("cx")).unwrap_or(0),
        height: ext.and_then(|e| e.attr_parse("cy")).unwrap_or(0),
    };
    let rotation = xfrm.attr_parse::<f64>("rot").unwrap_or(0.0) / 60_000.0;
    (frame, rotation)
}

/// Read the colour child of a fill element (`a:solidFill`, `p:bgRef`, ...).
pub fn parse_color(fill: &XmlElement) -> Option<ColorRef> {
    fill.children.iter().find_map(|c| match c.name.as_str() {
        "srgbClr" => c.attr("val").map(|v| ColorRef::Rgb(v.to_string())),
        "schemeClr" => c.attr("val").map(|v| ColorRef::Scheme(v.to_string())),
        "sysClr" => Some(ColorRef::System {
            name: c.attr("val").unwrap_or_default().to_string(),
            last_rgb: c.attr("lastClr").map(str::to_string),
        }),
        _ => None,
    })
}

fn parse_line(ln: &XmlElement) -> LineFormat {
    LineFormat {
        width: ln.attr_parse("w"),
        color: ln.child("solidFill").and_then(parse_color),
        dash: ln
            .child("prstDash")
            .and_then(|d| d.attr("val"))
            .and_then(DashStyle::from_preset),
        hidden: ln.child("noFill").is_some(),
    }
}

/// Read run properties from `a:rPr`, `a:defRPr` or `a:endParaRPr`.
pub fn parse_run_properties(rpr: &XmlElement) -> RunProperties {
    RunProperties {
        family: rpr
            .child("latin")
            .and_then(|l| l.attr("typeface"))
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        size_pt: rpr.attr_parse::<f64>("sz").map(|sz| sz / 100.0),
        bold: rpr.attr("b").and_then(parse_bool),
        italic: rpr.attr("i").and_then(parse_bool),
        underline: rpr.attr("u").map(|u| u != "none"),
        color: rpr.child("solidFill").and_then(parse_color),
    }
}

fn parse_text_body(body: &XmlElement) -> TextBody {
    TextBody {
        paragraphs: body.children_named("p").map(parse_paragraph).collect(),
    }
}

fn parse_paragraph(p: &XmlElement) -> Paragraph {
    let ppr = p.child("pPr");
    let runs = p
        .children
        .iter()
        .filter(|c| c.name == "r" || c.name == "fld")
        .map(|r| TextRun {
            text: r.child("t").map(|t| t.text.clone()).unwrap_or_default(),
            props: r.child("rPr").map(parse_run_properties).unwrap_or_default(),
        })
        .collect();

    Paragraph {
        alignment: ppr
            .and_then(|p| p.attr("algn"))
            .and_then(TextAlignment::from_ooxml),
        level: ppr
            .and_then(|p| p.attr_parse::<u8>("lvl"))
            .unwrap_or(0)
            .min(8),
        defaults: ppr
            .and_then(|p| p.child("defRPr"))
            .map(parse_run_properties)
            .unwrap_or_default(),
        runs,
    }
}

fn parse_table(tbl: &XmlElement) -> Table {
    let rows = tbl
        .children_named("tr")
        .map(|tr| {
            tr.children_named("tc")
                .map(|tc| {
                    tc.child("txBody")
                        .map(|b| parse_text_body(b).plain_text())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();
    Table { rows }
}
