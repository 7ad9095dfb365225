//! Theme fonts, scheme colours and slide backgrounds.

use crate::model::{Blob, ColorRef, Part, Presentation, Slide};
use crate::pptx::parse_color;
use crate::units::{color_to_hex, normalize_hex};
use crate::xml::XmlElement;

/// Major (heading) and minor (body) Latin typefaces of the theme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeFonts {
    pub major: Option<String>,
    pub minor: Option<String>,
}

impl ThemeFonts {
    /// Substitute a theme alias (`+mn-lt`, `+mj-ea`, ...) with the
    /// matching typeface.
    ///
    /// Plain family names pass through; aliases the theme cannot resolve
    /// and empty names yield `None`.
    pub fn resolve_family(&self, family: &str) -> Option<String> {
        let family = family.trim();
        if family.is_empty() {
            return None;
        }
        match family.strip_prefix('+') {
            Some(alias) if alias.starts_with("mn") => self.minor.clone(),
            Some(alias) if alias.starts_with("mj") || alias.starts_with("maj") => {
                self.major.clone()
            }
            Some(_) => None,
            None => Some(family.to_string()),
        }
    }
}

/// Read the theme's `a:fontScheme` Latin typefaces. Never fails.
pub fn theme_fonts(pres: &Presentation) -> ThemeFonts {
    let Some(theme) = pres.theme.as_ref() else {
        log::debug!("presentation has no theme part");
        return ThemeFonts::default();
    };
    let typeface = |kind: &str| {
        theme
            .find_deep(&format!("fontScheme/{}/latin", kind))
            .and_then(|latin| latin.attr("typeface"))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    };
    ThemeFonts {
        major: typeface("majorFont"),
        minor: typeface("minorFont"),
    }
}

/// Map slide colour-map aliases onto colour scheme slots.
fn scheme_slot(name: &str) -> &str {
    match name {
        "bg1" => "lt1",
        "tx1" => "dk1",
        "bg2" => "lt2",
        "tx2" => "dk2",
        other => other,
    }
}

/// Look up a scheme colour in the theme.
///
/// Returns the hex digits as written (no `#`): the slot's `srgbClr@val`,
/// or `sysClr@lastClr`.
pub fn scheme_color(pres: &Presentation, name: &str) -> Option<String> {
    let scheme = pres.theme.as_ref()?.find_deep("clrScheme")?;
    let slot = scheme.child(scheme_slot(name))?;
    slot.child("srgbClr")
        .and_then(|c| c.attr("val"))
        .or_else(|| slot.child("sysClr").and_then(|c| c.attr("lastClr")))
        .map(str::to_string)
}

/// Resolve any colour reference to `#rrggbb`, going through the theme
/// for scheme colours.
pub fn resolve_color(pres: &Presentation, color: &ColorRef) -> Option<String> {
    match color {
        ColorRef::Scheme(name) => scheme_color(pres, name).and_then(|hex| normalize_hex(&hex)),
        other => color_to_hex(other),
    }
}

/// Effective slide background.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundStyle<'a> {
    /// A CSS declaration such as `background-color: #ffffff;`
    Css(String),
    /// A picture fill to be written next to the slide pages
    Picture(&'a Blob),
}

/// CSS used when no part defines a background.
pub const DEFAULT_BACKGROUND: &str = "background-color: #ffffff;";

/// Resolve the background of a slide.
///
/// The slide's own `p:bg` is checked first, then its layout's, then its
/// master's; each tier tries a solid fill, a picture fill and a `p:bgRef`
/// theme colour. Missing nodes and blobs advance to the next tier; the
/// result defaults to white.
pub fn background_style<'a>(slide: &'a Slide, pres: &'a Presentation) -> BackgroundStyle<'a> {
    let layout = pres.layout_of(slide);
    let master = layout.and_then(|l| pres.master_of(l));

    let tiers = std::iter::once(&slide.part)
        .chain(layout.map(|l| &l.part))
        .chain(master.map(|m| &m.part));
    for part in tiers {
        if let Some(style) = part_background(part, pres) {
            return style;
        }
    }
    BackgroundStyle::Css(DEFAULT_BACKGROUND.to_string())
}

fn part_background<'a>(part: &'a Part, pres: &Presentation) -> Option<BackgroundStyle<'a>> {
    let bg = part.background()?;

    if let Some(bg_pr) = bg.child("bgPr") {
        if let Some(hex) = solid_fill_hex(bg_pr, pres) {
            return Some(BackgroundStyle::Css(format!("background-color: {};", hex)));
        }
        if let Some(embed) = bg_pr.find("blipFill/blip").and_then(|b| b.ns_attr("embed")) {
            match part.blob(embed) {
                Some(blob) => return Some(BackgroundStyle::Picture(blob)),
                None => log::debug!("{}: background picture {} missing", part.path, embed),
            }
        }
    }

    let hex = bg
        .child("bgRef")
        .and_then(parse_color)
        .and_then(|color| resolve_color(pres, &color))?;
    Some(BackgroundStyle::Css(format!("background-color: {};", hex)))
}

fn solid_fill_hex(bg_pr: &XmlElement, pres: &Presentation) -> Option<String> {
    let color = bg_pr.child("solidFill").and_then(parse_color)?;
    resolve_color(pres, &color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Relationships;
    use crate::model::{Layout, Master};
    use std::collections::HashMap;

    const THEME: &str = r#"<a:theme xmlns:a="a"><a:themeElements>
        <a:clrScheme name="Office">
          <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
          <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
          <a:dk2><a:srgbClr val="44546A"/></a:dk2>
          <a:accent1><a:srgbClr val="4472C4"/></a:accent1>
        </a:clrScheme>
        <a:fontScheme name="Office">
          <a:majorFont><a:latin typeface="Calibri Light"/></a:majorFont>
          <a:minorFont><a:latin typeface="Calibri"/></a:minorFont>
        </a:fontScheme>
      </a:themeElements></a:theme>"#;

    fn part(xml: &str) -> Part {
        Part {
            path: "ppt/test.xml".to_string(),
            xml: XmlElement::parse(xml).unwrap(),
            rels: Relationships::default(),
            blobs: HashMap::new(),
        }
    }

    fn presentation(slide_xml: &str, master_xml: &str) -> Presentation {
        Presentation {
            theme: Some(XmlElement::parse(THEME).unwrap()),
            slides: vec![Slide {
                number: 1,
                part: part(slide_xml),
                layout: Some(0),
                shapes: Vec::new(),
            }],
            layouts: vec![Layout {
                part: part(r#"<p:sldLayout xmlns:p="p"><p:cSld/></p:sldLayout>"#),
                master: Some(0),
                ..Default::default()
            }],
            masters: vec![Master {
                part: part(master_xml),
                shapes: Vec::new(),
            }],
            ..Default::default()
        }
    }

    const EMPTY_SLIDE: &str = r#"<p:sld xmlns:p="p"><p:cSld/></p:sld>"#;

    #[test]
    fn test_theme_fonts() {
        let pres = presentation(EMPTY_SLIDE, EMPTY_SLIDE);
        let fonts = theme_fonts(&pres);
        assert_eq!(fonts.major.as_deref(), Some("Calibri Light"));
        assert_eq!(fonts.minor.as_deref(), Some("Calibri"));
        assert_eq!(theme_fonts(&Presentation::default()), ThemeFonts::default());
    }

    #[test]
    fn test_resolve_family_aliases() {
        let fonts = ThemeFonts {
            major: Some("Major".to_string()),
            minor: Some("Minor".to_string()),
        };
        assert_eq!(fonts.resolve_family("+mn-lt").as_deref(), Some("Minor"));
        assert_eq!(fonts.resolve_family("+mj-ea").as_deref(), Some("Major"));
        assert_eq!(fonts.resolve_family("Verdana").as_deref(), Some("Verdana"));
        assert_eq!(fonts.resolve_family("+xx-lt"), None);
        assert_eq!(fonts.resolve_family(""), None);
        assert_eq!(ThemeFonts::default().resolve_family("+mn-lt"), None);
    }

    #[test]
    fn test_scheme_color() {
        let pres = presentation(EMPTY_SLIDE, EMPTY_SLIDE);
        assert_eq!(scheme_color(&pres, "accent1").as_deref(), Some("4472C4"));
        assert_eq!(scheme_color(&pres, "tx1").as_deref(), Some("000000"));
        assert_eq!(scheme_color(&pres, "bg1").as_deref(), Some("FFFFFF"));
        assert_eq!(scheme_color(&pres, "tx2").as_deref(), Some("44546A"));
        assert_eq!(scheme_color(&pres, "accent6"), None);
        assert_eq!(
            resolve_color(&pres, &ColorRef::Scheme("accent1".to_string())).as_deref(),
            Some("#4472c4")
        );
    }

    #[test]
    fn test_slide_solid_background() {
        let slide = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:bg><p:bgPr><a:solidFill><a:srgbClr val="112233"/></a:solidFill></p:bgPr></p:bg></p:cSld></p:sld>"#;
        let pres = presentation(slide, EMPTY_SLIDE);
        assert_eq!(
            background_style(&pres.slides[0], &pres),
            BackgroundStyle::Css("background-color: #112233;".to_string())
        );
    }

    #[test]
    fn test_master_bg_ref_background() {
        let master = r#"<p:sldMaster xmlns:p="p" xmlns:a="a"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="accent1"/></p:bgRef></p:bg></p:cSld></p:sldMaster>"#;
        let pres = presentation(EMPTY_SLIDE, master);
        assert_eq!(
            background_style(&pres.slides[0], &pres),
            BackgroundStyle::Css("background-color: #4472c4;".to_string())
        );
    }

    #[test]
    fn test_background_defaults_to_white() {
        let pres = presentation(EMPTY_SLIDE, EMPTY_SLIDE);
        assert_eq!(
            background_style(&pres.slides[0], &pres),
            BackgroundStyle::Css(DEFAULT_BACKGROUND.to_string())
        );
    }

    #[test]
    fn test_malformed_master_background_is_ignored() {
        // picture fill without a relationship, scheme colour the theme lacks
        let master = r#"<p:sldMaster xmlns:p="p" xmlns:a="a" xmlns:r="r"><p:cSld><p:bg>
            <p:bgPr><a:blipFill><a:blip r:embed="rId404"/></a:blipFill></p:bgPr>
            <p:bgRef><a:schemeClr val="accent6"/></p:bgRef>
          </p:bg></p:cSld></p:sldMaster>"#;
        let pres = presentation(EMPTY_SLIDE, master);
        assert_eq!(
            background_style(&pres.slides[0], &pres),
            BackgroundStyle::Css(DEFAULT_BACKGROUND.to_string())
        );
    }

    #[test]
    fn test_slide_picture_background() {
        let slide = r#"<p:sld xmlns:p="p" xmlns:a="a" xmlns:r="r"><p:cSld><p:bg><p:bgPr><a:blipFill><a:blip r:embed="rId2"/></a:blipFill></p:bgPr></p:bg></p:cSld></p:sld>"#;
        let mut pres = presentation(slide, EMPTY_SLIDE);
        pres.slides[0].part.blobs.insert(
            "rId2".to_string(),
            Blob::new(vec![0x89, b'P'], "ppt/media/image1.png", None),
        );
        match background_style(&pres.slides[0], &pres) {
            BackgroundStyle::Picture(blob) => assert_eq!(blob.ext, "png"),
            other => panic!("expected picture background, got {:?}", other),
        }
    }
}
