//! Effective run fonts and per-layout placeholder text defaults.

use super::theme::{resolve_color, ThemeFonts};
use super::Fallback;
use crate::model::{
    Layout, Master, Paragraph, Placeholder, PlaceholderType, Presentation, RunProperties, TextBody,
    TextRun,
};
use crate::pptx::parse_run_properties;
use crate::xml::XmlElement;
use std::collections::HashMap;

/// Family used when nothing else names one.
pub const DEFAULT_FAMILY: &str = "Arial";
/// Size in points for title text without any explicit size.
pub const DEFAULT_TITLE_SIZE_PT: f64 = 40.0;
/// Size in points for body text without any explicit size.
pub const DEFAULT_BODY_SIZE_PT: f64 = 18.0;

/// Resolved font of a text run.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveFont {
    pub family: String,
    pub size_pt: f64,
}

/// Resolve the family and size a run is displayed with.
///
/// Family: run, paragraph default, the shape's first paragraph default,
/// layout placeholder default, theme minor font, then [`DEFAULT_FAMILY`].
/// Size: run, paragraph, first paragraph, layout default, then 40pt for
/// titles and 18pt otherwise. Empty names and theme aliases the theme
/// cannot resolve never win.
pub fn effective_font(
    run: &TextRun,
    paragraph: &Paragraph,
    body: &TextBody,
    fonts: &ThemeFonts,
    layout_default: Option<&PlaceholderStyle>,
    is_title: bool,
) -> EffectiveFont {
    let first = body.first_paragraph().map(|p| &p.defaults);
    let family_of = |props: Option<&RunProperties>| {
        props
            .and_then(|p| p.family.as_deref())
            .and_then(|f| fonts.resolve_family(f))
    };

    let family = Fallback::new(family_of(Some(&run.props)))
        .then_with(|| family_of(Some(&paragraph.defaults)))
        .then_with(|| family_of(first))
        .then_with(|| {
            layout_default
                .and_then(|d| d.font_family.as_deref())
                .and_then(|f| fonts.resolve_family(f))
        })
        .then_with(|| fonts.minor.clone().filter(|f| !f.trim().is_empty()))
        .resolve()
        .unwrap_or_else(|| DEFAULT_FAMILY.to_string());

    let usable = |size: Option<f64>| size.filter(|s| s.is_finite() && *s > 0.0);
    let size_pt = Fallback::new(usable(run.props.size_pt))
        .then(usable(paragraph.defaults.size_pt))
        .then(usable(first.and_then(|p| p.size_pt)))
        .then(usable(layout_default.and_then(|d| d.font_size_pt)))
        .resolve()
        .unwrap_or(if is_title {
            DEFAULT_TITLE_SIZE_PT
        } else {
            DEFAULT_BODY_SIZE_PT
        });

    EffectiveFont { family, size_pt }
}

/// Default text properties of one layout placeholder.
///
/// All fields are optional; `color` is `#rrggbb` and `font_family` has
/// theme aliases already substituted where the theme allows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceholderStyle {
    pub font_family: Option<String>,
    pub font_size_pt: Option<f64>,
    pub color: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
}

impl PlaceholderStyle {
    /// Fill every missing field from `props`.
    fn fill_from(&mut self, props: &RunProperties, pres: &Presentation, fonts: &ThemeFonts) {
        if self.font_family.is_none() {
            self.font_family = props
                .family
                .as_deref()
                .and_then(|f| fonts.resolve_family(f).or_else(|| keep_alias(f)));
        }
        if self.font_size_pt.is_none() {
            self.font_size_pt = props.size_pt.filter(|s| s.is_finite() && *s > 0.0);
        }
        if self.color.is_none() {
            self.color = props.color.as_ref().and_then(|c| resolve_color(pres, c));
        }
        if self.bold.is_none() {
            self.bold = props.bold;
        }
        if self.italic.is_none() {
            self.italic = props.italic;
        }
        if self.underline.is_none() {
            self.underline = props.underline;
        }
    }

    fn is_complete(&self) -> bool {
        self.font_family.is_some()
            && self.font_size_pt.is_some()
            && self.color.is_some()
            && self.bold.is_some()
            && self.italic.is_some()
            && self.underline.is_some()
    }
}

/// Unresolvable aliases are kept so later readers can still try the theme.
fn keep_alias(family: &str) -> Option<String> {
    let family = family.trim();
    family.starts_with('+').then(|| family.to_string())
}

/// Key of a placeholder style: by role or by `idx`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaceholderKey {
    /// Placeholder role; title and centred title share one key
    Kind(PlaceholderType),
    Index(u32),
}

impl PlaceholderKey {
    /// Role key for a placeholder type.
    pub fn kind(kind: &PlaceholderType) -> Self {
        if kind.is_title() {
            Self::Kind(PlaceholderType::Title)
        } else {
            Self::Kind(kind.clone())
        }
    }
}

/// Placeholder text defaults of one layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceholderDefaults {
    styles: HashMap<PlaceholderKey, PlaceholderStyle>,
}

impl PlaceholderDefaults {
    /// Style for a slide placeholder: by `idx` first, then by role.
    pub fn lookup(&self, placeholder: &Placeholder) -> Option<&PlaceholderStyle> {
        placeholder
            .idx
            .and_then(|idx| self.styles.get(&PlaceholderKey::Index(idx)))
            .or_else(|| self.styles.get(&PlaceholderKey::kind(&placeholder.kind)))
    }

    /// Style by key.
    pub fn get(&self, key: &PlaceholderKey) -> Option<&PlaceholderStyle> {
        self.styles.get(key)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Compute the text defaults of every placeholder in a layout.
///
/// Each field comes from the earliest of: the placeholder's first run, its
/// first paragraph's `a:defRPr`, its own `a:lstStyle` levels 1-9, every
/// `a:lstStyle` of the layout for levels 1-9, then the master's `p:txStyles`
/// (title style for titles, body style otherwise, then the other one).
/// Sizes that are not positive are skipped at every tier.
pub fn layout_placeholder_defaults(
    layout: &Layout,
    master: Option<&Master>,
    pres: &Presentation,
    fonts: &ThemeFonts,
) -> PlaceholderDefaults {
    let mut styles = HashMap::new();
    let layout_lists: Vec<&XmlElement> = layout
        .part
        .xml
        .descendants()
        .filter(|e| e.name == "lstStyle")
        .collect();

    for shape in &layout.shapes {
        let Some(ph) = shape.placeholder.as_ref() else {
            continue;
        };

        let mut style = PlaceholderStyle::default();
        let mut tiers: Vec<RunProperties> = Vec::new();

        if let Some(body) = shape.text.as_ref() {
            if let Some(run) = body.paragraphs.iter().flat_map(|p| p.runs.iter()).next() {
                tiers.push(run.props.clone());
            }
            if let Some(first) = body.first_paragraph() {
                tiers.push(first.defaults.clone());
            }
        }
        tiers.extend(level_defaults(shape.xml.find("txBody/lstStyle").as_slice()));
        tiers.extend(level_defaults(&layout_lists));

        if let Some(tx_styles) = master.and_then(|m| m.part.xml.child("txStyles")) {
            let order = if ph.kind.is_title() {
                ["titleStyle", "bodyStyle"]
            } else {
                ["bodyStyle", "titleStyle"]
            };
            for name in order {
                if let Some(rpr) = tx_styles.find(&format!("{}/lvl1pPr/defRPr", name)) {
                    tiers.push(parse_run_properties(rpr));
                }
            }
        }

        for props in &tiers {
            if style.is_complete() {
                break;
            }
            style.fill_from(props, pres, fonts);
        }

        if let Some(idx) = ph.idx {
            styles.insert(PlaceholderKey::Index(idx), style.clone());
        }
        styles
            .entry(PlaceholderKey::kind(&ph.kind))
            .or_insert(style);
    }

    PlaceholderDefaults { styles }
}

/// `a:lvl{1..9}pPr/a:defRPr` of the given list styles, level by level and
/// in document order within a level.
fn level_defaults(lst_styles: &[&XmlElement]) -> Vec<RunProperties> {
    (1..=9)
        .flat_map(|lvl| {
            let path = format!("lvl{}pPr/defRPr", lvl);
            lst_styles
                .iter()
                .filter_map(|lst| lst.find(&path).map(parse_run_properties))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Per-conversion memo of layout placeholder defaults, keyed by layout index.
#[derive(Debug, Default)]
pub struct PlaceholderDefaultsCache {
    layouts: HashMap<usize, PlaceholderDefaults>,
}

impl PlaceholderDefaultsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults of layout `index`, computed on first request.
    ///
    /// Unknown layout indices yield an empty set.
    pub fn get(
        &mut self,
        index: usize,
        pres: &Presentation,
        fonts: &ThemeFonts,
    ) -> &PlaceholderDefaults {
        self.layouts.entry(index).or_insert_with(|| {
            match pres.layouts.get(index) {
                Some(layout) => {
                    let defaults =
                        layout_placeholder_defaults(layout, pres.master_of(layout), pres, fonts);
                    log::debug!(
                        "layout {}: {} placeholder default entries",
                        index,
                        defaults.len()
                    );
                    defaults
                }
                None => PlaceholderDefaults::default(),
            }
        })
    }

    /// Number of layouts computed so far.
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}
