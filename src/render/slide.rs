//! Slide page renderer.

use super::{escape_html, HtmlBuilder};
use crate::layout::{DecorationKind, LayoutElements, LayoutShape};
use crate::model::{
    Blob, ColorRef, Media, Paragraph, Presentation, Shape, ShapeKind, Slide, Table, TextBody,
    TextRun,
};
use crate::style::{
    effective_font, resolve_color, scheme_color, Fallback, PlaceholderDefaults, PlaceholderStyle,
    ThemeFonts,
};
use crate::units::{color_to_hex, emu_to_pt, emu_to_px, normalize_hex, pt_to_px};

/// Fallback families appended after the theme's minor font.
const FONT_STACK: &[&str] = &["微软雅黑", "Microsoft YaHei", "Helvetica", "Arial", "sans-serif"];

/// Share of the slide height treated as the title band.
const TITLE_BAND: f64 = 0.18;

/// Runs shorter than this (trimmed, in characters) inside the title band
/// are sized like titles.
const TITLE_MAX_CHARS: usize = 25;

/// Indentation per outline level, in pixels.
const LEVEL_INDENT_PX: i64 = 28;

/// Text colour when nothing in the cascade defines one.
const DEFAULT_TEXT_COLOR: &str = "#ffffff";

/// Everything a slide page needs besides the slide itself.
#[derive(Debug, Clone, Copy)]
pub struct SlideContext<'a> {
    pub pres: &'a Presentation,
    pub fonts: &'a ThemeFonts,
    pub slide_count: usize,
    pub slide_width_px: i64,
    pub slide_height_px: i64,
    /// Final `.slide` background CSS
    pub background: &'a str,
    pub layout: &'a LayoutElements,
    /// Placeholder defaults of the slide's layout
    pub defaults: Option<&'a PlaceholderDefaults>,
    /// Prefix of media URLs, e.g. `../media/`
    pub media_url: &'a str,
    pub compact: bool,
}

/// A media file the slide page references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaWrite<'a> {
    /// File name inside the media directory
    pub file_name: String,
    pub data: &'a [u8],
}

/// A rendered slide page and the media files it expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidePage<'a> {
    pub html: String,
    pub writes: Vec<MediaWrite<'a>>,
}

/// File name of slide `number`'s page inside `slides/`.
pub fn slide_file_name(number: usize) -> String {
    format!("slide{}.html", number)
}

/// Render one slide page.
///
/// Layout pictures sit at z-index 0, layout lines and auto-shapes at 1,
/// slide shapes at 2 in document order. Media is not written here; it
/// is returned in [`SlidePage::writes`].
pub fn render_slide<'a>(ctx: &SlideContext<'a>, slide: &'a Slide) -> SlidePage<'a> {
    let i = slide.number;
    let mut html = HtmlBuilder::new();

    html.add("<!DOCTYPE html>", 0);
    html.add(r#"<html lang="zh-CN">"#, 0);
    html.add("<head>", 1);
    html.add(r#"<meta charset="UTF-8">"#, 2);
    html.add(format!("<title>Slide {}</title>", i), 2);
    html.add("<style>", 2);
    html.add(
        format!(
            "body {{ font-family: {}; padding: 20px; }}",
            font_stack(ctx.fonts.minor.as_deref())
        ),
        3,
    );
    html.add(
        format!(
            ".slide {{ position: relative; width: {}px; height: {}px; {} border: 1px solid #ccc; \
             margin: 0 auto; box-sizing: border-box; overflow: hidden; }}",
            ctx.slide_width_px, ctx.slide_height_px, ctx.background
        ),
        3,
    );
    html.add(
        ".shape { position: absolute; z-index: 2; box-sizing: border-box; }",
        3,
    );
    html.add(".layout-image { position: absolute; z-index: 0; }", 3);
    html.add(
        ".layout-shape { position: absolute; z-index: 1; box-sizing: border-box; }",
        3,
    );
    html.add(".shape img { display: block; object-fit: contain; }", 3);
    html.add(
        "* { -webkit-font-smoothing: antialiased; text-rendering: optimizeLegibility; }",
        3,
    );
    html.add("p { line-height: 1.15; margin: 0; }", 3);
    html.add("table { border-collapse: collapse; }", 3);
    html.add("td, th { border: 1px solid #000; padding: 4px; }", 3);
    html.add(".nav { text-align: center; margin-bottom: 20px; }", 3);
    html.add("</style>", 2);
    html.add("</head>", 1);
    html.add("<body>", 1);
    html.add(nav(i, ctx.slide_count), 2);
    html.add(r#"<div class="slide">"#, 2);
    html.add("<!-- layout/master images -->", 3);

    for image in &ctx.layout.images {
        html.add(
            format!(
                r#"<div class="shape layout-image" style="{}"><img src="{}" style="width: 100%; height: 100%;" alt="Background Image"></div>"#,
                box_style(image.left, image.top, image.width, image.height),
                escape_html(&image.src)
            ),
            3,
        );
    }
    for shape in &ctx.layout.shapes {
        html.add(layout_shape(shape), 3);
    }

    let mut renderer = ShapeRenderer {
        ctx,
        slide,
        media_count: 0,
        writes: Vec::new(),
    };
    for shape in &slide.shapes {
        if let Some(markup) = renderer.shape(shape) {
            html.add(markup, 3);
        }
    }

    html.add("</div>", 2);
    html.add("</body>", 1);
    html.add("</html>", 0);

    SlidePage {
        html: html.finish(ctx.compact),
        writes: renderer.writes,
    }
}

fn font_stack(minor: Option<&str>) -> String {
    minor
        .filter(|f| !f.trim().is_empty())
        .into_iter()
        .chain(FONT_STACK.iter().copied())
        .map(|f| format!("\"{}\"", f.replace('"', "")))
        .collect::<Vec<_>>()
        .join(", ")
}

fn nav(i: usize, slide_count: usize) -> String {
    let prev = if i > 1 {
        format!(r#"<a href="{}">上一页</a>"#, slide_file_name(i - 1))
    } else {
        String::new()
    };
    let next = if i < slide_count {
        format!(r#"<a href="{}">下一页</a>"#, slide_file_name(i + 1))
    } else {
        String::new()
    };
    format!(r#"<div class="nav">{} {}</div>"#, prev, next)
}

fn box_style(left: i64, top: i64, width: i64, height: i64) -> String {
    format!(
        "left: {}px; top: {}px; width: {}px; height: {}px;",
        left, top, width, height
    )
}

fn layout_shape(shape: &LayoutShape) -> String {
    match shape.kind {
        DecorationKind::Line => {
            let color = shape.stroke_color.as_deref().unwrap_or("#000");
            format!(
                r#"<div class="shape layout-shape line" style="left: {}px; top: {}px; width: {}px; height: {}px; transform-origin: left top; transform: rotate({}deg); border-top: {}px {} {};"></div>"#,
                shape.left,
                shape.top,
                shape.width,
                shape.stroke_width.max(1),
                shape.rotation,
                shape.stroke_width,
                shape.dash,
                color
            )
        }
        DecorationKind::AutoShape => {
            let fill = shape.fill_color.as_deref().unwrap_or("transparent");
            let border = shape
                .stroke_color
                .as_deref()
                .map(|c| format!(" border: {}px solid {};", shape.stroke_width, c))
                .unwrap_or_default();
            format!(
                r#"<div class="shape layout-shape auto-shape" style="{} background-color: {};{} transform-origin: left top; transform: rotate({}deg);"></div>"#,
                box_style(shape.left, shape.top, shape.width, shape.height),
                fill,
                border,
                shape.rotation
            )
        }
    }
}

/// Video file extension from a media content type.
pub fn video_extension(content_type: Option<&str>) -> &'static str {
    let ct = content_type.unwrap_or_default().to_ascii_lowercase();
    if ct.contains("mp4") {
        "mp4"
    } else if ct.contains("avi") {
        "avi"
    } else if ct.contains("mov") || ct.contains("quicktime") {
        "mov"
    } else if ct.contains("wmv") {
        "wmv"
    } else {
        "mp4"
    }
}

/// Stroke width in pixels for a line given in EMU: points / 1.333,
/// at least 1.
fn stroke_px(width_emu: i64) -> Option<i64> {
    emu_to_pt(width_emu)
        .filter(|pt| *pt > 0.0)
        .map(|pt| ((pt / 1.333) as i64).max(1))
}

struct ShapeRenderer<'c, 'a> {
    ctx: &'c SlideContext<'a>,
    slide: &'a Slide,
    /// Shared counter of pictures and videos
    media_count: usize,
    writes: Vec<MediaWrite<'a>>,
}

impl<'c, 'a> ShapeRenderer<'c, 'a> {
    fn shape(&mut self, shape: &'a Shape) -> Option<String> {
        let slide: &'a Slide = self.slide;
        let f = shape.frame;
        let style = box_style(
            emu_to_px(f.left),
            emu_to_px(f.top),
            emu_to_px(f.width),
            emu_to_px(f.height),
        );

        match &shape.kind {
            ShapeKind::Picture(picture) => {
                let Some(blob) = picture.embed.as_deref().and_then(|id| slide.part.blob(id)) else {
                    log::debug!(
                        "slide {}: picture '{}' has no image data",
                        slide.number,
                        shape.name
                    );
                    return None;
                };
                let file_name = format!("slide{}_img{}.{}", slide.number, self.media_count, blob.ext);
                self.media_count += 1;
                let src = self.queue(file_name, blob);
                Some(format!(
                    r#"<div class="shape" style="{}"><img src="{}" style="width: 100%; height: 100%;" alt="Image"></div>"#,
                    style, src
                ))
            }
            ShapeKind::Table(table) => Some(format!(
                r#"<div class="shape" style="{}">{}</div>"#,
                style,
                table_html(table)
            )),
            ShapeKind::Media(media) => Some(self.media(media, &style)),
            ShapeKind::Line => Some(self.line(shape)),
            ShapeKind::AutoShape | ShapeKind::Freeform
                if shape.text.as_ref().is_none_or(TextBody::is_blank) =>
            {
                (shape.kind == ShapeKind::AutoShape).then(|| self.auto_shape(shape))
            }
            _ => shape
                .text
                .as_ref()
                .map(|body| self.text_box(shape, body, &style)),
        }
    }

    fn queue(&mut self, file_name: String, blob: &'a Blob) -> String {
        let src = format!("{}{}", self.ctx.media_url, file_name);
        self.writes.push(MediaWrite {
            file_name,
            data: &blob.data,
        });
        src
    }

    fn media(&mut self, media: &Media, style: &str) -> String {
        let slide: &'a Slide = self.slide;
        let part = &slide.part;
        let video = media
            .video_rel
            .as_deref()
            .and_then(|id| part.blob(id).map(|b| (id, b)))
            .or_else(|| {
                part.rels
                    .iter()
                    .filter(|r| r.rel_type.contains("video") || r.rel_type.contains("media"))
                    .find_map(|r| part.blob(&r.id).map(|b| (r.id.as_str(), b)))
            });

        let Some((rel_id, blob)) = video else {
            log::debug!("slide {}: video data not found", slide.number);
            return format!(
                r#"<div class="shape" style="{}"><div style="width: 100%; height: 100%; background: #f0f0f0; display: flex; align-items: center; justify-content: center; border: 1px solid #ccc;">[Video]</div></div>"#,
                style
            );
        };

        let n = self.media_count;
        let ext = video_extension(blob.content_type.as_deref());
        let video_name = format!("slide{}_video{}.{}", slide.number, n, ext);
        let video_src = self.queue(video_name, blob);

        let poster = media
            .poster_embed
            .as_deref()
            .filter(|id| *id != rel_id)
            .and_then(|id| part.blob(id))
            .map(|poster| {
                let name = format!("slide{}_poster{}.{}", slide.number, n, poster.ext);
                format!(r#" poster="{}""#, self.queue(name, poster))
            })
            .unwrap_or_default();
        self.media_count += 1;

        format!(
            r#"<div class="shape" style="{}"><video controls style="width: 100%; height: 100%;"{}><source src="{}" type="video/{}">Your browser does not support the video tag.</video></div>"#,
            style, poster, video_src, ext
        )
    }

    fn line(&self, shape: &Shape) -> String {
        let line = shape.line.as_ref();
        let color = line
            .and_then(|l| l.color.as_ref())
            .and_then(|c| resolve_color(self.ctx.pres, c))
            .unwrap_or_else(|| "#000".to_string());
        let width = line.and_then(|l| l.width).and_then(stroke_px).unwrap_or(2);
        let f = shape.frame;
        format!(
            r#"<div class="shape line" style="left: {}px; top: {}px; width: {}px; height: {}px; background-color: {}; transform-origin: left top; transform: rotate({}deg);"></div>"#,
            emu_to_px(f.left),
            emu_to_px(f.top),
            emu_to_px(f.width),
            width.max(1),
            color,
            shape.rotation
        )
    }

    fn auto_shape(&self, shape: &Shape) -> String {
        let fill = shape
            .fill
            .as_ref()
            .and_then(|c| resolve_color(self.ctx.pres, c))
            .unwrap_or_else(|| "transparent".to_string());
        let line = shape.line.as_ref().filter(|l| !l.hidden);
        let stroke_color = line
            .and_then(|l| l.color.as_ref())
            .and_then(|c| resolve_color(self.ctx.pres, c));
        let stroke_width = line.and_then(|l| l.width).and_then(stroke_px);
        let border = match (stroke_color, stroke_width) {
            (Some(color), Some(width)) => format!(" border: {}px solid {};", width, color),
            _ => String::new(),
        };
        let f = shape.frame;
        format!(
            r#"<div class="shape auto-shape" style="{} background-color: {};{} transform-origin: left top; transform: rotate({}deg);"></div>"#,
            box_style(
                emu_to_px(f.left),
                emu_to_px(f.top),
                emu_to_px(f.width),
                emu_to_px(f.height)
            ),
            fill,
            border,
            shape.rotation
        )
    }

    fn text_box(&self, shape: &Shape, body: &TextBody, style: &str) -> String {
        let layout_default = self
            .ctx
            .defaults
            .zip(shape.placeholder.as_ref())
            .and_then(|(defaults, ph)| defaults.lookup(ph));
        let top_px = emu_to_px(shape.frame.top);
        let in_title_band = (top_px as f64) < self.ctx.slide_height_px as f64 * TITLE_BAND;

        let mut text = String::new();
        for paragraph in &body.paragraphs {
            let mut para_style = Vec::new();
            if let Some(align) = paragraph.alignment {
                para_style.push(format!("text-align: {};", align.css()));
            }
            if paragraph.level > 0 {
                para_style.push(format!(
                    "margin-left: {}px;",
                    i64::from(paragraph.level) * LEVEL_INDENT_PX
                ));
            }
            text.push_str(&format!(r#"<p style="{}">"#, para_style.join(" ")));
            for run in &paragraph.runs {
                let is_title = shape.is_title_placeholder()
                    || (in_title_band && run.text.trim().chars().count() < TITLE_MAX_CHARS);
                let run_style = self.run_style(run, paragraph, body, layout_default, is_title);
                text.push_str(&format!(
                    r#"<span style="{}">{}</span>"#,
                    run_style,
                    escape_html(&run.text)
                ));
            }
            text.push_str("</p>");
        }

        let fill = shape
            .fill
            .as_ref()
            .and_then(|c| resolve_color(self.ctx.pres, c))
            .map(|hex| format!(" background-color: {};", hex))
            .unwrap_or_default();
        format!(
            r#"<div class="shape" style="{}{}">{}</div>"#,
            style, fill, text
        )
    }

    fn run_style(
        &self,
        run: &TextRun,
        paragraph: &Paragraph,
        body: &TextBody,
        layout_default: Option<&PlaceholderStyle>,
        is_title: bool,
    ) -> String {
        let font = effective_font(run, paragraph, body, self.ctx.fonts, layout_default, is_title);
        let mut css = Vec::new();

        let size_px = pt_to_px(font.size_pt).unwrap_or(font.size_pt as i64);
        css.push(format!("font-size: {}px;", size_px));
        css.push(format!("line-height: {}px;", (font.size_pt * 1.15) as i64));
        css.push(format!("font-family: {};", escape_html(&font.family)));

        let props = &run.props;
        let flag = |own: Option<bool>, layout: fn(&PlaceholderStyle) -> Option<bool>| {
            own.or_else(|| layout_default.and_then(layout)) == Some(true)
        };
        if flag(props.bold, |d| d.bold) {
            css.push("font-weight: bold;".to_string());
        }
        if flag(props.italic, |d| d.italic) {
            css.push("font-style: italic;".to_string());
        }
        if flag(props.underline, |d| d.underline) {
            css.push("text-decoration: underline;".to_string());
        }

        css.push(format!(
            "color: {};",
            self.text_color(props.color.as_ref(), layout_default)
        ));
        css.join(" ")
    }

    /// Run RGB, run scheme colour through the theme, layout default,
    /// system colour, then white.
    fn text_color(&self, color: Option<&ColorRef>, layout: Option<&PlaceholderStyle>) -> String {
        Fallback::new(match color {
            Some(c @ ColorRef::Rgb(_)) => color_to_hex(c),
            _ => None,
        })
        .then_with(|| match color {
            Some(ColorRef::Scheme(name)) => {
                scheme_color(self.ctx.pres, name).and_then(|hex| normalize_hex(&hex))
            }
            _ => None,
        })
        .then_with(|| layout.and_then(|d| d.color.clone()))
        .then_with(|| match color {
            Some(c @ ColorRef::System { .. }) => color_to_hex(c),
            _ => None,
        })
        .or(DEFAULT_TEXT_COLOR.to_string())
    }
}

fn table_html(table: &Table) -> String {
    let mut out = String::from("<table>");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            let text = escape_html(cell).replace("\r\n", "<br>").replace(['\r', '\n'], "<br>");
            out.push_str(&format!("<td>{}</td>", text));
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
    out
}
