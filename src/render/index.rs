//! Per-deck slide index page.

use super::HtmlBuilder;

/// File name of the index page for a deck named `stem`.
pub fn index_file_name(stem: &str) -> String {
    format!("{}_index.html", stem)
}

/// Relative path of slide `number` as linked from the index page.
pub fn slide_href(number: usize) -> String {
    format!("slides/slide{}.html", number)
}

/// Render the index page listing `slide_count` slides.
pub fn render_index(slide_count: usize, compact: bool) -> String {
    let mut html = HtmlBuilder::new();
    html.add("<!DOCTYPE html>", 0);
    html.add(r#"<html lang="zh-CN">"#, 0);
    html.add("<head>", 1);
    html.add(r#"<meta charset="UTF-8">"#, 2);
    html.add("<title>PPT Slides Index</title>", 2);
    html.add("</head>", 1);
    html.add("<body>", 1);
    html.add("<h1>幻灯片列表</h1>", 2);
    html.add("<ul>", 2);
    for i in 1..=slide_count {
        html.add(
            format!(r#"<li><a href="{}">Slide {}</a></li>"#, slide_href(i), i),
            3,
        );
    }
    html.add("</ul>", 2);
    html.add("</body>", 1);
    html.add("</html>", 0);
    html.finish(compact)
}
