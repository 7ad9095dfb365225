//! Landing page linking every converted deck of a directory.

use super::index::index_file_name;
use super::{escape_html, HtmlBuilder};

/// File name of the landing page.
pub const MAIN_FILE_NAME: &str = "main.html";

const STYLES: &[&str] = &[
    "body { font-family: Arial, sans-serif; margin: 40px; background-color: #f4f4f4; }",
    ".container { max-width: 800px; margin: 0 auto; background: white; padding: 20px; border-radius: 8px; box-shadow: 0 0 10px rgba(0,0,0,0.1); }",
    "h1 { color: #333; }",
    "ul { list-style-type: none; padding: 0; }",
    "li { margin: 10px 0; }",
    "a { text-decoration: none; color: #007bff; font-size: 18px; }",
    "a:hover { text-decoration: underline; }",
];

/// Render the landing page for the given deck names (file stems).
pub fn render_main<S: AsRef<str>>(decks: &[S], compact: bool) -> String {
    let mut html = HtmlBuilder::new();
    html.add("<!DOCTYPE html>", 0);
    html.add(r#"<html lang="zh-CN">"#, 0);
    html.add("<head>", 1);
    html.add(r#"<meta charset="UTF-8">"#, 2);
    html.add("<title>PPT to HTML Converter - Main Entry</title>", 2);
    html.add("<style>", 2);
    for rule in STYLES {
        html.add(rule, 3);
    }
    html.add("</style>", 2);
    html.add("</head>", 1);
    html.add("<body>", 1);
    html.add(r#"<div class="container">"#, 2);
    html.add("<h1>PPT to HTML 转换结果</h1>", 3);
    html.add("<p>以下是转换后的演示文稿：</p>", 3);
    html.add("<ul>", 3);
    for deck in decks {
        let deck = deck.as_ref();
        html.add(
            format!(
                r#"<li><a href="{}">{}</a></li>"#,
                escape_html(&index_file_name(deck)),
                escape_html(deck)
            ),
            4,
        );
    }
    html.add("</ul>", 3);
    html.add("<p>点击链接查看幻灯片。</p>", 3);
    html.add("</div>", 2);
    html.add("</body>", 1);
    html.add("</html>", 0);
    html.finish(compact)
}
