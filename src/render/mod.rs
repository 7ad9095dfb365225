//! HTML rendering for presentations.
//!
//! Pages are produced as strings by [`HtmlBuilder`]; nothing in this
//! module touches the file system. Slide pages return the media they
//! reference as [`MediaWrite`]s for the caller to store.
//!
//! # Example
//!
//! ```
//! use unslide::render::{render_index, render_main};
//!
//! let index = render_index(2, false);
//! assert!(index.contains("slides/slide2.html"));
//!
//! let main = render_main(&["deck"], true);
//! assert!(main.contains("deck_index.html"));
//! ```

mod builder;
mod index;
mod main_page;
mod slide;

pub use builder::HtmlBuilder;
pub use index::{index_file_name, render_index, slide_href};
pub use main_page::{render_main, MAIN_FILE_NAME};
pub use slide::{
    render_slide, slide_file_name, video_extension, MediaWrite, SlideContext, SlidePage,
};

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_html("it's"), "it&#39;s");
        assert_eq!(escape_html("中文"), "中文");
    }
}
