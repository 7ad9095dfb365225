//! Line-oriented HTML builder.

/// Indentation unit for pretty output.
const INDENT: &str = "    ";

/// Accumulates HTML lines with an indentation level each.
///
/// Pretty output joins the indented lines with newlines; compact output
/// concatenates the lines with their leading whitespace removed, so both
/// forms differ only in whitespace between tags.
#[derive(Debug, Clone, Default)]
pub struct HtmlBuilder {
    lines: Vec<String>,
}

impl HtmlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line at `indent` levels of four spaces.
    pub fn add(&mut self, line: impl AsRef<str>, indent: usize) {
        self.lines
            .push(format!("{}{}", INDENT.repeat(indent), line.as_ref()));
    }

    /// Number of lines added so far.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Produce the document.
    pub fn finish(&self, compact: bool) -> String {
        if compact {
            self.lines.iter().map(|l| l.trim_start()).collect()
        } else {
            self.lines.join("\n")
        }
    }
}
