//! Text body, paragraph and run models.

use super::ColorRef;

/// Paragraph alignment (`a:pPr@algn`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlignment {
    /// Parse an `algn` attribute value.
    pub fn from_ooxml(val: &str) -> Option<Self> {
        match val {
            "l" => Some(Self::Left),
            "ctr" => Some(Self::Center),
            "r" => Some(Self::Right),
            "just" | "justLow" | "dist" | "thaiDist" => Some(Self::Justify),
            _ => None,
        }
    }

    /// CSS `text-align` value.
    pub fn css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

/// Character properties read from `a:rPr`, `a:defRPr` or `a:endParaRPr`.
///
/// Every field is optional: an absent value means "inherit".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunProperties {
    /// Latin typeface, possibly a theme alias such as `+mn-lt`
    pub family: Option<String>,
    /// Size in points
    pub size_pt: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    /// Solid fill colour of the text
    pub color: Option<ColorRef>,
}

impl RunProperties {
    /// Whether no property is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A run of text with uniform properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub props: RunProperties,
}

impl TextRun {
    /// Create a run without explicit properties.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            props: RunProperties::default(),
        }
    }
}

/// A paragraph inside a text body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub alignment: Option<TextAlignment>,
    /// Outline level, 0 for top level
    pub level: u8,
    /// Paragraph-level default run properties (`a:pPr/a:defRPr`)
    pub defaults: RunProperties,
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Concatenated run text.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Text content of a shape (`p:txBody`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBody {
    pub paragraphs: Vec<Paragraph>,
}

impl TextBody {
    /// Paragraph texts joined with newlines.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether the body contains no run text at all.
    pub fn is_blank(&self) -> bool {
        self.paragraphs
            .iter()
            .all(|p| p.runs.iter().all(|r| r.text.is_empty()))
    }

    /// First paragraph, used as the shape-level style fallback.
    pub fn first_paragraph(&self) -> Option<&Paragraph> {
        self.paragraphs.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_parsing() {
        assert_eq!(TextAlignment::from_ooxml("ctr"), Some(TextAlignment::Center));
        assert_eq!(TextAlignment::from_ooxml("dist"), Some(TextAlignment::Justify));
        assert_eq!(TextAlignment::from_ooxml("bogus"), None);
        assert_eq!(TextAlignment::Right.css(), "right");
    }

    #[test]
    fn test_plain_text() {
        let body = TextBody {
            paragraphs: vec![
                Paragraph {
                    runs: vec![TextRun::new("Hello "), TextRun::new("World")],
                    ..Default::default()
                },
                Paragraph {
                    runs: vec![TextRun::new("Second")],
                    ..Default::default()
                },
            ],
        };
        assert_eq!(body.plain_text(), "Hello World\nSecond");
        assert!(!body.is_blank());
        assert!(TextBody::default().is_blank());
    }

    #[test]
    fn test_run_properties_empty() {
        assert!(RunProperties::default().is_empty());
        let props = RunProperties {
            bold: Some(false),
            ..Default::default()
        };
        assert!(!props.is_empty());
    }
}
