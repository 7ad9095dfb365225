//! Owned XML element tree for PresentationML parts.
//!
//! Style resolution needs to look at the same part many times and along
//! several paths (`txBody/lstStyle/lvl1pPr/defRPr`, `cSld/bg/bgPr/solidFill`,
//! ...), so parts are read once with quick-xml into a small tree. Element
//! and attribute lookups use local names; namespace prefixes are kept only
//! to tell `id` from `r:id`.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};

/// An attribute with its namespace prefix split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Prefix (e.g. "r" for `r:embed`); empty when unprefixed
    pub prefix: String,
    /// Local name
    pub name: String,
    /// Unescaped value
    pub value: String,
}

/// An XML element with its attributes, text and children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    /// Namespace prefix of the tag, empty when unprefixed
    pub prefix: String,
    /// Local tag name
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<XmlAttribute>,
    /// Direct text content
    pub text: String,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parse an XML document and return its root element.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = quick_xml::Reader::from_str(xml);
        // a:t content keeps its whitespace
        reader.config_mut().trim_text(false);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    stack.push(Self::from_start(e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let element = Self::from_start(e)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Ok(Event::Text(ref t)) => {
                    if let Some(current) = stack.last_mut() {
                        let text = t.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                        current.text.push_str(&text);
                    }
                }
                Ok(Event::CData(ref t)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(t.as_ref()));
                    }
                }
                Ok(Event::End(_)) => {
                    if let Some(element) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(element),
                            None => return Ok(element),
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Err(Error::XmlParse("No root element found".to_string()))
    }

    fn from_start(e: &BytesStart<'_>) -> Result<Self> {
        let (prefix, name) = split_qname(e.name().as_ref());
        let mut element = XmlElement {
            prefix,
            name,
            ..Default::default()
        };

        for attr in e.attributes() {
            let attr = attr.map_err(|e| Error::XmlParse(e.to_string()))?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let (prefix, name) = split_qname(key);
            let value = attr
                .unescape_value()
                .map_err(|e| Error::XmlParse(e.to_string()))?
                .into_owned();
            element.attributes.push(XmlAttribute {
                prefix,
                name,
                value,
            });
        }

        Ok(element)
    }

    /// Unprefixed attribute value by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.prefix.is_empty() && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Namespaced attribute value by local name, e.g. `r:embed` via `"embed"`.
    pub fn ns_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| !a.prefix.is_empty() && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Attribute parsed into any `FromStr` type; malformed values are `None`.
    pub fn attr_parse<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.attr(name).and_then(|v| v.trim().parse().ok())
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Direct children with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow a `/`-separated path of child names.
    ///
    /// Every step may match several children; the first match in document
    /// order across all branches is returned, like the XPath `a/b/c`.
    pub fn find(&self, path: &str) -> Option<&XmlElement> {
        let steps: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.find_steps(&steps)
    }

    fn find_steps(&self, steps: &[&str]) -> Option<&XmlElement> {
        let Some((first, rest)) = steps.split_first() else {
            return Some(self);
        };
        self.children
            .iter()
            .filter(|c| c.name == *first)
            .find_map(|c| c.find_steps(rest))
    }

    /// Like [`find`](Self::find) but the first step may match at any depth,
    /// like the XPath `.//a/b/c`.
    pub fn find_deep(&self, path: &str) -> Option<&XmlElement> {
        let steps: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let (first, rest) = steps.split_first()?;
        self.descendants()
            .filter(|d| d.name == *first)
            .find_map(|d| d.find_steps(rest))
    }

    /// First descendant (excluding self) with the given local name.
    pub fn descendant(&self, name: &str) -> Option<&XmlElement> {
        self.descendants().find(|d| d.name == name)
    }

    /// All descendants in document order, excluding self.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Concatenated text of this element and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for d in self.descendants() {
            out.push_str(&d.text);
        }
        out
    }
}

/// Depth-first, document-order iterator over descendants.
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

fn split_qname(raw: &[u8]) -> (String, String) {
    let raw = String::from_utf8_lossy(raw);
    match raw.split_once(':') {
        Some((prefix, local)) => (prefix.to_string(), local.to_string()),
        None => (String::new(), raw.into_owned()),
    }
}

/// Parse an OOXML boolean attribute value.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
       xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"
       xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:cSld>
    <p:spTree>
      <p:sp>
        <p:txBody>
          <a:p><a:r><a:rPr b="1"/><a:t> Hello &amp; </a:t></a:r></a:p>
          <a:p><a:r><a:rPr sz="2400"/><a:t>World</a:t></a:r></a:p>
        </p:txBody>
      </p:sp>
      <p:pic><p:blipFill><a:blip r:embed="rId2"/></p:blipFill></p:pic>
    </p:spTree>
  </p:cSld>
</p:sld>"#;

    #[test]
    fn test_parse_structure() {
        let root = XmlElement::parse(SAMPLE).unwrap();
        assert_eq!(root.name, "sld");
        assert_eq!(root.prefix, "p");
        assert!(root.child("cSld").is_some());
        assert!(root.attr("xmlns:a").is_none());
    }

    #[test]
    fn test_find_paths() {
        let root = XmlElement::parse(SAMPLE).unwrap();
        let sp = root.find("cSld/spTree/sp").unwrap();
        let rpr = sp.find("txBody/p/r/rPr").unwrap();
        assert_eq!(rpr.attr("b"), Some("1"));

        // Second paragraph is reachable through find_deep on a later branch
        let sized = root
            .descendants()
            .filter(|d| d.name == "rPr")
            .find_map(|d| d.attr_parse::<i32>("sz"));
        assert_eq!(sized, Some(2400));

        let blip = root.find_deep("blipFill/blip").unwrap();
        assert_eq!(blip.ns_attr("embed"), Some("rId2"));
        assert!(blip.attr("embed").is_none());
    }

    #[test]
    fn test_find_tries_every_branch() {
        let root = XmlElement::parse(
            r#"<sp><txBody><p/></txBody><txBody><p><r><t>late</t></r></p></txBody></sp>"#,
        )
        .unwrap();
        assert_eq!(root.find("txBody/p/r/t").unwrap().text, "late");
        assert!(root.find("txBody/p/r/rPr").is_none());
        assert_eq!(root.find("").map(|e| e.name.as_str()), Some("sp"));

        let deep = XmlElement::parse(
            r#"<sld><a><lstStyle/></a><b><lstStyle><lvl1pPr/></lstStyle></b></sld>"#,
        )
        .unwrap();
        assert!(deep.find_deep("lstStyle/lvl1pPr").is_some());
    }

    #[test]
    fn test_text_preserved_and_unescaped() {
        let root = XmlElement::parse(SAMPLE).unwrap();
        let t = root.descendant("t").unwrap();
        assert_eq!(t.text, " Hello & ");
        let body = root.descendant("txBody").unwrap();
        assert!(body.text_content().contains("World"));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(XmlElement::parse("<a><b></a>").is_err());
        assert!(XmlElement::parse("").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
