//! ZIP container abstraction for the PPTX package (Open Packaging Conventions).

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// A relationship entry from a .rels file.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path, relative to the source part unless external
    pub target: String,
    /// Whether the target is external
    pub external: bool,
}

impl Relationship {
    /// Whether the relationship type URI ends with the given short name,
    /// e.g. `"slideLayout"` or `"theme"`.
    pub fn is_type(&self, short: &str) -> bool {
        self.rel_type
            .rsplit('/')
            .next()
            .is_some_and(|t| t.eq_ignore_ascii_case(short))
    }
}

/// Relationships of one package part, in document order.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    /// Owning part path (e.g. "ppt/slides/slide1.xml"); empty for the package
    pub source: String,
    entries: Vec<Relationship>,
    by_id: HashMap<String, usize>,
}

impl Relationships {
    /// Create an empty relationships collection for `source`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    /// Resolve a relationship ID to a package path.
    ///
    /// External targets are never resolved.
    pub fn target_path(&self, id: &str) -> Option<String> {
        self.get(id)
            .filter(|rel| !rel.external)
            .map(|rel| OoxmlContainer::resolve_path(&self.source, &rel.target))
    }

    /// First relationship whose type has the given short name.
    pub fn first_of_type(&self, short: &str) -> Option<&Relationship> {
        self.entries.iter().find(|rel| rel.is_type(short))
    }

    /// All relationships in the order they appear in the .rels file.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a relationship. A duplicate ID replaces the earlier lookup entry.
    pub fn add(&mut self, rel: Relationship) {
        self.by_id.insert(rel.id.clone(), self.entries.len());
        self.entries.push(rel);
    }
}

/// Fix XML encoding declaration from UTF-16 to UTF-8.
///
/// Once UTF-16 XML is decoded to a Rust String the declaration still says
/// encoding="UTF-16", which quick-xml would honour and mis-decode.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if content.starts_with("<?xml") {
        if let Some(end_decl) = content.find("?>") {
            let decl = &content[..end_decl + 2];
            let rest = &content[end_decl + 2..];

            let fixed_decl = decl
                .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='UTF-16'", "encoding='UTF-8'")
                .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='utf-16'", "encoding='UTF-8'");

            return format!("{}{}", fixed_decl, rest);
        }
    }
    content.to_string()
}

/// Decode XML bytes handling UTF-8 (with or without BOM) and UTF-16 LE/BE.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8(bytes[3..].to_vec())
            .map_err(|e| Error::InvalidData(e.to_string()));
    }

    if bytes.starts_with(&[0xFF, 0xFE]) {
        let content = decode_utf16(&bytes[2..], u16::from_le_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    if bytes.starts_with(&[0xFE, 0xFF]) {
        let content = decode_utf16(&bytes[2..], u16::from_be_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => Ok(s),
        Err(_) => {
            // BOM-less UTF-16 shows null bytes next to ASCII characters
            if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 {
                decode_utf16(bytes, u16::from_le_bytes)
            } else if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 {
                decode_utf16(bytes, u16::from_be_bytes)
            } else {
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

fn decode_utf16(bytes: &[u8], to_u16: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| to_u16([pair[0], pair[1]]));

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::InvalidData(e.to_string()))
}

/// OOXML container over a ZIP archive.
///
/// Provides access to XML parts, binary parts, content types and
/// relationships of a presentation package.
pub struct OoxmlContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
    content_types: ContentTypes,
}

impl OoxmlContainer {
    /// Open a container from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use unslide::container::OoxmlContainer;
    ///
    /// let container = OoxmlContainer::open("deck.pptx")?;
    /// assert!(container.exists("ppt/presentation.xml"));
    /// # Ok::<(), unslide::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        let mut container = Self {
            archive: RefCell::new(archive),
            content_types: ContentTypes::default(),
        };
        if let Ok(xml) = container.read_xml("[Content_Types].xml") {
            container.content_types = ContentTypes::parse(&xml);
        }
        Ok(container)
    }

    /// Read an XML part from the archive as a string.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let bytes = self.read_binary(path)?;
        decode_xml_bytes(&bytes)
    }

    /// Read a binary part from the archive.
    pub fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == path);
        found
    }

    /// List all parts in the archive.
    pub fn list_files(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }

    /// Content type of a part, from `[Content_Types].xml`.
    pub fn content_type(&self, path: &str) -> Option<&str> {
        self.content_types.lookup(path)
    }

    /// Read and parse the relationships of a part.
    ///
    /// A missing .rels file yields an empty collection.
    pub fn read_relationships(&self, part_path: &str) -> Result<Relationships> {
        let rels_path = Self::rels_path(part_path);
        let mut rels = Relationships::new(part_path);

        let content = match self.read_xml(&rels_path) {
            Ok(c) => c,
            Err(_) => return Ok(rels),
        };
        if content.trim().is_empty() {
            return Ok(rels);
        }

        let mut reader = quick_xml::Reader::from_str(&content);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut rel = Relationship {
                        id: String::new(),
                        rel_type: String::new(),
                        target: String::new(),
                        external: false,
                    };

                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value).to_string();
                        match attr.key.as_ref() {
                            b"Id" => rel.id = value,
                            b"Type" => rel.rel_type = value,
                            b"Target" => rel.target = value,
                            b"TargetMode" => rel.external = value.eq_ignore_ascii_case("external"),
                            _ => {}
                        }
                    }

                    if !rel.id.is_empty() {
                        rels.add(rel);
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(format!("{}: {}", rels_path, e))),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Path of the .rels file that belongs to `part_path`.
    ///
    /// `ppt/slides/slide1.xml` maps to `ppt/slides/_rels/slide1.xml.rels`.
    pub fn rels_path(part_path: &str) -> String {
        match part_path.rsplit_once('/') {
            _ if part_path.is_empty() || part_path == "/" => "_rels/.rels".to_string(),
            Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
            None => format!("_rels/{}.rels", part_path),
        }
    }

    /// Resolve a relationship target relative to its source part.
    pub fn resolve_path(base: &str, relative: &str) -> String {
        if let Some(stripped) = relative.strip_prefix('/') {
            return stripped.to_string();
        }

        let mut segments: Vec<&str> = match base.rsplit_once('/') {
            Some((dir, _)) => dir.split('/').filter(|s| !s.is_empty()).collect(),
            None => Vec::new(),
        };
        for segment in relative.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }

        segments.join("/")
    }
}

impl std::fmt::Debug for OoxmlContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OoxmlContainer")
            .field("files", &self.list_files().len())
            .finish()
    }
}

/// Parsed `[Content_Types].xml`: extension defaults plus part overrides.
#[derive(Debug, Clone, Default)]
struct ContentTypes {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypes {
    fn parse(xml: &str) -> Self {
        let mut types = Self::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e)) => {
                    let mut key = None;
                    let mut content_type = None;
                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value).to_string();
                        match attr.key.as_ref() {
                            b"Extension" | b"PartName" => key = Some(value),
                            b"ContentType" => content_type = Some(value),
                            _ => {}
                        }
                    }
                    if let (Some(key), Some(ct)) = (key, content_type) {
                        match e.local_name().as_ref() {
                            b"Default" => {
                                types.defaults.insert(key.to_lowercase(), ct);
                            }
                            b"Override" => {
                                types
                                    .overrides
                                    .insert(key.trim_start_matches('/').to_string(), ct);
                            }
                            _ => {}
                        }
                    }
                }
                Ok(quick_xml::events::Event::Eof) | Err(_) => break,
                _ => {}
            }
            buf.clear();
        }

        types
    }

    fn lookup(&self, path: &str) -> Option<&str> {
        let path = path.trim_start_matches('/');
        if let Some(ct) = self.overrides.get(path) {
            return Some(ct);
        }
        let ext = path.rsplit_once('.')?.1.to_lowercase();
        self.defaults.get(&ext).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn package(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, data) in files {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
        buffer
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            OoxmlContainer::resolve_path("ppt/slides/slide1.xml", "../media/image1.png"),
            "ppt/media/image1.png"
        );
        assert_eq!(
            OoxmlContainer::resolve_path("ppt/presentation.xml", "slides/slide2.xml"),
            "ppt/slides/slide2.xml"
        );
        assert_eq!(
            OoxmlContainer::resolve_path("ppt/slideLayouts/slideLayout1.xml", "../slideMasters/slideMaster1.xml"),
            "ppt/slideMasters/slideMaster1.xml"
        );
        assert_eq!(
            OoxmlContainer::resolve_path("ppt/slides/slide1.xml", "/ppt/media/image1.png"),
            "ppt/media/image1.png"
        );
    }

    #[test]
    fn test_rels_path() {
        assert_eq!(
            OoxmlContainer::rels_path("ppt/slides/slide1.xml"),
            "ppt/slides/_rels/slide1.xml.rels"
        );
        assert_eq!(OoxmlContainer::rels_path(""), "_rels/.rels");
    }

    #[test]
    fn test_relationships_collection() {
        let mut rels = Relationships::new("ppt/slides/slide1.xml");
        rels.add(Relationship {
            id: "rId1".to_string(),
            rel_type: "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout"
                .to_string(),
            target: "../slideLayouts/slideLayout1.xml".to_string(),
            external: false,
        });
        rels.add(Relationship {
            id: "rId2".to_string(),
            rel_type: "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink"
                .to_string(),
            target: "https://example.com".to_string(),
            external: true,
        });

        assert!(rels.get("rId1").is_some());
        assert!(rels.get("rId3").is_none());
        assert_eq!(rels.len(), 2);
        assert_eq!(
            rels.target_path("rId1").as_deref(),
            Some("ppt/slideLayouts/slideLayout1.xml")
        );
        assert!(rels.target_path("rId2").is_none());
        assert_eq!(rels.first_of_type("slideLayout").map(|r| r.id.as_str()), Some("rId1"));
    }

    #[test]
    fn test_read_relationships_and_content_types() {
        let data = package(&[
            (
                "[Content_Types].xml",
                br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="png" ContentType="image/png"/>
  <Default Extension="MP4" ContentType="video/mp4"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#,
            ),
            (
                "ppt/_rels/presentation.xml.rels",
                br#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
</Relationships>"#,
            ),
            ("ppt/presentation.xml", b"<p:presentation/>"),
        ]);

        let container = OoxmlContainer::from_bytes(data).unwrap();
        assert!(container.exists("ppt/presentation.xml"));
        assert_eq!(container.content_type("ppt/media/image1.png"), Some("image/png"));
        assert_eq!(container.content_type("ppt/media/media1.mp4"), Some("video/mp4"));
        assert!(container
            .content_type("/ppt/presentation.xml")
            .is_some_and(|ct| ct.contains("presentation.main")));

        let rels = container.read_relationships("ppt/presentation.xml").unwrap();
        assert_eq!(rels.target_path("rId1").as_deref(), Some("ppt/theme/theme1.xml"));

        let missing = container.read_relationships("ppt/slides/slide9.xml").unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_not_a_zip() {
        let result = OoxmlContainer::from_bytes(b"definitely not a zip".to_vec());
        assert!(matches!(result, Err(Error::ZipArchive(_))));
    }

    #[test]
    fn test_utf16_decoding_function() {
        let utf16_le = b"\xFF\xFE<\0?\0x\0m\0l\0>\0";
        assert_eq!(decode_xml_bytes(utf16_le).unwrap(), "<?xml>");

        let utf16_be = b"\xFE\xFF\0<\0?\0x\0m\0l\0>";
        assert_eq!(decode_xml_bytes(utf16_be).unwrap(), "<?xml>");

        let utf8_bom = b"\xEF\xBB\xBF<?xml>";
        assert_eq!(decode_xml_bytes(utf8_bom).unwrap(), "<?xml>");

        assert_eq!(decode_xml_bytes(b"<?xml>").unwrap(), "<?xml>");
    }

    #[test]
    fn test_utf16_declaration_is_rewritten() {
        let decl = "<?xml version=\"1.0\" encoding=\"UTF-16\"?><a/>";
        let mut bytes = vec![0xFF, 0xFE];
        for unit in decl.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let decoded = decode_xml_bytes(&bytes).unwrap();
        assert!(decoded.contains("encoding=\"UTF-8\""));
        assert!(decoded.ends_with("<a/>"));
    }
}
