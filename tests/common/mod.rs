//! Shared fixtures: in-memory .docx packages and test translation backends.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use doctrans::translate::error::Result as TranslateResult;
use doctrans::translate::{DetectedLanguage, TranslateError, TranslationPort};
use zip::write::SimpleFileOptions;

pub const NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" "#,
    r#"xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" "#,
    r#"xmlns:v="urn:schemas-microsoft-com:vml""#,
);

const IMAGE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
const STYLES_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

/// Builds a minimal Word package around a body fragment.
#[derive(Default)]
pub struct DocxBuilder {
    body: String,
    media: Vec<(String, String, Vec<u8>)>,
    styles: Option<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw body XML (`w:` and `r:` prefixes are declared).
    pub fn body(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    /// A paragraph with one plain run.
    pub fn text(self, text: &str) -> Self {
        self.body(&format!("<w:p><w:r><w:t xml:space=\"preserve\">{text}</w:t></w:r></w:p>"))
    }

    /// Add an image part `word/media/{name}` related as `r_id`.
    pub fn image(mut self, r_id: &str, name: &str, data: Vec<u8>) -> Self {
        self.media.push((r_id.to_string(), name.to_string(), data));
        self
    }

    pub fn styles(mut self, xml: &str) -> Self {
        self.styles = Some(xml.to_string());
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        let mut overrides = String::from(
            r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
        );
        if self.styles.is_some() {
            overrides.push_str(
                r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
            );
        }
        zip.start_file("[Content_Types].xml", options).unwrap();
        write!(
            zip,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/>{overrides}</Types>"#
        )
        .unwrap();

        zip.start_file("_rels/.rels", options).unwrap();
        zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#).unwrap();

        zip.start_file("word/document.xml", options).unwrap();
        write!(
            zip,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {NAMESPACES}><w:body>{}<w:sectPr/></w:body></w:document>"#,
            self.body
        )
        .unwrap();

        let mut rels = String::new();
        if self.styles.is_some() {
            rels.push_str(&format!(r#"<Relationship Id="rId1" Type="{STYLES_REL}" Target="styles.xml"/>"#));
        }
        for (r_id, name, _) in &self.media {
            rels.push_str(&format!(r#"<Relationship Id="{r_id}" Type="{IMAGE_REL}" Target="media/{name}"/>"#));
        }
        zip.start_file("word/_rels/document.xml.rels", options).unwrap();
        write!(
            zip,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
        )
        .unwrap();

        if let Some(styles) = &self.styles {
            zip.start_file("word/styles.xml", options).unwrap();
            zip.write_all(styles.as_bytes()).unwrap();
        }
        for (_, name, data) in &self.media {
            zip.start_file(format!("word/media/{name}"), options).unwrap();
            zip.write_all(data).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }
}

/// A run holding an inline picture that references `r_id`.
pub fn drawing_run(r_id: &str) -> String {
    format!(
        r#"<w:r><w:drawing><wp:inline><wp:extent cx="100" cy="100"/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic><pic:blipFill><a:blip r:embed="{r_id}"/></pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#
    )
}

/// A table whose rows are given as lists of cell texts.
pub fn table_xml(columns: usize, rows: &[&[&str]]) -> String {
    let mut xml = String::from("<w:tbl><w:tblPr><w:tblW w:w=\"0\" w:type=\"auto\"/></w:tblPr><w:tblGrid>");
    for _ in 0..columns {
        xml.push_str("<w:gridCol w:w=\"2000\"/>");
    }
    xml.push_str("</w:tblGrid>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in *row {
            xml.push_str(&format!("<w:tc><w:p><w:r><w:t>{cell}</w:t></w:r></w:p></w:tc>"));
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// PNG bytes of the given size.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbImage::new(width, height)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// Translates through a lookup table; unknown text comes back unchanged.
#[derive(Default)]
pub struct MappingPort {
    map: HashMap<String, String>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl MappingPort {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn with(mut self, from: &str, to: &str) -> Self {
        self.map.insert(from.to_string(), to.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Texts sent to the backend, in order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl TranslationPort for MappingPort {
    fn name(&self) -> &str {
        "mapping"
    }

    fn translate(&self, text: &str, _source: Option<&str>, _target: &str) -> TranslateResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(text.to_string());
        Ok(self.map.get(text).cloned().unwrap_or_else(|| text.to_string()))
    }

    fn detect_language(&self, _text: &str) -> TranslateResult<DetectedLanguage> {
        Ok(DetectedLanguage {
            code: "en".to_string(),
            name: "English".to_string(),
        })
    }
}

/// A backend that is always down.
#[derive(Default)]
pub struct FailingPort {
    calls: AtomicUsize,
}

impl FailingPort {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TranslationPort for FailingPort {
    fn name(&self) -> &str {
        "failing"
    }

    fn translate(&self, _text: &str, _source: Option<&str>, _target: &str) -> TranslateResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TranslateError::Status(503))
    }

    fn detect_language(&self, _text: &str) -> TranslateResult<DetectedLanguage> {
        Err(TranslateError::Status(503))
    }
}
