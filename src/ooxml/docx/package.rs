/// Package implementation for Word documents.
use crate::ooxml::docx::document::Document;
use crate::ooxml::docx::image::ImageRelation;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{OpcPackage, Part, ReadLimits, Relationship};
use std::io::{Read, Seek};
use std::path::Path;

/// A Word (.docx) package.
///
/// Wraps an OPC package whose main part has been checked to be a
/// WordprocessingML document.
///
/// # Examples
///
/// ```rust,no_run
/// use doctrans::ooxml::docx::Package;
///
/// let pkg = Package::open("report.docx")?;
/// let doc = pkg.document()?;
/// println!("{} top-level nodes", doc.content_nodes().len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Package {
    opc: OpcPackage,
}

impl Package {
    /// Open a .docx file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Load a .docx package from a seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_opc(OpcPackage::from_reader(reader)?)
    }

    /// Load a .docx package from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    /// Load a .docx package from memory, refusing parts that expand past `limits`.
    pub fn from_bytes_with_limits(data: &[u8], limits: ReadLimits) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes_with_limits(data, limits)?)
    }

    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main = opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main document part: {}", e)))?;

        if !ct::WML_MAIN_PARTS.iter().any(|main_ct| *main_ct == main.content_type()) {
            return Err(OoxmlError::InvalidContentType {
                expected: ct::WML_DOCUMENT_MAIN.to_string(),
                got: main.content_type().to_string(),
            });
        }

        Ok(Self { opc })
    }

    fn main_part(&self) -> Result<&Part> {
        Ok(self.opc.main_document_part()?)
    }

    /// Parse the document body.
    pub fn document(&self) -> Result<Document> {
        Document::from_xml(self.main_part()?.blob())
    }

    /// Resolve an image relationship id of the main document part.
    ///
    /// Returns `None` for unknown ids, external links and missing media parts.
    pub fn image(&self, r_id: &str) -> Option<ImageRelation<'_>> {
        let main = self.main_part().ok()?;
        let rel = main.rels().get(r_id)?;
        self.load_image(main, rel)
    }

    /// Every image relationship of the main document part, ordered by id.
    ///
    /// A relationship counts as an image when its type is the image type or its
    /// target reference mentions "image".
    pub fn images(&self) -> Vec<ImageRelation<'_>> {
        let Ok(main) = self.main_part() else {
            return Vec::new();
        };
        main.rels()
            .sorted()
            .into_iter()
            .filter(|rel| rel.reltype() == rt::IMAGE || rel.target_ref().contains("image"))
            .filter_map(|rel| self.load_image(main, rel))
            .collect()
    }

    fn load_image<'a>(&'a self, main: &'a Part, rel: &'a Relationship) -> Option<ImageRelation<'a>> {
        if rel.is_external() {
            return None;
        }
        let part = self.opc.related_part(main, rel.r_id()).ok()?;
        Some(ImageRelation::new(rel.r_id(), rel.target_ref(), part.blob()))
    }

    /// Raw XML of the style registry, if the document has one.
    pub fn styles_xml(&self) -> Option<&[u8]> {
        let main = self.main_part().ok()?;
        let rel = main.rels().part_with_reltype(rt::STYLES).ok()?;
        let part = self.opc.part(&rel.target_partname().ok()?).ok()?;
        Some(part.blob())
    }
}
