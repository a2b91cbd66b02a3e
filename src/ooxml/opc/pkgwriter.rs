//! Serializing an OPC package to a zip archive.
//!
//! Writes `[Content_Types].xml`, `_rels/.rels`, then every part followed by
//! its relationships part when it has any.

use crate::ooxml::opc::constants::{content_type as ct, namespace};
use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

pub struct PackageWriter;

impl PackageWriter {
    pub fn to_bytes(package: &OpcPackage) -> Result<Vec<u8>> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let content_types = ContentTypesItem::from_package(package).to_xml();
        zip.start_file(&CONTENT_TYPES_URI[1..], options)?;
        zip.write_all(content_types.as_bytes())?;

        let package_rels = PackURI::from_membername("").rels_uri();
        zip.start_file(package_rels.membername(), options)?;
        zip.write_all(package.rels().to_xml().as_bytes())?;

        for part in package.iter_parts() {
            zip.start_file(part.partname().membername(), options)?;
            zip.write_all(part.blob())?;

            if !part.rels().is_empty() {
                zip.start_file(part.partname().rels_uri().membername(), options)?;
                zip.write_all(part.rels().to_xml().as_bytes())?;
            }
        }

        Ok(zip.finish()?.into_inner())
    }
}

/// The `Default` and `Override` entries of `[Content_Types].xml`.
struct ContentTypesItem {
    defaults: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn from_package(package: &OpcPackage) -> Self {
        let mut item = Self {
            defaults: BTreeMap::new(),
            overrides: BTreeMap::new(),
        };
        item.defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        item.defaults.insert("xml".to_string(), ct::XML.to_string());

        for part in package.iter_parts() {
            let ext = part.partname().ext().to_lowercase();
            if let Some(image_ct) = default_image_content_type(&ext)
                && image_ct == part.content_type()
            {
                item.defaults.insert(ext, image_ct.to_string());
            } else if part.partname().as_str() != PACKAGE_URI {
                item.overrides
                    .insert(part.partname().to_string(), part.content_type().to_string());
            }
        }

        item
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(512 + self.overrides.len() * 160);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        let _ = write!(xml, r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES);
        for (ext, content_type) in &self.defaults {
            let _ = write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                quick_xml::escape::escape(ext.as_str()),
                quick_xml::escape::escape(content_type.as_str())
            );
        }
        for (partname, content_type) in &self.overrides {
            let _ = write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                quick_xml::escape::escape(partname.as_str()),
                quick_xml::escape::escape(content_type.as_str())
            );
        }
        xml.push_str("</Types>");
        xml
    }
}

fn default_image_content_type(ext: &str) -> Option<&'static str> {
    match ext {
        "png" => Some(ct::PNG),
        "jpg" | "jpeg" => Some(ct::JPEG),
        "gif" => Some(ct::GIF),
        "bmp" => Some(ct::BMP),
        "tif" | "tiff" => Some(ct::TIFF),
        _ => None,
    }
}
