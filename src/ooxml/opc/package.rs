/// In-memory OPC package: parts keyed by part name plus package relationships.
///
/// Reading walks the relationship graph from `_rels/.rels`, so only parts that
/// are reachable from the package are loaded.
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::pkgreader::ContentTypeMap;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use crate::ooxml::opc::rel::Relationships;
use std::collections::{HashMap, VecDeque};
use std::io::{Cursor, Read, Seek};

/// Content type recorded for reachable parts the content types stream does not cover.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Upper bounds on how much a package may expand to while it is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    /// Largest decompressed size of one zip member
    pub max_part_size: u64,
    /// Largest decompressed size of all members read together
    pub max_total_size: u64,
}

impl ReadLimits {
    pub const DEFAULT_MAX_PART_SIZE: u64 = 64 * 1024 * 1024;
    pub const DEFAULT_MAX_TOTAL_SIZE: u64 = 256 * 1024 * 1024;
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            max_part_size: Self::DEFAULT_MAX_PART_SIZE,
            max_total_size: Self::DEFAULT_MAX_TOTAL_SIZE,
        }
    }
}

/// Zip members read on demand, charged against the read limits.
struct Members<R> {
    archive: zip::ZipArchive<R>,
    limits: ReadLimits,
    total_read: u64,
}

impl<R: Read + Seek> Members<R> {
    fn new(archive: zip::ZipArchive<R>, limits: ReadLimits) -> Self {
        Self {
            archive,
            limits,
            total_read: 0,
        }
    }

    /// Decompress member `name`, or `None` if the archive has no such file.
    fn read(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        let Some(index) = self
            .archive
            .index_for_name(name)
            .or_else(|| self.archive.index_for_name(&format!("/{}", name)))
        else {
            return Ok(None);
        };

        let file = self.archive.by_index(index)?;
        if file.is_dir() {
            return Ok(None);
        }

        // The size in the zip header is not trusted; reading stops one byte past the limit.
        let remaining = self.limits.max_total_size.saturating_sub(self.total_read);
        let limit = self.limits.max_part_size.min(remaining);
        let mut blob = Vec::new();
        file.take(limit.saturating_add(1)).read_to_end(&mut blob)?;
        if blob.len() as u64 > limit {
            return Err(OpcError::PartTooLarge {
                part: name.to_string(),
                limit,
            });
        }

        self.total_read += blob.len() as u64;
        Ok(Some(blob))
    }
}

#[derive(Debug)]
pub struct OpcPackage {
    rels: Relationships,
    parts: HashMap<PackURI, Part>,
}

impl OpcPackage {
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI),
            parts: HashMap::new(),
        }
    }

    /// Load a package from its serialized bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    /// Load a package from serialized bytes, decompressing at most what `limits` allows.
    pub fn from_bytes_with_limits(data: &[u8], limits: ReadLimits) -> Result<Self> {
        Self::from_reader_with_limits(Cursor::new(data), limits)
    }

    /// Load a package from a seekable zip stream.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_reader_with_limits(reader, ReadLimits::default())
    }

    /// Load a package from a seekable zip stream.
    ///
    /// Only members reached from `_rels/.rels` are decompressed, each one
    /// bounded by `limits`.
    pub fn from_reader_with_limits<R: Read + Seek>(reader: R, limits: ReadLimits) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader)?;
        Self::unmarshal(&mut Members::new(archive, limits))
    }

    fn unmarshal<R: Read + Seek>(members: &mut Members<R>) -> Result<Self> {
        let content_types = members
            .read(&CONTENT_TYPES_URI[1..])?
            .ok_or_else(|| OpcError::PartNotFound(CONTENT_TYPES_URI.to_string()))
            .and_then(|xml| ContentTypeMap::from_xml(&xml))?;

        let package_uri = PackURI::from_membername("");
        let rels = match members.read(package_uri.rels_uri().membername())? {
            Some(xml) => Relationships::from_xml(PACKAGE_URI, &xml)?,
            None => return Err(OpcError::PartNotFound("/_rels/.rels".to_string())),
        };

        let mut package = Self {
            rels,
            parts: HashMap::new(),
        };

        let mut pending: VecDeque<PackURI> = package
            .rels
            .iter()
            .filter(|rel| !rel.is_external())
            .filter_map(|rel| rel.target_partname().ok())
            .collect();

        while let Some(partname) = pending.pop_front() {
            if package.parts.contains_key(&partname) {
                continue;
            }
            let Some(blob) = members.read(partname.membername())? else {
                tracing::debug!(part = %partname, "relationship target missing from package");
                continue;
            };

            let content_type = content_types
                .get(&partname)
                .unwrap_or(FALLBACK_CONTENT_TYPE)
                .to_string();
            let part_rels = match members.read(partname.rels_uri().membername())? {
                Some(xml) => Relationships::from_xml(partname.base_uri(), &xml)?,
                None => Relationships::new(partname.base_uri()),
            };

            pending.extend(
                part_rels
                    .iter()
                    .filter(|rel| !rel.is_external())
                    .filter_map(|rel| rel.target_partname().ok()),
            );

            let part = Part::new(partname.clone(), content_type, blob).with_rels(part_rels);
            package.parts.insert(partname, part);
        }

        Ok(package)
    }

    /// The part targeted by the package-level officeDocument relationship.
    pub fn main_document_part(&self) -> Result<&Part> {
        let rel = self.rels.part_with_reltype(relationship_type::OFFICE_DOCUMENT)?;
        self.part(&rel.target_partname()?)
    }

    pub fn part(&self, partname: &PackURI) -> Result<&Part> {
        self.parts
            .get(partname)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Follow relationship `r_id` of `source` to the blob of its target part.
    pub fn related_part(&self, source: &Part, r_id: &str) -> Result<&Part> {
        let rel = source
            .rels()
            .get(r_id)
            .ok_or_else(|| OpcError::RelationshipNotFound(r_id.to_string()))?;
        self.part(&rel.target_partname()?)
    }

    pub fn add_part(&mut self, part: Part) {
        self.parts.insert(part.partname().clone(), part);
    }

    /// Parts in part-name order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        let mut parts: Vec<&Part> = self.parts.values().collect();
        parts.sort_by(|a, b| a.partname().cmp(b.partname()));
        parts.into_iter()
    }

    #[inline]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Add a package-level relationship to `partname`.
    pub fn relate_to(&mut self, partname: &PackURI, reltype: &str) -> String {
        self.rels.get_or_add(reltype, partname.membername())
    }

    /// Serialize to zip bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}
