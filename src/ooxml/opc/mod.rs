/// Open Packaging Conventions (OPC) container layer.
///
/// Covers what a Word document round trip needs:
///
/// - Part names and relationship resolution
/// - Content type discovery from `[Content_Types].xml`
/// - Reading a zip package by walking its relationship graph
/// - Writing a package back to zip bytes
///
/// Integers in relationship ids are parsed with `atoi_simd` and all XML goes
/// through `quick-xml`.
pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

pub use error::OpcError;
pub use package::{OpcPackage, ReadLimits};
pub use packuri::PackURI;
pub use part::Part;
pub use rel::{Relationship, Relationships};
