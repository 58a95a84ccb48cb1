//! Schema version detection.
//!
//! Revision markers observed in the wild, by theorytab id:
//! 1.1 from ~173661, 1.2 from ~191620, 1.3 from ~280191.

use roxmltree::Document;

/// A known theorytab schema revision.
///
/// Unrecognized markers resolve to the newest revision; the schema has
/// only ever added fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SchemaVersion {
    V1_0,
    V1_1,
    V1_2,
    V1_3,
}

/// Section layout implied by a schema revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SectionLayout {
    /// Several section blocks nested under `sections` collections.
    Nested,
    /// One implicit section spanning the whole document.
    Flat,
}

impl SchemaVersion {
    /// Read the document's version marker. Absent or empty means 1.0.
    pub(crate) fn resolve(doc: &Document) -> SchemaVersion {
        let marker = doc
            .descendants()
            .find(|n| n.has_tag_name("version"))
            .and_then(|n| n.text())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("1.0");
        match marker {
            "1.0" => SchemaVersion::V1_0,
            "1.1" => SchemaVersion::V1_1,
            "1.2" => SchemaVersion::V1_2,
            _ => SchemaVersion::V1_3,
        }
    }

    pub(crate) fn layout(self) -> SectionLayout {
        match self {
            SchemaVersion::V1_0 | SchemaVersion::V1_1 => SectionLayout::Nested,
            SchemaVersion::V1_2 | SchemaVersion::V1_3 => SectionLayout::Flat,
        }
    }
}
