//! Section location and positional pairing.

use roxmltree::{Document, Node};

use crate::feedback::{Diagnostics, Reason};

use super::version::SectionLayout;

/// A positionally paired meta/data section, ready for field extraction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SectionPair<'a, 'input> {
    pub meta: Node<'a, 'input>,
    pub data: Node<'a, 'input>,
}

/// Locate the document root: a `theorytab` or composite `super` element.
pub(crate) fn find_root<'a, 'i>(doc: &'a Document<'i>) -> Option<Node<'a, 'i>> {
    doc.descendants()
        .find(|n| n.has_tag_name("theorytab") || n.has_tag_name("super"))
}

/// Locate the single `meta` element under the root.
pub(crate) fn find_meta<'a, 'i>(root: Node<'a, 'i>) -> Option<Node<'a, 'i>> {
    root.descendants().skip(1).find(|n| n.has_tag_name("meta"))
}

/// Split the document into (meta, data) section pairs.
///
/// Legacy nested documents keep per-section blocks under `sections`
/// collections, one inside meta and one under the root; everything else
/// is a single implicit section. Pairing is positional and truncates to
/// the shorter side.
pub(crate) fn split<'a, 'i>(
    root: Node<'a, 'i>,
    meta: Node<'a, 'i>,
    layout: SectionLayout,
    diag: &mut Diagnostics,
) -> Vec<SectionPair<'a, 'i>> {
    let nested = match layout {
        SectionLayout::Nested => direct_child(meta, "sections"),
        SectionLayout::Flat => None,
    };

    let (meta_sections, data_sections) = match nested {
        Some(meta_collection) => {
            let metas = element_children(meta_collection);
            let datas = direct_child(root, "sections")
                .map(element_children)
                .unwrap_or_default();
            (metas, datas)
        }
        // Single-section shape, also the fallback for nested-era
        // documents that carry no sections collection.
        None => {
            let data = root.descendants().skip(1).find(|n| n.has_tag_name("data"));
            let Some(data) = data else {
                diag.error(Reason::MissingField("data".into()));
                return Vec::new();
            };
            (vec![meta], vec![data])
        }
    };

    if meta_sections.len() != data_sections.len() {
        diag.warning(Reason::SectionCountMismatch {
            meta: meta_sections.len(),
            data: data_sections.len(),
        });
    }

    meta_sections
        .into_iter()
        .zip(data_sections)
        .map(|(meta, data)| {
            let meta_name = meta.tag_name().name();
            let data_name = data.tag_name().name();
            if meta_name != "meta" && data_name != "data" && meta_name != data_name {
                diag.warning(Reason::SectionNameMismatch {
                    meta: meta_name.to_string(),
                    data: data_name.to_string(),
                });
            }
            SectionPair { meta, data }
        })
        .collect()
}

fn direct_child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn element_children<'a, 'i>(node: Node<'a, 'i>) -> Vec<Node<'a, 'i>> {
    node.children().filter(|n| n.is_element()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Level;

    fn pairs_of(source: &str, layout: SectionLayout, diag: &mut Diagnostics) -> Vec<(String, String)> {
        let doc = Document::parse(source).unwrap();
        let root = find_root(&doc).unwrap();
        let meta = find_meta(root).unwrap();
        split(root, meta, layout, diag)
            .into_iter()
            .map(|p| {
                (
                    p.meta.tag_name().name().to_string(),
                    p.data.tag_name().name().to_string(),
                )
            })
            .collect()
    }

    const NESTED: &str = r#"
        <super>
          <meta>
            <key>C</key>
            <sections>
              <meta><global_start>0</global_start></meta>
              <meta><global_start>30</global_start></meta>
            </sections>
          </meta>
          <sections>
            <data><numMeasures>2</numMeasures></data>
            <data><numMeasures>4</numMeasures></data>
          </sections>
        </super>"#;

    #[test]
    fn test_nested_pairing_is_positional() {
        let mut diag = Diagnostics::new("t");
        let pairs = pairs_of(NESTED, SectionLayout::Nested, &mut diag);
        assert_eq!(pairs.len(), 2);
        assert!(diag.entries().is_empty());
    }

    #[test]
    fn test_flat_layout_ignores_section_collections() {
        // A stray sections collection in a flat-era document does not
        // bring back the nested pairing.
        let xml = r#"
            <theorytab>
              <meta>
                <key>C</key>
                <sections><meta/></sections>
              </meta>
              <data><numMeasures>4</numMeasures></data>
            </theorytab>"#;
        let mut diag = Diagnostics::new("t");
        let pairs = pairs_of(xml, SectionLayout::Flat, &mut diag);
        assert_eq!(pairs, vec![("meta".to_string(), "data".to_string())]);
    }

    #[test]
    fn test_nested_layout_falls_back_without_collection() {
        let xml = r#"
            <theorytab>
              <meta><key>C</key></meta>
              <data><numBeats>8</numBeats></data>
            </theorytab>"#;
        let mut diag = Diagnostics::new("t");
        let pairs = pairs_of(xml, SectionLayout::Nested, &mut diag);
        assert_eq!(pairs.len(), 1);
        assert!(diag.entries().is_empty());
    }

    #[test]
    fn test_count_mismatch_truncates_and_warns() {
        let xml = r#"
            <super>
              <meta>
                <sections>
                  <meta/><meta/><meta/>
                </sections>
              </meta>
              <sections>
                <data/><data/>
              </sections>
            </super>"#;
        let mut diag = Diagnostics::new("t");
        let pairs = pairs_of(xml, SectionLayout::Nested, &mut diag);

        assert_eq!(pairs.len(), 2);
        let entries = diag.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::Warning);
        assert_eq!(
            entries[0].reason,
            Reason::SectionCountMismatch { meta: 3, data: 2 }
        );
    }

    #[test]
    fn test_name_mismatch_warns_but_pairs() {
        let xml = r#"
            <super>
              <meta>
                <sections><verse/></sections>
              </meta>
              <sections><chorus/></sections>
            </super>"#;
        let mut diag = Diagnostics::new("t");
        let pairs = pairs_of(xml, SectionLayout::Nested, &mut diag);

        assert_eq!(pairs.len(), 1);
        let entries = diag.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].reason,
            Reason::SectionNameMismatch {
                meta: "verse".into(),
                data: "chorus".into()
            }
        );
    }

    #[test]
    fn test_matching_names_do_not_warn() {
        let xml = r#"
            <super>
              <meta>
                <sections><verse/></sections>
              </meta>
              <sections><verse/></sections>
            </super>"#;
        let mut diag = Diagnostics::new("t");
        let pairs = pairs_of(xml, SectionLayout::Nested, &mut diag);
        assert_eq!(pairs.len(), 1);
        assert!(diag.entries().is_empty());
    }

    #[test]
    fn test_missing_data_node_yields_no_pairs() {
        let xml = "<theorytab><meta><key>C</key></meta></theorytab>";
        let mut diag = Diagnostics::new("t");
        let pairs = pairs_of(xml, SectionLayout::Flat, &mut diag);

        assert!(pairs.is_empty());
        assert!(diag.has_errors());
    }

    #[test]
    fn test_text_nodes_between_sections_are_ignored() {
        let xml = "<super><meta><sections>\n  <meta/>\n  <meta/>\n</sections></meta><sections>\n  <data/>\n  <data/>\n</sections></super>";
        let mut diag = Diagnostics::new("t");
        let pairs = pairs_of(xml, SectionLayout::Nested, &mut diag);
        assert_eq!(pairs.len(), 2);
    }
}
