//! The normalization pipeline: version detection, section splitting,
//! per-field extraction, clip assembly.

mod fields;
mod sections;
mod version;

use roxmltree::{Document, Node};

use crate::clip::{AudioSource, Clip, KeySignature, Meter};
use crate::feedback::{Diagnostics, Parsed, Reason};

use version::SchemaVersion;

/// Parse one theorytab document into its clips.
pub fn parse(source: &str, filename: &str) -> Parsed<Vec<Clip>> {
    let mut diag = Diagnostics::new(filename);
    let clips = clips(source, filename, &mut diag);
    Parsed::new(clips, diag.into_entries())
}

fn clips(source: &str, filename: &str, diag: &mut Diagnostics) -> Vec<Clip> {
    let doc = match Document::parse(source) {
        Ok(doc) => doc,
        Err(err) => {
            diag.error(Reason::UnreadableDocument(err.to_string()));
            return Vec::new();
        }
    };

    let Some(root) = sections::find_root(&doc) else {
        diag.error(Reason::MissingRoot);
        return Vec::new();
    };
    let Some(meta) = sections::find_meta(root) else {
        diag.error(Reason::MissingMeta);
        return Vec::new();
    };

    // Document-level fields are extracted once and shared by every
    // section. Any of them failing drops the whole document.
    let beats_per_measure = fields::beats_per_measure(meta, diag);
    let tonic = fields::tonic(meta, diag);
    let mode = fields::mode(meta, diag);
    let video_id = fields::video_id(meta, diag);
    let (Ok(beats_per_measure), Ok(tonic), Ok(mode), Ok(video_id)) =
        (beats_per_measure, tonic, mode, video_id)
    else {
        return Vec::new();
    };

    let layout = SchemaVersion::resolve(&doc).layout();
    let mut clips = Vec::new();
    for pair in sections::split(root, meta, layout, diag) {
        // A bad section is skipped; its siblings are unaffected.
        let Ok(timing) = fields::timing(pair.meta, diag) else {
            continue;
        };
        let Ok(beats) = fields::num_beats(pair.data, beats_per_measure, diag) else {
            continue;
        };
        clips.push(Clip {
            data_source: filename.to_string(),
            audio_source: AudioSource {
                video_id: video_id.clone(),
                start_time: timing.start_time,
                end_time: timing.end_time,
            },
            meter: Meter {
                beats,
                beats_per_measure,
            },
            key: KeySignature { tonic, mode },
        });
    }

    if clips.is_empty() {
        diag.error(Reason::EmptyResult);
    }
    clips
}

/// Trimmed text content of a node; whitespace-only counts as absent.
fn text_of<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    let text = node.text()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Text of the first descendant named exactly one of `names`.
fn find_text<'a>(node: Node<'a, '_>, names: &[&str]) -> Option<&'a str> {
    node.descendants()
        .find(|n| names.contains(&n.tag_name().name()))
        .and_then(|n| text_of(n))
}

/// Text of the first descendant whose name matches `name` ignoring case.
fn find_text_ci<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.descendants()
        .find(|n| n.tag_name().name().eq_ignore_ascii_case(name))
        .and_then(|n| text_of(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Level;
    use crate::theory::Mode;
    use pretty_assertions::assert_eq;

    const GOLDEN: &str = r#"
        <theorytab>
          <version>1.2</version>
          <meta>
            <key>C</key>
            <mode>6</mode>
            <beats_in_measure>4</beats_in_measure>
            <YouTubeID>dQw4w9WgXcQ</YouTubeID>
            <global_start>10</global_start>
            <active_start>2</active_start>
            <active_stop>18</active_stop>
          </meta>
          <data>
            <numMeasures>2</numMeasures>
            <numMeasures>2</numMeasures>
          </data>
        </theorytab>"#;

    #[test]
    fn test_single_section_document() {
        let result = parse(GOLDEN, "golden.xml");

        assert!(!result.has_errors(), "{:?}", result.diagnostics);
        assert_eq!(result.value.len(), 1);

        let clip = &result.value[0];
        assert_eq!(clip.data_source, "golden.xml");
        assert_eq!(clip.audio_source.video_id, "dQw4w9WgXcQ");
        assert_eq!(clip.audio_source.start_time, 12.0);
        assert_eq!(clip.audio_source.end_time, 28.0);
        assert_eq!(clip.meter.beats, 16);
        assert_eq!(clip.meter.beats_per_measure, 4);
        assert_eq!(clip.key.tonic, 0);
        assert_eq!(clip.key.mode, Mode::Aeolian);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse(GOLDEN, "golden.xml");
        let second = parse(GOLDEN, "golden.xml");
        assert_eq!(first.value, second.value);
        assert_eq!(first.diagnostics, second.diagnostics);
    }

    #[test]
    fn test_missing_video_id_aborts_document() {
        let xml = r#"
            <theorytab>
              <meta>
                <key>C</key>
                <mode>1</mode>
                <beats_in_measure>4</beats_in_measure>
                <global_start>0</global_start>
                <active_start>0</active_start>
                <active_stop>8</active_stop>
              </meta>
              <data><numMeasures>2</numMeasures></data>
            </theorytab>"#;
        let result = parse(xml, "no_video.xml");

        assert!(result.value.is_empty());
        // Exactly the document-level abort; no section-level diagnostics.
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].level, Level::Error);
        assert_eq!(
            result.diagnostics[0].reason,
            Reason::MissingField("YouTubeID".into())
        );
    }

    #[test]
    fn test_unreadable_document() {
        let result = parse("<theorytab><meta>", "broken.xml");
        assert!(result.value.is_empty());
        assert!(matches!(
            result.diagnostics[0].reason,
            Reason::UnreadableDocument(_)
        ));
    }

    #[test]
    fn test_missing_root() {
        let result = parse("<song><meta/></song>", "odd.xml");
        assert!(result.value.is_empty());
        assert_eq!(result.diagnostics[0].reason, Reason::MissingRoot);
    }

    #[test]
    fn test_missing_meta() {
        let result = parse("<theorytab><data/></theorytab>", "no_meta.xml");
        assert!(result.value.is_empty());
        assert_eq!(result.diagnostics[0].reason, Reason::MissingMeta);
    }

    #[test]
    fn test_default_mode_warns_but_still_parses() {
        let xml = r#"
            <theorytab>
              <version>1.2</version>
              <meta>
                <key>G</key>
                <beats_in_measure>3</beats_in_measure>
                <YouTubeID>abcdefghijk</YouTubeID>
                <global_start>1</global_start>
                <active_start>0</active_start>
                <active_stop>6</active_stop>
              </meta>
              <data><numMeasures>2</numMeasures></data>
            </theorytab>"#;
        let result = parse(xml, "no_mode.xml");

        assert!(!result.has_errors(), "{:?}", result.diagnostics);
        assert_eq!(result.value.len(), 1);
        assert_eq!(result.value[0].key.mode, Mode::Ionian);
        assert_eq!(result.warnings().count(), 1);
    }

    #[test]
    fn test_empty_result_diagnostic() {
        // Structurally fine, but the one section has no usable beat count.
        let xml = r#"
            <theorytab>
              <version>1.2</version>
              <meta>
                <key>C</key>
                <mode>1</mode>
                <beats_in_measure>4</beats_in_measure>
                <YouTubeID>dQw4w9WgXcQ</YouTubeID>
                <global_start>0</global_start>
                <active_start>0</active_start>
                <active_stop>8</active_stop>
              </meta>
              <data><numMeasures>0</numMeasures></data>
            </theorytab>"#;
        let result = parse(xml, "beatless.xml");

        assert!(result.value.is_empty());
        assert!(result
            .diagnostics
            .iter()
            .any(|d| d.reason == Reason::EmptyResult));
    }
}
