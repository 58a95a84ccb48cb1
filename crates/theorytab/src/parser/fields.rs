//! Field extractors.
//!
//! Each extractor pulls one semantic value out of a sub-tree and
//! validates it. Failures are recorded in the diagnostics sink and also
//! returned, so the assembler can decide between dropping the document
//! and skipping one section.

use roxmltree::Node;

use crate::feedback::{Diagnostics, Reason};
use crate::theory::{self, Mode};

use super::{find_text, find_text_ci};

/// Start and end of a section within its backing video, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Timing {
    pub start_time: f64,
    pub end_time: f64,
}

fn fail<T>(diag: &mut Diagnostics, reason: Reason) -> Result<T, Reason> {
    diag.error(reason.clone());
    Err(reason)
}

fn unrecognized(field: &str, raw: &str) -> Reason {
    Reason::UnrecognizedValue {
        field: field.into(),
        raw: raw.into(),
    }
}

/// Beats per measure, rounded to the nearest whole beat.
pub(crate) fn beats_per_measure(meta: Node, diag: &mut Diagnostics) -> Result<u32, Reason> {
    let Some(text) = find_text_ci(meta, "beats_in_measure") else {
        return fail(diag, Reason::MissingField("beats_in_measure".into()));
    };
    let Ok(raw) = text.parse::<f64>() else {
        return fail(diag, unrecognized("beats_in_measure", text));
    };
    let beats = raw.round();
    if !beats.is_finite() || beats <= 0.0 {
        return fail(diag, unrecognized("beats_in_measure", text));
    }
    Ok(beats as u32)
}

/// Pitch class of the key's tonic.
pub(crate) fn tonic(meta: Node, diag: &mut Diagnostics) -> Result<u8, Reason> {
    let Some(text) = find_text(meta, &["key", "Key"]) else {
        return fail(diag, Reason::MissingField("key".into()));
    };
    match theory::pitch_class(text) {
        Some(pc) => Ok(pc),
        None => fail(diag, unrecognized("key", text)),
    }
}

/// Mode of the key. A missing mode means major, with a warning.
pub(crate) fn mode(meta: Node, diag: &mut Diagnostics) -> Result<Mode, Reason> {
    let Some(text) = find_text(meta, &["mode"]) else {
        diag.warning(Reason::MissingField("mode".into()));
        return Ok(Mode::default());
    };
    let Ok(raw) = text.parse::<f64>() else {
        return fail(diag, unrecognized("mode", text));
    };
    match Mode::from_number(raw.round() as u8) {
        Some(mode) => Ok(mode),
        None => fail(diag, unrecognized("mode", text)),
    }
}

/// The backing video identifier. The upstream site writes the literal
/// string "null" for transcriptions without one.
pub(crate) fn video_id(meta: Node, diag: &mut Diagnostics) -> Result<String, Reason> {
    let text = match find_text(meta, &["YouTubeID"]) {
        Some(text) if text != "null" => text,
        _ => return fail(diag, Reason::MissingField("YouTubeID".into())),
    };
    if !is_video_id(text) {
        return fail(diag, unrecognized("YouTubeID", text));
    }
    Ok(text.to_string())
}

/// Eleven characters of `[0-9A-Za-z_-]`, the shape of a YouTube id.
fn is_video_id(s: &str) -> bool {
    s.len() == 11
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Begin and end time of a section within its video.
pub(crate) fn timing(section: Node, diag: &mut Diagnostics) -> Result<Timing, Reason> {
    let global_start = seconds(section, "global_start", diag)?;
    let active_start = seconds(section, "active_start", diag)?;
    let active_stop = seconds(section, "active_stop", diag)?;

    let start_time = global_start + active_start;
    let end_time = global_start + active_stop;
    if start_time >= end_time {
        return fail(
            diag,
            unrecognized("timing", &format!("{}..{}", start_time, end_time)),
        );
    }
    Ok(Timing {
        start_time,
        end_time,
    })
}

fn seconds(section: Node, name: &str, diag: &mut Diagnostics) -> Result<f64, Reason> {
    let Some(text) = find_text(section, &[name]) else {
        return fail(diag, Reason::MissingField(name.into()));
    };
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => fail(diag, unrecognized(name, text)),
    }
}

/// Total beats in a data section, for audio alignment.
///
/// Measure counts are preferred; theorytabs 3882 to 4192 predate
/// `numMeasures`, so their beat counts are summed directly. Audio there
/// may be synced to a non-integral number of measures.
pub(crate) fn num_beats(
    data: Node,
    beats_per_measure: u32,
    diag: &mut Diagnostics,
) -> Result<u32, Reason> {
    let measures = sum_counts(data, "numMeasures");
    if measures > 0 {
        return Ok(measures.saturating_mul(beats_per_measure));
    }

    let beats = sum_counts(data, "numBeats");
    if beats > 0 {
        return Ok(beats);
    }

    fail(diag, Reason::MissingField("numBeats".into()))
}

/// Sum every `name` count under `data`, each rounded to the nearest
/// integer. An entry with missing or unparseable text voids the sum.
fn sum_counts(data: Node, name: &str) -> u32 {
    let mut total: u32 = 0;
    for node in data.descendants().filter(|n| n.has_tag_name(name)) {
        let Some(value) = super::text_of(node).and_then(|t| t.parse::<f64>().ok()) else {
            return 0;
        };
        total = total.saturating_add(value.round().max(0.0) as u32);
    }
    total
}
