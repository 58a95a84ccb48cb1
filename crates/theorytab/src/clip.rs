//! Normalized clip records.
//!
//! A [`Clip`] is the canonical, validated description of one playable
//! excerpt: which video, what time range, and its musical key, mode, and
//! meter. Clips are derived once per parse and never mutated.

use serde::{Deserialize, Serialize};

use crate::theory::Mode;

/// One time-aligned audio excerpt extracted from a theorytab document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Identifier of the document this clip came from.
    pub data_source: String,
    pub audio_source: AudioSource,
    pub meter: Meter,
    pub key: KeySignature,
}

/// The video segment backing a clip. `start_time < end_time` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSource {
    pub video_id: String,
    /// Seconds into the video where the excerpt starts.
    pub start_time: f64,
    /// Seconds into the video where the excerpt ends.
    pub end_time: f64,
}

/// Beat counts describing the excerpt's length and time signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meter {
    /// Total beats in the excerpt.
    pub beats: u32,
    pub beats_per_measure: u32,
}

/// The excerpt's key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySignature {
    /// Pitch class of the tonic (C=0 .. B=11).
    pub tonic: u8,
    pub mode: Mode,
}
