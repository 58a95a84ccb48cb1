//! Theorytab transcription parser.
//!
//! This crate normalizes community-authored theorytab XML documents into a
//! list of time-aligned [`Clip`] records, each carrying the musical key,
//! mode, meter, and the source-video timing needed to cut the matching
//! audio segment.
//!
//! The format went through several incompatible schema revisions, so the
//! parser detects the revision and degrades gracefully: a malformed or
//! partially-missing section is skipped and reported, never the whole
//! file, and unrecognized values are rejected rather than miscoded.
//!
//! # Example
//!
//! ```
//! use theorytab::parse;
//!
//! let xml = r#"
//! <theorytab>
//!   <version>1.2</version>
//!   <meta>
//!     <key>C</key>
//!     <mode>6</mode>
//!     <beats_in_measure>4</beats_in_measure>
//!     <YouTubeID>dQw4w9WgXcQ</YouTubeID>
//!     <global_start>10</global_start>
//!     <active_start>2</active_start>
//!     <active_stop>18</active_stop>
//!   </meta>
//!   <data><numMeasures>4</numMeasures></data>
//! </theorytab>"#;
//!
//! let result = parse(xml, "example.xml");
//! assert!(!result.has_errors());
//! assert_eq!(result.value.len(), 1);
//! assert_eq!(result.value[0].audio_source.start_time, 12.0);
//! assert_eq!(result.value[0].audio_source.end_time, 28.0);
//! ```

pub mod clip;
pub mod feedback;
pub mod parser;
pub mod theory;

pub use clip::{AudioSource, Clip, KeySignature, Meter};
pub use feedback::{Diagnostic, Level, Parsed, Reason};
pub use theory::Mode;

/// Parse one theorytab document into its clips.
///
/// `filename` identifies the document in diagnostics and becomes the
/// `data_source` of every clip. The parse never fails hard: the worst
/// outcome is an empty clip list alongside the diagnostics explaining why.
pub fn parse(source: &str, filename: &str) -> Parsed<Vec<Clip>> {
    parser::parse(source, filename)
}
