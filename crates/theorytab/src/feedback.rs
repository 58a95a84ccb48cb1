//! Parse diagnostics (skip and failure reasons).
//!
//! The parser is generous: a bad section is dropped and described here
//! rather than failing the whole document. Diagnostics go into a sink
//! owned by the parse call and come back alongside the value, so the
//! library never logs globally and parallel parses of different documents
//! need no synchronization.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a document was aborted or one of its sections skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum Reason {
    /// The XML reader rejected the document text outright.
    #[error("unreadable document: {0}")]
    UnreadableDocument(String),
    /// No `theorytab` or `super` root element.
    #[error("no root element")]
    MissingRoot,
    /// No `meta` element under the root.
    #[error("no meta element")]
    MissingMeta,
    /// A required field is absent (or present with only whitespace).
    #[error("missing field {0}")]
    MissingField(String),
    /// A field is present but its value is outside the valid domain.
    #[error("unrecognized {field} value {raw:?}")]
    UnrecognizedValue { field: String, raw: String },
    /// Positional pairing was truncated to the shorter section list.
    #[error("section count mismatch: {meta} meta vs {data} data")]
    SectionCountMismatch { meta: usize, data: usize },
    /// Paired meta/data sections carry unexpected, disagreeing tag names.
    #[error("section name mismatch: {meta:?} vs {data:?}")]
    SectionNameMismatch { meta: String, data: String },
    /// The document parsed but produced zero clips.
    #[error("no clips produced")]
    EmptyResult,
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    /// The document or one of its sections was dropped.
    Error,
    /// Parsed with an assumption or a truncation the caller may care about.
    Warning,
}

/// One structured skip/failure record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: Level,
    pub reason: Reason,
    /// Identifier of the document the parse was called with.
    pub source: String,
}

/// Append-only diagnostics sink for a single parse call.
#[derive(Debug, Default)]
pub struct Diagnostics {
    source: String,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(source: impl Into<String>) -> Self {
        Diagnostics {
            source: source.into(),
            entries: Vec::new(),
        }
    }

    /// Record an error-level reason.
    pub fn error(&mut self, reason: Reason) {
        self.entries.push(Diagnostic {
            level: Level::Error,
            reason,
            source: self.source.clone(),
        });
    }

    /// Record a warning-level reason.
    pub fn warning(&mut self, reason: Reason) {
        self.entries.push(Diagnostic {
            level: Level::Warning,
            reason,
            source: self.source.clone(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.level == Level::Error)
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}

/// A parsed value plus everything the parser had to say about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parsed<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Parsed<T> {
    pub fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Parsed { value, diagnostics }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == Level::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == Level::Warning)
    }
}
