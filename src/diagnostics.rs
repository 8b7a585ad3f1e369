//! Recoverable decode anomalies.
//!
//! Every anomaly the decoder tolerates is reported twice: as a `tracing`
//! warning and as a [`Diagnostic`] value handed to the [`DiagnosticSink`] of
//! the running load, so callers and tests can inspect them.

use std::fmt;

use crate::codec::FileKind;

/// What kind of tagged record carried an unrecognized tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagContext {
    Thing,
    TriggerFamily,
    TriggerCondition,
    TriggerAction,
    ArtResource,
}

/// A recoverable anomaly found while decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Header tail ended somewhere else than the header-end offset says
    HeaderMismatch {
        type_id: u32,
        expected: usize,
        actual: usize,
    },

    /// A record was shorter or longer than declared; cursor was moved to `expected`
    Drift {
        start: usize,
        expected: usize,
        actual: usize,
    },

    /// Unrecognized variant tag, the record payload was skipped
    UnknownTag {
        context: TagContext,
        tag: u32,
        offset: usize,
    },

    /// Bytes that should be zero were not
    NonZeroPadding {
        offset: usize,
        len: usize,
    },

    /// A second file of an already loaded catalog kind is merged in
    CatalogOverride {
        kind: FileKind,
    },

    /// An existing id was replaced by a later record
    RecordReplaced {
        kind: FileKind,
        id: u32,
    },

    /// A chunk type the decoder has no reader for
    NoReader {
        type_id: u32,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeaderMismatch { type_id, expected, actual } => write!(
                f,
                "incorrect parsing of file header (type {type_id}): ended at {actual}, header says {expected}"
            ),
            Self::Drift { start, expected, actual } => write!(
                f,
                "record size differs from expected (record at {start}): file offset is {actual} and should be {expected}"
            ),
            Self::UnknownTag { context, tag, offset } => {
                write!(f, "unsupported {context:?} type {tag} at offset {offset}")
            }
            Self::NonZeroPadding { offset, len } => {
                write!(f, "{len} padding bytes at offset {offset} are not zero")
            }
            Self::CatalogOverride { kind } => write!(f, "overrides {kind:?}"),
            Self::RecordReplaced { kind, id } => write!(f, "{kind:?} id {id} replaced"),
            Self::NoReader { type_id } => write!(f, "file type {type_id} has no reader"),
        }
    }
}

/// Receiver of the diagnostics of one load operation
pub trait DiagnosticSink {
    fn on_event(&mut self, event: Diagnostic);
}

/// Sink that keeps every event
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<Diagnostic>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events matching `pred`
    pub fn count(&self, pred: impl Fn(&Diagnostic) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl DiagnosticSink for EventCollector {
    fn on_event(&mut self, event: Diagnostic) {
        self.events.push(event);
    }
}

/// Sink that drops events; they still reach the `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn on_event(&mut self, _event: Diagnostic) {}
}

/// Logs `event` and hands it to `sink`
pub(crate) fn report(sink: &mut dyn DiagnosticSink, event: Diagnostic) {
    match &event {
        Diagnostic::CatalogOverride { .. } | Diagnostic::RecordReplaced { .. } => {
            tracing::info!("{event}")
        }
        _ => tracing::warn!("{event}"),
    }
    sink.on_event(event);
}
