use std::path::PathBuf;

use crate::codec::FileKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unexpected end of data at offset {offset} (need {need} bytes)")]
    UnexpectedEof { offset: usize, need: usize },

    #[error("seek to {target} outside of {len} byte buffer")]
    SeekOutOfBounds { target: usize, len: usize },

    #[error("{kind:?} chunk is corrupted: {reason}")]
    Corrupted { kind: FileKind, reason: String },

    #[error("checksum mismatch in {kind:?} chunk: expected {expected}/{expected_two}, got {actual}/{actual_two}")]
    ChecksumMismatch {
        kind: FileKind,
        expected: u32,
        expected_two: u32,
        actual: u32,
        actual_two: u32,
    },

    #[error("failed to parse file: consumed {consumed} of {len} bytes")]
    LengthMismatch { consumed: usize, len: usize },

    #[error("level has no {0:?} file in its path table")]
    MissingFile(FileKind),

    #[error("level file has no level info chunk")]
    MissingLevelInfo,

    #[error("failed to read the file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wraps this error with the file it happened in.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Error::File {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping file context wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::File { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
