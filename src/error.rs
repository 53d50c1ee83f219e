use std::io;

use nom::error::{ErrorKind, ParseError};
use thiserror::Error;

/// Failures of the zip container itself.
///
/// Returned while opening an archive these are fatal: nothing can be
/// enumerated. Returned while reading one entry they only cost that entry.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("corrupt archive: {0}")]
    CorruptArchive(String),
    #[error("entry not found: {0}")]
    EntryNotFound(String),
    #[error("unsupported compression in {name}: {reason}")]
    UnsupportedCompression { name: String, reason: String },
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Why one compiled unit could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("bad magic number {found:#010x}")]
    BadMagic { found: u32 },
    #[error("unsupported class file version {major}.{minor}")]
    UnsupportedVersion { major: u16, minor: u16 },
    #[error("class file data ends before a declared structure is complete")]
    TruncatedData,
    #[error("constant pool index {index} is not a valid {expected} entry")]
    BadConstantPoolReference { index: u16, expected: &'static str },
    #[error("unknown constant pool tag {tag} at index {index}")]
    UnknownConstantTag { tag: u8, index: u16 },
    #[error("constant pool entry {index} is not valid modified UTF-8")]
    MalformedUtf8 { index: u16 },
    #[error("malformed descriptor {0:?}")]
    MalformedDescriptor(String),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

// Only length-driven parsers run over class file bytes, so any nom-level
// failure means the buffer ran out.
impl<I> ParseError<I> for DecodeError {
    fn from_error_kind(_input: I, _kind: ErrorKind) -> Self {
        DecodeError::TruncatedData
    }

    fn append(_input: I, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl From<nom::Err<DecodeError>> for DecodeError {
    fn from(err: nom::Err<DecodeError>) -> Self {
        match err {
            nom::Err::Incomplete(_) => DecodeError::TruncatedData,
            nom::Err::Error(err) | nom::Err::Failure(err) => err,
        }
    }
}

/// A [`DecodeError`] tagged with the archive entry it came from.
#[derive(Debug, Error)]
#[error("{entry}: {source}")]
pub struct EntryError {
    pub entry: String,
    #[source]
    pub source: DecodeError,
}

/// Problems that do not stop a unit from being decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeWarning {
    #[error("unsupported class file version {major}.{minor}")]
    UnsupportedVersion { major: u16, minor: u16 },
    #[error("declares {declared} but is stored as {entry}")]
    NameMismatch { declared: String, entry: String },
}
