//! Result tag with error kind and byte position, shared by all codecs.

use std::fmt;

use thiserror::Error;

/// One kind per distinct failure; the set is closed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorKind {
    /// Not an error.
    #[default]
    #[error("ok")]
    Ok,

    // JSON parser.
    #[error("unprocessed input remains")]
    JsonUnprocessedInputRemains,
    #[error("stack limit exceeded")]
    JsonStackLimitExceeded,
    #[error("no input")]
    JsonNoInput,
    #[error("invalid token")]
    JsonInvalidToken,
    #[error("invalid number")]
    JsonInvalidNumber,
    #[error("invalid string")]
    JsonInvalidString,
    #[error("unexpected array end")]
    JsonUnexpectedArrayEnd,
    #[error("comma or array end expected")]
    JsonCommaOrArrayEndExpected,
    #[error("string literal expected")]
    JsonStringLiteralExpected,
    #[error("colon expected")]
    JsonColonExpected,
    #[error("unexpected object end")]
    JsonUnexpectedObjectEnd,
    #[error("comma or object end expected")]
    JsonCommaOrObjectEndExpected,
    #[error("value expected")]
    JsonValueExpected,

    // CBOR parser and primitives.
    #[error("no input")]
    CborNoInput,
    #[error("invalid start byte")]
    CborInvalidStartByte,
    #[error("unexpected eof, value expected")]
    CborUnexpectedEofExpectedValue,
    #[error("unexpected eof in array")]
    CborUnexpectedEofInArray,
    #[error("unexpected eof in map")]
    CborUnexpectedEofInMap,
    #[error("invalid map key")]
    CborInvalidMapKey,
    #[error("stack limit exceeded")]
    CborStackLimitExceeded,
    #[error("unsupported value")]
    CborUnsupportedValue,
    #[error("invalid utf-16 string")]
    CborInvalidString16,
    #[error("invalid double")]
    CborInvalidDouble,
    #[error("invalid signed integer")]
    CborInvalidSigned,
}

/// A parse outcome with the position at which an error was detected.
///
/// The default status is OK. `pos` is a 0-based byte offset into the
/// original input, or [`Status::NPOS`] when unknown; for 16-bit JSON
/// input it is twice the code-unit index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub error: ErrorKind,
    pub pos: i64,
}

impl Status {
    pub const NPOS: i64 = -1;

    pub fn at(error: ErrorKind, pos: i64) -> Self {
        Self { error, pos }
    }

    pub fn ok(&self) -> bool {
        self.error == ErrorKind::Ok
    }
}

impl Default for Status {
    fn default() -> Self {
        Self {
            error: ErrorKind::Ok,
            pos: Status::NPOS,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pos == Status::NPOS {
            write!(f, "{}", self.error)
        } else {
            write!(f, "{} at byte {}", self.error, self.pos)
        }
    }
}
