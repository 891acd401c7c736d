//! Protocol error types.
//!
//! Every fallible codec operation reports a [`CodecError`], which always maps
//! onto exactly one [`ErrorCode`]. Errors are `Copy` and carry no heap data so
//! the error channel itself stays fixed-size.

use core::fmt;

use thiserror::Error;

use crate::constants::*;

/// The fixed error taxonomy carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCode {
    /// No error / not applicable.
    #[default]
    None,
    /// Encoded or decoded form would not fit the fixed buffer.
    BufferOverflow,
    /// Bytes are not a valid encoding of the expected schema.
    DecodeFailure,
}

impl ErrorCode {
    /// Parse an error code byte. Returns `None` for bytes outside the taxonomy.
    pub fn from_byte(code: u8) -> Option<Self> {
        match code {
            ERROR_CODE_NONE => Some(ErrorCode::None),
            ERROR_CODE_BUFFER_OVERFLOW => Some(ErrorCode::BufferOverflow),
            ERROR_CODE_DECODE_FAILURE => Some(ErrorCode::DecodeFailure),
            _ => None,
        }
    }

    /// Whether this code signals a fault.
    pub fn is_error(self) -> bool {
        self != ErrorCode::None
    }
}

impl From<ErrorCode> for u8 {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::None => ERROR_CODE_NONE,
            ErrorCode::BufferOverflow => ERROR_CODE_BUFFER_OVERFLOW,
            ErrorCode::DecodeFailure => ERROR_CODE_DECODE_FAILURE,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::None => write!(f, "none"),
            ErrorCode::BufferOverflow => write!(f, "buffer overflow"),
            ErrorCode::DecodeFailure => write!(f, "decode failure"),
        }
    }
}

/// Why a byte sequence failed to decode.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeFault {
    /// No bytes at all.
    #[error("empty message")]
    Empty,

    /// Input is longer than any message may be.
    #[error("message of {actual} bytes exceeds buffer size {max}")]
    Oversized {
        /// Maximum allowed length.
        max: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Tag byte does not name a known message.
    #[error("unknown tag: 0x{0:02X}")]
    UnknownTag(u8),

    /// Message ended before all fields were read.
    #[error("message too short: expected at least {expected} bytes, got {actual}")]
    Truncated {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Bytes left over after the message its tag describes.
    #[error("{extra} trailing bytes after message")]
    TrailingBytes {
        /// Number of unread bytes.
        extra: usize,
    },

    /// Boolean field holds something other than 0 or 1.
    #[error("invalid boolean byte: 0x{0:02X}")]
    InvalidBool(u8),

    /// Object count above [`MAX_OBJECTS`].
    #[error("object count {count} exceeds maximum {max}")]
    TooManyObjects {
        /// Count found in the length prefix.
        count: usize,
        /// Maximum allowed count.
        max: usize,
    },

    /// Error code byte outside the taxonomy.
    #[error("unknown error code: {0}")]
    UnknownErrorCode(u8),
}

/// Errors that can occur when encoding or decoding protocol messages.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Output would not fit the buffer.
    #[error("buffer overflow: need {needed} bytes, buffer holds {capacity}")]
    BufferOverflow {
        /// Bytes the encoded form needs.
        needed: usize,
        /// Bytes available.
        capacity: usize,
    },

    /// Input is not a valid encoding.
    #[error("decode failure: {0}")]
    DecodeFailure(#[from] DecodeFault),
}

impl CodecError {
    /// The wire error code this error maps onto.
    pub fn code(&self) -> ErrorCode {
        match self {
            CodecError::BufferOverflow { .. } => ErrorCode::BufferOverflow,
            CodecError::DecodeFailure(_) => ErrorCode::DecodeFailure,
        }
    }
}

impl From<CodecError> for ErrorCode {
    fn from(err: CodecError) -> Self {
        err.code()
    }
}

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
