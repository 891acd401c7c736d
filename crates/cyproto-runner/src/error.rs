//! Runner error types.

use std::io;

use cyproto_core::{CodecError, ErrorCode, SendError};
use thiserror::Error;

/// Errors that can occur in the runner.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// I/O error on a socket or file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The peer closed the connection.
    #[error("connection closed by peer")]
    ConnectionClosed,

    /// Frame length exceeds what a single message may hold.
    #[error("frame too long: maximum {max} bytes, got {actual}")]
    FrameTooLong {
        /// Maximum allowed length.
        max: usize,
        /// Length announced by the frame.
        actual: usize,
    },

    /// Protocol encode/decode error.
    #[error("protocol error: {0}")]
    Codec(#[from] CodecError),

    /// The executor answered with an error code.
    #[error("executor rejected command: {0}")]
    Rejected(ErrorCode),

    /// The executor answered with a response that does not match the command.
    #[error("unexpected response: sent tag 0x{sent:02X}, received tag 0x{received:02X}")]
    UnexpectedResponse {
        /// Tag of the command sent.
        sent: u8,
        /// Tag of the response received.
        received: u8,
    },

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Configuration value out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<SendError<RunnerError>> for RunnerError {
    fn from(err: SendError<RunnerError>) -> Self {
        match err {
            SendError::Codec(err) => RunnerError::Codec(err),
            SendError::Channel(err) => err,
        }
    }
}

/// Result type alias for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;
