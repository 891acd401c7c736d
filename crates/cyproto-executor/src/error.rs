//! Executor error types.

use core::fmt::Debug;

use cyproto_core::{CodecError, SendError};
use thiserror::Error;

/// Errors that stop the dispatch loop.
///
/// Malformed commands are not errors here; they are answered on the wire.
#[derive(Error, Debug)]
pub enum ExecutorError<E: Debug> {
    /// The channel failed while reading or writing.
    #[error("channel error: {0:?}")]
    Channel(E),

    /// A response could not be encoded.
    #[error("failed to encode response: {0}")]
    Codec(#[from] CodecError),
}

impl<E: Debug> From<SendError<E>> for ExecutorError<E> {
    fn from(err: SendError<E>) -> Self {
        match err {
            SendError::Codec(err) => ExecutorError::Codec(err),
            SendError::Channel(err) => ExecutorError::Channel(err),
        }
    }
}

/// Result type alias for executor operations.
pub type ExecutorResult<T, E> = Result<T, ExecutorError<E>>;
