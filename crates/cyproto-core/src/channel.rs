//! The raw byte link between host and executor.
//!
//! A [`Channel`] hands over one complete message per read. How the bytes are
//! delimited on the underlying link is the channel implementation's business;
//! the protocol only sees message-sized slices.

use core::fmt::Debug;

use thiserror::Error;

use crate::codec::Encode;
use crate::commands::Command;
use crate::constants::BUFFER_SIZE;
use crate::error::{CodecError, ErrorCode};

/// A link that moves raw messages.
pub trait Channel {
    /// Link-level failure (disconnect, I/O error).
    type Error: Debug;

    /// Block until one message is available and copy it into `buf`,
    /// returning its length. Implementations never write past `buf.len()`.
    fn read_raw(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Send one message.
    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<C: Channel + ?Sized> Channel for &mut C {
    type Error = C::Error;

    fn read_raw(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read_raw(buf)
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write_raw(bytes)
    }
}

/// Errors from [`send`].
#[derive(Error, Debug)]
pub enum SendError<E: Debug> {
    /// The message could not be encoded.
    #[error("encode failed: {0}")]
    Codec(#[from] CodecError),

    /// The channel refused the bytes.
    #[error("channel write failed: {0:?}")]
    Channel(E),
}

/// Read one message from the channel and decode it as a command.
///
/// Decoding is total, so a garbled message comes back as
/// [`Command::Error`]. Only a failure of the channel itself is an `Err`.
pub fn read_command<C: Channel + ?Sized>(channel: &mut C) -> Result<Command, C::Error> {
    let mut buf = [0u8; BUFFER_SIZE];
    let len = channel.read_raw(&mut buf)?;
    let command = match buf.get(..len) {
        Some(bytes) => Command::decode(bytes),
        None => Command::Error {
            code: ErrorCode::DecodeFailure,
        },
    };
    Ok(command)
}

/// Encode a message into a stack buffer and write it to the channel.
///
/// Returns the number of bytes sent.
pub fn send<C, M>(channel: &mut C, message: &M) -> Result<usize, SendError<C::Error>>
where
    C: Channel + ?Sized,
    M: Encode + ?Sized,
{
    let mut buf = [0u8; BUFFER_SIZE];
    let len = message.encode(&mut buf)?;
    channel
        .write_raw(&buf[..len])
        .map_err(SendError::Channel)?;
    Ok(len)
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::types::{ScanCommand, TurnCommand};
    use std::collections::VecDeque;

    /// In-memory channel that replays queued messages and records writes.
    #[derive(Default)]
    struct QueueChannel {
        incoming: VecDeque<Vec<u8>>,
        written: Vec<Vec<u8>>,
    }

    #[derive(Debug, PartialEq)]
    struct Closed;

    impl Channel for QueueChannel {
        type Error = Closed;

        fn read_raw(&mut self, buf: &mut [u8]) -> Result<usize, Closed> {
            let message = self.incoming.pop_front().ok_or(Closed)?;
            let len = message.len().min(buf.len());
            buf[..len].copy_from_slice(&message[..len]);
            Ok(len)
        }

        fn write_raw(&mut self, bytes: &[u8]) -> Result<(), Closed> {
            self.written.push(bytes.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_read_command_decodes_each_message() {
        let turn = Command::Turn(TurnCommand { angle: 45.0, speed: 100 });
        let scan = Command::Scan(ScanCommand { start_angle: 0, end_angle: 90, fidelity: 15 });

        let mut channel = QueueChannel::default();
        let mut buf = [0u8; BUFFER_SIZE];
        for cmd in [turn, scan] {
            let len = cmd.encode(&mut buf).unwrap();
            channel.incoming.push_back(buf[..len].to_vec());
        }
        channel.incoming.push_back(vec![0xFF, 0x00]);

        assert_eq!(read_command(&mut channel), Ok(turn));
        assert_eq!(read_command(&mut channel), Ok(scan));
        assert_eq!(
            read_command(&mut channel),
            Ok(Command::Error { code: ErrorCode::DecodeFailure })
        );
        assert_eq!(read_command(&mut channel), Err(Closed));
    }

    #[test]
    fn test_send_writes_encoded_bytes() {
        let mut channel = QueueChannel::default();
        let cmd = Command::Scan(ScanCommand { start_angle: 1, end_angle: 2, fidelity: 3 });
        let len = send(&mut channel, &cmd).unwrap();
        assert_eq!(len, 4);
        assert_eq!(channel.written, vec![vec![0x03, 1, 2, 3]]);
    }
}
