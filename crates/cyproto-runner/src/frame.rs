//! Frame encoding/decoding utilities.
//!
//! TCP delivers a byte stream, so each protocol message is prefixed with a
//! 2-byte length (little-endian) followed by the message bytes.
//!
//! ```text
//! +--------+--------+-------------------+
//! | len_lo | len_hi | data[0..len]      |
//! +--------+--------+-------------------+
//! ```

use bytes::{Buf, BufMut, BytesMut};
use cyproto_core::BUFFER_SIZE;

use crate::error::{RunnerError, RunnerResult};

/// Size of the length prefix.
pub const FRAME_HEADER_SIZE: usize = 2;

/// Largest frame the codec will accept (header plus one full message).
pub const MAX_FRAMED_SIZE: usize = FRAME_HEADER_SIZE + BUFFER_SIZE;

/// A codec for reading and writing length-prefixed messages.
#[derive(Debug, Default)]
pub struct FrameCodec {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
}

impl FrameCodec {
    /// Create a new frame codec.
    pub fn new() -> Self {
        FrameCodec {
            buffer: BytesMut::with_capacity(MAX_FRAMED_SIZE * 2),
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to decode a complete frame from the buffer.
    ///
    /// Returns `Ok(Some(data))` if a complete frame is available, `Ok(None)`
    /// if more data is needed. A length prefix above [`BUFFER_SIZE`] is an
    /// error; the stream cannot be resynchronized after it.
    pub fn decode(&mut self) -> RunnerResult<Option<Vec<u8>>> {
        if self.buffer.len() < FRAME_HEADER_SIZE {
            return Ok(None);
        }

        let len = u16::from_le_bytes([self.buffer[0], self.buffer[1]]) as usize;
        if len > BUFFER_SIZE {
            return Err(RunnerError::FrameTooLong {
                max: BUFFER_SIZE,
                actual: len,
            });
        }

        if self.buffer.len() < FRAME_HEADER_SIZE + len {
            return Ok(None);
        }

        self.buffer.advance(FRAME_HEADER_SIZE);
        let frame = self.buffer.split_to(len).to_vec();
        Ok(Some(frame))
    }

    /// Encode a message with its length prefix.
    pub fn encode(data: &[u8]) -> RunnerResult<Vec<u8>> {
        if data.len() > BUFFER_SIZE {
            return Err(RunnerError::FrameTooLong {
                max: BUFFER_SIZE,
                actual: data.len(),
            });
        }

        let mut buf = Vec::with_capacity(FRAME_HEADER_SIZE + data.len());
        buf.put_u16_le(data.len() as u16);
        buf.extend_from_slice(data);
        Ok(buf)
    }

    /// Get the number of buffered bytes.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_codec_encode_decode() {
        let mut codec = FrameCodec::new();

        let data = [0x01, 0x00, 0x00, 0x48, 0x42, 0xC8, 0x00];
        let encoded = FrameCodec::encode(&data).unwrap();

        assert_eq!(encoded.len(), FRAME_HEADER_SIZE + data.len());
        assert_eq!(encoded[0], data.len() as u8);
        assert_eq!(encoded[1], 0);

        codec.push(&encoded);
        let decoded = codec.decode().unwrap().expect("should decode frame");
        assert_eq!(decoded, data);
        assert_eq!(codec.buffered_len(), 0);
    }

    #[test]
    fn test_frame_codec_partial() {
        let mut codec = FrameCodec::new();
        let encoded = FrameCodec::encode(b"scan data").unwrap();

        codec.push(&encoded[..1]);
        assert!(codec.decode().unwrap().is_none());
        codec.push(&encoded[1..4]);
        assert!(codec.decode().unwrap().is_none());

        codec.push(&encoded[4..]);
        let decoded = codec.decode().unwrap().expect("should decode frame");
        assert_eq!(decoded, b"scan data");
    }

    #[test]
    fn test_frame_codec_multiple() {
        let mut codec = FrameCodec::new();

        codec.push(&FrameCodec::encode(b"First").unwrap());
        codec.push(&FrameCodec::encode(b"Second").unwrap());

        assert_eq!(codec.decode().unwrap().as_deref(), Some(&b"First"[..]));
        assert_eq!(codec.decode().unwrap().as_deref(), Some(&b"Second"[..]));
        assert!(codec.decode().unwrap().is_none());
    }

    #[test]
    fn test_frame_codec_empty_frame() {
        let mut codec = FrameCodec::new();
        codec.push(&FrameCodec::encode(&[]).unwrap());
        assert_eq!(codec.decode().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_frame_codec_rejects_oversized() {
        assert!(matches!(
            FrameCodec::encode(&[0u8; BUFFER_SIZE + 1]),
            Err(RunnerError::FrameTooLong { .. })
        ));

        let mut codec = FrameCodec::new();
        codec.push(&[0xFF, 0xFF]);
        assert!(matches!(
            codec.decode(),
            Err(RunnerError::FrameTooLong { max: BUFFER_SIZE, actual: 0xFFFF })
        ));
    }
}
