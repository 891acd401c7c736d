//! Encoding and decoding primitives.
//!
//! ## Encoding discipline
//!
//! | Field kind | Encoding                                   |
//! |------------|--------------------------------------------|
//! | `u8`       | 1 byte                                     |
//! | `u16`      | 2 bytes, little-endian                     |
//! | `f32`      | 4 bytes, IEEE-754 binary32, little-endian  |
//! | `bool`     | 1 byte, `0` or `1`                         |
//! | sequence   | `u8` count, then that many fixed records   |
//!
//! Messages are written with a bounds-checked [`Writer`] over the caller's
//! buffer and read with a bounds-checked [`Reader`] over a borrowed slice.

use crate::commands::Command;
use crate::constants::BUFFER_SIZE;
use crate::error::{CodecError, CodecResult, DecodeFault};

/// A message that can be serialized into a caller-provided buffer.
pub trait Encode {
    /// Exact number of bytes [`Encode::encode`] writes.
    fn encoded_len(&self) -> usize;

    /// Write the message fields. Only called once the writer is known to hold
    /// `encoded_len()` bytes.
    fn write_to(&self, writer: &mut Writer<'_>) -> CodecResult<()>;

    /// Encode into `buf`, returning the number of bytes written.
    ///
    /// Fails with [`CodecError::BufferOverflow`] before touching `buf` if the
    /// message does not fit.
    fn encode(&self, buf: &mut [u8]) -> CodecResult<usize> {
        let needed = self.encoded_len();
        let Some(dest) = buf.get_mut(..needed) else {
            return Err(CodecError::BufferOverflow {
                needed,
                capacity: buf.len(),
            });
        };

        let mut writer = Writer::new(dest);
        self.write_to(&mut writer)?;
        Ok(writer.position())
    }
}

/// Encode any message into `buf`, returning the number of bytes written.
pub fn encode<M: Encode + ?Sized>(message: &M, buf: &mut [u8]) -> CodecResult<usize> {
    message.encode(buf)
}

/// Decode a command. Never fails: malformed input becomes
/// [`Command::Error`] with [`ErrorCode::DecodeFailure`](crate::ErrorCode::DecodeFailure).
pub fn decode(bytes: &[u8]) -> Command {
    Command::decode(bytes)
}

/// Decode a command, keeping the reason for any failure.
pub fn try_decode(bytes: &[u8]) -> CodecResult<Command> {
    Command::try_decode(bytes)
}

/// Bounds-checked cursor over an output buffer.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    /// Create a writer at the start of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Writer { buf, pos: 0 }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Append raw bytes.
    pub fn put_slice(&mut self, bytes: &[u8]) -> CodecResult<()> {
        let end = self.pos + bytes.len();
        let capacity = self.buf.len();
        let dest = self
            .buf
            .get_mut(self.pos..end)
            .ok_or(CodecError::BufferOverflow {
                needed: end,
                capacity,
            })?;
        dest.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    pub fn put_u8(&mut self, value: u8) -> CodecResult<()> {
        self.put_slice(&[value])
    }

    pub fn put_u16_le(&mut self, value: u16) -> CodecResult<()> {
        self.put_slice(&value.to_le_bytes())
    }

    pub fn put_f32_le(&mut self, value: f32) -> CodecResult<()> {
        self.put_slice(&value.to_le_bytes())
    }

    pub fn put_bool(&mut self, value: bool) -> CodecResult<()> {
        self.put_u8(u8::from(value))
    }
}

/// Bounds-checked cursor over an input message.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over a complete message.
    ///
    /// Rejects empty input and input longer than [`BUFFER_SIZE`] up front, so
    /// no message is parsed beyond the fixed bound.
    pub fn new(buf: &'a [u8]) -> Result<Self, DecodeFault> {
        if buf.is_empty() {
            return Err(DecodeFault::Empty);
        }
        if buf.len() > BUFFER_SIZE {
            return Err(DecodeFault::Oversized {
                max: BUFFER_SIZE,
                actual: buf.len(),
            });
        }
        Ok(Reader { buf, pos: 0 })
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consume `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeFault> {
        let end = self.pos + len;
        let bytes = self.buf.get(self.pos..end).ok_or(DecodeFault::Truncated {
            expected: end,
            actual: self.buf.len(),
        })?;
        self.pos = end;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], DecodeFault> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn u8(&mut self) -> Result<u8, DecodeFault> {
        let [value] = self.array::<1>()?;
        Ok(value)
    }

    pub fn u16_le(&mut self) -> Result<u16, DecodeFault> {
        Ok(u16::from_le_bytes(self.array()?))
    }

    pub fn f32_le(&mut self) -> Result<f32, DecodeFault> {
        Ok(f32::from_le_bytes(self.array()?))
    }

    pub fn bool(&mut self) -> Result<bool, DecodeFault> {
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeFault::InvalidBool(other)),
        }
    }

    /// Require that the whole message was consumed.
    pub fn finish(self) -> Result<(), DecodeFault> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(DecodeFault::TrailingBytes { extra }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_little_endian() {
        let mut buf = [0u8; 7];
        let mut writer = Writer::new(&mut buf);
        writer.put_u8(0xAB).unwrap();
        writer.put_u16_le(0x1234).unwrap();
        writer.put_f32_le(1.0).unwrap();
        assert_eq!(writer.position(), 7);
        assert_eq!(buf, [0xAB, 0x34, 0x12, 0x00, 0x00, 0x80, 0x3F]);
    }

    #[test]
    fn test_writer_refuses_to_overrun() {
        let mut buf = [0u8; 3];
        let mut writer = Writer::new(&mut buf);
        writer.put_u16_le(7).unwrap();
        let err = writer.put_f32_le(2.5).unwrap_err();
        assert_eq!(err, CodecError::BufferOverflow { needed: 6, capacity: 3 });
        assert_eq!(writer.position(), 2);
        assert_eq!(buf, [7, 0, 0]);
    }

    #[test]
    fn test_reader_fields() {
        let bytes = [0x01, 0x34, 0x12, 0x00, 0x00, 0x80, 0x3F];
        let mut reader = Reader::new(&bytes).unwrap();
        assert_eq!(reader.u8(), Ok(1));
        assert_eq!(reader.u16_le(), Ok(0x1234));
        assert_eq!(reader.f32_le(), Ok(1.0));
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn test_reader_truncated() {
        let bytes = [0x01, 0x02];
        let mut reader = Reader::new(&bytes).unwrap();
        assert_eq!(reader.u8(), Ok(1));
        assert_eq!(
            reader.f32_le(),
            Err(DecodeFault::Truncated { expected: 5, actual: 2 })
        );
    }

    #[test]
    fn test_reader_rejects_bad_bool_and_trailing() {
        let bytes = [2, 9];
        let mut reader = Reader::new(&bytes).unwrap();
        assert_eq!(reader.bool(), Err(DecodeFault::InvalidBool(2)));

        let reader = Reader::new(&bytes).unwrap();
        assert_eq!(reader.finish(), Err(DecodeFault::TrailingBytes { extra: 2 }));
    }

    #[test]
    fn test_reader_bounds_input() {
        assert_eq!(Reader::new(&[]).unwrap_err(), DecodeFault::Empty);
        let big = [0u8; BUFFER_SIZE + 1];
        assert_eq!(
            Reader::new(&big).unwrap_err(),
            DecodeFault::Oversized { max: BUFFER_SIZE, actual: BUFFER_SIZE + 1 }
        );
    }
}
