//! Responses sent from the executor back to the host.

use crate::codec::{Encode, Reader, Writer};
use crate::constants::*;
use crate::error::{CodecError, CodecResult, DecodeFault, ErrorCode};
use crate::types::{scan_done_size, DriveResult, ObjectData, ScanResult, TurnResult};

/// A completion report from the executor.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The executor could not act on the last command.
    Error {
        /// What went wrong.
        code: ErrorCode,
    },
    /// Drive finished.
    DriveDone(DriveResult),
    /// Turn finished.
    TurnDone(TurnResult),
    /// Scan finished.
    ScanDone(ScanResult),
}

impl Response {
    /// Get the tag byte for this response.
    pub fn tag(&self) -> u8 {
        match self {
            Response::Error { .. } => RESP_TAG_ERROR,
            Response::DriveDone(_) => RESP_TAG_DRIVE_DONE,
            Response::TurnDone(_) => RESP_TAG_TURN_DONE,
            Response::ScanDone(_) => RESP_TAG_SCAN_DONE,
        }
    }

    /// Decode a response from a complete message.
    pub fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let mut reader = Reader::new(bytes)?;

        let response = match reader.u8()? {
            RESP_TAG_ERROR => {
                let byte = reader.u8()?;
                let code = ErrorCode::from_byte(byte).ok_or(DecodeFault::UnknownErrorCode(byte))?;
                Response::Error { code }
            }

            RESP_TAG_DRIVE_DONE => Response::DriveDone(DriveResult {
                total_distance: reader.f32_le()?,
                bump_detected: reader.bool()?,
                cliff_detected: reader.bool()?,
            }),

            RESP_TAG_TURN_DONE => Response::TurnDone(TurnResult {
                total_angle: reader.f32_le()?,
            }),

            RESP_TAG_SCAN_DONE => Response::ScanDone(read_scan_result(&mut reader)?),

            tag => return Err(CodecError::from(DecodeFault::UnknownTag(tag))),
        };

        reader.finish()?;
        Ok(response)
    }
}

impl Encode for Response {
    fn encoded_len(&self) -> usize {
        match self {
            Response::Error { .. } => ERROR_MESSAGE_SIZE,
            Response::DriveDone(result) => result.encoded_len(),
            Response::TurnDone(result) => result.encoded_len(),
            Response::ScanDone(result) => result.encoded_len(),
        }
    }

    fn write_to(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        match self {
            Response::Error { code } => {
                writer.put_u8(RESP_TAG_ERROR)?;
                writer.put_u8((*code).into())
            }
            Response::DriveDone(result) => result.write_to(writer),
            Response::TurnDone(result) => result.write_to(writer),
            Response::ScanDone(result) => result.write_to(writer),
        }
    }
}

impl Encode for DriveResult {
    fn encoded_len(&self) -> usize {
        DRIVE_DONE_SIZE
    }

    fn write_to(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        writer.put_u8(RESP_TAG_DRIVE_DONE)?;
        writer.put_f32_le(self.total_distance)?;
        writer.put_bool(self.bump_detected)?;
        writer.put_bool(self.cliff_detected)
    }
}

impl Encode for TurnResult {
    fn encoded_len(&self) -> usize {
        TURN_DONE_SIZE
    }

    fn write_to(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        writer.put_u8(RESP_TAG_TURN_DONE)?;
        writer.put_f32_le(self.total_angle)
    }
}

impl Encode for ScanResult {
    fn encoded_len(&self) -> usize {
        scan_done_size(self.len())
    }

    fn write_to(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        write_scan_done(writer, self.objects())
    }
}

impl From<DriveResult> for Response {
    fn from(result: DriveResult) -> Self {
        Response::DriveDone(result)
    }
}

impl From<TurnResult> for Response {
    fn from(result: TurnResult) -> Self {
        Response::TurnDone(result)
    }
}

impl From<ScanResult> for Response {
    fn from(result: ScanResult) -> Self {
        Response::ScanDone(result)
    }
}

/// Encode a scan result straight from a slice of objects.
///
/// Fails with [`CodecError::BufferOverflow`] if `objects` holds more than
/// [`MAX_OBJECTS`] entries or the encoded form does not fit `buf`.
pub fn encode_scan_done(objects: &[ObjectData], buf: &mut [u8]) -> CodecResult<usize> {
    let needed = scan_done_size(objects.len());
    if objects.len() > MAX_OBJECTS {
        return Err(CodecError::BufferOverflow {
            needed,
            capacity: BUFFER_SIZE,
        });
    }

    let capacity = buf.len();
    let dest = buf
        .get_mut(..needed)
        .ok_or(CodecError::BufferOverflow { needed, capacity })?;
    let mut writer = Writer::new(dest);
    write_scan_done(&mut writer, objects)?;
    Ok(writer.position())
}

fn write_scan_done(writer: &mut Writer<'_>, objects: &[ObjectData]) -> CodecResult<()> {
    let count = u8::try_from(objects.len())
        .ok()
        .filter(|&count| usize::from(count) <= MAX_OBJECTS)
        .ok_or(CodecError::BufferOverflow {
            needed: scan_done_size(objects.len()),
            capacity: BUFFER_SIZE,
        })?;

    writer.put_u8(RESP_TAG_SCAN_DONE)?;
    writer.put_u8(count)?;
    for object in objects {
        writer.put_f32_le(object.distance)?;
        writer.put_u8(object.angle)?;
        writer.put_f32_le(object.width)?;
    }
    Ok(())
}

fn read_scan_result(reader: &mut Reader<'_>) -> CodecResult<ScanResult> {
    let count = usize::from(reader.u8()?);
    if count > MAX_OBJECTS {
        return Err(DecodeFault::TooManyObjects {
            count,
            max: MAX_OBJECTS,
        }
        .into());
    }

    let mut result = ScanResult::new();
    for _ in 0..count {
        result.push(ObjectData {
            distance: reader.f32_le()?,
            angle: reader.u8()?,
            width: reader.f32_le()?,
        })?;
    }
    Ok(result)
}
