//! Commands sent from the host to the executor.

use crate::codec::{Encode, Reader, Writer};
use crate::constants::*;
use crate::error::{CodecError, CodecResult, DecodeFault, ErrorCode};
use crate::types::{DriveCommand, ScanCommand, TurnCommand};

/// A request from the host to the executor.
///
/// Decoding never fails outright: a malformed message becomes
/// [`Command::Error`], so a dispatch loop always receives one well-typed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// The message could not be decoded.
    Error {
        /// Why the command is unusable.
        code: ErrorCode,
    },
    /// Drive forwards or backwards.
    Drive(DriveCommand),
    /// Turn in place.
    Turn(TurnCommand),
    /// Scan for objects.
    Scan(ScanCommand),
}

impl Command {
    /// Get the tag byte for this command.
    pub fn tag(&self) -> u8 {
        match self {
            Command::Error { .. } => TAG_ERROR,
            Command::Drive(_) => TAG_DRIVE,
            Command::Turn(_) => TAG_TURN,
            Command::Scan(_) => TAG_SCAN,
        }
    }

    /// Whether this is the error pseudo-command.
    pub fn is_error(&self) -> bool {
        matches!(self, Command::Error { .. })
    }

    /// Decode a command from a complete message.
    ///
    /// Any failure is reported as `Command::Error { code: DecodeFailure }`;
    /// no field of a partially parsed message is exposed.
    pub fn decode(bytes: &[u8]) -> Self {
        match Self::try_decode(bytes) {
            Ok(command) => command,
            Err(err) => {
                log::debug!("rejecting {} byte command: {}", bytes.len(), err);
                Command::Error { code: err.code() }
            }
        }
    }

    /// Decode a command, keeping the reason for any failure.
    pub fn try_decode(bytes: &[u8]) -> CodecResult<Self> {
        let mut reader = Reader::new(bytes)?;

        let command = match reader.u8()? {
            TAG_ERROR => {
                let byte = reader.u8()?;
                let code = ErrorCode::from_byte(byte).ok_or(DecodeFault::UnknownErrorCode(byte))?;
                Command::Error { code }
            }

            TAG_DRIVE => Command::Drive(DriveCommand {
                distance: reader.f32_le()?,
                speed: reader.u16_le()?,
            }),

            TAG_TURN => Command::Turn(TurnCommand {
                angle: reader.f32_le()?,
                speed: reader.u16_le()?,
            }),

            TAG_SCAN => Command::Scan(ScanCommand {
                start_angle: reader.u8()?,
                end_angle: reader.u8()?,
                fidelity: reader.u8()?,
            }),

            tag => return Err(CodecError::from(DecodeFault::UnknownTag(tag))),
        };

        reader.finish()?;
        Ok(command)
    }
}

impl Encode for Command {
    fn encoded_len(&self) -> usize {
        match self {
            Command::Error { .. } => ERROR_MESSAGE_SIZE,
            Command::Drive(_) => DRIVE_COMMAND_SIZE,
            Command::Turn(_) => TURN_COMMAND_SIZE,
            Command::Scan(_) => SCAN_COMMAND_SIZE,
        }
    }

    fn write_to(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        writer.put_u8(self.tag())?;

        match self {
            Command::Error { code } => {
                writer.put_u8((*code).into())?;
            }

            Command::Drive(DriveCommand { distance, speed }) => {
                writer.put_f32_le(*distance)?;
                writer.put_u16_le(*speed)?;
            }

            Command::Turn(TurnCommand { angle, speed }) => {
                writer.put_f32_le(*angle)?;
                writer.put_u16_le(*speed)?;
            }

            Command::Scan(ScanCommand {
                start_angle,
                end_angle,
                fidelity,
            }) => {
                writer.put_u8(*start_angle)?;
                writer.put_u8(*end_angle)?;
                writer.put_u8(*fidelity)?;
            }
        }

        Ok(())
    }
}

impl From<DriveCommand> for Command {
    fn from(cmd: DriveCommand) -> Self {
        Command::Drive(cmd)
    }
}

impl From<TurnCommand> for Command {
    fn from(cmd: TurnCommand) -> Self {
        Command::Turn(cmd)
    }
}

impl From<ScanCommand> for Command {
    fn from(cmd: ScanCommand) -> Self {
        Command::Scan(cmd)
    }
}
