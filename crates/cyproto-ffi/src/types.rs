//! `#[repr(C)]` mirrors of the protocol types.

use cyproto_core as proto;
use proto::{CodecError, ErrorCode};

/// Error codes reported across the C boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyprotoError {
    #[default]
    None = 0,
    BufferOverflow = 1,
    DecodeFailure = 2,
}

impl From<ErrorCode> for CyprotoError {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::None => CyprotoError::None,
            ErrorCode::BufferOverflow => CyprotoError::BufferOverflow,
            ErrorCode::DecodeFailure => CyprotoError::DecodeFailure,
        }
    }
}

impl From<CyprotoError> for ErrorCode {
    fn from(err: CyprotoError) -> Self {
        match err {
            CyprotoError::None => ErrorCode::None,
            CyprotoError::BufferOverflow => ErrorCode::BufferOverflow,
            CyprotoError::DecodeFailure => ErrorCode::DecodeFailure,
        }
    }
}

impl From<CodecError> for CyprotoError {
    fn from(err: CodecError) -> Self {
        err.code().into()
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveCommand {
    pub distance: f32,
    pub speed: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TurnCommand {
    pub angle: f32,
    pub speed: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanCommand {
    pub start_angle: u8,
    pub end_angle: u8,
    /// Degrees the servo turns between samples.
    pub fidelity: u8,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveDone {
    pub total_distance: f32,
    pub bump_detected: bool,
    pub cliff_detected: bool,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TurnDone {
    pub total_angle: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObjectData {
    pub distance: f32,
    pub angle: u8,
    pub width: f32,
}

/// A scan result owned by the caller: `size` objects starting at `objects`.
///
/// `size` must not exceed `cyproto_max_objects()`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ScanDone {
    pub size: usize,
    pub objects: *const ObjectData,
}

/// A decoded command, or the reason none could be decoded.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandRequest {
    Error(CyprotoError),
    Drive(DriveCommand),
    Turn(TurnCommand),
    Scan(ScanCommand),
}

impl From<proto::Command> for CommandRequest {
    fn from(command: proto::Command) -> Self {
        match command {
            proto::Command::Error { code } => CommandRequest::Error(code.into()),
            proto::Command::Drive(cmd) => CommandRequest::Drive(DriveCommand {
                distance: cmd.distance,
                speed: cmd.speed,
            }),
            proto::Command::Turn(cmd) => CommandRequest::Turn(TurnCommand {
                angle: cmd.angle,
                speed: cmd.speed,
            }),
            proto::Command::Scan(cmd) => CommandRequest::Scan(cmd.into()),
        }
    }
}

impl From<CommandRequest> for proto::Command {
    fn from(request: CommandRequest) -> Self {
        match request {
            CommandRequest::Error(err) => proto::Command::Error { code: err.into() },
            CommandRequest::Drive(DriveCommand { distance, speed }) => {
                proto::Command::Drive(proto::DriveCommand { distance, speed })
            }
            CommandRequest::Turn(TurnCommand { angle, speed }) => {
                proto::Command::Turn(proto::TurnCommand { angle, speed })
            }
            CommandRequest::Scan(cmd) => proto::Command::Scan(cmd.into()),
        }
    }
}

impl From<proto::ScanCommand> for ScanCommand {
    fn from(cmd: proto::ScanCommand) -> Self {
        ScanCommand {
            start_angle: cmd.start_angle,
            end_angle: cmd.end_angle,
            fidelity: cmd.fidelity,
        }
    }
}

impl From<ScanCommand> for proto::ScanCommand {
    fn from(cmd: ScanCommand) -> Self {
        proto::ScanCommand {
            start_angle: cmd.start_angle,
            end_angle: cmd.end_angle,
            fidelity: cmd.fidelity,
        }
    }
}

impl From<DriveDone> for proto::DriveResult {
    fn from(done: DriveDone) -> Self {
        proto::DriveResult {
            total_distance: done.total_distance,
            bump_detected: done.bump_detected,
            cliff_detected: done.cliff_detected,
        }
    }
}

impl From<TurnDone> for proto::TurnResult {
    fn from(done: TurnDone) -> Self {
        proto::TurnResult {
            total_angle: done.total_angle,
        }
    }
}

impl From<ObjectData> for proto::ObjectData {
    fn from(object: ObjectData) -> Self {
        proto::ObjectData {
            distance: object.distance,
            angle: object.angle,
            width: object.width,
        }
    }
}
