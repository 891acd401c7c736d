//! Host (controller) side of the protocol.

use std::net::ToSocketAddrs;
use std::time::Duration;

use cyproto_core::{
    send, Channel, Command, DriveCommand, DriveResult, Response, ScanCommand, ScanResult,
    TurnCommand, TurnResult, BUFFER_SIZE, TAG_DRIVE, TAG_SCAN, TAG_TURN,
};
use tracing::{debug, trace};

use crate::error::{RunnerError, RunnerResult};
use crate::tcp::TcpChannel;

/// A synchronous request/response session with an executor.
///
/// One command is in flight at a time: [`HostSession::request`] sends a
/// command and blocks until its response arrives.
#[derive(Debug)]
pub struct HostSession {
    channel: TcpChannel,
}

impl HostSession {
    /// Create a session over an established channel.
    pub fn new(channel: TcpChannel) -> Self {
        HostSession { channel }
    }

    /// Connect to an executor listening at `addr`.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> RunnerResult<Self> {
        let channel = TcpChannel::connect(addr)?;
        debug!("connected to executor at {}", channel.peer_addr()?);
        Ok(HostSession::new(channel))
    }

    /// Limit how long to wait for a response. `None` waits forever.
    pub fn set_response_timeout(&self, timeout: Option<Duration>) -> RunnerResult<()> {
        self.channel.set_read_timeout(timeout)
    }

    /// Send a command and wait for its response.
    ///
    /// An error response is returned as `Ok(Response::Error { .. })`; a
    /// response of the wrong kind is [`RunnerError::UnexpectedResponse`].
    pub fn request(&mut self, command: &Command) -> RunnerResult<Response> {
        let len = send(&mut self.channel, command)?;
        trace!("sent {:?} ({} bytes)", command, len);

        let mut buf = [0u8; BUFFER_SIZE];
        let len = self.channel.read_raw(&mut buf)?;
        let response = Response::decode(&buf[..len])?;
        trace!("received {:?}", response);

        if !answers(command, &response) {
            return Err(RunnerError::UnexpectedResponse {
                sent: command.tag(),
                received: response.tag(),
            });
        }
        Ok(response)
    }

    /// Drive and wait for the result.
    pub fn drive(&mut self, cmd: DriveCommand) -> RunnerResult<DriveResult> {
        match self.request(&cmd.into())? {
            Response::DriveDone(result) => Ok(result),
            response => Err(rejection(TAG_DRIVE, &response)),
        }
    }

    /// Turn and wait for the result.
    pub fn turn(&mut self, cmd: TurnCommand) -> RunnerResult<TurnResult> {
        match self.request(&cmd.into())? {
            Response::TurnDone(result) => Ok(result),
            response => Err(rejection(TAG_TURN, &response)),
        }
    }

    /// Scan and wait for the result.
    pub fn scan(&mut self, cmd: ScanCommand) -> RunnerResult<ScanResult> {
        match self.request(&cmd.into())? {
            Response::ScanDone(result) => Ok(result),
            response => Err(rejection(TAG_SCAN, &response)),
        }
    }

    /// Access the underlying channel (e.g. to send raw bytes).
    pub fn channel_mut(&mut self) -> &mut TcpChannel {
        &mut self.channel
    }
}

/// Whether `response` is a legal answer to `command`.
fn answers(command: &Command, response: &Response) -> bool {
    matches!(
        (command, response),
        (_, Response::Error { .. })
            | (Command::Drive(_), Response::DriveDone(_))
            | (Command::Turn(_), Response::TurnDone(_))
            | (Command::Scan(_), Response::ScanDone(_))
    )
}

fn rejection(sent: u8, response: &Response) -> RunnerError {
    match response {
        Response::Error { code } => RunnerError::Rejected(*code),
        other => RunnerError::UnexpectedResponse {
            sent,
            received: other.tag(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyproto_core::{ErrorCode, TurnResult};

    #[test]
    fn test_answers_pairs() {
        let drive = Command::Drive(DriveCommand { distance: 1.0, speed: 1 });
        let scan = Command::Scan(ScanCommand::default());
        let turn_done = Response::TurnDone(TurnResult { total_angle: 0.0 });
        let error = Response::Error { code: ErrorCode::DecodeFailure };

        assert!(answers(&drive, &Response::DriveDone(DriveResult::default())));
        assert!(answers(&drive, &error));
        assert!(answers(&scan, &Response::ScanDone(ScanResult::new())));
        assert!(!answers(&drive, &turn_done));
        assert!(!answers(&scan, &turn_done));
    }

    #[test]
    fn test_rejection_carries_code() {
        let err = rejection(TAG_SCAN, &Response::Error { code: ErrorCode::BufferOverflow });
        assert!(matches!(err, RunnerError::Rejected(ErrorCode::BufferOverflow)));

        let err = rejection(TAG_DRIVE, &Response::TurnDone(TurnResult::default()));
        assert!(matches!(
            err,
            RunnerError::UnexpectedResponse { sent: TAG_DRIVE, received: 0x82 }
        ));
    }
}
