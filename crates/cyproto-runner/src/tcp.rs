//! Protocol channel over a TCP stream.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use cyproto_core::Channel;

use crate::error::{RunnerError, RunnerResult};
use crate::frame::{FrameCodec, MAX_FRAMED_SIZE};

/// A [`Channel`] that carries length-prefixed messages over TCP.
#[derive(Debug)]
pub struct TcpChannel {
    stream: TcpStream,
    codec: FrameCodec,
}

impl TcpChannel {
    /// Wrap an accepted or connected stream.
    pub fn new(stream: TcpStream) -> Self {
        TcpChannel {
            stream,
            codec: FrameCodec::new(),
        }
    }

    /// Connect to an executor.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> RunnerResult<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        Ok(TcpChannel::new(stream))
    }

    /// Limit how long a read may block. `None` blocks forever.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> RunnerResult<()> {
        self.stream.set_read_timeout(timeout)?;
        Ok(())
    }

    pub fn peer_addr(&self) -> RunnerResult<SocketAddr> {
        Ok(self.stream.peer_addr()?)
    }
}

impl Channel for TcpChannel {
    type Error = RunnerError;

    fn read_raw(&mut self, buf: &mut [u8]) -> RunnerResult<usize> {
        let mut chunk = [0u8; MAX_FRAMED_SIZE];
        loop {
            if let Some(frame) = self.codec.decode()? {
                let max = buf.len();
                let dest = buf.get_mut(..frame.len()).ok_or(RunnerError::FrameTooLong {
                    max,
                    actual: frame.len(),
                })?;
                dest.copy_from_slice(&frame);
                return Ok(frame.len());
            }

            let n = self.stream.read(&mut chunk)?;
            if n == 0 {
                return Err(RunnerError::ConnectionClosed);
            }
            self.codec.push(&chunk[..n]);
        }
    }

    fn write_raw(&mut self, bytes: &[u8]) -> RunnerResult<()> {
        let frame = FrameCodec::encode(bytes)?;
        self.stream.write_all(&frame)?;
        self.stream.flush()?;
        Ok(())
    }
}
