//! Mock executor server.
//!
//! Accepts one host connection at a time and runs the dispatch loop over it
//! against [`RandomHardware`]. The hardware (and its RNG) persists across
//! connections, so a seeded server replays the same sequence of outcomes.

use std::net::{SocketAddr, TcpListener, TcpStream};

use cyproto_executor::{DispatchStats, Executor, ExecutorError};
use tracing::{info, warn};

use crate::config::RunnerConfig;
use crate::error::{RunnerError, RunnerResult};
use crate::mock::RandomHardware;
use crate::tcp::TcpChannel;

/// A TCP server that plays the executor role.
#[derive(Debug)]
pub struct MockServer {
    listener: TcpListener,
    hardware: RandomHardware,
}

impl MockServer {
    /// Bind to `config.listen` with hardware built from `config`.
    pub fn bind(config: &RunnerConfig) -> RunnerResult<Self> {
        config.validate()?;
        let listener = TcpListener::bind(&config.listen)?;
        Ok(MockServer {
            listener,
            hardware: RandomHardware::from_config(config),
        })
    }

    /// The bound address (useful when binding to port 0).
    pub fn local_addr(&self) -> RunnerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept one connection and serve it until the host disconnects.
    pub fn serve_once(&mut self) -> RunnerResult<DispatchStats> {
        let (stream, peer) = self.listener.accept()?;
        info!("host connected from {}", peer);
        let stats = self.handle(stream)?;
        info!("host {} disconnected after {} commands", peer, stats.commands);
        Ok(stats)
    }

    /// Serve connections one after another. Returns only if accepting fails;
    /// a misbehaving host just ends its own session.
    pub fn serve_forever(&mut self) -> RunnerResult<()> {
        info!("mock executor listening on {}", self.local_addr()?);
        loop {
            let (stream, peer) = self.listener.accept()?;
            info!("host connected from {}", peer);
            match self.handle(stream) {
                Ok(stats) => info!(
                    "host {} disconnected after {} commands ({} rejected)",
                    peer, stats.commands, stats.rejected
                ),
                Err(err) => warn!("session with {} ended: {}", peer, err),
            }
        }
    }

    /// Run the dispatch loop over one connection.
    ///
    /// A clean disconnect is the normal end of a session and yields the
    /// session's stats.
    pub fn handle(&mut self, stream: TcpStream) -> RunnerResult<DispatchStats> {
        stream.set_nodelay(true)?;
        let mut executor = Executor::new(TcpChannel::new(stream), &mut self.hardware);
        match executor.run() {
            ExecutorError::Channel(RunnerError::ConnectionClosed) => Ok(executor.stats()),
            ExecutorError::Channel(err) => Err(err),
            ExecutorError::Codec(err) => Err(RunnerError::Codec(err)),
        }
    }
}
