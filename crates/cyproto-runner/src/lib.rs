//! Cybot protocol runner.
//!
//! Host-side and test tooling around the protocol crates:
//!
//! - [`FrameCodec`] / [`TcpChannel`]: carry protocol messages over a TCP
//!   byte stream.
//! - [`HostSession`]: the controller side, sends a command and waits for the
//!   response.
//! - [`RandomHardware`] / [`MockServer`]: a stand-in executor that accepts
//!   connections and answers with randomized results.
//! - [`RunnerConfig`]: settings shared by the `cyproto` binary.

mod config;
mod error;
mod frame;
mod host;
mod mock;
mod server;
mod tcp;

pub use config::*;
pub use error::*;
pub use frame::*;
pub use host::*;
pub use mock::*;
pub use server::*;
pub use tcp::*;
