//! Cybot command/response protocol.
//!
//! This crate defines the wire protocol spoken between a controller (host) and
//! the embedded robot executor. The host sends a [`Command`], the executor
//! performs the action and answers with a [`Response`].
//!
//! # Protocol Overview
//!
//! Every message is a tag byte followed by fixed-width little-endian fields:
//!
//! - **Commands** (host → executor): tags `0x00..=0x03`
//! - **Responses** (executor → host): tags `0x80..=0x83`
//!
//! No message is ever longer than [`buffer_size()`] bytes, and a scan result
//! never carries more than [`max_objects()`] entries. Encoding writes into a
//! caller-provided buffer and decoding reads from a borrowed slice; neither
//! allocates.
//!
//! # Example
//!
//! ```rust
//! use cyproto_core::{decode, encode, Command, DriveCommand, BUFFER_SIZE};
//!
//! let cmd = Command::Drive(DriveCommand { distance: 25.0, speed: 200 });
//! let mut buf = [0u8; BUFFER_SIZE];
//! let len = encode(&cmd, &mut buf)?;
//! assert_eq!(decode(&buf[..len]), cmd);
//! # Ok::<(), cyproto_core::CodecError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod bounds;
mod channel;
mod codec;
mod commands;
mod constants;
mod error;
mod responses;
mod types;

pub use bounds::*;
pub use channel::*;
pub use codec::*;
pub use commands::*;
pub use constants::*;
pub use error::*;
pub use responses::*;
pub use types::*;
