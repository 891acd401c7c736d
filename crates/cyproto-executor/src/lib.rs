//! Cybot executor.
//!
//! This crate runs on the robot side of the link. It reads one [`Command`] at
//! a time from a [`Channel`], hands it to the [`Hardware`] implementation,
//! and sends the matching [`Response`] back.
//!
//! ```rust,ignore
//! use cyproto_executor::{Executor, Hardware};
//!
//! let mut executor = Executor::new(serial_channel, MyRobot::new());
//! let err = executor.run();
//! log::error!("link lost: {}", err);
//! ```
//!
//! [`Command`]: cyproto_core::Command
//! [`Channel`]: cyproto_core::Channel
//! [`Response`]: cyproto_core::Response

#![cfg_attr(not(feature = "std"), no_std)]

mod dispatch;
mod error;
mod hardware;

pub use dispatch::*;
pub use error::*;
pub use hardware::*;
