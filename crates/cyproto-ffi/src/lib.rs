//! C ABI for the cybot protocol.
//!
//! Executor firmware written in C links this crate as a static library and
//! includes the `cyproto.h` header generated at build time. Every buffer
//! crossing the boundary is a pointer plus an explicit capacity, and every
//! encoder reports a [`CyprotoError`] instead of a sentinel length.
//!
//! A firmware dispatch loop looks like:
//!
//! ```text
//! uint8_t buf[256];
//! CommandRequest cmd = cyproto_read_command(uart_read, &uart);
//! size_t len = 0;
//! switch (cmd.tag) {
//!     case CommandRequest_Drive:
//!         cyproto_drive_done(drive(cmd.drive), buf, sizeof buf, &len);
//!         break;
//!     case CommandRequest_Scan: {
//!         ObjectData objects[cyproto_scan_size(cmd.scan)];
//!         ScanDone done = scan(cmd.scan, objects);
//!         cyproto_scan_done(done, buf, sizeof buf, &len);
//!         break;
//!     }
//!     case CommandRequest_Error:
//!         cyproto_error_done(cmd.error, buf, sizeof buf, &len);
//!         break;
//!     ...
//! }
//! uart_write(&uart, buf, len);
//! ```
//!
//! Without the `std` feature the crate is `no_std`; the firmware then
//! provides the panic handler.

#![cfg_attr(not(feature = "std"), no_std)]

mod exports;
mod types;

pub use exports::*;
pub use types::*;
