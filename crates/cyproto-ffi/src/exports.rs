//! `extern "C"` entry points.

use core::ffi::c_void;
use core::slice;

use cyproto_core as proto;
use proto::{Encode, BUFFER_SIZE, MAX_OBJECTS};

use crate::types::*;

/// Link read callback.
///
/// Copies one complete message into `buf` (at most `capacity` bytes) and
/// returns its length, or a negative value if the link failed.
pub type CyprotoReadFn =
    Option<unsafe extern "C" fn(ctx: *mut c_void, buf: *mut u8, capacity: usize) -> isize>;

/// Largest message in bytes. Buffers passed to the encoders never need more.
#[no_mangle]
pub extern "C" fn cyproto_buffer_size() -> usize {
    BUFFER_SIZE
}

/// Most objects a scan result may carry.
#[no_mangle]
pub extern "C" fn cyproto_max_objects() -> usize {
    MAX_OBJECTS
}

/// Number of objects to allocate for a scan, capped at
/// `cyproto_max_objects()`.
#[no_mangle]
pub extern "C" fn cyproto_scan_size(cmd: ScanCommand) -> usize {
    proto::scan_size(&cmd.into())
}

/// Decode one command from `len` bytes at `buf`.
///
/// Malformed input (including a null `buf`) yields
/// `CommandRequest::Error(DecodeFailure)`.
///
/// # Safety
///
/// `buf` must be null or valid for reads of `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn cyproto_parse_command(buf: *const u8, len: usize) -> CommandRequest {
    if buf.is_null() {
        return CommandRequest::Error(CyprotoError::DecodeFailure);
    }
    let bytes = unsafe { slice::from_raw_parts(buf, len) };
    proto::decode(bytes).into()
}

/// Read one message through `read` and decode it.
///
/// A missing callback or a failed read yields
/// `CommandRequest::Error(DecodeFailure)`.
///
/// # Safety
///
/// `read` must honour the [`CyprotoReadFn`] contract for the given `ctx`.
#[no_mangle]
pub unsafe extern "C" fn cyproto_read_command(read: CyprotoReadFn, ctx: *mut c_void) -> CommandRequest {
    let Some(read) = read else {
        return CommandRequest::Error(CyprotoError::DecodeFailure);
    };

    let mut buf = [0u8; BUFFER_SIZE];
    let n = unsafe { read(ctx, buf.as_mut_ptr(), buf.len()) };
    match usize::try_from(n).ok().and_then(|len| buf.get(..len)) {
        Some(bytes) => proto::decode(bytes).into(),
        None => {
            log::debug!("link read returned {}", n);
            CommandRequest::Error(CyprotoError::DecodeFailure)
        }
    }
}

/// Encode a command (host side).
///
/// # Safety
///
/// See [`cyproto_drive_done`].
#[no_mangle]
pub unsafe extern "C" fn cyproto_encode_command(
    cmd: CommandRequest,
    buf: *mut u8,
    capacity: usize,
    written: *mut usize,
) -> CyprotoError {
    unsafe { encode_into(&proto::Command::from(cmd), buf, capacity, written) }
}

/// Encode a drive result into `buf`.
///
/// On success `*written` holds the message length; on failure it is 0 and
/// `buf` is untouched.
///
/// # Safety
///
/// `buf` must be null or valid for writes of `capacity` bytes. `written`
/// must be null or valid for a write.
#[no_mangle]
pub unsafe extern "C" fn cyproto_drive_done(
    val: DriveDone,
    buf: *mut u8,
    capacity: usize,
    written: *mut usize,
) -> CyprotoError {
    unsafe { encode_into(&proto::DriveResult::from(val), buf, capacity, written) }
}

/// Encode a turn result into `buf`.
///
/// # Safety
///
/// See [`cyproto_drive_done`].
#[no_mangle]
pub unsafe extern "C" fn cyproto_turn_done(
    val: TurnDone,
    buf: *mut u8,
    capacity: usize,
    written: *mut usize,
) -> CyprotoError {
    unsafe { encode_into(&proto::TurnResult::from(val), buf, capacity, written) }
}

/// Encode a scan result into `buf`.
///
/// More than `cyproto_max_objects()` objects is `BufferOverflow`; a null
/// `objects` with a non-zero `size` is `DecodeFailure`.
///
/// # Safety
///
/// `val.objects` must be null or valid for reads of `val.size` objects.
/// Otherwise see [`cyproto_drive_done`].
#[no_mangle]
pub unsafe extern "C" fn cyproto_scan_done(
    val: ScanDone,
    buf: *mut u8,
    capacity: usize,
    written: *mut usize,
) -> CyprotoError {
    unsafe { clear_written(written) };
    if val.size > MAX_OBJECTS {
        return CyprotoError::BufferOverflow;
    }
    let objects: &[ObjectData] = match (val.objects.is_null(), val.size) {
        (_, 0) => &[],
        (true, _) => return CyprotoError::DecodeFailure,
        (false, size) => unsafe { slice::from_raw_parts(val.objects, size) },
    };

    let mut result = proto::ScanResult::new();
    for object in objects {
        if let Err(err) = result.push((*object).into()) {
            return err.into();
        }
    }
    unsafe { encode_into(&result, buf, capacity, written) }
}

/// Encode an error response, used to answer `CommandRequest::Error`.
///
/// # Safety
///
/// See [`cyproto_drive_done`].
#[no_mangle]
pub unsafe extern "C" fn cyproto_error_done(
    code: CyprotoError,
    buf: *mut u8,
    capacity: usize,
    written: *mut usize,
) -> CyprotoError {
    let response = proto::Response::Error { code: code.into() };
    unsafe { encode_into(&response, buf, capacity, written) }
}

unsafe fn clear_written(written: *mut usize) {
    if !written.is_null() {
        unsafe { *written = 0 };
    }
}

unsafe fn encode_into<M: Encode>(
    message: &M,
    buf: *mut u8,
    capacity: usize,
    written: *mut usize,
) -> CyprotoError {
    unsafe { clear_written(written) };
    let out: &mut [u8] = if buf.is_null() {
        &mut []
    } else {
        unsafe { slice::from_raw_parts_mut(buf, capacity) }
    };

    match message.encode(out) {
        Ok(len) => {
            if !written.is_null() {
                unsafe { *written = len };
            }
            CyprotoError::None
        }
        Err(err) => {
            log::debug!("encode failed: {}", err);
            err.into()
        }
    }
}
