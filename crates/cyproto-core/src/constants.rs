//! Protocol constants
//!
//! These constants define the tag bytes, error code bytes, and size bounds
//! used by the cybot wire protocol.

// ============================================================================
// Command Tags (host → executor)
// ============================================================================

/// Pseudo-command carrying an error code.
pub const TAG_ERROR: u8 = 0x00;
/// Drive forwards or backwards.
pub const TAG_DRIVE: u8 = 0x01;
/// Turn in place.
pub const TAG_TURN: u8 = 0x02;
/// Sweep the scanner across an angle range.
pub const TAG_SCAN: u8 = 0x03;

// ============================================================================
// Response Tags (executor → host)
// ============================================================================

/// The executor could not act on the last command.
pub const RESP_TAG_ERROR: u8 = 0x80;
/// Drive finished.
pub const RESP_TAG_DRIVE_DONE: u8 = 0x81;
/// Turn finished.
pub const RESP_TAG_TURN_DONE: u8 = 0x82;
/// Scan finished.
pub const RESP_TAG_SCAN_DONE: u8 = 0x83;

// ============================================================================
// Error Code Bytes
// ============================================================================

/// No error.
pub const ERROR_CODE_NONE: u8 = 0;
/// Encoded or decoded form would not fit the fixed buffer.
pub const ERROR_CODE_BUFFER_OVERFLOW: u8 = 1;
/// Bytes are not a valid encoding.
pub const ERROR_CODE_DECODE_FAILURE: u8 = 2;

// ============================================================================
// Message Sizes
// ============================================================================

/// Size of an encoded `f32` (IEEE-754 binary32).
pub const F32_SIZE: usize = 4;

/// Encoded size of an error message (tag + code).
pub const ERROR_MESSAGE_SIZE: usize = 1 + 1;
/// Encoded size of a drive command (tag + distance + speed).
pub const DRIVE_COMMAND_SIZE: usize = 1 + F32_SIZE + 2;
/// Encoded size of a turn command (tag + angle + speed).
pub const TURN_COMMAND_SIZE: usize = 1 + F32_SIZE + 2;
/// Encoded size of a scan command (tag + start + end + fidelity).
pub const SCAN_COMMAND_SIZE: usize = 1 + 3;

/// Encoded size of a drive result (tag + distance + bump + cliff).
pub const DRIVE_DONE_SIZE: usize = 1 + F32_SIZE + 1 + 1;
/// Encoded size of a turn result (tag + angle).
pub const TURN_DONE_SIZE: usize = 1 + F32_SIZE;
/// Encoded size of a scan result header (tag + object count).
pub const SCAN_DONE_HEADER_SIZE: usize = 1 + 1;
/// Encoded size of one detected object (distance + angle + width).
pub const OBJECT_DATA_SIZE: usize = F32_SIZE + 1 + F32_SIZE;

// ============================================================================
// Bounds
// ============================================================================

/// Maximum encoded size of any single message.
pub const BUFFER_SIZE: usize = 256;

/// Maximum number of objects a single scan result may carry.
///
/// Chosen so that the largest legal scan result always fits in
/// [`BUFFER_SIZE`].
pub const MAX_OBJECTS: usize = (BUFFER_SIZE - SCAN_DONE_HEADER_SIZE) / OBJECT_DATA_SIZE;

// The object count travels as a single byte.
const _: () = assert!(MAX_OBJECTS <= u8::MAX as usize);
const _: () = assert!(SCAN_DONE_HEADER_SIZE + MAX_OBJECTS * OBJECT_DATA_SIZE <= BUFFER_SIZE);

/// Size callers must provision for any encode or decode buffer.
pub const fn buffer_size() -> usize {
    BUFFER_SIZE
}

/// Maximum number of scan objects allowed by the buffer size.
pub const fn max_objects() -> usize {
    MAX_OBJECTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_consistent() {
        assert_eq!(buffer_size(), 256);
        assert_eq!(max_objects(), 28);
        assert!(scan_done_size(max_objects()) <= buffer_size());
        assert!(scan_done_size(max_objects() + 1) > buffer_size());
    }

    fn scan_done_size(count: usize) -> usize {
        SCAN_DONE_HEADER_SIZE + count * OBJECT_DATA_SIZE
    }
}
