//! Message payload types shared by commands and responses.

use heapless::Vec;

use crate::constants::*;
use crate::error::{CodecError, CodecResult};

/// Drive forwards (positive distance) or backwards (negative distance).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveCommand {
    /// Distance to drive, in centimetres.
    pub distance: f32,
    /// Wheel speed.
    pub speed: u16,
}

/// Turn counter-clockwise (positive angle) or clockwise (negative angle).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TurnCommand {
    /// Angle to turn, in degrees.
    pub angle: f32,
    /// Wheel speed.
    pub speed: u16,
}

/// Sweep the scanner from `start_angle` to `end_angle` inclusive.
///
/// Ex: a range of 0..=180 and a fidelity of 2 samples every other degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScanCommand {
    /// First angle sampled, in degrees.
    pub start_angle: u8,
    /// Last angle that may be sampled, in degrees.
    pub end_angle: u8,
    /// Degrees the servo turns between samples.
    pub fidelity: u8,
}

/// Outcome of a drive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveResult {
    /// Distance actually driven, in centimetres.
    pub total_distance: f32,
    /// The bumper triggered and the drive stopped early.
    pub bump_detected: bool,
    /// A cliff sensor triggered and the drive stopped early.
    pub cliff_detected: bool,
}

/// Outcome of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TurnResult {
    /// Angle actually turned, in degrees.
    pub total_angle: f32,
}

/// One detected obstacle sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObjectData {
    /// Distance to the object, in centimetres.
    pub distance: f32,
    /// Scanner angle the object was seen at, in degrees.
    pub angle: u8,
    /// Estimated object width, in centimetres.
    pub width: f32,
}

/// Outcome of a scan: at most [`MAX_OBJECTS`] detected objects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanResult {
    objects: Vec<ObjectData, MAX_OBJECTS>,
}

impl ScanResult {
    /// Create an empty result.
    pub fn new() -> Self {
        ScanResult { objects: Vec::new() }
    }

    /// Copy objects from a slice.
    ///
    /// Fails with [`CodecError::BufferOverflow`] if the slice holds more than
    /// [`MAX_OBJECTS`] entries; nothing is truncated.
    pub fn from_slice(objects: &[ObjectData]) -> CodecResult<Self> {
        let objects = Vec::from_slice(objects).map_err(|_| overflow(objects.len()))?;
        Ok(ScanResult { objects })
    }

    /// Append an object, failing once [`MAX_OBJECTS`] entries are held.
    pub fn push(&mut self, object: ObjectData) -> CodecResult<()> {
        let count = self.objects.len() + 1;
        self.objects.push(object).map_err(|_| overflow(count))
    }

    /// The detected objects, in scan order.
    pub fn objects(&self) -> &[ObjectData] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ObjectData> {
        self.objects.iter()
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a ObjectData;
    type IntoIter = core::slice::Iter<'a, ObjectData>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

/// Encoded size of a scan result holding `count` objects.
pub const fn scan_done_size(count: usize) -> usize {
    SCAN_DONE_HEADER_SIZE + count * OBJECT_DATA_SIZE
}

fn overflow(count: usize) -> CodecError {
    CodecError::BufferOverflow {
        needed: scan_done_size(count),
        capacity: BUFFER_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(angle: u8) -> ObjectData {
        ObjectData {
            distance: 30.0,
            angle,
            width: 6.5,
        }
    }

    #[test]
    fn test_scan_result_from_slice() {
        let objects = [object(10), object(20)];
        let result = ScanResult::from_slice(&objects).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.objects(), &objects);
        assert_eq!(result.iter().map(|o| o.angle).sum::<u8>(), 30);
    }

    #[test]
    fn test_scan_result_rejects_too_many() {
        let objects = [object(0); MAX_OBJECTS + 1];
        let err = ScanResult::from_slice(&objects).unwrap_err();
        assert_eq!(
            err,
            CodecError::BufferOverflow {
                needed: scan_done_size(MAX_OBJECTS + 1),
                capacity: BUFFER_SIZE,
            }
        );

        let full = ScanResult::from_slice(&objects[..MAX_OBJECTS]).unwrap();
        assert_eq!(full.len(), MAX_OBJECTS);
    }

    #[test]
    fn test_scan_result_push_stops_at_capacity() {
        let mut result = ScanResult::new();
        for angle in 0..MAX_OBJECTS as u8 {
            result.push(object(angle)).unwrap();
        }
        assert!(result.push(object(200)).is_err());
        assert_eq!(result.len(), MAX_OBJECTS);
        assert_eq!(result.objects().last().map(|o| o.angle), Some(MAX_OBJECTS as u8 - 1));
    }
}
