//! Scan result sizing.
//!
//! A scan samples angles starting at `start_angle`, stepping by `fidelity`,
//! while the angle is at most `end_angle`. The executor sizes its result
//! storage from [`scan_size`] before the hardware loop runs, so the count must
//! be known, finite, and bounded by [`MAX_OBJECTS`] for every input.

use core::iter::FusedIterator;

use crate::constants::MAX_OBJECTS;
use crate::types::ScanCommand;

/// Number of objects a scan will report, capped at [`MAX_OBJECTS`].
///
/// Degenerate scans (`fidelity == 0` or `start_angle > end_angle`) sample
/// nothing and yield 0. When the result is capped the caller decides whether
/// to reject the command or run a shortened scan; compare with
/// [`ScanCommand::sample_count`] to detect it.
pub fn scan_size(cmd: &ScanCommand) -> usize {
    cmd.sample_count().min(MAX_OBJECTS)
}

impl ScanCommand {
    /// Number of angles the scan samples, without the [`MAX_OBJECTS`] cap.
    pub fn sample_count(&self) -> usize {
        if self.fidelity == 0 || self.start_angle > self.end_angle {
            return 0;
        }
        usize::from(self.end_angle - self.start_angle) / usize::from(self.fidelity) + 1
    }

    /// Whether the uncapped sample count exceeds [`MAX_OBJECTS`].
    pub fn exceeds_capacity(&self) -> bool {
        self.sample_count() > MAX_OBJECTS
    }

    /// The angles the scan samples, in order.
    pub fn angles(&self) -> ScanAngles {
        ScanAngles {
            next: u16::from(self.start_angle),
            end: u16::from(self.end_angle),
            step: u16::from(self.fidelity),
        }
    }
}

/// Iterator over the angles sampled by a [`ScanCommand`].
///
/// Steps in `u16` so the last sample near 255 never wraps back to 0.
#[derive(Debug, Clone)]
pub struct ScanAngles {
    next: u16,
    end: u16,
    step: u16,
}

impl Iterator for ScanAngles {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.step == 0 || self.next > self.end {
            return None;
        }
        let angle = u8::try_from(self.next).ok()?;
        self.next += self.step;
        Some(angle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.step == 0 || self.next > self.end {
            0
        } else {
            usize::from((self.end - self.next) / self.step) + 1
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ScanAngles {}

impl FusedIterator for ScanAngles {}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    fn scan(start_angle: u8, end_angle: u8, fidelity: u8) -> ScanCommand {
        ScanCommand {
            start_angle,
            end_angle,
            fidelity,
        }
    }

    #[test]
    fn test_scan_size_examples() {
        assert_eq!(scan_size(&scan(10, 50, 10)), 5);
        assert_eq!(scan_size(&scan(0, 0, 5)), 1);
        assert_eq!(scan_size(&scan(5, 0, 5)), 0);
        assert_eq!(scan_size(&scan(10, 55, 10)), 5);
        assert_eq!(scan_size(&scan(0, 180, 10)), 19);
    }

    #[test]
    fn test_scan_size_degenerate() {
        assert_eq!(scan_size(&scan(0, 180, 0)), 0);
        assert_eq!(scan(0, 180, 0).angles().count(), 0);
        assert_eq!(scan_size(&scan(255, 0, 1)), 0);
        // Fidelity wider than the range still samples the start angle.
        assert_eq!(scan_size(&scan(10, 20, 200)), 1);
    }

    #[test]
    fn test_scan_size_capped() {
        let cmd = scan(0, 255, 1);
        assert_eq!(cmd.sample_count(), 256);
        assert!(cmd.exceeds_capacity());
        assert_eq!(scan_size(&cmd), MAX_OBJECTS);
    }

    #[test]
    fn test_angles_match_sample_count() {
        let cmd = scan(10, 50, 10);
        let angles: Vec<u8> = cmd.angles().collect();
        assert_eq!(angles, vec![10, 20, 30, 40, 50]);

        for (start, end, fidelity) in [(0, 255, 1), (250, 255, 3), (0, 255, 255), (7, 7, 1), (9, 3, 2)] {
            let cmd = scan(start, end, fidelity);
            assert_eq!(cmd.angles().len(), cmd.sample_count());
            assert_eq!(cmd.angles().count(), cmd.sample_count());
        }
    }

    #[test]
    fn test_angles_do_not_wrap() {
        let angles: Vec<u8> = scan(250, 255, 4).angles().collect();
        assert_eq!(angles, vec![250, 254]);
        assert_eq!(scan(255, 255, 255).angles().collect::<Vec<_>>(), vec![255]);
    }
}
