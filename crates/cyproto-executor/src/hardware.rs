//! The seam between the protocol and the robot's motors and sensors.

use cyproto_core::{DriveCommand, DriveResult, ScanCommand, ScanResult, TurnCommand, TurnResult};

/// Physical actions the executor can perform.
///
/// Implementations block until the action finishes. The protocol only cares
/// about the typed inputs and outputs; motor and sensor control is up to the
/// firmware.
pub trait Hardware {
    /// Drive `cmd.distance` centimetres, stopping early on a bump or cliff.
    fn drive(&mut self, cmd: &DriveCommand) -> DriveResult;

    /// Turn `cmd.angle` degrees.
    fn turn(&mut self, cmd: &TurnCommand) -> TurnResult;

    /// Sweep the scanner over `cmd.angles()` and report at most `capacity`
    /// detected objects.
    fn scan(&mut self, cmd: &ScanCommand, capacity: usize) -> ScanResult;
}

impl<H: Hardware + ?Sized> Hardware for &mut H {
    fn drive(&mut self, cmd: &DriveCommand) -> DriveResult {
        (**self).drive(cmd)
    }

    fn turn(&mut self, cmd: &TurnCommand) -> TurnResult {
        (**self).turn(cmd)
    }

    fn scan(&mut self, cmd: &ScanCommand, capacity: usize) -> ScanResult {
        (**self).scan(cmd, capacity)
    }
}
