//! The dispatch loop.
//!
//! One cycle reads a command, runs the matching hardware action, and sends
//! the result. Nothing survives between cycles except the counters in
//! [`DispatchStats`].

use cyproto_core::{
    read_command, scan_size, send, Channel, Command, ErrorCode, Response, ScanCommand,
};

use crate::error::{ExecutorError, ExecutorResult};
use crate::hardware::Hardware;

/// Counters for commands handled since the executor was created.
///
/// Counters wrap on overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Commands read from the channel, valid or not.
    pub commands: u32,
    pub drives: u32,
    pub turns: u32,
    pub scans: u32,
    /// Commands answered with an error response.
    pub rejected: u32,
    /// Scans whose sample count was capped at `max_objects()`.
    pub capped_scans: u32,
}

/// Runs commands from a channel against a hardware implementation.
pub struct Executor<C, H> {
    channel: C,
    hardware: H,
    stats: DispatchStats,
}

impl<C: Channel, H: Hardware> Executor<C, H> {
    /// Create an executor over a channel and hardware.
    pub fn new(channel: C, hardware: H) -> Self {
        Executor {
            channel,
            hardware,
            stats: DispatchStats::default(),
        }
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Take the executor apart, returning the channel and hardware.
    pub fn into_parts(self) -> (C, H) {
        (self.channel, self.hardware)
    }

    /// Run one command against the hardware and build its response.
    pub fn dispatch(&mut self, command: Command) -> Response {
        log::trace!("dispatching {:?}", command);

        match command {
            Command::Drive(cmd) => {
                self.stats.drives = self.stats.drives.wrapping_add(1);
                Response::DriveDone(self.hardware.drive(&cmd))
            }

            Command::Turn(cmd) => {
                self.stats.turns = self.stats.turns.wrapping_add(1);
                Response::TurnDone(self.hardware.turn(&cmd))
            }

            Command::Scan(cmd) => {
                self.stats.scans = self.stats.scans.wrapping_add(1);
                self.dispatch_scan(cmd)
            }

            Command::Error { code } => {
                self.stats.rejected = self.stats.rejected.wrapping_add(1);
                Response::Error { code }
            }
        }
    }

    fn dispatch_scan(&mut self, cmd: ScanCommand) -> Response {
        let capacity = scan_size(&cmd);
        if cmd.exceeds_capacity() {
            self.stats.capped_scans = self.stats.capped_scans.wrapping_add(1);
            log::warn!(
                "scan {}..={} step {} samples {} angles, capping at {}",
                cmd.start_angle,
                cmd.end_angle,
                cmd.fidelity,
                cmd.sample_count(),
                capacity
            );
        }

        let result = self.hardware.scan(&cmd, capacity);
        if result.len() > capacity {
            log::warn!(
                "hardware reported {} objects for a scan sized {}",
                result.len(),
                capacity
            );
            self.stats.rejected = self.stats.rejected.wrapping_add(1);
            return Response::Error {
                code: ErrorCode::BufferOverflow,
            };
        }

        Response::ScanDone(result)
    }

    /// Handle one request/response cycle, returning the response sent.
    pub fn step(&mut self) -> ExecutorResult<Response, C::Error> {
        let command = read_command(&mut self.channel).map_err(ExecutorError::Channel)?;
        self.stats.commands = self.stats.commands.wrapping_add(1);

        let response = self.dispatch(command);
        let len = send(&mut self.channel, &response)?;
        log::trace!("sent {} byte response (tag 0x{:02X})", len, response.tag());

        Ok(response)
    }

    /// Handle commands until the channel fails, returning the error that
    /// stopped the loop.
    pub fn run(&mut self) -> ExecutorError<C::Error> {
        loop {
            if let Err(err) = self.step() {
                log::debug!(
                    "dispatch loop stopped after {} commands: {}",
                    self.stats.commands,
                    err
                );
                return err;
            }
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use cyproto_core::{
        encode, DriveCommand, DriveResult, ObjectData, ScanResult, TurnCommand, TurnResult,
        BUFFER_SIZE, MAX_OBJECTS,
    };
    use std::collections::VecDeque;

    #[derive(Debug, PartialEq)]
    struct Closed;

    /// Replays queued messages and records everything written.
    #[derive(Default)]
    struct ScriptedChannel {
        incoming: VecDeque<Vec<u8>>,
        written: Vec<Vec<u8>>,
    }

    impl ScriptedChannel {
        fn with_commands(commands: &[Command]) -> Self {
            let mut channel = ScriptedChannel::default();
            for cmd in commands {
                let mut buf = [0u8; BUFFER_SIZE];
                let len = encode(cmd, &mut buf).unwrap();
                channel.incoming.push_back(buf[..len].to_vec());
            }
            channel
        }

        fn responses(&self) -> Vec<Response> {
            self.written
                .iter()
                .map(|bytes| Response::decode(bytes).unwrap())
                .collect()
        }
    }

    impl Channel for ScriptedChannel {
        type Error = Closed;

        fn read_raw(&mut self, buf: &mut [u8]) -> Result<usize, Closed> {
            let message = self.incoming.pop_front().ok_or(Closed)?;
            buf[..message.len()].copy_from_slice(&message);
            Ok(message.len())
        }

        fn write_raw(&mut self, bytes: &[u8]) -> Result<(), Closed> {
            self.written.push(bytes.to_vec());
            Ok(())
        }
    }

    /// Hardware that completes every action exactly and records calls.
    #[derive(Default)]
    struct ExactHardware {
        calls: Vec<&'static str>,
        scan_capacities: Vec<usize>,
        overreport: bool,
    }

    impl Hardware for ExactHardware {
        fn drive(&mut self, cmd: &DriveCommand) -> DriveResult {
            self.calls.push("drive");
            DriveResult {
                total_distance: cmd.distance,
                bump_detected: false,
                cliff_detected: false,
            }
        }

        fn turn(&mut self, cmd: &TurnCommand) -> TurnResult {
            self.calls.push("turn");
            TurnResult {
                total_angle: cmd.angle,
            }
        }

        fn scan(&mut self, cmd: &ScanCommand, capacity: usize) -> ScanResult {
            self.calls.push("scan");
            self.scan_capacities.push(capacity);
            let count = if self.overreport { capacity + 1 } else { capacity };
            let mut result = ScanResult::new();
            for angle in cmd.angles().cycle().take(count.min(MAX_OBJECTS)) {
                result
                    .push(ObjectData {
                        distance: 40.0,
                        angle,
                        width: 6.0,
                    })
                    .unwrap();
            }
            result
        }
    }

    #[test]
    fn test_each_command_reaches_hardware() {
        let drive = DriveCommand { distance: 50.0, speed: 200 };
        let turn = TurnCommand { angle: -45.0, speed: 100 };
        let scan = ScanCommand { start_angle: 10, end_angle: 50, fidelity: 10 };
        let channel = ScriptedChannel::with_commands(&[drive.into(), turn.into(), scan.into()]);

        let mut executor = Executor::new(channel, ExactHardware::default());
        for _ in 0..3 {
            executor.step().unwrap();
        }

        assert_eq!(executor.hardware().calls, vec!["drive", "turn", "scan"]);
        assert_eq!(executor.hardware().scan_capacities, vec![5]);

        let stats = executor.stats();
        assert_eq!(stats.commands, 3);
        assert_eq!((stats.drives, stats.turns, stats.scans), (1, 1, 1));
        assert_eq!(stats.rejected, 0);

        let (channel, _) = executor.into_parts();
        let responses = channel.responses();
        assert_eq!(
            responses[0],
            Response::DriveDone(DriveResult {
                total_distance: 50.0,
                bump_detected: false,
                cliff_detected: false,
            })
        );
        assert_eq!(responses[1], Response::TurnDone(TurnResult { total_angle: -45.0 }));
        match &responses[2] {
            Response::ScanDone(result) => {
                let angles: Vec<u8> = result.iter().map(|o| o.angle).collect();
                assert_eq!(angles, vec![10, 20, 30, 40, 50]);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_garbled_command_answered_with_error() {
        let mut channel = ScriptedChannel::default();
        channel.incoming.push_back(vec![0x7E, 0x01]);
        let mut executor = Executor::new(channel, ExactHardware::default());

        let response = executor.step().unwrap();
        assert_eq!(response, Response::Error { code: ErrorCode::DecodeFailure });
        assert!(executor.hardware().calls.is_empty());
        assert_eq!(executor.stats().rejected, 1);
        assert_eq!(executor.channel_mut().written, vec![vec![0x80, 0x02]]);
    }

    #[test]
    fn test_oversized_scan_is_capped() {
        let scan = ScanCommand { start_angle: 0, end_angle: 255, fidelity: 1 };
        let channel = ScriptedChannel::with_commands(&[scan.into()]);
        let mut executor = Executor::new(channel, ExactHardware::default());

        match executor.step().unwrap() {
            Response::ScanDone(result) => assert_eq!(result.len(), MAX_OBJECTS),
            other => panic!("unexpected response: {other:?}"),
        }
        assert_eq!(executor.hardware().scan_capacities, vec![MAX_OBJECTS]);
        assert_eq!(executor.stats().capped_scans, 1);
    }

    #[test]
    fn test_degenerate_scan_reports_nothing() {
        let scan = ScanCommand { start_angle: 90, end_angle: 0, fidelity: 5 };
        let channel = ScriptedChannel::with_commands(&[scan.into()]);
        let mut executor = Executor::new(channel, ExactHardware::default());

        assert_eq!(executor.step().unwrap(), Response::ScanDone(ScanResult::new()));
        assert_eq!(executor.hardware().scan_capacities, vec![0]);
    }

    #[test]
    fn test_hardware_overreport_is_overflow() {
        let scan = ScanCommand { start_angle: 0, end_angle: 20, fidelity: 10 };
        let channel = ScriptedChannel::with_commands(&[scan.into()]);
        let hardware = ExactHardware {
            overreport: true,
            ..Default::default()
        };
        let mut executor = Executor::new(channel, hardware);

        assert_eq!(
            executor.step().unwrap(),
            Response::Error { code: ErrorCode::BufferOverflow }
        );
    }

    #[test]
    fn test_hardware_swapped_between_commands() {
        let scan = ScanCommand { start_angle: 0, end_angle: 20, fidelity: 10 };
        let channel = ScriptedChannel::with_commands(&[scan.into(), scan.into()]);
        let mut executor = Executor::new(channel, ExactHardware::default());

        assert!(matches!(executor.step().unwrap(), Response::ScanDone(_)));
        executor.hardware_mut().overreport = true;
        assert_eq!(
            executor.step().unwrap(),
            Response::Error { code: ErrorCode::BufferOverflow }
        );
        assert_eq!(executor.stats().rejected, 1);
    }

    #[test]
    fn test_stats_wrap_instead_of_overflowing() {
        let drive = DriveCommand { distance: 1.0, speed: 1 };
        let garbage = Command::Error { code: ErrorCode::DecodeFailure };
        let channel = ScriptedChannel::with_commands(&[drive.into(), garbage]);
        let mut executor = Executor::new(channel, ExactHardware::default());
        executor.stats = DispatchStats {
            commands: u32::MAX,
            drives: u32::MAX,
            rejected: u32::MAX,
            ..Default::default()
        };

        executor.step().unwrap();
        executor.step().unwrap();

        let stats = executor.stats();
        assert_eq!(stats.commands, 1);
        assert_eq!(stats.drives, 0);
        assert_eq!(stats.rejected, 0);
    }

    #[test]
    fn test_run_stops_on_channel_error() {
        let drive = DriveCommand { distance: 1.0, speed: 1 };
        let channel = ScriptedChannel::with_commands(&[drive.into(), drive.into()]);
        let mut executor = Executor::new(channel, ExactHardware::default());

        let err = executor.run();
        assert!(matches!(err, ExecutorError::Channel(Closed)));
        assert_eq!(executor.stats().commands, 2);
        assert_eq!(executor.stats().drives, 2);
    }
}
