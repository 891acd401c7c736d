//! Randomized stand-in for the robot hardware.

use std::thread;
use std::time::Duration;

use cyproto_core::{
    DriveCommand, DriveResult, ObjectData, ScanCommand, ScanResult, TurnCommand, TurnResult,
};
use cyproto_executor::Hardware;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::config::RunnerConfig;

/// Range of distances reported for scanned objects, in centimetres.
const OBJECT_DISTANCE_CM: std::ops::Range<f32> = 15.0..80.0;

/// Range of widths reported for scanned objects, in centimetres.
const OBJECT_WIDTH_CM: std::ops::Range<f32> = 5.0..10.0;

/// Hardware that completes actions with random outcomes.
///
/// A drive or turn stops short with probability `failure_rate`; a failed
/// drive reports either a bump or a cliff. A scan reports a random number of
/// objects at angles the scan actually samples.
#[derive(Debug)]
pub struct RandomHardware<R = ChaCha8Rng> {
    rng: R,
    failure_rate: f64,
    delay: Duration,
    max_objects_reported: usize,
}

impl RandomHardware<ChaCha8Rng> {
    /// Build from configuration, seeding from the config or from entropy.
    pub fn from_config(config: &RunnerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        RandomHardware::with_rng(rng, config.failure_rate)
            .with_delay(config.response_delay())
            .with_max_objects_reported(config.max_scan_objects_reported)
    }
}

impl<R: Rng> RandomHardware<R> {
    /// Create hardware driven by `rng`. The failure rate is clamped to 0..=1.
    pub fn with_rng(rng: R, failure_rate: f64) -> Self {
        let failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };
        RandomHardware {
            rng,
            failure_rate,
            delay: Duration::ZERO,
            max_objects_reported: 10,
        }
    }

    /// Block for `delay` before each action completes.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Cap the objects a single scan reports.
    pub fn with_max_objects_reported(mut self, max: usize) -> Self {
        self.max_objects_reported = max;
        self
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    fn wait(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }

    /// A random fraction of `target`, for an action that stopped short.
    fn partial(&mut self, target: f32) -> f32 {
        if !target.is_finite() {
            return 0.0;
        }
        target * self.rng.gen::<f32>()
    }
}

impl<R: Rng> Hardware for RandomHardware<R> {
    fn drive(&mut self, cmd: &DriveCommand) -> DriveResult {
        self.wait();
        if !self.rng.gen_bool(self.failure_rate) {
            return DriveResult {
                total_distance: cmd.distance,
                bump_detected: false,
                cliff_detected: false,
            };
        }

        let bump_detected = self.rng.gen_bool(0.5);
        let result = DriveResult {
            total_distance: self.partial(cmd.distance),
            bump_detected,
            cliff_detected: !bump_detected,
        };
        debug!(
            "drive of {} stopped at {} (bump: {}, cliff: {})",
            cmd.distance, result.total_distance, result.bump_detected, result.cliff_detected
        );
        result
    }

    fn turn(&mut self, cmd: &TurnCommand) -> TurnResult {
        self.wait();
        if !self.rng.gen_bool(self.failure_rate) {
            return TurnResult {
                total_angle: cmd.angle,
            };
        }

        let total_angle = self.partial(cmd.angle);
        debug!("turn of {} stopped at {}", cmd.angle, total_angle);
        TurnResult { total_angle }
    }

    fn scan(&mut self, cmd: &ScanCommand, capacity: usize) -> ScanResult {
        self.wait();
        let limit = capacity.min(self.max_objects_reported);
        let count = self.rng.gen_range(0..=limit);

        let mut angles = cmd.angles().choose_multiple(&mut self.rng, count);
        angles.sort_unstable();

        let mut result = ScanResult::new();
        for angle in angles {
            let object = ObjectData {
                distance: self.rng.gen_range(OBJECT_DISTANCE_CM),
                angle,
                width: self.rng.gen_range(OBJECT_WIDTH_CM),
            };
            if let Err(err) = result.push(object) {
                warn!("scan result full: {}", err);
                break;
            }
        }
        debug!("scan reported {} objects", result.len());
        result
    }
}
