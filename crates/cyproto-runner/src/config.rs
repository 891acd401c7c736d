//! Runner configuration.
//!
//! Settings come from an optional YAML file. Every field has a default, so an
//! empty file (or no file) is a valid configuration. Command-line flags
//! override whatever the file sets.
//!
//! ```yaml
//! listen: 127.0.0.1:2888
//! seed: 42
//! failure_rate: 0.1
//! response_delay_ms: 1000
//! max_scan_objects_reported: 10
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RunnerError, RunnerResult};

/// Default address the mock executor listens on and the host connects to.
pub const DEFAULT_ADDR: &str = "127.0.0.1:2888";

/// Settings for the mock executor server and the host commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Address the mock executor binds to.
    pub listen: String,
    /// Address the host connects to.
    pub connect: String,
    /// Seed for the mock hardware RNG. Unset seeds from entropy.
    pub seed: Option<u64>,
    /// Probability that a drive or turn stops short.
    pub failure_rate: f64,
    /// Simulated time each action takes, in milliseconds.
    pub response_delay_ms: u64,
    /// Upper bound on objects a single mock scan reports.
    pub max_scan_objects_reported: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            listen: DEFAULT_ADDR.to_string(),
            connect: DEFAULT_ADDR.to_string(),
            seed: None,
            failure_rate: 0.1,
            response_delay_ms: 0,
            max_scan_objects_reported: 10,
        }
    }
}

impl RunnerConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> RunnerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(content: &str) -> RunnerResult<Self> {
        // serde_yaml rejects an empty document for a struct.
        if content.trim().is_empty() {
            return Ok(RunnerConfig::default());
        }
        let config: RunnerConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> RunnerResult<()> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(RunnerError::InvalidConfig(format!(
                "failure_rate must be within 0.0..=1.0, got {}",
                self.failure_rate
            )));
        }
        Ok(())
    }

    /// Simulated action duration.
    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }
}
