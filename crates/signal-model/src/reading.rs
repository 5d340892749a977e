//! Heart-rate readings.

use serde::{Deserialize, Serialize};

/// An accepted heart-rate estimate, produced once per evaluation cycle
/// when the sample buffer holds enough data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BpmReading {
    /// Beats per minute, rounded to the nearest integer.
    pub bpm: u32,

    /// Seconds since monitoring start at which the reading was produced.
    pub timestamp: f64,
}

impl BpmReading {
    /// Create a reading.
    pub fn new(bpm: u32, timestamp: f64) -> Self {
        Self { bpm, timestamp }
    }
}
