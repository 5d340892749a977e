//! Sample source implementations.
//!
//! A source yields one brightness sample per frame. How the region is
//! selected and the brightness computed is a source concern; the engine
//! only requires finite values in chronological order.

use std::f64::consts::TAU;
use std::path::Path;

use pulsecam_common::clock::{MonitorClock, RateController};
use pulsecam_common::error::{PulsecamError, PulsecamResult};
use pulsecam_signal_model::{parse_records, Sample, SampleRecord};

use crate::SampleSource;

/// A deterministic pulsing-brightness source for demos and tests.
///
/// Produces a sinusoidal waveform around a baseline, paced at the target
/// frame rate. One strict local maximum appears per wave period.
pub struct SyntheticPulseSource {
    clock: MonitorClock,
    pacer: RateController,
    wave_hz: f64,
    baseline: f64,
    amplitude: f64,
    last_sample_ns: Option<u64>,
}

impl SyntheticPulseSource {
    /// Create a source emitting `wave_hz` brightness pulses per second,
    /// sampled at `fps` frames per second.
    pub fn new(fps: u32, wave_hz: f64) -> Self {
        Self::with_profile(fps, wave_hz, 120.0, 12.0)
    }

    /// Create a source pulsing at the rate of a heart beating at `bpm`.
    pub fn for_bpm(fps: u32, bpm: u32) -> Self {
        Self::new(fps, bpm as f64 / 60.0)
    }

    /// Full control over baseline and amplitude.
    pub fn with_profile(fps: u32, wave_hz: f64, baseline: f64, amplitude: f64) -> Self {
        Self {
            clock: MonitorClock::start(),
            pacer: RateController::new(fps),
            wave_hz,
            baseline,
            amplitude,
            last_sample_ns: None,
        }
    }

    /// Waveform value at `t` seconds after source creation.
    pub fn brightness_at(&self, t_secs: f64) -> f64 {
        self.baseline + self.amplitude * (TAU * self.wave_hz * t_secs).sin()
    }
}

impl SampleSource for SyntheticPulseSource {
    fn poll(&mut self) -> PulsecamResult<Option<Sample>> {
        let now_ns = self.clock.elapsed_ns();
        if !self.pacer.should_tick(now_ns) {
            return Ok(None);
        }

        let brightness = self.brightness_at(MonitorClock::ns_to_secs(now_ns));
        let dt = match self.last_sample_ns {
            Some(last) => MonitorClock::ns_to_secs(now_ns - last),
            None => 0.0,
        };
        self.last_sample_ns = Some(now_ns);

        Ok(Some(Sample::new(brightness, dt)))
    }

    fn name(&self) -> &str {
        "synthetic"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Replays a recorded brightness trace, reconstructing per-sample `dt`
/// from the recorded timestamps.
pub struct TraceSource {
    records: Vec<SampleRecord>,
    index: usize,
    last_ns: Option<u64>,
}

impl TraceSource {
    /// Replay the given records in order.
    pub fn from_records(records: Vec<SampleRecord>) -> Self {
        Self {
            records,
            index: 0,
            last_ns: None,
        }
    }

    /// Load a JSONL trace file and replay it.
    pub fn load(path: impl AsRef<Path>) -> PulsecamResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| PulsecamError::FileNotFound {
            path: path.to_path_buf(),
        })?;
        let records = parse_records(&content)
            .map_err(|e| PulsecamError::trace(format!("Failed to parse trace: {e}")))?;
        Ok(Self::from_records(records))
    }

    /// Whether every record has been replayed.
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.records.len()
    }

    /// Total records in the trace.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the trace holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SampleSource for TraceSource {
    fn poll(&mut self) -> PulsecamResult<Option<Sample>> {
        let Some(record) = self.records.get(self.index) else {
            return Ok(None);
        };
        self.index += 1;

        let dt = match self.last_ns {
            Some(last) => MonitorClock::ns_to_secs(record.timestamp_ns.saturating_sub(last)),
            None => record.timestamp_secs(),
        };
        self.last_ns = Some(record.timestamp_ns);

        Ok(Some(Sample::new(record.brightness, dt)))
    }

    fn name(&self) -> &str {
        "trace"
    }

    fn is_available(&self) -> bool {
        !self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsecam_processing_core::peaks::count_peaks;

    #[test]
    fn test_waveform_period() {
        // 1 Hz wave sampled at 60 fps over 5 seconds: five maxima.
        let source = SyntheticPulseSource::new(60, 1.0);
        let values: Vec<f64> = (0..300)
            .map(|i| source.brightness_at(i as f64 / 60.0))
            .collect();
        assert_eq!(count_peaks(&values), 5);
    }

    #[test]
    fn test_waveform_stays_around_baseline() {
        let source = SyntheticPulseSource::with_profile(60, 1.2, 100.0, 10.0);
        for i in 0..600 {
            let b = source.brightness_at(i as f64 / 60.0);
            assert!((90.0..=110.0).contains(&b));
        }
    }

    #[test]
    fn test_trace_source_replays_in_order() {
        let records = vec![
            SampleRecord::new(0, 110.0),
            SampleRecord::new(16_666_666, 115.0),
            SampleRecord::new(33_333_332, 108.0),
        ];
        let mut source = TraceSource::from_records(records);

        let first = source.poll().unwrap().unwrap();
        assert_eq!(first.brightness, 110.0);
        assert_eq!(first.dt, 0.0);

        let second = source.poll().unwrap().unwrap();
        assert_eq!(second.brightness, 115.0);
        assert!((second.dt - 0.016_666_666).abs() < 1e-6);

        let third = source.poll().unwrap().unwrap();
        assert_eq!(third.brightness, 108.0);

        assert!(source.is_exhausted());
        assert!(source.poll().unwrap().is_none());
    }

    #[test]
    fn test_empty_trace_is_unavailable() {
        let source = TraceSource::from_records(vec![]);
        assert!(!source.is_available());
        assert!(source.is_exhausted());
    }
}
