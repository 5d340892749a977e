//! The evaluation pipeline: one pass per incoming sample.
//!
//! Each cycle pushes the sample into the rolling buffer and, once the
//! minimum fill is reached, scans for peaks, estimates BPM, classifies
//! the tier, records history, and advances the alert state machine.
//! Under-filled cycles and malformed samples are no-ops, never errors.

use serde::Serialize;

use pulsecam_signal_model::{AlertColor, AlertTier, BpmReading, Sample};

use crate::alert::AlertStateMachine;
use crate::buffer::{RollingBuffer, DEFAULT_CAPACITY};
use crate::estimator::{estimate_bpm, MIN_SAMPLES};
use crate::history::{HistoryTracker, DEFAULT_HISTORY};
use crate::peaks::count_peaks;

/// Configuration for the evaluation pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Sample window capacity.
    pub buffer_capacity: usize,

    /// Minimum buffer fill before estimates are produced.
    pub min_samples: usize,

    /// Number of accepted readings retained for trend display.
    pub history_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_CAPACITY,
            min_samples: MIN_SAMPLES,
            history_capacity: DEFAULT_HISTORY,
        }
    }
}

/// Result of one accepted evaluation cycle.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Evaluation {
    /// The heart-rate estimate produced this cycle.
    pub reading: BpmReading,

    /// Severity tier for the estimate.
    pub tier: AlertTier,

    /// Whether this cycle crossed into High and the spoken alert fires.
    pub alert_fired: bool,
}

/// Outcome of feeding one sample through the pipeline.
#[derive(Debug, Clone, Copy)]
pub enum CycleOutcome {
    /// The sample had a non-finite brightness and was not admitted.
    Discarded,

    /// The sample was buffered but the window is still below the
    /// minimum fill; no estimate is produced.
    Buffering { filled: usize },

    /// A full evaluation ran.
    Evaluated(Evaluation),
}

/// Copy-on-read view of the pipeline for display consumers.
///
/// Before the first accepted reading all value fields are absent (the
/// UI renders a "measuring" state).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineSnapshot {
    /// Latest BPM estimate, absent until the window first fills.
    pub bpm: Option<u32>,

    /// Severity tier of the latest estimate.
    pub tier: Option<AlertTier>,

    /// User-facing status message for the tier.
    pub message: Option<&'static str>,

    /// Display color for the tier.
    pub color: Option<AlertColor>,

    /// Accepted readings, oldest first.
    pub history: Vec<u32>,
}

/// The stateful rPPG pipeline, driven by one producer in arrival order.
#[derive(Debug, Clone)]
pub struct PulsePipeline {
    config: PipelineConfig,
    buffer: RollingBuffer,
    history: HistoryTracker,
    alerts: AlertStateMachine,
    elapsed_secs: f64,
    latest: Option<Evaluation>,
}

impl PulsePipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        let buffer = RollingBuffer::new(config.buffer_capacity);
        let history = HistoryTracker::new(config.history_capacity);
        Self {
            config,
            buffer,
            history,
            alerts: AlertStateMachine::new(),
            elapsed_secs: 0.0,
            latest: None,
        }
    }

    /// Create a pipeline with the default 60/30/10 configuration.
    pub fn with_defaults() -> Self {
        Self::new(PipelineConfig::default())
    }

    /// Feed one sample through a full evaluation cycle.
    pub fn ingest(&mut self, sample: Sample) -> CycleOutcome {
        if !sample.is_valid() {
            tracing::debug!(brightness = sample.brightness, "Discarding malformed sample");
            return CycleOutcome::Discarded;
        }

        self.elapsed_secs += sample.dt;
        self.buffer.push(sample);

        if self.buffer.len() < self.config.min_samples {
            return CycleOutcome::Buffering {
                filled: self.buffer.len(),
            };
        }

        let peaks = count_peaks(&self.buffer.brightness_values());
        let bpm = estimate_bpm(peaks, self.buffer.len());
        let tier = AlertTier::from_bpm(bpm);
        let alert_fired = self.alerts.observe(tier);

        let evaluation = Evaluation {
            reading: BpmReading::new(bpm, self.elapsed_secs),
            tier,
            alert_fired,
        };

        self.history.push(bpm);
        self.latest = Some(evaluation);

        CycleOutcome::Evaluated(evaluation)
    }

    /// Latest accepted evaluation, if any.
    pub fn latest(&self) -> Option<Evaluation> {
        self.latest
    }

    /// Current display view.
    pub fn snapshot(&self) -> PipelineSnapshot {
        match self.latest {
            Some(eval) => PipelineSnapshot {
                bpm: Some(eval.reading.bpm),
                tier: Some(eval.tier),
                message: Some(eval.tier.message()),
                color: Some(eval.tier.color()),
                history: self.history.values(),
            },
            None => PipelineSnapshot::default(),
        }
    }

    /// Number of samples currently buffered.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Seconds of samples ingested so far (sum of per-sample `dt`).
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(brightness: f64) -> Sample {
        Sample::new(brightness, 1.0 / 60.0)
    }

    /// Repeating low/high/rebound triples: one clean peak per period.
    fn pulse_wave(len: usize) -> Vec<Sample> {
        (0..len)
            .map(|i| match i % 3 {
                0 => frame(100.0),
                1 => frame(130.0),
                _ => frame(110.0),
            })
            .collect()
    }

    #[test]
    fn test_no_estimate_below_minimum_fill() {
        let mut pipeline = PulsePipeline::with_defaults();
        for (i, sample) in pulse_wave(29).into_iter().enumerate() {
            match pipeline.ingest(sample) {
                CycleOutcome::Buffering { filled } => assert_eq!(filled, i + 1),
                other => panic!("expected buffering outcome, got {other:?}"),
            }
        }
        let snapshot = pipeline.snapshot();
        assert_eq!(snapshot.bpm, None);
        assert_eq!(snapshot.tier, None);
        assert!(snapshot.history.is_empty());
    }

    #[test]
    fn test_malformed_sample_is_discarded() {
        let mut pipeline = PulsePipeline::with_defaults();
        for sample in pulse_wave(10) {
            pipeline.ingest(sample);
        }
        let before = pipeline.buffered();

        assert!(matches!(
            pipeline.ingest(Sample::new(f64::NAN, 1.0 / 60.0)),
            CycleOutcome::Discarded
        ));
        assert_eq!(pipeline.buffered(), before);
    }

    #[test]
    fn test_first_evaluation_at_minimum_fill() {
        let mut pipeline = PulsePipeline::with_defaults();
        let mut evaluations = 0;
        for sample in pulse_wave(30) {
            if let CycleOutcome::Evaluated(eval) = pipeline.ingest(sample) {
                evaluations += 1;
                // 10 peaks over 30 samples: round(10/30*60) = 20
                assert_eq!(eval.reading.bpm, 20);
                assert_eq!(eval.tier, AlertTier::Normal);
                assert!(!eval.alert_fired);
            }
        }
        assert_eq!(evaluations, 1);
    }

    #[test]
    fn test_history_tracks_accepted_readings_only() {
        let mut pipeline = PulsePipeline::with_defaults();
        for sample in pulse_wave(35) {
            pipeline.ingest(sample);
        }
        // Six evaluations ran (fills 30..=35); all recorded.
        assert_eq!(pipeline.snapshot().history.len(), 6);
    }

    #[test]
    fn test_snapshot_mirrors_latest_evaluation() {
        let mut pipeline = PulsePipeline::with_defaults();
        for sample in pulse_wave(30) {
            pipeline.ingest(sample);
        }
        let snapshot = pipeline.snapshot();
        assert_eq!(snapshot.bpm, Some(20));
        assert_eq!(snapshot.tier, Some(AlertTier::Normal));
        assert_eq!(snapshot.color, Some(pulsecam_signal_model::AlertColor::Green));
        assert_eq!(snapshot.message, Some(AlertTier::Normal.message()));
        assert_eq!(snapshot.history, vec![20]);
    }

    #[test]
    fn test_elapsed_accumulates_dt() {
        let mut pipeline = PulsePipeline::with_defaults();
        for sample in pulse_wave(30) {
            pipeline.ingest(sample);
        }
        assert!((pipeline.elapsed_secs() - 0.5).abs() < 1e-9);
    }
}
