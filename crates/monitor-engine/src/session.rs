//! Monitoring session management.
//!
//! A session owns the sampling loop: it polls the sample source once per
//! frame, feeds the pipeline, publishes display snapshots, delivers the
//! one-shot alert, and optionally records the brightness trace. The loop
//! runs as an explicit tokio task with a stop flag, started and stopped
//! deterministically.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use pulsecam_common::clock::MonitorClock;
use pulsecam_common::error::{PulsecamError, PulsecamResult};
use pulsecam_processing_core::{CycleOutcome, PipelineConfig, PipelineSnapshot, PulsePipeline};
use pulsecam_signal_model::{SampleRecord, TraceHeader};

use crate::sink::{AlertSink, SpeechAlert};
use crate::writer::TraceWriter;
use crate::SampleSource;

/// Configuration for starting a monitoring session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Target sampling rate (Hz).
    pub fps: u32,

    /// Side length of the square brightness region, recorded in the
    /// trace header.
    pub roi_size: u32,

    /// Where to record the brightness trace, if anywhere.
    pub trace_path: Option<PathBuf>,

    /// Pipeline window parameters.
    pub pipeline: PipelineConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            roi_size: 50,
            trace_path: None,
            pipeline: PipelineConfig::default(),
        }
    }
}

/// State of a monitoring session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Session created but not started.
    Idle,
    /// Sampling loop running.
    Running,
    /// Loop stopped, stats finalized.
    Stopped,
}

/// Counters from a finished sampling loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct SamplingStats {
    /// Samples admitted to the pipeline.
    pub samples: u64,

    /// Evaluation cycles that produced a reading.
    pub evaluations: u64,

    /// Spoken alerts delivered.
    pub alerts: u64,

    /// Malformed samples discarded.
    pub discarded: u64,
}

/// A monitoring session that coordinates the sampling loop.
pub struct MonitorSession {
    config: SessionConfig,
    state: SessionState,
    clock: Option<MonitorClock>,
    stop_flag: Arc<AtomicBool>,
    snapshot: Arc<RwLock<PipelineSnapshot>>,
    task: Option<tokio::task::JoinHandle<PulsecamResult<SamplingStats>>>,
}

impl MonitorSession {
    /// Create a new session with the given configuration.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
            clock: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
            snapshot: Arc::new(RwLock::new(PipelineSnapshot::default())),
            task: None,
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Start the sampling loop over the given source and alert sink.
    pub fn start(
        &mut self,
        source: Box<dyn SampleSource>,
        sink: Box<dyn AlertSink>,
    ) -> PulsecamResult<()> {
        if self.state != SessionState::Idle {
            return Err(PulsecamError::session("Session already started"));
        }
        if !source.is_available() {
            return Err(PulsecamError::source(format!(
                "Sample source '{}' is not available",
                source.name()
            )));
        }

        let clock = MonitorClock::start();
        tracing::info!(
            source = %source.name(),
            fps = self.config.fps,
            epoch_wall = %clock.epoch_wall(),
            "Starting monitoring session"
        );

        let writer = match &self.config.trace_path {
            Some(path) => {
                let header = TraceHeader {
                    schema_version: "1.0".to_string(),
                    epoch_wall: clock.epoch_wall().to_string(),
                    fps: self.config.fps,
                    roi_width: self.config.roi_size,
                    roi_height: self.config.roi_size,
                };
                let writer = TraceWriter::new(path.clone(), header)?;
                tracing::info!(path = %writer.path().display(), "Recording brightness trace");
                Some(writer)
            }
            None => None,
        };

        self.stop_flag.store(false, Ordering::SeqCst);

        let mut worker = SamplingLoop {
            source,
            sink,
            writer,
            pipeline: PulsePipeline::new(self.config.pipeline.clone()),
            clock: clock.clone(),
            stop_flag: self.stop_flag.clone(),
            snapshot: self.snapshot.clone(),
            stats: SamplingStats::default(),
        };
        self.task = Some(tokio::spawn(async move { worker.run().await }));

        self.clock = Some(clock);
        self.state = SessionState::Running;
        Ok(())
    }

    /// Stop the sampling loop and collect its counters.
    ///
    /// The last published snapshot remains readable after stopping.
    pub async fn stop(&mut self) -> PulsecamResult<SamplingStats> {
        if self.state != SessionState::Running {
            return Err(PulsecamError::session("Session not running"));
        }

        tracing::info!("Stopping monitoring session");
        self.stop_flag.store(true, Ordering::SeqCst);

        let stats = match self.task.take() {
            Some(handle) => match handle.await {
                Ok(Ok(stats)) => stats,
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "Sampling loop exited with error");
                    SamplingStats::default()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Sampling loop join failed");
                    SamplingStats::default()
                }
            },
            None => SamplingStats::default(),
        };

        let elapsed = self.clock.as_ref().map(|c| c.elapsed_secs()).unwrap_or(0.0);
        tracing::info!(
            duration_secs = elapsed,
            samples = stats.samples,
            evaluations = stats.evaluations,
            alerts = stats.alerts,
            "Monitoring stopped"
        );

        self.state = SessionState::Stopped;
        Ok(stats)
    }

    /// Copy-on-read view of the latest pipeline state for display.
    pub fn snapshot(&self) -> PipelineSnapshot {
        self.snapshot
            .read()
            .map(|view| view.clone())
            .unwrap_or_default()
    }

    /// Get a clone of the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Session duration so far.
    pub fn elapsed_secs(&self) -> f64 {
        self.clock.as_ref().map(|c| c.elapsed_secs()).unwrap_or(0.0)
    }
}

/// The per-frame worker owned by the session task.
struct SamplingLoop {
    source: Box<dyn SampleSource>,
    sink: Box<dyn AlertSink>,
    writer: Option<TraceWriter>,
    pipeline: PulsePipeline,
    clock: MonitorClock,
    stop_flag: Arc<AtomicBool>,
    snapshot: Arc<RwLock<PipelineSnapshot>>,
    stats: SamplingStats,
}

impl SamplingLoop {
    /// Run until the stop flag is set. Each cycle completes fully before
    /// the next sample is consumed; samples are evaluated in strict
    /// arrival order.
    async fn run(&mut self) -> PulsecamResult<SamplingStats> {
        tracing::info!(source = %self.source.name(), "Sampling loop started");

        while !self.stop_flag.load(Ordering::Relaxed) {
            match self.source.poll() {
                Ok(Some(sample)) => {
                    let timestamp_ns = self.clock.elapsed_ns();
                    match self.pipeline.ingest(sample) {
                        CycleOutcome::Discarded => {
                            self.stats.discarded += 1;
                        }
                        CycleOutcome::Buffering { filled } => {
                            self.stats.samples += 1;
                            self.record(timestamp_ns, sample.brightness)?;
                            tracing::trace!(filled, "Buffering");
                        }
                        CycleOutcome::Evaluated(eval) => {
                            self.stats.samples += 1;
                            self.stats.evaluations += 1;
                            self.record(timestamp_ns, sample.brightness)?;

                            if eval.alert_fired {
                                self.stats.alerts += 1;
                                self.sink.alert(&SpeechAlert::default());
                            }

                            if let Ok(mut view) = self.snapshot.write() {
                                *view = self.pipeline.snapshot();
                            }
                        }
                    }
                }
                Ok(None) => {
                    // No frame ready this cycle, yield briefly
                    tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Sample source error");
                }
            }
        }

        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        tracing::info!(samples = self.stats.samples, "Sampling loop stopped");
        Ok(self.stats)
    }

    fn record(&mut self, timestamp_ns: u64, brightness: f64) -> PulsecamResult<()> {
        if let Some(ref mut writer) = self.writer {
            writer.write_record(&SampleRecord::new(timestamp_ns, brightness))?;
        }
        Ok(())
    }
}
